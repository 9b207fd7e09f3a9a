// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run-scoped cancellation and deadlines.
//!
//! A [`RunContext`] carries an optional deadline and a cancellation flag.
//! Children derived with [`RunContext::with_timeout`] never outlive their
//! parent: their deadline is clamped to the parent's, and cancelling the
//! parent cancels every child.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Why a context is no longer live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    /// The context (or an ancestor) was cancelled explicitly.
    #[error("context canceled")]
    Canceled,
    /// The context's deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Debug)]
struct Inner {
    deadline: Option<Instant>,
    cancelled: AtomicBool,
    parent: Option<RunContext>,
}

/// Cancellation and deadline handle shared by a run and its checks.
///
/// Cloning is cheap and clones observe the same state.
#[derive(Debug, Clone)]
pub struct RunContext {
    inner: Arc<Inner>,
}

impl RunContext {
    /// A context with no deadline that is never cancelled unless asked.
    pub fn background() -> Self {
        Self {
            inner: Arc::new(Inner {
                deadline: None,
                cancelled: AtomicBool::new(false),
                parent: None,
            }),
        }
    }

    /// Derive a child that expires after `timeout` or with its parent,
    /// whichever comes first.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let own = Instant::now().checked_add(timeout);
        let deadline = match (own, self.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self {
            inner: Arc::new(Inner {
                deadline,
                cancelled: AtomicBool::new(false),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Cancel this context and every child derived from it.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
    }

    /// Effective deadline (already clamped to ancestors).
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Time left before the deadline, `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline()
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// True if this context or any ancestor was cancelled.
    pub fn is_cancelled(&self) -> bool {
        let mut current = Some(self);
        while let Some(ctx) = current {
            if ctx.inner.cancelled.load(Ordering::SeqCst) {
                return true;
            }
            current = ctx.inner.parent.as_ref();
        }
        false
    }

    /// True once this context's effective deadline has passed.
    pub fn deadline_exceeded(&self) -> bool {
        self.deadline().is_some_and(|d| Instant::now() >= d)
    }

    /// Reason the context is done, or `None` while it is still live.
    ///
    /// Cancellation wins over an expired deadline.
    pub fn err(&self) -> Option<ContextError> {
        if self.is_cancelled() {
            Some(ContextError::Canceled)
        } else if self.deadline_exceeded() {
            Some(ContextError::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Shorthand for cooperative loops: `ctx.check()?`.
    pub fn check(&self) -> Result<(), ContextError> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
