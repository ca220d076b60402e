//! Thread affinity verification for Horizon Multitype.
//!
//! List models are confined to one owning thread (normally the UI thread).
//! Rather than consulting process-wide state from inside model logic, a model
//! receives a [`ThreadGuard`] value at construction and asks it, on every
//! public call, whether the caller is on the owning context.
//!
//! # Provided Guards
//!
//! - [`ThreadAffinity`]: owns the thread it was captured on. This is the
//!   default guard used by model builders.
//! - [`MainThreadGuard`]: owns whichever thread the host registered with
//!   [`set_main_thread`] at startup.
//! - Any `Fn() -> bool + Send + Sync` closure, handy in tests.
//!
//! ```
//! use horizon_multitype_core::thread_check::{ThreadAffinity, ThreadGuard};
//!
//! let affinity = ThreadAffinity::current();
//! assert!(affinity.is_owning_context());
//!
//! let moved = std::thread::spawn(move || affinity.is_owning_context())
//!     .join()
//!     .unwrap();
//! assert!(!moved);
//! ```

use std::sync::OnceLock;
use std::thread::ThreadId;

use crate::error::ThreadError;
use crate::logging::targets;

/// Capability answering "is the calling thread the owning context?".
///
/// Implementations must be cheap; the answer is requested on every public
/// model call.
pub trait ThreadGuard: Send + Sync {
    /// Returns `true` if the current thread is the owning context.
    fn is_owning_context(&self) -> bool;
}

impl<F> ThreadGuard for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_owning_context(&self) -> bool {
        self()
    }
}

/// Global storage for the main thread ID.
static MAIN_THREAD_ID: OnceLock<ThreadId> = OnceLock::new();

/// Register the current thread as the main (UI) thread.
///
/// Call once from the UI thread at startup. Calling it again from the same
/// thread is a no-op; calling it from a different thread is an error and the
/// original registration is kept.
pub fn set_main_thread() -> Result<(), ThreadError> {
    let current = std::thread::current().id();
    match MAIN_THREAD_ID.get_or_init(|| current) {
        &registered if registered == current => {
            tracing::debug!(target: targets::THREAD, thread = ?current, "main thread registered");
            Ok(())
        }
        &registered => Err(ThreadError::MainThreadAlreadySet {
            registered,
            current,
        }),
    }
}

/// Get the main thread ID if it has been registered.
#[inline]
pub fn main_thread_id() -> Option<ThreadId> {
    MAIN_THREAD_ID.get().copied()
}

/// Check if the current thread is the registered main thread.
///
/// Returns `false` if no main thread has been registered yet.
#[inline]
pub fn is_main_thread() -> bool {
    MAIN_THREAD_ID
        .get()
        .is_some_and(|&main_id| std::thread::current().id() == main_id)
}

/// Guard that treats the registered main thread as the owning context.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainThreadGuard;

impl ThreadGuard for MainThreadGuard {
    fn is_owning_context(&self) -> bool {
        is_main_thread()
    }
}

/// Thread affinity tracker.
///
/// Records the thread on which it was created and answers whether later
/// calls happen on that same thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Verify that the current thread matches this affinity.
    pub fn check(&self) -> Result<(), ThreadError> {
        if self.is_same_thread() {
            Ok(())
        } else {
            Err(ThreadError::WrongThread {
                expected: self.thread_id,
                current: std::thread::current().id(),
            })
        }
    }
}

impl ThreadGuard for ThreadAffinity {
    fn is_owning_context(&self) -> bool {
        match self.check() {
            Ok(()) => true,
            Err(error) => {
                tracing::trace!(target: targets::THREAD, %error, "call outside owning thread");
                false
            }
        }
    }
}
