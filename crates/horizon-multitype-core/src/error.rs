//! Error types for Horizon Multitype core plumbing.

use std::thread::ThreadId;

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("Invalid or disconnected connection ID")]
    InvalidConnection,
}

/// Thread affinity errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThreadError {
    /// An operation ran on a thread other than the one an affinity is bound to.
    #[error("Accessed from thread {current:?}, but bound to thread {expected:?}")]
    WrongThread {
        expected: ThreadId,
        current: ThreadId,
    },

    /// `set_main_thread` was called from a second thread.
    #[error("Main thread already registered as {registered:?}; refused registration from {current:?}")]
    MainThreadAlreadySet {
        registered: ThreadId,
        current: ThreadId,
    },
}
