//! Core plumbing for Horizon Multitype.
//!
//! This crate provides the pieces the list model is built on:
//!
//! - **Signal/Slot System**: synchronous, type-safe change notification
//! - **Thread Affinity**: the [`ThreadGuard`] capability and its default
//!   implementations
//! - **Logging**: `tracing` targets and the batch-operation `PerfSpan`
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_multitype_core::Signal;
//!
//! let item_removed = Signal::<usize>::new();
//!
//! let conn_id = item_removed.connect(|position| {
//!     println!("Item removed at {}", position);
//! });
//!
//! item_removed.emit(2);
//! item_removed.disconnect(conn_id);
//! ```
//!
//! # Thread Guard Example
//!
//! ```
//! use horizon_multitype_core::{ThreadAffinity, ThreadGuard};
//!
//! let guard = ThreadAffinity::current();
//! assert!(guard.is_owning_context());
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod thread_check;

pub use error::{SignalError, ThreadError};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::{MainThreadGuard, ThreadAffinity, ThreadGuard};
