//! Logging facilities for Horizon Multitype.
//!
//! Horizon Multitype uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_multitype=trace")
//!         .init();
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`], so subsystems can be
//! filtered independently.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_multitype_core::signal";
    /// Thread affinity target.
    pub const THREAD: &str = "horizon_multitype_core::thread";
    /// List model target (mutations, binding, container creation).
    pub const MODEL: &str = "horizon_multitype::model";
    /// Type registry target.
    pub const REGISTRY: &str = "horizon_multitype::registry";
    /// Spans around batch operations.
    pub const PERF: &str = "horizon_multitype::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Batch model operations (`add_all`, `remove_all_of`, `clear`) run inside
/// one of these, so every notification they emit nests under a single span.
#[derive(Debug)]
pub struct PerfSpan {
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation);
        Self {
            span: span.entered(),
        }
    }

    /// The entered span.
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }
}
