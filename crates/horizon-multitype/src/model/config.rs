//! Model configuration.

/// How structural changes are reported through
/// [`ModelSignals::changed`](super::ModelSignals::changed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationMode {
    /// Report the exact positions touched by each change.
    #[default]
    Precise,
    /// Report every change as [`ModelChange::Reset`](super::ModelChange::Reset).
    ///
    /// For hosts that cannot apply positional updates.
    Reset,
}

/// Configuration for a [`MultiTypeModel`](super::MultiTypeModel).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelConfig {
    /// Granularity of change notifications.
    pub notification_mode: NotificationMode,
    /// Reject containers that do not implement
    /// [`ViewLifecycle`](super::ViewLifecycle) when they are created.
    pub require_lifecycle: bool,
}

impl ModelConfig {
    /// Configuration that reports every change as a reset.
    pub fn coarse() -> Self {
        Self {
            notification_mode: NotificationMode::Reset,
            ..Default::default()
        }
    }

    /// Sets the notification mode.
    pub fn with_notification_mode(mut self, mode: NotificationMode) -> Self {
        self.notification_mode = mode;
        self
    }

    /// Sets whether containers must implement lifecycle hooks.
    pub fn with_require_lifecycle(mut self, require: bool) -> Self {
        self.require_lifecycle = require;
        self
    }
}
