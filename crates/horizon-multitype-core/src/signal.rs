//! Synchronous signal/slot system for Horizon Multitype.
//!
//! A [`Signal<Args>`] holds a set of connected slots (closures). Emitting the
//! signal invokes every connected slot, in connection order, on the emitting
//! thread before `emit` returns. There is no queued or deferred delivery:
//! models in this workspace are confined to one owning thread, so every
//! notification is observed in call order.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Example
//!
//! ```
//! use horizon_multitype_core::Signal;
//!
//! let count_changed = Signal::<usize>::new();
//!
//! let conn_id = count_changed.connect(|count| {
//!     println!("Item count is now {}", count);
//! });
//!
//! count_changed.emit(3);
//! count_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(usize, usize)` for multiple arguments.
///
/// # Re-entrancy
///
/// Slots are cloned out of the connection table before they run, so a slot
/// may connect or disconnect (including itself) without deadlocking. Such
/// changes take effect from the next emission.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect a slot, reporting an unknown ID as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots directly.
    ///
    /// Returns the number of slots invoked (0 when blocked).
    #[tracing::instrument(skip_all, target = "horizon_multitype_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) -> usize {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return 0;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`]. The guard borrows the signal, so the
/// borrow checker guarantees the signal outlives it.
///
/// # Example
///
/// ```
/// use horizon_multitype_core::Signal;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<usize>::new();
/// let total = Arc::new(AtomicUsize::new(0));
/// {
///     let total = total.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         total.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(total.load(Ordering::SeqCst), 42);
/// ```
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    /// A ranged edit payload like the ones list models emit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Edit {
        Inserted { first: usize, count: usize },
        Removed { first: usize, count: usize },
        Reset,
    }

    fn recorder(signal: &Signal<Edit>) -> (ConnectionId, Arc<Mutex<Vec<Edit>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recv = seen.clone();
        let id = signal.connect(move |edit| recv.lock().push(*edit));
        (id, seen)
    }

    #[test]
    fn test_emit_reports_slots_invoked() {
        let signal = Signal::<Edit>::new();
        assert_eq!(signal.emit(Edit::Reset), 0);

        let (first, seen) = recorder(&signal);
        let (_second, _) = recorder(&signal);
        assert_eq!(signal.emit(Edit::Inserted { first: 0, count: 2 }), 2);

        assert!(signal.disconnect(first));
        assert_eq!(signal.emit(Edit::Removed { first: 1, count: 1 }), 1);

        assert_eq!(*seen.lock(), vec![Edit::Inserted { first: 0, count: 2 }]);
    }

    #[test]
    fn test_payloads_arrive_in_emit_order() {
        let signal = Signal::<Edit>::new();
        let (_, seen) = recorder(&signal);

        let edits = [
            Edit::Inserted { first: 0, count: 3 },
            Edit::Removed { first: 2, count: 1 },
            Edit::Removed { first: 0, count: 1 },
            Edit::Reset,
        ];
        for edit in edits {
            signal.emit(edit);
        }

        assert_eq!(*seen.lock(), edits);
    }

    #[test]
    fn test_disconnect_is_reported_once() {
        let signal = Signal::<Edit>::new();
        let (id, _) = recorder(&signal);

        assert_eq!(signal.try_disconnect(id), Ok(()));
        assert!(!signal.disconnect(id));
        assert_eq!(signal.try_disconnect(id), Err(SignalError::InvalidConnection));
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_signal_skips_slots() {
        let signal = Signal::<Edit>::new();
        let (_, seen) = recorder(&signal);

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        assert_eq!(signal.emit(Edit::Reset), 0);
        assert!(seen.lock().is_empty());

        signal.set_blocked(false);
        assert_eq!(signal.emit(Edit::Reset), 1);
        assert_eq!(*seen.lock(), vec![Edit::Reset]);
    }

    #[test]
    fn test_slot_disconnecting_peer_during_emit() {
        // The peer was connected when the emit started, so it still runs
        // for that emit, and only for that one.
        let signal = Arc::new(Signal::<Edit>::new());
        let peer = Arc::new(Mutex::new(None::<ConnectionId>));

        let sig = signal.clone();
        let target = peer.clone();
        signal.connect(move |_| {
            if let Some(id) = target.lock().take() {
                sig.disconnect(id);
            }
        });
        let (peer_id, seen) = recorder(&signal);
        *peer.lock() = Some(peer_id);

        assert_eq!(signal.emit(Edit::Reset), 2);
        assert_eq!(signal.emit(Edit::Reset), 1);
        assert_eq!(*seen.lock(), vec![Edit::Reset]);
    }

    #[test]
    fn test_slot_connecting_during_emit_runs_next_time() {
        let signal = Arc::new(Signal::<Edit>::new());
        let late_calls = Arc::new(AtomicBool::new(false));

        let sig = signal.clone();
        let late = late_calls.clone();
        let once = AtomicBool::new(false);
        signal.connect(move |_| {
            if !once.swap(true, Ordering::SeqCst) {
                let late = late.clone();
                sig.connect(move |_| late.store(true, Ordering::SeqCst));
            }
        });

        assert_eq!(signal.emit(Edit::Reset), 1);
        assert!(!late_calls.load(Ordering::SeqCst));
        assert_eq!(signal.emit(Edit::Reset), 2);
        assert!(late_calls.load(Ordering::SeqCst));
    }

    #[test]
    fn test_scoped_connection_follows_guard() {
        let signal = Signal::<Edit>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let guard_id = {
            let recv = seen.clone();
            let guard = signal.connect_scoped(move |edit| recv.lock().push(*edit));
            assert_eq!(signal.emit(Edit::Inserted { first: 4, count: 1 }), 1);
            guard.id()
        };

        assert_eq!(signal.emit(Edit::Reset), 0);
        assert!(!signal.disconnect(guard_id));
        assert_eq!(*seen.lock(), vec![Edit::Inserted { first: 4, count: 1 }]);
    }

    #[test]
    fn test_disconnect_all_then_reconnect() {
        let signal = Signal::<Edit>::new();
        for _ in 0..3 {
            recorder(&signal);
        }
        signal.disconnect_all();
        assert_eq!(signal.emit(Edit::Reset), 0);

        let (_, seen) = recorder(&signal);
        assert_eq!(signal.connection_count(), 1);
        assert_eq!(signal.emit(Edit::Reset), 1);
        assert_eq!(seen.lock().len(), 1);
    }
}
