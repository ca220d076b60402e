//! Change notifications emitted by the list model.

use horizon_multitype_core::Signal;

/// The shape of a change to a model's sequence.
///
/// Emitted synchronously, after the change has been applied. Indices refer
/// to the sequence as it was just before the change (for removals) or just
/// after it (for insertions and in-place changes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelChange {
    /// The whole sequence may have changed; re-read everything.
    Reset,
    /// `count` items were inserted starting at `first`.
    Inserted { first: usize, count: usize },
    /// `count` items were removed starting at `first`.
    Removed { first: usize, count: usize },
    /// The item at `index` was replaced; the item count did not change.
    Changed { index: usize },
}

impl ModelChange {
    /// A single-item insertion at `index`.
    #[inline]
    pub const fn inserted(index: usize) -> Self {
        Self::Inserted {
            first: index,
            count: 1,
        }
    }

    /// A single-item removal at `index`.
    #[inline]
    pub const fn removed(index: usize) -> Self {
        Self::Removed {
            first: index,
            count: 1,
        }
    }

    /// Applies this change to a previously known item count.
    ///
    /// Returns `None` for [`ModelChange::Reset`], after which the count must be
    /// read from the model again.
    pub fn apply_to_count(&self, count: usize) -> Option<usize> {
        match *self {
            Self::Reset => None,
            Self::Inserted { count: n, .. } => Some(count + n),
            Self::Removed { count: n, .. } => count.checked_sub(n),
            Self::Changed { .. } => Some(count),
        }
    }
}

/// Signals emitted by a [`MultiTypeModel`](super::MultiTypeModel).
///
/// The rendering layer connects to [`changed`](Self::changed) and translates
/// each [`ModelChange`] into visible updates.
#[derive(Debug, Default)]
pub struct ModelSignals {
    /// Emitted after every change to the sequence.
    pub changed: Signal<ModelChange>,
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self::default()
    }
}
