//! Type tags identifying item kinds.

use std::fmt;

/// A small value identifying an item kind.
///
/// Every item in a [`MultiTypeModel`](super::MultiTypeModel) reports a tag,
/// and every registered [`ContainerFactory`](super::ContainerFactory) builds
/// containers for exactly one tag. Tags compare by value.
///
/// Enums make convenient tag sources:
///
/// ```
/// use horizon_multitype::model::TypeTag;
///
/// #[derive(Clone, Copy)]
/// enum Row {
///     Message,
///     Divider,
/// }
///
/// impl From<Row> for TypeTag {
///     fn from(row: Row) -> Self {
///         TypeTag::new(row as u32)
///     }
/// }
///
/// assert_eq!(TypeTag::from(Row::Divider), TypeTag::new(1));
/// assert_ne!(TypeTag::from(Row::Message), TypeTag::from(Row::Divider));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeTag(u32);

impl TypeTag {
    /// Creates a tag from its raw value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value of this tag.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TypeTag {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {}", self.0)
    }
}
