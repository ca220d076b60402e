//! Item binders: the caller-supplied data behind every row.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::container::{ContainerHandle, ContainerType, ItemContainer};
use super::type_tag::TypeTag;

/// Capability implemented by the data items placed in a model.
///
/// A binder reports which kind of row it is and knows how to populate the
/// container built for that kind. The container type is an associated type,
/// so `bind` receives the concrete container directly; the model checks at
/// insertion time that it matches the container the registered factory for
/// the same tag builds.
///
/// # Example
///
/// ```
/// use horizon_multitype::model::{ItemBinder, ItemContainer, TypeTag};
///
/// const MESSAGE: TypeTag = TypeTag::new(0);
///
/// #[derive(Default)]
/// struct MessageRow {
///     text: String,
/// }
///
/// impl ItemContainer for MessageRow {}
///
/// struct Message(String);
///
/// impl ItemBinder for Message {
///     type Container = MessageRow;
///
///     fn type_tag(&self) -> TypeTag {
///         MESSAGE
///     }
///
///     fn bind(&self, row: &mut MessageRow) {
///         row.text.clone_from(&self.0);
///     }
/// }
/// ```
pub trait ItemBinder: Send + Sync + 'static {
    /// The container type this binder populates.
    type Container: ItemContainer;

    /// The kind of row this item is displayed as.
    fn type_tag(&self) -> TypeTag;

    /// Populate `container` with this item's data.
    fn bind(&self, container: &mut Self::Container);
}

/// Object-safe view of a binder, implemented for every [`ItemBinder`].
trait ErasedBinder: Send + Sync {
    fn type_tag(&self) -> TypeTag;
    fn container_type(&self) -> ContainerType;
    fn bind_erased(&self, container: &mut dyn Any) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<B: ItemBinder> ErasedBinder for B {
    fn type_tag(&self) -> TypeTag {
        ItemBinder::type_tag(self)
    }

    fn container_type(&self) -> ContainerType {
        ContainerType::of::<B::Container>()
    }

    fn bind_erased(&self, container: &mut dyn Any) -> bool {
        match container.downcast_mut::<B::Container>() {
            Some(container) => {
                self.bind(container);
                true
            }
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A shared handle to an item in a model.
///
/// Cloning an `Item` is cheap and yields a handle to the same binder.
/// Equality is identity: two handles are equal only if they refer to the
/// same inserted binder, so the same value inserted twice compares equal to
/// itself at both positions.
#[derive(Clone)]
pub struct Item {
    inner: Arc<dyn ErasedBinder>,
}

impl Item {
    /// Wrap a binder in a new item handle.
    pub fn new<B: ItemBinder>(binder: B) -> Self {
        Self {
            inner: Arc::new(binder),
        }
    }

    /// The tag this item reports.
    #[inline]
    pub fn type_tag(&self) -> TypeTag {
        self.inner.type_tag()
    }

    /// Borrow the concrete binder, if it is a `B`.
    pub fn downcast_ref<B: ItemBinder>(&self) -> Option<&B> {
        self.inner.as_any().downcast_ref::<B>()
    }

    /// Returns `true` if both handles refer to the same binder.
    pub fn ptr_eq(&self, other: &Item) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }

    pub(crate) fn container_type(&self) -> ContainerType {
        self.inner.container_type()
    }

    /// Bind into a container handle. Returns `false` if the container is not
    /// the type this binder expects.
    pub(crate) fn bind_into(&self, container: &mut ContainerHandle) -> bool {
        self.inner.bind_erased(container.as_any_mut())
    }
}

impl<B: ItemBinder> From<B> for Item {
    fn from(binder: B) -> Self {
        Self::new(binder)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Item {}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("type_tag", &self.type_tag())
            .field("ptr", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

static_assertions::assert_impl_all!(Item: Send, Sync);
