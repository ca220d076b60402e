//! Renderable containers and the factories that build them.
//!
//! A container is whatever the host rendering layer displays for one row
//! (a view holder, a widget, a terminal line buffer). The model never looks
//! inside a container; it only creates containers through the registered
//! [`ContainerFactory`] for a tag and hands them back to item binders.

use std::any::{Any, TypeId};

use super::type_tag::TypeTag;

/// Optional capability for containers that want to know when they enter or
/// leave the visible area.
///
/// The host forwards these hooks through
/// [`MultiTypeModel::container_attached`](super::MultiTypeModel::container_attached)
/// and [`MultiTypeModel::container_detached`](super::MultiTypeModel::container_detached).
pub trait ViewLifecycle {
    /// The container entered the visible area.
    fn on_attached(&mut self);

    /// The container left the visible area.
    fn on_detached(&mut self);
}

/// Trait implemented by every container type a factory can build.
///
/// Containers that implement [`ViewLifecycle`] expose it by overriding
/// [`lifecycle`](ItemContainer::lifecycle):
///
/// ```
/// use horizon_multitype::model::{ItemContainer, ViewLifecycle};
///
/// #[derive(Default)]
/// struct TextRow {
///     text: String,
///     visible: bool,
/// }
///
/// impl ViewLifecycle for TextRow {
///     fn on_attached(&mut self) {
///         self.visible = true;
///     }
///
///     fn on_detached(&mut self) {
///         self.visible = false;
///     }
/// }
///
/// impl ItemContainer for TextRow {
///     fn lifecycle(&mut self) -> Option<&mut dyn ViewLifecycle> {
///         Some(self)
///     }
/// }
/// ```
pub trait ItemContainer: 'static {
    /// Returns the lifecycle capability, if this container has one.
    fn lifecycle(&mut self) -> Option<&mut dyn ViewLifecycle> {
        None
    }
}

/// Capability that constructs empty containers for one [`TypeTag`].
///
/// `P` is the parent context the host passes at creation time (for example
/// the list widget the new row will be placed in). It defaults to `()` for
/// hosts that need none.
pub trait ContainerFactory<P: ?Sized = ()>: Send + Sync + 'static {
    /// The container type this factory builds.
    type Container: ItemContainer;

    /// The tag this factory is registered under.
    fn type_tag(&self) -> TypeTag;

    /// Build a new, empty container.
    fn create(&self, parent: &P) -> Self::Container;
}

/// Identity of a concrete container type, recorded at registration time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContainerType {
    id: TypeId,
    name: &'static str,
}

impl ContainerType {
    pub(crate) fn of<C: ItemContainer>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ContainerType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ContainerType {}

/// Object-safe view of a container, implemented for every [`ItemContainer`].
pub(crate) trait ErasedContainer {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn lifecycle(&mut self) -> Option<&mut dyn ViewLifecycle>;
    fn type_name(&self) -> &'static str;
}

impl<C: ItemContainer> ErasedContainer for C {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn lifecycle(&mut self) -> Option<&mut dyn ViewLifecycle> {
        ItemContainer::lifecycle(self)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<C>()
    }
}

/// Object-safe view of a factory, implemented for every [`ContainerFactory`].
pub(crate) trait ErasedFactory<P: ?Sized>: Send + Sync {
    fn type_tag(&self) -> TypeTag;
    fn container_type(&self) -> ContainerType;
    fn create_erased(&self, parent: &P) -> Box<dyn ErasedContainer>;
}

impl<P: ?Sized, F: ContainerFactory<P>> ErasedFactory<P> for F {
    fn type_tag(&self) -> TypeTag {
        ContainerFactory::type_tag(self)
    }

    fn container_type(&self) -> ContainerType {
        ContainerType::of::<F::Container>()
    }

    fn create_erased(&self, parent: &P) -> Box<dyn ErasedContainer> {
        Box::new(self.create(parent))
    }
}

/// A type-erased [`ContainerFactory`], for registering factories of different
/// concrete types as one ordered collection.
///
/// ```
/// use horizon_multitype::model::{AnyFactory, ContainerFactory, ItemContainer, MultiTypeModel, TypeTag};
///
/// struct Empty;
/// impl ItemContainer for Empty {}
///
/// struct EmptyFactory(u32);
/// impl ContainerFactory for EmptyFactory {
///     type Container = Empty;
///     fn type_tag(&self) -> TypeTag { TypeTag::new(self.0) }
///     fn create(&self, _parent: &()) -> Empty { Empty }
/// }
///
/// let factories: Vec<AnyFactory> = (0..3).map(|n| EmptyFactory(n).into()).collect();
/// let model = MultiTypeModel::builder().factories(factories).build();
/// assert_eq!(model.registry().len(), 3);
/// ```
pub struct AnyFactory<P: ?Sized = ()> {
    inner: Box<dyn ErasedFactory<P>>,
}

impl<P: ?Sized> AnyFactory<P> {
    /// Erase a factory.
    pub fn new<F: ContainerFactory<P>>(factory: F) -> Self {
        Self {
            inner: Box::new(factory),
        }
    }

    /// The tag the wrapped factory is registered under.
    pub fn type_tag(&self) -> TypeTag {
        self.inner.type_tag()
    }

    pub(crate) fn into_inner(self) -> Box<dyn ErasedFactory<P>> {
        self.inner
    }
}

impl<P: ?Sized, F: ContainerFactory<P>> From<F> for AnyFactory<P> {
    fn from(factory: F) -> Self {
        Self::new(factory)
    }
}

impl<P: ?Sized> std::fmt::Debug for AnyFactory<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyFactory")
            .field("tag", &self.type_tag())
            .field("container", &self.inner.container_type().name())
            .finish()
    }
}

/// A container created by the model, tagged with the type it was built for.
///
/// The host keeps the handle for as long as the row is on screen, passes it
/// to [`MultiTypeModel::bind`](super::MultiTypeModel::bind) whenever the row
/// shows a new position, and reaches its concrete container through
/// [`downcast_ref`](Self::downcast_ref) / [`downcast_mut`](Self::downcast_mut)
/// to place it on screen.
pub struct ContainerHandle {
    tag: TypeTag,
    inner: Box<dyn ErasedContainer>,
}

impl ContainerHandle {
    pub(crate) fn new(tag: TypeTag, inner: Box<dyn ErasedContainer>) -> Self {
        Self { tag, inner }
    }

    /// The tag this container was created for.
    #[inline]
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// The type name of the concrete container.
    pub fn container_type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Borrow the concrete container, if it is a `C`.
    pub fn downcast_ref<C: ItemContainer>(&self) -> Option<&C> {
        self.inner.as_any().downcast_ref::<C>()
    }

    /// Mutably borrow the concrete container, if it is a `C`.
    pub fn downcast_mut<C: ItemContainer>(&mut self) -> Option<&mut C> {
        self.inner.as_any_mut().downcast_mut::<C>()
    }

    /// Whether the container implements [`ViewLifecycle`].
    pub fn has_lifecycle(&mut self) -> bool {
        self.inner.lifecycle().is_some()
    }

    pub(crate) fn as_any_mut(&mut self) -> &mut dyn Any {
        self.inner.as_any_mut()
    }

    pub(crate) fn notify_attached(&mut self) -> bool {
        match self.inner.lifecycle() {
            Some(lifecycle) => {
                lifecycle.on_attached();
                true
            }
            None => false,
        }
    }

    pub(crate) fn notify_detached(&mut self) -> bool {
        match self.inner.lifecycle() {
            Some(lifecycle) => {
                lifecycle.on_detached();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ContainerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerHandle")
            .field("tag", &self.tag)
            .field("container", &self.container_type_name())
            .finish()
    }
}
