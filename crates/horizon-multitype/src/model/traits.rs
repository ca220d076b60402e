//! The surface the rendering layer uses to materialize rows.

use crate::error::Result;

use super::change::ModelSignals;
use super::container::ContainerHandle;
use super::type_tag::TypeTag;

/// Everything a rendering layer needs to display and refresh rows.
///
/// Hosts are written against this trait rather than a concrete model, so a
/// list widget can be driven by [`MultiTypeModel`](super::MultiTypeModel) or
/// by a test double.
///
/// The expected flow, after each [`ModelChange`](super::ModelChange):
///
/// 1. read [`item_count`](Self::item_count);
/// 2. for every visible position, read [`item_type_tag`](Self::item_type_tag);
/// 3. reuse a container with that tag or build one with
///    [`create_container`](Self::create_container);
/// 4. [`bind`](Self::bind) the position into it.
pub trait ItemSource<P: ?Sized = ()> {
    /// Current number of items, footer included.
    fn item_count(&self) -> Result<usize>;

    /// The tag of the item at `position`.
    fn item_type_tag(&self, position: usize) -> Result<TypeTag>;

    /// Build an empty container for `tag`.
    fn create_container(&self, tag: TypeTag, parent: &P) -> Result<ContainerHandle>;

    /// Populate `container` with the item at `position`.
    fn bind(&self, position: usize, container: &mut ContainerHandle) -> Result<()>;

    /// Forward the host's "entered view" hook to the container.
    ///
    /// Returns `true` if the container implements
    /// [`ViewLifecycle`](super::ViewLifecycle).
    fn container_attached(&self, container: &mut ContainerHandle) -> Result<bool>;

    /// Forward the host's "left view" hook to the container.
    fn container_detached(&self, container: &mut ContainerHandle) -> Result<bool>;

    /// The signals the host subscribes to for change notifications.
    fn signals(&self) -> &ModelSignals;
}
