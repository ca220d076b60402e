//! The type registry: an immutable map from [`TypeTag`] to container factory.

use std::collections::HashMap;
use std::fmt;

use horizon_multitype_core::logging::targets;

use super::container::{ContainerHandle, ContainerType, ErasedFactory};
use super::type_tag::TypeTag;

/// Immutable map from tag to the factory that builds containers for it.
///
/// Built once, when a [`MultiTypeModel`](super::MultiTypeModel) is built, from
/// the factories registered on the builder. If two factories report the same
/// tag, the one registered last wins. Lookups are O(1) amortized.
pub struct TypeRegistry<P: ?Sized = ()> {
    factories: HashMap<TypeTag, Box<dyn ErasedFactory<P>>>,
}

impl<P: ?Sized> TypeRegistry<P> {
    pub(crate) fn new(factories: Vec<Box<dyn ErasedFactory<P>>>) -> Self {
        let mut map: HashMap<TypeTag, Box<dyn ErasedFactory<P>>> =
            HashMap::with_capacity(factories.len());

        for factory in factories {
            let tag = factory.type_tag();
            let container = factory.container_type();
            if let Some(shadowed) = map.insert(tag, factory) {
                tracing::warn!(
                    target: targets::REGISTRY,
                    %tag,
                    replaced = shadowed.container_type().name(),
                    by = container.name(),
                    "factory registered twice for the same tag, last registration wins"
                );
            }
        }

        tracing::debug!(target: targets::REGISTRY, factory_count = map.len(), "type registry built");
        Self { factories: map }
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no factories are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Returns `true` if a factory is registered for `tag`.
    pub fn contains(&self, tag: TypeTag) -> bool {
        self.factories.contains_key(&tag)
    }

    /// All registered tags, in ascending order.
    pub fn tags(&self) -> Vec<TypeTag> {
        let mut tags: Vec<TypeTag> = self.factories.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// The type name of the container built for `tag`.
    pub fn container_type_name(&self, tag: TypeTag) -> Option<&'static str> {
        self.container_type(tag).map(|ty| ty.name())
    }

    pub(crate) fn get(&self, tag: TypeTag) -> Option<&dyn ErasedFactory<P>> {
        self.factories.get(&tag).map(|factory| factory.as_ref())
    }

    pub(crate) fn container_type(&self, tag: TypeTag) -> Option<ContainerType> {
        self.get(tag).map(|factory| factory.container_type())
    }

    /// Build a container for `tag`, or `None` if the tag is unregistered.
    pub(crate) fn create(&self, tag: TypeTag, parent: &P) -> Option<ContainerHandle> {
        self.get(tag)
            .map(|factory| ContainerHandle::new(tag, factory.create_erased(parent)))
    }
}

impl<P: ?Sized> fmt::Debug for TypeRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for tag in self.tags() {
            map.entry(&tag, &self.container_type_name(tag).unwrap_or("?"));
        }
        map.finish()
    }
}
