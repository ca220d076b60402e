//! The heterogeneous list model.
//!
//! `MultiTypeModel` owns an ordered sequence of [`Item`]s of different kinds,
//! an optional footer that is always kept last, and the [`TypeRegistry`] used
//! to build a container for each kind. The rendering layer subscribes to
//! [`ModelSignals::changed`] and calls back through [`ItemSource`].

use std::sync::Arc;

use horizon_multitype_core::logging::{PerfSpan, targets};
use horizon_multitype_core::{ThreadAffinity, ThreadGuard};

use crate::error::{Error, Result};

use super::binder::Item;
use super::change::{ModelChange, ModelSignals};
use super::config::{ModelConfig, NotificationMode};
use super::container::{
    AnyFactory, ContainerFactory, ContainerHandle, ErasedFactory, ViewLifecycle,
};
use super::registry::TypeRegistry;
use super::traits::ItemSource;
use super::type_tag::TypeTag;

/// Log a rejected call and return it as an error.
#[cold]
fn reject<T>(operation: &'static str, error: Error) -> Result<T> {
    tracing::debug!(target: targets::MODEL, operation, %error, "model call rejected");
    Err(error)
}

/// An ordered list of heterogeneous items with a pinned footer.
///
/// Items are added in display order. A footer, once set, stays the last item
/// no matter how many items are added afterwards: every regular insertion
/// lands before it.
///
/// Every public call first asks the model's [`ThreadGuard`] whether it runs
/// on the owning context and fails with [`Error::NotOnOwningThread`], without
/// touching any state, if it does not. The default guard owns the thread that
/// called [`MultiTypeModelBuilder::build`].
///
/// # Example
///
/// ```
/// use horizon_multitype::model::{
///     ContainerFactory, ItemBinder, ItemContainer, MultiTypeModel, TypeTag,
/// };
///
/// const TEXT: TypeTag = TypeTag::new(0);
///
/// #[derive(Default)]
/// struct TextRow(String);
/// impl ItemContainer for TextRow {}
///
/// struct TextFactory;
/// impl ContainerFactory for TextFactory {
///     type Container = TextRow;
///     fn type_tag(&self) -> TypeTag { TEXT }
///     fn create(&self, _parent: &()) -> TextRow { TextRow::default() }
/// }
///
/// struct Text(&'static str);
/// impl ItemBinder for Text {
///     type Container = TextRow;
///     fn type_tag(&self) -> TypeTag { TEXT }
///     fn bind(&self, row: &mut TextRow) { row.0 = self.0.to_string(); }
/// }
///
/// let mut model = MultiTypeModel::builder().factory(TextFactory).build();
/// model.signals().changed.connect(|change| println!("{change:?}"));
///
/// model.add(Text("first")).unwrap();
/// model.set_footer(Text("loading more...")).unwrap();
/// model.add(Text("second")).unwrap();
///
/// assert_eq!(model.item_count().unwrap(), 3);
///
/// let mut row = model.create_container(TEXT, &()).unwrap();
/// model.bind(1, &mut row).unwrap();
/// assert_eq!(row.downcast_ref::<TextRow>().unwrap().0, "second");
/// ```
pub struct MultiTypeModel<P: ?Sized = ()> {
    items: Vec<Item>,
    /// When set, `items.last()` is the footer.
    has_footer: bool,
    registry: TypeRegistry<P>,
    guard: Box<dyn ThreadGuard>,
    signals: Arc<ModelSignals>,
    config: ModelConfig,
}

impl MultiTypeModel {
    /// Creates a builder for a model whose factories take no parent context.
    ///
    /// Use [`MultiTypeModelBuilder::new`] for other parent types.
    pub fn builder() -> MultiTypeModelBuilder {
        MultiTypeModelBuilder::new()
    }
}

impl<P: ?Sized> MultiTypeModel<P> {
    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Adds an item at the end of the regular items, before the footer if one
    /// is set.
    ///
    /// Returns the position the item was placed at.
    pub fn add(&mut self, item: impl Into<Item>) -> Result<usize> {
        self.ensure_owning_context("add")?;
        let item = item.into();
        self.ensure_paired(&item, "add")?;

        let position = self.regular_len();
        self.items.insert(position, item);
        tracing::trace!(target: targets::MODEL, position, count = self.items.len(), "item added");

        self.notify(ModelChange::inserted(position));
        Ok(position)
    }

    /// Inserts an item at `position`.
    ///
    /// `position` must be in `0..=item_count()`. When a footer is set and
    /// `position == item_count()`, the item is placed just before the footer
    /// instead, so the footer is never displaced.
    ///
    /// Returns the position the item was placed at.
    pub fn add_at(&mut self, position: usize, item: impl Into<Item>) -> Result<usize> {
        self.ensure_owning_context("add_at")?;
        let count = self.items.len();
        if position > count {
            return reject("add_at", Error::index_out_of_range(position, count));
        }
        let item = item.into();
        self.ensure_paired(&item, "add_at")?;

        let position = if self.has_footer && position == count {
            count - 1
        } else {
            position
        };
        self.items.insert(position, item);
        tracing::trace!(target: targets::MODEL, position, count = self.items.len(), "item inserted");

        self.notify(ModelChange::inserted(position));
        Ok(position)
    }

    /// Adds every item in order, before the footer if one is set.
    ///
    /// The whole batch is checked before anything is inserted, so a rejected
    /// batch leaves the model untouched. Returns the range of positions the
    /// items now occupy.
    pub fn add_all<I>(&mut self, items: I) -> Result<std::ops::Range<usize>>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        self.ensure_owning_context("add_all")?;
        let _span = PerfSpan::new("add_all");
        let batch: Vec<Item> = items.into_iter().map(Into::into).collect();
        for item in &batch {
            self.ensure_paired(item, "add_all")?;
        }

        let first = self.regular_len();
        let added = batch.len();
        if added == 0 {
            return Ok(first..first);
        }
        self.items.splice(first..first, batch);
        tracing::trace!(target: targets::MODEL, first, added, count = self.items.len(), "items added");

        self.notify(ModelChange::Inserted {
            first,
            count: added,
        });
        Ok(first..first + added)
    }

    /// Sets the footer.
    ///
    /// An existing footer is replaced in place; otherwise the item is appended
    /// and becomes the footer. Returns the replaced footer, if any.
    pub fn set_footer(&mut self, item: impl Into<Item>) -> Result<Option<Item>> {
        self.ensure_owning_context("set_footer")?;
        let item = item.into();
        self.ensure_paired(&item, "set_footer")?;

        if self.has_footer {
            let index = self.items.len() - 1;
            let previous = std::mem::replace(&mut self.items[index], item);
            tracing::trace!(target: targets::MODEL, index, "footer replaced");
            self.notify(ModelChange::Changed { index });
            Ok(Some(previous))
        } else {
            self.items.push(item);
            self.has_footer = true;
            let index = self.items.len() - 1;
            tracing::trace!(target: targets::MODEL, index, "footer set");
            self.notify(ModelChange::inserted(index));
            Ok(None)
        }
    }

    /// Removes the footer, if one is set. Returns the removed footer.
    ///
    /// Does nothing, and emits nothing, when no footer is set.
    pub fn clear_footer(&mut self) -> Result<Option<Item>> {
        self.ensure_owning_context("clear_footer")?;
        Ok(self.take_footer())
    }

    /// Removes the item at `position`, which must be in `0..item_count()`.
    ///
    /// Removing the footer's position is the same as
    /// [`clear_footer`](Self::clear_footer).
    pub fn remove(&mut self, position: usize) -> Result<Item> {
        self.ensure_owning_context("remove")?;
        let count = self.items.len();
        if position >= count {
            return reject("remove", Error::index_out_of_range(position, count));
        }

        if self.has_footer && position == count - 1 {
            if let Some(footer) = self.take_footer() {
                return Ok(footer);
            }
        }

        let item = self.items.remove(position);
        tracing::trace!(target: targets::MODEL, position, count = self.items.len(), "item removed");
        self.notify(ModelChange::removed(position));
        Ok(item)
    }

    /// Removes every item whose tag is `tag`, the footer included.
    ///
    /// Each contiguous run of removed items is reported as one
    /// [`ModelChange::Removed`], last run first, so every reported position is
    /// valid at the moment it is emitted. Returns the number of items removed.
    pub fn remove_all_of(&mut self, tag: TypeTag) -> Result<usize> {
        self.ensure_owning_context("remove_all_of")?;
        let _span = PerfSpan::new("remove_all_of");

        let mut runs = Vec::new();
        let mut run_start = None;
        for (index, item) in self.items.iter().enumerate() {
            match (item.type_tag() == tag, run_start) {
                (true, None) => run_start = Some(index),
                (false, Some(first)) => {
                    runs.push(ModelChange::Removed {
                        first,
                        count: index - first,
                    });
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(first) = run_start {
            runs.push(ModelChange::Removed {
                first,
                count: self.items.len() - first,
            });
        }
        if runs.is_empty() {
            return Ok(0);
        }

        if self.has_footer && self.items.last().is_some_and(|footer| footer.type_tag() == tag) {
            self.has_footer = false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.type_tag() != tag);
        let removed = before - self.items.len();
        tracing::trace!(target: targets::MODEL, %tag, removed, runs = runs.len(), "items of type removed");

        runs.reverse();
        self.notify_all(&runs);
        Ok(removed)
    }

    /// Removes every item and the footer.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_owning_context("clear")?;
        let _span = PerfSpan::new("clear");
        let removed = self.items.len();
        self.items.clear();
        self.has_footer = false;
        tracing::trace!(target: targets::MODEL, removed, "model cleared");

        self.signals.changed.emit(ModelChange::Reset);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// A snapshot of every item in display order, footer last.
    ///
    /// The returned vector is independent of the model: later mutations do
    /// not show through it.
    pub fn binders(&self) -> Result<Vec<Item>> {
        self.ensure_owning_context("binders")?;
        Ok(self.items.clone())
    }

    /// A snapshot of the items whose tag is `tag`, in display order.
    pub fn binders_of(&self, tag: TypeTag) -> Result<Vec<Item>> {
        self.ensure_owning_context("binders_of")?;
        Ok(self
            .items
            .iter()
            .filter(|item| item.type_tag() == tag)
            .cloned()
            .collect())
    }

    /// The item at `position`, or `None` if there is none.
    pub fn binder(&self, position: usize) -> Result<Option<Item>> {
        self.ensure_owning_context("binder")?;
        Ok(self.items.get(position).cloned())
    }

    /// The footer, or `None` if no footer is set.
    pub fn footer(&self) -> Result<Option<Item>> {
        self.ensure_owning_context("footer")?;
        Ok(self.footer_ref().cloned())
    }

    /// Returns `true` if a footer is set.
    pub fn has_footer(&self) -> Result<bool> {
        self.ensure_owning_context("has_footer")?;
        Ok(self.has_footer)
    }

    /// Current number of items, footer included.
    pub fn item_count(&self) -> Result<usize> {
        self.ensure_owning_context("item_count")?;
        Ok(self.items.len())
    }

    /// Returns `true` if the model holds no items and no footer.
    pub fn is_empty(&self) -> Result<bool> {
        self.ensure_owning_context("is_empty")?;
        Ok(self.items.is_empty())
    }

    /// The tag of the item at `position`, which must be in `0..item_count()`.
    pub fn item_type_tag(&self, position: usize) -> Result<TypeTag> {
        self.ensure_owning_context("item_type_tag")?;
        match self.items.get(position) {
            Some(item) => Ok(item.type_tag()),
            None => reject(
                "item_type_tag",
                Error::index_out_of_range(position, self.items.len()),
            ),
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Builds an empty container for `tag` using its registered factory.
    ///
    /// Fails with [`Error::UnknownType`] if no factory is registered for
    /// `tag`, and, when [`ModelConfig::require_lifecycle`] is set, with
    /// [`Error::ContainerCapabilityMismatch`] if the container does not
    /// implement [`ViewLifecycle`].
    pub fn create_container(&self, tag: TypeTag, parent: &P) -> Result<ContainerHandle> {
        self.ensure_owning_context("create_container")?;
        let Some(mut container) = self.registry.create(tag, parent) else {
            return reject("create_container", Error::UnknownType { tag });
        };

        if self.config.require_lifecycle && !container.has_lifecycle() {
            return reject(
                "create_container",
                Error::capability_mismatch(
                    tag,
                    std::any::type_name::<dyn ViewLifecycle>(),
                    container.container_type_name(),
                ),
            );
        }

        tracing::trace!(
            target: targets::MODEL,
            %tag,
            container = container.container_type_name(),
            "container created"
        );
        Ok(container)
    }

    /// Binds the item at `position` into `container`.
    pub fn bind(&self, position: usize, container: &mut ContainerHandle) -> Result<()> {
        self.ensure_owning_context("bind")?;
        let Some(item) = self.items.get(position) else {
            return reject("bind", Error::index_out_of_range(position, self.items.len()));
        };

        let tag = item.type_tag();
        if container.tag() != tag {
            return reject(
                "bind",
                Error::TagMismatch {
                    position,
                    item: tag,
                    container: container.tag(),
                },
            );
        }
        if !item.bind_into(container) {
            return reject(
                "bind",
                Error::capability_mismatch(
                    tag,
                    item.container_type().name(),
                    container.container_type_name(),
                ),
            );
        }

        tracing::trace!(target: targets::MODEL, position, %tag, "item bound");
        Ok(())
    }

    /// Forwards the host's "entered view" hook to the container's
    /// [`ViewLifecycle`], if it has one.
    pub fn container_attached(&self, container: &mut ContainerHandle) -> Result<bool> {
        self.ensure_owning_context("container_attached")?;
        Ok(container.notify_attached())
    }

    /// Forwards the host's "left view" hook to the container's
    /// [`ViewLifecycle`], if it has one.
    pub fn container_detached(&self, container: &mut ContainerHandle) -> Result<bool> {
        self.ensure_owning_context("container_detached")?;
        Ok(container.notify_detached())
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The signals emitted by this model.
    ///
    /// Connecting and disconnecting slots is safe from any thread.
    pub fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    /// A shared handle to this model's signals.
    ///
    /// Useful for holding a [`ConnectionGuard`](horizon_multitype_core::ConnectionGuard)
    /// while the model itself is borrowed mutably.
    pub fn shared_signals(&self) -> Arc<ModelSignals> {
        Arc::clone(&self.signals)
    }

    /// The registry fixed at build time.
    pub fn registry(&self) -> &TypeRegistry<P> {
        &self.registry
    }

    /// The configuration fixed at build time.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    #[inline]
    fn ensure_owning_context(&self, operation: &'static str) -> Result<()> {
        if self.guard.is_owning_context() {
            Ok(())
        } else {
            reject(operation, Error::not_on_owning_thread(operation))
        }
    }

    /// Rejects items whose binder expects a different container than the
    /// factory registered for their tag builds.
    fn ensure_paired(&self, item: &Item, operation: &'static str) -> Result<()> {
        let tag = item.type_tag();
        match self.registry.container_type(tag) {
            Some(expected) if expected != item.container_type() => reject(
                operation,
                Error::capability_mismatch(tag, expected.name(), item.container_type().name()),
            ),
            _ => Ok(()),
        }
    }

    /// Number of items before the footer.
    #[inline]
    fn regular_len(&self) -> usize {
        self.items.len() - usize::from(self.has_footer)
    }

    fn footer_ref(&self) -> Option<&Item> {
        if self.has_footer {
            self.items.last()
        } else {
            None
        }
    }

    fn take_footer(&mut self) -> Option<Item> {
        if !self.has_footer {
            return None;
        }
        let footer = self.items.pop()?;
        self.has_footer = false;
        let index = self.items.len();
        tracing::trace!(target: targets::MODEL, index, "footer cleared");
        self.notify(ModelChange::removed(index));
        Some(footer)
    }

    fn notify(&self, change: ModelChange) {
        let change = match self.config.notification_mode {
            NotificationMode::Precise => change,
            NotificationMode::Reset => ModelChange::Reset,
        };
        self.signals.changed.emit(change);
    }

    fn notify_all(&self, changes: &[ModelChange]) {
        if changes.is_empty() {
            return;
        }
        match self.config.notification_mode {
            NotificationMode::Precise => {
                for change in changes {
                    self.signals.changed.emit(*change);
                }
            }
            NotificationMode::Reset => {
                self.signals.changed.emit(ModelChange::Reset);
            }
        }
    }
}

impl<P: ?Sized> ItemSource<P> for MultiTypeModel<P> {
    fn item_count(&self) -> Result<usize> {
        MultiTypeModel::item_count(self)
    }

    fn item_type_tag(&self, position: usize) -> Result<TypeTag> {
        MultiTypeModel::item_type_tag(self, position)
    }

    fn create_container(&self, tag: TypeTag, parent: &P) -> Result<ContainerHandle> {
        MultiTypeModel::create_container(self, tag, parent)
    }

    fn bind(&self, position: usize, container: &mut ContainerHandle) -> Result<()> {
        MultiTypeModel::bind(self, position, container)
    }

    fn container_attached(&self, container: &mut ContainerHandle) -> Result<bool> {
        MultiTypeModel::container_attached(self, container)
    }

    fn container_detached(&self, container: &mut ContainerHandle) -> Result<bool> {
        MultiTypeModel::container_detached(self, container)
    }

    fn signals(&self) -> &ModelSignals {
        MultiTypeModel::signals(self)
    }
}

impl<P: ?Sized> std::fmt::Debug for MultiTypeModel<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiTypeModel")
            .field("items", &self.items)
            .field("has_footer", &self.has_footer)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(MultiTypeModel: Send, Sync);

/// Builder for [`MultiTypeModel`].
///
/// Registers the container factories (fixing the model's [`TypeRegistry`]),
/// optionally overrides the [`ThreadGuard`] and [`ModelConfig`], and builds
/// the model.
pub struct MultiTypeModelBuilder<P: ?Sized = ()> {
    factories: Vec<Box<dyn ErasedFactory<P>>>,
    guard: Option<Box<dyn ThreadGuard>>,
    config: ModelConfig,
}

impl<P: ?Sized> Default for MultiTypeModelBuilder<P> {
    fn default() -> Self {
        Self {
            factories: Vec::new(),
            guard: None,
            config: ModelConfig::default(),
        }
    }
}

impl<P: ?Sized> MultiTypeModelBuilder<P> {
    /// Create a builder with no factories and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container factory.
    ///
    /// Register one factory per tag the model will display. If two factories
    /// share a tag, the later one wins.
    pub fn factory<F: ContainerFactory<P>>(mut self, factory: F) -> Self {
        self.factories.push(Box::new(factory));
        self
    }

    /// Register an ordered collection of factories.
    ///
    /// Factories of different concrete types are passed as [`AnyFactory`]
    /// values. Registration order is kept across `factory` and `factories`
    /// calls, so for a shared tag the last one registered still wins.
    pub fn factories<I>(mut self, factories: I) -> Self
    where
        I: IntoIterator<Item = AnyFactory<P>>,
    {
        self.factories
            .extend(factories.into_iter().map(AnyFactory::into_inner));
        self
    }

    /// Override how the model decides whether a caller is on the owning
    /// context. Defaults to the thread that calls [`build`](Self::build).
    pub fn thread_guard<G: ThreadGuard + 'static>(mut self, guard: G) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the notification mode.
    pub fn notification_mode(mut self, mode: NotificationMode) -> Self {
        self.config.notification_mode = mode;
        self
    }

    /// Require every created container to implement [`ViewLifecycle`].
    pub fn require_lifecycle(mut self, require: bool) -> Self {
        self.config.require_lifecycle = require;
        self
    }

    /// Build the model.
    pub fn build(self) -> MultiTypeModel<P> {
        let guard = self
            .guard
            .unwrap_or_else(|| Box::new(ThreadAffinity::current()));
        let registry = TypeRegistry::new(self.factories);
        tracing::debug!(
            target: targets::MODEL,
            factories = registry.len(),
            config = ?self.config,
            "multi-type model built"
        );

        MultiTypeModel {
            items: Vec::new(),
            has_footer: false,
            registry,
            guard,
            signals: Arc::new(ModelSignals::new()),
            config: self.config,
        }
    }
}
