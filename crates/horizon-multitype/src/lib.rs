//! Horizon Multitype - a heterogeneous list model for list-rendering UIs.
//!
//! The model owns an ordered list of items of different kinds plus an
//! optional footer that always stays last. It emits precise change
//! notifications and builds the right container for each kind through a
//! registry fixed at construction time. Every call is checked against a
//! thread guard so the model is only driven from its owning (UI) thread.
//!
//! # Example
//!
//! ```
//! use horizon_multitype::{
//!     ContainerFactory, ItemBinder, ItemContainer, ModelChange, MultiTypeModel, TypeTag,
//! };
//!
//! const HEADLINE: TypeTag = TypeTag::new(0);
//!
//! #[derive(Default)]
//! struct HeadlineRow(String);
//! impl ItemContainer for HeadlineRow {}
//!
//! struct HeadlineFactory;
//! impl ContainerFactory for HeadlineFactory {
//!     type Container = HeadlineRow;
//!     fn type_tag(&self) -> TypeTag { HEADLINE }
//!     fn create(&self, _parent: &()) -> HeadlineRow { HeadlineRow::default() }
//! }
//!
//! struct Headline(&'static str);
//! impl ItemBinder for Headline {
//!     type Container = HeadlineRow;
//!     fn type_tag(&self) -> TypeTag { HEADLINE }
//!     fn bind(&self, row: &mut HeadlineRow) { row.0 = self.0.into(); }
//! }
//!
//! fn main() -> horizon_multitype::Result<()> {
//!     let mut model = MultiTypeModel::builder().factory(HeadlineFactory).build();
//!     model.signals().changed.connect(|change: &ModelChange| {
//!         println!("model changed: {change:?}");
//!     });
//!
//!     model.add(Headline("Rust 2024 ships"))?;
//!     assert_eq!(model.item_count()?, 1);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    AnyFactory, ContainerFactory, ContainerHandle, Item, ItemBinder, ItemContainer, ItemSource,
    ModelChange, ModelConfig, ModelSignals, MultiTypeModel, MultiTypeModelBuilder,
    NotificationMode, TypeRegistry, TypeTag, ViewLifecycle,
};

pub use horizon_multitype_core::{MainThreadGuard, ThreadAffinity, ThreadGuard};
