//! Heterogeneous list model.
//!
//! A [`MultiTypeModel`] holds an ordered list of items of different kinds and
//! an optional footer pinned to the end. Each kind is identified by a
//! [`TypeTag`]; the host registers one [`ContainerFactory`] per tag, and every
//! item is an [`ItemBinder`] that knows how to fill the container built for
//! its tag.
//!
//! # Core Types
//!
//! - `TypeTag`: Identifies a kind of row
//! - `ItemBinder`: Data for one row; wrapped in an `Item` handle once inserted
//! - `ItemContainer` / `ViewLifecycle`: What the host displays for one row
//! - `ContainerFactory`: Builds empty containers for one tag
//! - `TypeRegistry`: The fixed tag-to-factory map of a model
//! - `ModelChange` / `ModelSignals`: Change notifications
//! - `ItemSource`: The trait rendering layers are written against
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────┐  changed   ┌─────────────┐
//! │  MultiTypeModel  │──────────->│    Host     │
//! │  items + footer  │            │ (list view) │
//! └──────────────────┘            └─────────────┘
//!       │      ^   create_container / bind  │
//!       │      └────────────────────────────┘
//!       v
//! ┌──────────────────┐
//! │   TypeRegistry   │  TypeTag -> ContainerFactory
//! └──────────────────┘
//! ```
//!
//! The host reacts to each [`ModelChange`] by re-reading the item count and
//! the tag at each visible position, reusing or creating a container for that
//! tag, and binding the position into it.

mod binder;
mod change;
mod config;
mod container;
mod multi_type_model;
mod registry;
mod traits;
mod type_tag;

pub use binder::{Item, ItemBinder};
pub use change::{ModelChange, ModelSignals};
pub use config::{ModelConfig, NotificationMode};
pub use container::{AnyFactory, ContainerFactory, ContainerHandle, ItemContainer, ViewLifecycle};
pub use multi_type_model::{MultiTypeModel, MultiTypeModelBuilder};
pub use registry::TypeRegistry;
pub use traits::ItemSource;
pub use type_tag::TypeTag;
