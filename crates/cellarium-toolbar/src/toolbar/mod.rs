//! Toolbar item model, widget registry, and settings-driven assembly.
//!
//! The pipeline, leaves first:
//!
//! 1. [`item`] - the declarative [`ToolbarItemSpec`] model plus the pure
//!    merge/sort functions;
//! 2. [`registry`] - [`ToolbarWidgetRegistry`], mapping
//!    `(factory name, item name)` pairs to widget constructors with a
//!    required process-wide fallback;
//! 3. [`factory`] - [`create_toolbar_factory`], which ties a registry to the
//!    settings plugin registry and yields a reactive item resolver.

pub mod factory;
pub mod item;
pub mod registry;

pub use factory::{create_toolbar_factory, default_command_factory, ToolbarFactory};
pub use item::{
    merge_contribution, sort_by_rank, ResolvedToolbarItem, ToolbarItemKind, ToolbarItemSpec,
    DEFAULT_RANK, TOOLBAR_SCHEMA_KEY, TRANSFORM_SCHEMA_KEY,
};
pub use registry::{DefaultFactory, ItemFactory, ToolbarWidgetRegistry};
