//! Toolbar widget factory registry.
//!
//! Maps `(factory name, item name)` pairs to widget constructors, with one
//! process-wide fallback for everything unregistered. Factories come in two
//! deliberately distinct shapes:
//!
//! - a specific [`ItemFactory`] already knows which item it builds, so it
//!   receives only the host widget;
//! - the [`DefaultFactory`] stands in for arbitrary items, so it additionally
//!   receives the factory name and the item spec it is covering for.
//!
//! Keeping the two signatures separate (rather than one variadic shape)
//! keeps call sites type-safe.
//!
//! # Example
//!
//! ```
//! use cellarium_toolbar::toolbar::{ToolbarItemSpec, ToolbarWidgetRegistry};
//! use cellarium_toolbar::widget::{CommandToolButton, WidgetHandle};
//!
//! struct Panel;
//!
//! let registry = ToolbarWidgetRegistry::<Panel>::new(|_factory, _host, spec| {
//!     Box::new(CommandToolButton::new(&spec.name, spec.command.as_deref().unwrap_or("")))
//!         as WidgetHandle
//! });
//!
//! let previous = registry.register_factory("notebook", "save", |_host: &Panel| {
//!     Box::new(CommandToolButton::new("save", "docmanager:save")) as WidgetHandle
//! });
//! assert!(previous.is_none());
//!
//! let widget = registry.create_widget("notebook", &Panel, &ToolbarItemSpec::new("save"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::toolbar::item::ToolbarItemSpec;
use crate::widget::WidgetHandle;

/// Constructor for one specific toolbar item. Receives the host widget only.
pub type ItemFactory<W> = Arc<dyn Fn(&W) -> WidgetHandle + Send + Sync>;

/// Fallback constructor for unregistered items. Receives the factory name,
/// the host widget, and the item spec it is standing in for.
pub type DefaultFactory<W> = Arc<dyn Fn(&str, &W, &ToolbarItemSpec) -> WidgetHandle + Send + Sync>;

/// Registry key: `(factory name, item name)`.
type FactoryKey = (String, String);

/// A registry of named toolbar widget factories over host widgets of type `W`.
///
/// Registrations are last-write-wins; the previous constructor is handed
/// back so callers can override temporarily and restore later. All mutation
/// is in place behind locks - the cooperative single-threaded model makes
/// concurrent registration a non-issue by construction.
pub struct ToolbarWidgetRegistry<W> {
    factories: RwLock<HashMap<FactoryKey, ItemFactory<W>>>,
    default_factory: RwLock<DefaultFactory<W>>,
}

impl<W> ToolbarWidgetRegistry<W> {
    /// Create a registry with the required fallback constructor.
    ///
    /// There is no registry without a default factory; a missing fallback is
    /// unrepresentable rather than a runtime error.
    pub fn new<F>(default_factory: F) -> Self
    where
        F: Fn(&str, &W, &ToolbarItemSpec) -> WidgetHandle + Send + Sync + 'static,
    {
        Self {
            factories: RwLock::new(HashMap::new()),
            default_factory: RwLock::new(Arc::new(default_factory)),
        }
    }

    /// The current fallback constructor.
    pub fn default_factory(&self) -> DefaultFactory<W> {
        self.default_factory.read().clone()
    }

    /// Replace the fallback constructor.
    ///
    /// Takes effect on the next [`create_widget`](Self::create_widget) call.
    pub fn set_default_factory<F>(&self, default_factory: F)
    where
        F: Fn(&str, &W, &ToolbarItemSpec) -> WidgetHandle + Send + Sync + 'static,
    {
        *self.default_factory.write() = Arc::new(default_factory);
    }

    /// Replace the fallback with a previously obtained handle.
    pub fn set_default_factory_handle(&self, default_factory: DefaultFactory<W>) {
        *self.default_factory.write() = default_factory;
    }

    /// Register a constructor for `(factory_name, item_name)`.
    ///
    /// Overwrites any existing registration for that pair and returns what
    /// was previously registered (`None` if nothing was), enabling the
    /// override/restore pattern:
    ///
    /// ```ignore
    /// let previous = registry.register_factory("notebook", "save", my_factory);
    /// // ... later ...
    /// if let Some(previous) = previous {
    ///     registry.register_factory_handle("notebook", "save", previous);
    /// }
    /// ```
    pub fn register_factory<F>(
        &self,
        factory_name: &str,
        item_name: &str,
        factory: F,
    ) -> Option<ItemFactory<W>>
    where
        F: Fn(&W) -> WidgetHandle + Send + Sync + 'static,
    {
        self.register_factory_handle(factory_name, item_name, Arc::new(factory))
    }

    /// Register a previously obtained constructor handle.
    ///
    /// Same semantics as [`register_factory`](Self::register_factory); this
    /// is the restore half of the override/restore pattern.
    pub fn register_factory_handle(
        &self,
        factory_name: &str,
        item_name: &str,
        factory: ItemFactory<W>,
    ) -> Option<ItemFactory<W>> {
        self.factories
            .write()
            .insert((factory_name.to_string(), item_name.to_string()), factory)
    }

    /// Whether a specific constructor is registered for the pair.
    pub fn has_factory(&self, factory_name: &str, item_name: &str) -> bool {
        self.factories
            .read()
            .contains_key(&(factory_name.to_string(), item_name.to_string()))
    }

    /// Build the widget for an item spec.
    ///
    /// Looks up `(factory_name, spec.name)`; a registered constructor is
    /// invoked with the host only, the fallback with all three arguments.
    /// Never fails: unknown pairs always fall through to the default.
    pub fn create_widget(&self, factory_name: &str, host: &W, spec: &ToolbarItemSpec) -> WidgetHandle {
        let specific = self
            .factories
            .read()
            .get(&(factory_name.to_string(), spec.name.clone()))
            .cloned();

        match specific {
            Some(factory) => factory(host),
            None => (self.default_factory())(factory_name, host, spec),
        }
    }
}

static_assertions::assert_impl_all!(ToolbarWidgetRegistry<()>: Send, Sync);
