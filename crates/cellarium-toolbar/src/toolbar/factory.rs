//! Settings-driven toolbar assembly.
//!
//! [`create_toolbar_factory`] wires a widget registry to the settings plugin
//! registry and returns a [`ToolbarFactory`]: a callable that resolves the
//! current, merged toolbar item list for a host widget on demand.
//!
//! The factory is reactive. It holds one mutable cell - the merged item
//! list - and a scoped subscription to
//! [`SettingsRegistry::plugin_changed`]; every settings load recomputes the
//! cell from **all** loaded plugins contributing under the factory name, in
//! plugin load order, with rank sorting and name deduplication. Callers get
//! a snapshot per invocation and must re-invoke after changes for a fresh
//! one.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cellarium_toolbar::toolbar::{create_toolbar_factory, ToolbarWidgetRegistry};
//! use cellarium_toolbar::translator::NullTranslator;
//!
//! let factory = create_toolbar_factory(
//!     registry.clone(),
//!     settings.clone(),
//!     "notebook",
//!     "cellarium-notebook:panel",
//!     &NullTranslator,
//! );
//!
//! // settings may not be loaded yet; the list is simply empty until then
//! let items = factory.items(&panel);
//! ```

use std::sync::Arc;

use cellarium_core::logging::targets;
use cellarium_core::signal::ConnectionGuard;
use cellarium_core::{Property, Signal};

use crate::settings::{SettingsPlugin, SettingsRegistry};
use crate::toolbar::item::{
    merge_contribution, sort_by_rank, ResolvedToolbarItem, ToolbarItemKind, ToolbarItemSpec,
    TOOLBAR_SCHEMA_KEY, TRANSFORM_SCHEMA_KEY,
};
use crate::toolbar::registry::ToolbarWidgetRegistry;
use crate::translator::{TranslationBundle, Translator, TEXT_DOMAIN};
use crate::widget::{CommandToolButton, ToolbarSeparatorWidget, ToolbarSpacer, WidgetHandle};

/// Key under which user data carries toolbar overrides when the plugin opts
/// into transform semantics.
const DATA_TOOLBAR_KEY: &str = "toolbar";

/// A reactive toolbar item resolver for one `(factory name, plugin id)` pair.
///
/// Obtained from [`create_toolbar_factory`]. Stable in identity for its
/// whole lifetime; the list it resolves from changes underneath it as
/// settings load.
pub struct ToolbarFactory<W> {
    // Subscription first: its guard must drop before the settings Arc below.
    _subscription: ConnectionGuard<String>,
    settings: Arc<SettingsRegistry>,
    registry: Arc<ToolbarWidgetRegistry<W>>,
    factory_name: String,
    plugin_id: String,
    bundle: Arc<dyn TranslationBundle>,
    merged: Arc<Property<Vec<ToolbarItemSpec>>>,
    list_changed: Arc<Signal<()>>,
}

impl<W> ToolbarFactory<W> {
    /// The factory name this resolver merges contributions for.
    pub fn factory_name(&self) -> &str {
        &self.factory_name
    }

    /// The settings plugin owning the user-facing toolbar configuration.
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// The translation bundle used for labels and tooltips.
    pub fn bundle(&self) -> &Arc<dyn TranslationBundle> {
        &self.bundle
    }

    /// Emitted after the merged list actually changed.
    ///
    /// Observers re-invoke [`items`](Self::items) (or
    /// [`current_specs`](Self::current_specs)) for the new state.
    pub fn list_changed(&self) -> &Signal<()> {
        &self.list_changed
    }

    /// Snapshot of the current merged, sorted item specs.
    pub fn current_specs(&self) -> Vec<ToolbarItemSpec> {
        self.merged.get()
    }

    /// Resolve the toolbar for a host widget.
    ///
    /// Disabled items are dropped. `spacer` and `separator` items become
    /// structural placeholders without consulting the registry; everything
    /// else goes through
    /// [`ToolbarWidgetRegistry::create_widget`]. Output order matches the
    /// merged sorted order.
    pub fn items(&self, host: &W) -> Vec<ResolvedToolbarItem> {
        self.merged.with(|specs| {
            specs
                .iter()
                .filter(|spec| !spec.disabled)
                .map(|spec| {
                    let widget: WidgetHandle = match spec.kind {
                        ToolbarItemKind::Spacer => Box::new(ToolbarSpacer::new(spec.name.as_str())),
                        ToolbarItemKind::Separator => {
                            Box::new(ToolbarSeparatorWidget::new(spec.name.as_str()))
                        }
                        ToolbarItemKind::Command => {
                            self.registry.create_widget(&self.factory_name, host, spec)
                        }
                    };
                    ResolvedToolbarItem {
                        name: spec.name.clone(),
                        widget,
                    }
                })
                .collect()
        })
    }

    /// Force a recomputation from the settings registry.
    ///
    /// Normally unnecessary - the subscription keeps the list current - but
    /// useful after replacing registry contents wholesale in tests.
    pub fn refresh(&self) {
        let next = compute_merged(&self.settings, &self.factory_name, &self.plugin_id);
        if self.merged.set(next) {
            self.list_changed.emit(());
        }
    }
}

/// Build a reactive toolbar factory.
///
/// Returns immediately; nothing blocks on settings being loaded. Plugins
/// already loaded contribute right away, later loads are picked up through
/// the settings registry's change notifications. `translator` is used only
/// for label/tooltip localization - it never affects merging or ordering.
pub fn create_toolbar_factory<W>(
    registry: Arc<ToolbarWidgetRegistry<W>>,
    settings: Arc<SettingsRegistry>,
    factory_name: impl Into<String>,
    plugin_id: impl Into<String>,
    translator: &dyn Translator,
) -> ToolbarFactory<W> {
    let factory_name = factory_name.into();
    let plugin_id = plugin_id.into();
    let bundle = translator.load(TEXT_DOMAIN);

    let merged = Arc::new(Property::new(compute_merged(
        &settings,
        &factory_name,
        &plugin_id,
    )));
    let list_changed = Arc::new(Signal::new());

    let subscription = {
        let weak_settings = Arc::downgrade(&settings);
        let merged = merged.clone();
        let list_changed = list_changed.clone();
        let factory_name = factory_name.clone();
        let plugin_id = plugin_id.clone();
        settings.plugin_changed().connect_scoped(move |changed_id| {
            let Some(settings) = weak_settings.upgrade() else {
                return;
            };
            let next = compute_merged(&settings, &factory_name, &plugin_id);
            if merged.set(next) {
                tracing::debug!(
                    target: targets::TOOLBAR,
                    factory_name = factory_name.as_str(),
                    plugin_id = changed_id.as_str(),
                    "toolbar item list recomputed"
                );
                list_changed.emit(());
            }
        })
    };

    ToolbarFactory {
        _subscription: subscription,
        settings,
        registry,
        factory_name,
        plugin_id,
        bundle,
        merged,
        list_changed,
    }
}

/// Recompute the merged, sorted item list from every loaded plugin.
fn compute_merged(
    settings: &SettingsRegistry,
    factory_name: &str,
    plugin_id: &str,
) -> Vec<ToolbarItemSpec> {
    let mut items = Vec::new();

    for plugin in settings.plugins() {
        merge_contribution(&mut items, schema_contribution(&plugin, factory_name));
    }

    // User overrides from the owning plugin merge last, when the plugin opts
    // into array-merge transform semantics.
    if let Some(plugin) = settings.get(plugin_id) {
        let transform = plugin
            .schema()
            .get(TRANSFORM_SCHEMA_KEY)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        if transform {
            merge_contribution(&mut items, data_contribution(&plugin));
        }
    }

    sort_by_rank(&mut items);
    items
}

/// Items a plugin's schema contributes under the factory name.
///
/// A missing key, a missing factory name, or a malformed array all mean
/// zero items from this plugin - never an error.
fn schema_contribution(plugin: &SettingsPlugin, factory_name: &str) -> Vec<ToolbarItemSpec> {
    let Some(value) = plugin
        .schema()
        .get(TOOLBAR_SCHEMA_KEY)
        .and_then(|toolbars| toolbars.get(factory_name))
    else {
        return Vec::new();
    };
    parse_items(plugin.id(), value)
}

/// Items a plugin's user data contributes under the `toolbar` key.
fn data_contribution(plugin: &SettingsPlugin) -> Vec<ToolbarItemSpec> {
    match plugin.data().get(DATA_TOOLBAR_KEY) {
        Some(value) => parse_items(plugin.id(), value),
        None => Vec::new(),
    }
}

fn parse_items(plugin_id: &str, value: &serde_json::Value) -> Vec<ToolbarItemSpec> {
    match serde_json::from_value::<Vec<ToolbarItemSpec>>(value.clone()) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(
                target: targets::TOOLBAR,
                plugin_id,
                %err,
                "malformed toolbar contribution ignored"
            );
            Vec::new()
        }
    }
}

// ============================================================================
// Default factory helper
// ============================================================================

/// Build the stock fallback constructor: every item becomes a
/// [`CommandToolButton`] carrying the spec's command and args, with a
/// humanized, localized label.
pub fn default_command_factory<W>(
    translator: &dyn Translator,
) -> impl Fn(&str, &W, &ToolbarItemSpec) -> WidgetHandle + Send + Sync + 'static {
    let bundle = translator.load(TEXT_DOMAIN);
    move |_factory_name, _host, spec| {
        let label = bundle.gettext(&humanize_item_name(&spec.name));
        let mut button =
            CommandToolButton::new(spec.name.as_str(), spec.command.clone().unwrap_or_default())
                .with_label(label);
        if let Some(args) = &spec.args {
            button = button.with_args(args.clone());
        }
        Box::new(button)
    }
}

/// Turn an item name like `restart-kernel` into `Restart Kernel`.
fn humanize_item_name(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
