//! Settings plugin registry.
//!
//! Toolbar layouts are declarative: plugins ship JSON schemas, users ship
//! JSON overrides, and the storage backend that holds both is not this
//! crate's concern. [`SettingsConnector`] is the seam to that backend;
//! [`SettingsRegistry`] tracks which plugins have been loaded through it, in
//! load order, and emits [`plugin_changed`](SettingsRegistry::plugin_changed)
//! after every successful (re)load.
//!
//! Loads complete within `load()` - the cooperative single-threaded model
//! means completion notifications observe call order, with no reordering.
//!
//! # Example
//!
//! ```ignore
//! use cellarium_toolbar::settings::SettingsRegistry;
//!
//! let registry = SettingsRegistry::new(Box::new(connector));
//! registry.plugin_changed().connect(|id| {
//!     println!("settings updated: {id}");
//! });
//! let plugin = registry.load("cellarium-notebook:panel")?;
//! # Ok::<(), cellarium_toolbar::SettingsError>(())
//! ```

use std::sync::Arc;

use cellarium_core::logging::targets;
use cellarium_core::Signal;
use parking_lot::RwLock;

use crate::error::SettingsError;

/// What the storage backend hands over for one plugin.
#[derive(Debug, Clone, Default)]
pub struct PluginManifest {
    /// The plugin's JSON schema document.
    pub schema: serde_json::Value,
    /// User-level overrides for this plugin.
    pub data: serde_json::Value,
    /// The raw user settings text, verbatim.
    pub raw: String,
    /// Schema version string.
    pub version: String,
}

/// The storage backend seam.
///
/// Implementations resolve a plugin id to its manifest - from disk, from a
/// server, from an in-memory table in tests. Fetch failures are returned,
/// never panicked.
pub trait SettingsConnector: Send + Sync {
    /// Fetch the manifest for `plugin_id`.
    fn fetch(&self, plugin_id: &str) -> std::result::Result<PluginManifest, SettingsError>;
}

/// A loaded settings plugin.
///
/// Immutable snapshot: reloading a plugin produces a fresh `SettingsPlugin`
/// behind a new `Arc`, so holders of an old snapshot are unaffected.
#[derive(Debug)]
pub struct SettingsPlugin {
    id: String,
    schema: serde_json::Value,
    data: serde_json::Value,
    raw: String,
    version: String,
}

impl SettingsPlugin {
    /// The plugin id, e.g. `cellarium-notebook:panel`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The plugin's schema document.
    pub fn schema(&self) -> &serde_json::Value {
        &self.schema
    }

    /// User-level overrides.
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// The raw user settings text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Schema version string.
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Load-ordered registry of settings plugins.
///
/// The registry owns the connector and the set of plugins loaded so far.
/// Load order is observable (and meaningful: toolbar merge ties break on
/// it), so plugins are kept in a `Vec` rather than a map; a reload replaces
/// the plugin in place, keeping its original position.
pub struct SettingsRegistry {
    connector: Box<dyn SettingsConnector>,
    plugins: RwLock<Vec<Arc<SettingsPlugin>>>,
    plugin_changed: Signal<String>,
}

impl SettingsRegistry {
    /// Create a registry over the given storage backend.
    pub fn new(connector: Box<dyn SettingsConnector>) -> Self {
        Self {
            connector,
            plugins: RwLock::new(Vec::new()),
            plugin_changed: Signal::new(),
        }
    }

    /// Signal emitted after every successful load or reload.
    ///
    /// The argument is the plugin id. Emission happens after the registry
    /// state is updated, so slots observe the new plugin.
    pub fn plugin_changed(&self) -> &Signal<String> {
        &self.plugin_changed
    }

    /// Load (or reload) a plugin through the connector.
    ///
    /// On success the plugin is recorded - appended on first load, replaced
    /// in place on reload - and `plugin_changed` is emitted. On failure the
    /// registry is left untouched: previously loaded state stays valid and
    /// the error is returned to the caller.
    pub fn load(&self, plugin_id: &str) -> std::result::Result<Arc<SettingsPlugin>, SettingsError> {
        let manifest = self.connector.fetch(plugin_id).map_err(|err| {
            tracing::warn!(target: targets::SETTINGS, plugin_id, %err, "settings load failed");
            err
        })?;

        let plugin = Arc::new(SettingsPlugin {
            id: plugin_id.to_string(),
            schema: manifest.schema,
            data: manifest.data,
            raw: manifest.raw,
            version: manifest.version,
        });

        {
            let mut plugins = self.plugins.write();
            match plugins.iter_mut().find(|p| p.id() == plugin_id) {
                Some(slot) => *slot = plugin.clone(),
                None => plugins.push(plugin.clone()),
            }
        }

        tracing::debug!(target: targets::SETTINGS, plugin_id, "settings plugin loaded");
        self.plugin_changed.emit(plugin_id.to_string());
        Ok(plugin)
    }

    /// All loaded plugins, in first-load order.
    pub fn plugins(&self) -> Vec<Arc<SettingsPlugin>> {
        self.plugins.read().clone()
    }

    /// Look up a loaded plugin by id.
    pub fn get(&self, plugin_id: &str) -> Option<Arc<SettingsPlugin>> {
        self.plugins.read().iter().find(|p| p.id() == plugin_id).cloned()
    }

    /// Whether a plugin has been loaded.
    pub fn is_loaded(&self, plugin_id: &str) -> bool {
        self.plugins.read().iter().any(|p| p.id() == plugin_id)
    }
}

static_assertions::assert_impl_all!(SettingsRegistry: Send, Sync);
