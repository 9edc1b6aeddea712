//! Toolbar subsystem for the Cellarium notebook UI toolkit.
//!
//! Three pieces, leaves first:
//!
//! - **Session status controls** ([`session_items`]): interrupt and restart
//!   buttons, a kernel name label, and a kernel status indicator, each bound
//!   to a live [`SessionContext`] and unsubscribing on disposal.
//! - **Widget registry** ([`toolbar::ToolbarWidgetRegistry`]): named widget
//!   factories keyed by `(factory name, item name)`, with one required
//!   process-wide fallback constructor.
//! - **Toolbar factory builder** ([`toolbar::create_toolbar_factory`]):
//!   merges declarative toolbar item lists contributed by settings plugins
//!   under a shared schema key into an ordered, reactive item resolver.
//!
//! The surrounding application - document widgets, the rendering engine, the
//! kernel transport, the settings storage backend - stays behind the narrow
//! collaborator traits in [`kernel`], [`settings`], and [`translator`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cellarium_toolbar::settings::{PluginManifest, SettingsConnector, SettingsRegistry};
//! use cellarium_toolbar::toolbar::{
//!     create_toolbar_factory, default_command_factory, ToolbarWidgetRegistry,
//! };
//! use cellarium_toolbar::translator::NullTranslator;
//! use cellarium_toolbar::SettingsError;
//!
//! struct NotebookPanel;
//!
//! struct OnePlugin;
//!
//! impl SettingsConnector for OnePlugin {
//!     fn fetch(&self, _plugin_id: &str) -> Result<PluginManifest, SettingsError> {
//!         Ok(PluginManifest {
//!             schema: serde_json::json!({
//!                 "jupyter.lab.toolbars": {
//!                     "notebook": [
//!                         { "name": "save", "command": "docmanager:save", "rank": 10 },
//!                         { "name": "spacer", "type": "spacer", "rank": 100 }
//!                     ]
//!                 }
//!             }),
//!             ..Default::default()
//!         })
//!     }
//! }
//!
//! let registry = Arc::new(ToolbarWidgetRegistry::<NotebookPanel>::new(
//!     default_command_factory(&NullTranslator),
//! ));
//! let settings = Arc::new(SettingsRegistry::new(Box::new(OnePlugin)));
//!
//! let factory = create_toolbar_factory(
//!     registry,
//!     settings.clone(),
//!     "notebook",
//!     "cellarium-notebook:panel",
//!     &NullTranslator,
//! );
//!
//! // nothing loaded yet: empty, not an error
//! assert!(factory.items(&NotebookPanel).is_empty());
//!
//! settings.load("cellarium-notebook:panel").unwrap();
//! let items = factory.items(&NotebookPanel);
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].name, "save");
//! ```

mod error;
pub mod kernel;
pub mod session_items;
pub mod settings;
pub mod toolbar;
pub mod translator;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{KernelError, Result, SessionError, SettingsError, ToolbarError};
pub use kernel::{ConnectionStatus, KernelConnection, KernelStatus, SessionContext};
pub use session_items::{
    KernelInterruptButton, KernelNameLabel, KernelRestartButton, KernelStatusIndicator,
};
pub use settings::{PluginManifest, SettingsConnector, SettingsPlugin, SettingsRegistry};
pub use toolbar::{
    create_toolbar_factory, default_command_factory, ResolvedToolbarItem, ToolbarFactory,
    ToolbarItemKind, ToolbarItemSpec, ToolbarWidgetRegistry,
};
pub use translator::{NullTranslator, TranslationBundle, Translator};
pub use widget::{IconGlyph, ToolbarWidget, WidgetHandle};
