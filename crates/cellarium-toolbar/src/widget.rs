//! Opaque toolbar widget handles and the built-in stock widgets.
//!
//! The toolbar pipeline never inspects what a factory builds; it only moves
//! [`WidgetHandle`]s around. The [`ToolbarWidget`] trait is the whole
//! contract: an item name for identification, an enabled flag, and disposal.
//! Rendering is the host application's business.
//!
//! Three stock widgets are provided:
//!
//! - [`CommandToolButton`] - a command-bound button, the usual product of a
//!   default factory
//! - [`ToolbarSpacer`] - flexible empty space
//! - [`ToolbarSeparatorWidget`] - a thin dividing line
//!
//! # Example
//!
//! ```
//! use cellarium_toolbar::widget::{CommandToolButton, IconGlyph, ToolbarWidget};
//!
//! let button = CommandToolButton::new("save", "docmanager:save")
//!     .with_label("Save")
//!     .with_tooltip("Save the notebook")
//!     .with_glyph(IconGlyph::Blank);
//!
//! button.clicked.connect(|_| println!("save requested"));
//! button.click();
//! ```

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};

use cellarium_core::{Property, Signal};

/// Named icon glyphs understood by the host application's renderer.
///
/// The toolbar subsystem deals in glyph names only; mapping a glyph to
/// pixels happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconGlyph {
    /// No icon.
    #[default]
    Blank,
    /// Square stop glyph (interrupt).
    Stop,
    /// Circular-arrows refresh glyph (restart).
    Refresh,
    /// Crossed-out circle shown while no kernel is connected.
    Offline,
    /// Filled circle (kernel busy).
    CircleFilled,
    /// Hollow circle (kernel idle).
    CircleHollow,
    /// Dead-kernel glyph.
    Skull,
}

impl IconGlyph {
    /// The glyph's registered name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Stop => "stop",
            Self::Refresh => "refresh",
            Self::Offline => "offline",
            Self::CircleFilled => "circle-filled",
            Self::CircleHollow => "circle-hollow",
            Self::Skull => "skull",
        }
    }
}

/// The contract every toolbar item widget satisfies.
///
/// Widgets are shared-state objects: all mutators take `&self` and use
/// interior mutability, matching the rest of the toolkit.
pub trait ToolbarWidget: Send + Sync {
    /// The toolbar item name this widget was built for.
    fn item_name(&self) -> &str;

    /// Whether the widget accepts input.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Enable or disable the widget. Structural widgets ignore this.
    fn set_enabled(&self, _enabled: bool) {}

    /// Release resources and detach subscriptions. Idempotent.
    fn dispose(&self);

    /// Whether [`dispose`](Self::dispose) has run.
    fn is_disposed(&self) -> bool;

    /// Downcasting support for hosts that know their own widget types.
    fn as_any(&self) -> &dyn Any;
}

/// An owned, opaque toolbar widget.
pub type WidgetHandle = Box<dyn ToolbarWidget>;

// ============================================================================
// CommandToolButton
// ============================================================================

/// A toolbar button bound to a named command.
///
/// This is the stock widget a default factory produces for `command` items:
/// it carries the command id and arguments from the item spec, a localized
/// label and tooltip, and a [`clicked`](Self::clicked) signal the host
/// connects to its command system.
pub struct CommandToolButton {
    item_name: String,
    command: String,
    args: Option<serde_json::Value>,
    label: Property<String>,
    tooltip: Property<String>,
    glyph: Property<IconGlyph>,
    enabled: AtomicBool,
    disposed: AtomicBool,

    /// Emitted when the button is activated.
    pub clicked: Signal<()>,
}

impl CommandToolButton {
    /// Create a button for the given item name and command id.
    pub fn new(item_name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            command: command.into(),
            args: None,
            label: Property::new(String::new()),
            tooltip: Property::new(String::new()),
            glyph: Property::new(IconGlyph::Blank),
            enabled: AtomicBool::new(true),
            disposed: AtomicBool::new(false),
            clicked: Signal::new(),
        }
    }

    /// The bound command id.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments to pass when invoking the command.
    pub fn args(&self) -> Option<&serde_json::Value> {
        self.args.as_ref()
    }

    /// Set command arguments using the builder pattern.
    pub fn with_args(mut self, args: serde_json::Value) -> Self {
        self.args = Some(args);
        self
    }

    /// The button label.
    pub fn label(&self) -> String {
        self.label.get()
    }

    /// Set the button label.
    pub fn set_label(&self, label: impl Into<String>) {
        self.label.set(label.into());
    }

    /// Set the label using the builder pattern.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }

    /// The tooltip text.
    pub fn tooltip(&self) -> String {
        self.tooltip.get()
    }

    /// Set the tooltip text.
    pub fn set_tooltip(&self, tooltip: impl Into<String>) {
        self.tooltip.set(tooltip.into());
    }

    /// Set the tooltip using the builder pattern.
    pub fn with_tooltip(self, tooltip: impl Into<String>) -> Self {
        self.set_tooltip(tooltip);
        self
    }

    /// The icon glyph.
    pub fn glyph(&self) -> IconGlyph {
        self.glyph.get()
    }

    /// Set the icon glyph.
    pub fn set_glyph(&self, glyph: IconGlyph) {
        self.glyph.set(glyph);
    }

    /// Set the glyph using the builder pattern.
    pub fn with_glyph(self, glyph: IconGlyph) -> Self {
        self.set_glyph(glyph);
        self
    }

    /// Activate the button.
    ///
    /// Disabled or disposed buttons ignore the activation.
    pub fn click(&self) {
        if self.is_enabled() && !self.is_disposed() {
            self.clicked.emit(());
        }
    }
}

impl ToolbarWidget for CommandToolButton {
    fn item_name(&self) -> &str {
        &self.item_name
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            self.clicked.disconnect_all();
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Structural widgets
// ============================================================================

/// Flexible empty space between toolbar items.
///
/// Spacers are structural: they are placed directly by the toolbar factory
/// and never go through the widget registry.
pub struct ToolbarSpacer {
    item_name: String,
    disposed: AtomicBool,
}

impl ToolbarSpacer {
    /// Create a spacer for the given item name.
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            disposed: AtomicBool::new(false),
        }
    }
}

impl ToolbarWidget for ToolbarSpacer {
    fn item_name(&self) -> &str {
        &self.item_name
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A thin dividing line between toolbar item groups.
///
/// Like [`ToolbarSpacer`], separators are structural placeholders with no
/// factory involvement.
pub struct ToolbarSeparatorWidget {
    item_name: String,
    disposed: AtomicBool,
}

impl ToolbarSeparatorWidget {
    /// Create a separator for the given item name.
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            disposed: AtomicBool::new(false),
        }
    }
}

impl ToolbarWidget for ToolbarSeparatorWidget {
    fn item_name(&self) -> &str {
        &self.item_name
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(CommandToolButton: Send, Sync);
static_assertions::assert_impl_all!(ToolbarSpacer: Send, Sync);
static_assertions::assert_impl_all!(ToolbarSeparatorWidget: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_command_button_click() {
        let button = CommandToolButton::new("save", "docmanager:save");
        let clicks = Arc::new(AtomicUsize::new(0));

        let clicks_clone = clicks.clone();
        button.clicked.connect(move |_| {
            clicks_clone.fetch_add(1, Ordering::SeqCst);
        });

        button.click();
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        button.set_enabled(false);
        button.click();
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_command_button_builder() {
        let button = CommandToolButton::new("run", "notebook:run-cell")
            .with_label("Run")
            .with_tooltip("Run the selected cells")
            .with_glyph(IconGlyph::Refresh)
            .with_args(serde_json::json!({ "all": false }));

        assert_eq!(button.item_name(), "run");
        assert_eq!(button.command(), "notebook:run-cell");
        assert_eq!(button.label(), "Run");
        assert_eq!(button.tooltip(), "Run the selected cells");
        assert_eq!(button.glyph(), IconGlyph::Refresh);
        assert_eq!(button.args().unwrap()["all"], serde_json::json!(false));
    }

    #[test]
    fn test_command_button_dispose_detaches() {
        let button = CommandToolButton::new("save", "docmanager:save");
        let clicks = Arc::new(AtomicUsize::new(0));

        let clicks_clone = clicks.clone();
        button.clicked.connect(move |_| {
            clicks_clone.fetch_add(1, Ordering::SeqCst);
        });

        button.dispose();
        assert!(button.is_disposed());
        button.click();
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_structural_widgets() {
        let spacer = ToolbarSpacer::new("spacer");
        assert_eq!(spacer.item_name(), "spacer");
        assert!(spacer.is_enabled());
        assert!(!spacer.is_disposed());
        spacer.dispose();
        assert!(spacer.is_disposed());

        let sep = ToolbarSeparatorWidget::new("divider");
        assert_eq!(sep.item_name(), "divider");
        sep.dispose();
        assert!(sep.is_disposed());
    }

    #[test]
    fn test_glyph_names() {
        assert_eq!(IconGlyph::Stop.as_str(), "stop");
        assert_eq!(IconGlyph::Refresh.as_str(), "refresh");
        assert_eq!(IconGlyph::Offline.as_str(), "offline");
    }
}
