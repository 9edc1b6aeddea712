//! Toolbar controls bound to a kernel session.
//!
//! Four self-contained controls over a [`SessionContext`]:
//!
//! - [`KernelInterruptButton`] - sends an interrupt request, fixed stop glyph
//! - [`KernelRestartButton`] - sends a restart request, fixed refresh glyph
//! - [`KernelNameLabel`] - passive label tracking the kernel display name
//! - [`KernelStatusIndicator`] - icon + title tracking the kernel status
//!
//! The observing controls subscribe to the session's change signals with
//! scoped connections: subscription lifetime equals control lifetime, ended
//! early by [`dispose`](crate::widget::ToolbarWidget::dispose). Kernel
//! requests never surface errors - a request to an absent kernel is a no-op.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cellarium_core::logging::targets;
use cellarium_core::signal::ConnectionGuard;
use cellarium_core::{Property, Signal};
use parking_lot::Mutex;

use crate::kernel::{ConnectionStatus, KernelStatus, SessionContext};
use crate::translator::{TranslationBundle, Translator, TEXT_DOMAIN};
use crate::widget::{IconGlyph, ToolbarWidget};

/// Toolbar item name of the interrupt button.
pub const INTERRUPT_ITEM: &str = "interrupt";
/// Toolbar item name of the restart button.
pub const RESTART_ITEM: &str = "restart";
/// Toolbar item name of the kernel name label.
pub const KERNEL_NAME_ITEM: &str = "kernel-name";
/// Toolbar item name of the kernel status indicator.
pub const KERNEL_STATUS_ITEM: &str = "kernel-status";

// ============================================================================
// KernelInterruptButton
// ============================================================================

/// Button that interrupts the session's kernel.
///
/// No observable state besides the fixed glyph: the button does not track
/// the kernel and simply no-ops when none is connected.
pub struct KernelInterruptButton {
    session: Arc<dyn SessionContext>,
    tooltip: String,
    enabled: AtomicBool,
    disposed: AtomicBool,
}

impl KernelInterruptButton {
    /// Create an interrupt button over the session.
    pub fn new(session: Arc<dyn SessionContext>, translator: &dyn Translator) -> Self {
        let bundle = translator.load(TEXT_DOMAIN);
        Self {
            session,
            tooltip: bundle.gettext("Interrupt the kernel"),
            enabled: AtomicBool::new(true),
            disposed: AtomicBool::new(false),
        }
    }

    /// The fixed glyph.
    pub fn glyph(&self) -> IconGlyph {
        IconGlyph::Stop
    }

    /// Localized tooltip text.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Issue an interrupt request to the active kernel.
    pub fn click(&self) {
        if !self.is_enabled() || self.is_disposed() {
            return;
        }
        match self.session.kernel() {
            Some(kernel) => {
                if let Err(err) = kernel.interrupt() {
                    tracing::debug!(target: targets::SESSION, %err, "interrupt request failed");
                }
            }
            None => {
                tracing::trace!(target: targets::SESSION, "interrupt with no kernel is a no-op");
            }
        }
    }
}

impl ToolbarWidget for KernelInterruptButton {
    fn item_name(&self) -> &str {
        INTERRUPT_ITEM
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
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

// ============================================================================
// KernelRestartButton
// ============================================================================

/// Button that restarts the session's kernel.
pub struct KernelRestartButton {
    session: Arc<dyn SessionContext>,
    tooltip: String,
    enabled: AtomicBool,
    disposed: AtomicBool,
}

impl KernelRestartButton {
    /// Create a restart button over the session.
    pub fn new(session: Arc<dyn SessionContext>, translator: &dyn Translator) -> Self {
        let bundle = translator.load(TEXT_DOMAIN);
        Self {
            session,
            tooltip: bundle.gettext("Restart the kernel"),
            enabled: AtomicBool::new(true),
            disposed: AtomicBool::new(false),
        }
    }

    /// The fixed glyph.
    pub fn glyph(&self) -> IconGlyph {
        IconGlyph::Refresh
    }

    /// Localized tooltip text.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Issue a restart request to the active kernel.
    pub fn click(&self) {
        if !self.is_enabled() || self.is_disposed() {
            return;
        }
        match self.session.kernel() {
            Some(kernel) => {
                if let Err(err) = kernel.restart() {
                    tracing::debug!(target: targets::SESSION, %err, "restart request failed");
                }
            }
            None => {
                tracing::trace!(target: targets::SESSION, "restart with no kernel is a no-op");
            }
        }
    }
}

impl ToolbarWidget for KernelRestartButton {
    fn item_name(&self) -> &str {
        RESTART_ITEM
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
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

// ============================================================================
// KernelNameLabel
// ============================================================================

struct NameSubscriptions {
    _kernel: ConnectionGuard<()>,
    _connection: ConnectionGuard<ConnectionStatus>,
}

/// Passive label showing the session's kernel display name.
///
/// Reflects the name present once the session finishes initializing, and
/// follows kernel swaps and connection changes afterwards.
pub struct KernelNameLabel {
    // Subscriptions first: their guards must drop before the session Arc.
    subscriptions: Mutex<Option<NameSubscriptions>>,
    session: Arc<dyn SessionContext>,
    text: Arc<Property<String>>,
    changed: Arc<Signal<()>>,
    disposed: AtomicBool,
}

impl KernelNameLabel {
    /// Create a kernel name label over the session.
    pub fn new(session: Arc<dyn SessionContext>, _translator: &dyn Translator) -> Self {
        let text = Arc::new(Property::new(session.kernel_display_name()));
        let changed = Arc::new(Signal::new());

        // the captures are all Clone, so the refresh closure is too
        let refresh = {
            let weak = Arc::downgrade(&session);
            let text = text.clone();
            let changed = changed.clone();
            move || {
                let Some(session) = weak.upgrade() else {
                    return;
                };
                if text.set(session.kernel_display_name()) {
                    changed.emit(());
                }
            }
        };

        let kernel_guard = {
            let refresh = refresh.clone();
            session.kernel_changed().connect_scoped(move |_| refresh())
        };
        let connection_guard = session
            .connection_status_changed()
            .connect_scoped(move |_| refresh());

        Self {
            subscriptions: Mutex::new(Some(NameSubscriptions {
                _kernel: kernel_guard,
                _connection: connection_guard,
            })),
            session,
            text,
            changed,
            disposed: AtomicBool::new(false),
        }
    }

    /// The current label text.
    pub fn text(&self) -> String {
        self.text.get()
    }

    /// Emitted after the label text changed.
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    /// The observed session.
    pub fn session(&self) -> &Arc<dyn SessionContext> {
        &self.session
    }
}

impl ToolbarWidget for KernelNameLabel {
    fn item_name(&self) -> &str {
        KERNEL_NAME_ITEM
    }

    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            // drop the guards: unsubscribes from the session
            *self.subscriptions.lock() = None;
            self.changed.disconnect_all();
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
// KernelStatusIndicator
// ============================================================================

struct StatusSubscriptions {
    _status: ConnectionGuard<KernelStatus>,
    _kernel: ConnectionGuard<()>,
    _connection: ConnectionGuard<ConnectionStatus>,
}

/// Icon + title control tracking the kernel's execution status.
///
/// While the session has no kernel yet, shows the [`IconGlyph::Offline`]
/// glyph and the title "Kernel Connecting". Once a kernel is bound, every
/// status transition updates the glyph and a title of the form
/// `Kernel <Status>` - the lowercase form of the title always contains the
/// current status token.
pub struct KernelStatusIndicator {
    // Subscriptions first: their guards must drop before the session Arc.
    subscriptions: Mutex<Option<StatusSubscriptions>>,
    session: Arc<dyn SessionContext>,
    glyph: Arc<Property<IconGlyph>>,
    title: Arc<Property<String>>,
    changed: Arc<Signal<()>>,
    disposed: AtomicBool,
}

impl KernelStatusIndicator {
    /// Create a status indicator over the session.
    pub fn new(session: Arc<dyn SessionContext>, translator: &dyn Translator) -> Self {
        let bundle = translator.load(TEXT_DOMAIN);

        let (initial_glyph, initial_title) = current_display(&*session, &*bundle);
        let glyph = Arc::new(Property::new(initial_glyph));
        let title = Arc::new(Property::new(initial_title));
        let changed = Arc::new(Signal::new());

        // the captures are all Clone, so the refresh closure is too
        let refresh = {
            let weak = Arc::downgrade(&session);
            let bundle = bundle.clone();
            let glyph = glyph.clone();
            let title = title.clone();
            let changed = changed.clone();
            move || {
                let Some(session) = weak.upgrade() else {
                    return;
                };
                let (next_glyph, next_title) = current_display(&*session, &*bundle);
                // non-short-circuiting: both cells must be updated
                if glyph.set(next_glyph) | title.set(next_title) {
                    changed.emit(());
                }
            }
        };

        let status_guard = {
            let refresh = refresh.clone();
            session.status_changed().connect_scoped(move |_| refresh())
        };
        let kernel_guard = {
            let refresh = refresh.clone();
            session.kernel_changed().connect_scoped(move |_| refresh())
        };
        let connection_guard = session
            .connection_status_changed()
            .connect_scoped(move |_| refresh());

        Self {
            subscriptions: Mutex::new(Some(StatusSubscriptions {
                _status: status_guard,
                _kernel: kernel_guard,
                _connection: connection_guard,
            })),
            session,
            glyph,
            title,
            changed,
            disposed: AtomicBool::new(false),
        }
    }

    /// The current glyph.
    pub fn glyph(&self) -> IconGlyph {
        self.glyph.get()
    }

    /// The current title text.
    pub fn title(&self) -> String {
        self.title.get()
    }

    /// Emitted after the glyph or title changed.
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    /// The observed session.
    pub fn session(&self) -> &Arc<dyn SessionContext> {
        &self.session
    }
}

impl ToolbarWidget for KernelStatusIndicator {
    fn item_name(&self) -> &str {
        KERNEL_STATUS_ITEM
    }

    fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            *self.subscriptions.lock() = None;
            self.changed.disconnect_all();
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Compute the glyph/title pair for the session's current state.
fn current_display(
    session: &dyn SessionContext,
    bundle: &dyn TranslationBundle,
) -> (IconGlyph, String) {
    match session.kernel() {
        Some(kernel) => {
            let status = kernel.status();
            let title = format!("{} {}", bundle.gettext("Kernel"), title_case(status.as_str()));
            (glyph_for_status(status), title)
        }
        None => (IconGlyph::Offline, bundle.gettext("Kernel Connecting")),
    }
}

fn glyph_for_status(status: KernelStatus) -> IconGlyph {
    match status {
        KernelStatus::Idle => IconGlyph::CircleHollow,
        KernelStatus::Busy | KernelStatus::Terminating => IconGlyph::CircleFilled,
        KernelStatus::Starting | KernelStatus::Restarting | KernelStatus::AutoRestarting => {
            IconGlyph::Refresh
        }
        KernelStatus::Dead => IconGlyph::Skull,
        KernelStatus::Unknown => IconGlyph::Offline,
    }
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

static_assertions::assert_impl_all!(KernelInterruptButton: Send, Sync);
static_assertions::assert_impl_all!(KernelRestartButton: Send, Sync);
static_assertions::assert_impl_all!(KernelNameLabel: Send, Sync);
static_assertions::assert_impl_all!(KernelStatusIndicator: Send, Sync);
