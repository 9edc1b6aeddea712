//! Shared mock collaborators for this crate's tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use cellarium_core::{Property, Signal};
use parking_lot::{Mutex, RwLock};

use crate::error::{KernelError, SessionError, SettingsError};
use crate::kernel::{ConnectionStatus, KernelConnection, KernelStatus, SessionContext};
use crate::settings::{PluginManifest, SettingsConnector};

// ============================================================================
// Settings
// ============================================================================

/// In-memory settings backend: plugin id -> manifest.
pub(crate) struct MapConnector {
    manifests: Mutex<HashMap<String, PluginManifest>>,
}

impl MapConnector {
    pub(crate) fn new() -> Self {
        Self {
            manifests: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn insert(&self, plugin_id: &str, manifest: PluginManifest) {
        self.manifests.lock().insert(plugin_id.to_string(), manifest);
    }

    /// A manifest whose schema contributes `items` under
    /// `"jupyter.lab.toolbars" -> factory_name`.
    pub(crate) fn toolbar_manifest(
        factory_name: &str,
        items: serde_json::Value,
    ) -> PluginManifest {
        PluginManifest {
            schema: serde_json::json!({
                "jupyter.lab.toolbars": { factory_name: items }
            }),
            ..Default::default()
        }
    }
}

impl SettingsConnector for MapConnector {
    fn fetch(&self, plugin_id: &str) -> Result<PluginManifest, SettingsError> {
        self.manifests
            .lock()
            .get(plugin_id)
            .cloned()
            .ok_or_else(|| SettingsError::not_found(plugin_id))
    }
}

// ============================================================================
// Kernel / session
// ============================================================================

/// Mock kernel that records requests and drives the session's status signal.
pub(crate) struct MockKernel {
    name: String,
    display_name: String,
    status: Property<KernelStatus>,
    status_signal: Arc<Signal<KernelStatus>>,
    pub(crate) interrupts: AtomicUsize,
    pub(crate) restarts: AtomicUsize,
}

impl MockKernel {
    fn set_status(&self, status: KernelStatus) {
        if self.status.set(status) {
            self.status_signal.emit(status);
        }
    }
}

impl KernelConnection for MockKernel {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn display_name(&self) -> String {
        self.display_name.clone()
    }

    fn status(&self) -> KernelStatus {
        self.status.get()
    }

    fn interrupt(&self) -> Result<(), KernelError> {
        self.interrupts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn restart(&self) -> Result<(), KernelError> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        self.set_status(KernelStatus::Restarting);
        self.set_status(KernelStatus::Idle);
        Ok(())
    }

    fn execute(&self, _code: &str) -> Result<(), KernelError> {
        self.set_status(KernelStatus::Busy);
        self.set_status(KernelStatus::Idle);
        Ok(())
    }
}

/// Mock session context: starts with no kernel ("connecting"), binds one on
/// demand.
pub(crate) struct MockSession {
    name: String,
    kernel: RwLock<Option<Arc<MockKernel>>>,
    status_changed: Arc<Signal<KernelStatus>>,
    kernel_changed: Signal<()>,
    connection_status: Property<ConnectionStatus>,
    connection_status_changed: Signal<ConnectionStatus>,
    disposed: AtomicBool,
}

impl MockSession {
    pub(crate) fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            kernel: RwLock::new(None),
            status_changed: Arc::new(Signal::new()),
            kernel_changed: Signal::new(),
            connection_status: Property::new(ConnectionStatus::Connecting),
            connection_status_changed: Signal::new(),
            disposed: AtomicBool::new(false),
        })
    }

    /// Bind a kernel and notify observers, as a finished session startup
    /// would.
    pub(crate) fn connect_kernel(&self, name: &str, display_name: &str) -> Arc<MockKernel> {
        let kernel = Arc::new(MockKernel {
            name: name.to_string(),
            display_name: display_name.to_string(),
            status: Property::new(KernelStatus::Idle),
            status_signal: self.status_changed.clone(),
            interrupts: AtomicUsize::new(0),
            restarts: AtomicUsize::new(0),
        });
        *self.kernel.write() = Some(kernel.clone());
        self.connection_status.set(ConnectionStatus::Connected);
        self.connection_status_changed.emit(ConnectionStatus::Connected);
        self.kernel_changed.emit(());
        self.status_changed.emit(KernelStatus::Idle);
        kernel
    }

    /// Drop the kernel binding (e.g. a dying kernel).
    pub(crate) fn drop_kernel(&self) {
        *self.kernel.write() = None;
        self.connection_status.set(ConnectionStatus::Disconnected);
        self.connection_status_changed.emit(ConnectionStatus::Disconnected);
        self.kernel_changed.emit(());
    }
}

impl SessionContext for MockSession {
    fn kernel(&self) -> Option<Arc<dyn KernelConnection>> {
        self.kernel
            .read()
            .clone()
            .map(|k| k as Arc<dyn KernelConnection>)
    }

    fn kernel_display_name(&self) -> String {
        match self.kernel.read().as_ref() {
            Some(kernel) => kernel.display_name(),
            None => "No Kernel".to_string(),
        }
    }

    fn session_name(&self) -> String {
        self.name.clone()
    }

    fn status_changed(&self) -> &Signal<KernelStatus> {
        &self.status_changed
    }

    fn kernel_changed(&self) -> &Signal<()> {
        &self.kernel_changed
    }

    fn connection_status_changed(&self) -> &Signal<ConnectionStatus> {
        &self.connection_status_changed
    }

    fn connection_status(&self) -> ConnectionStatus {
        self.connection_status.get()
    }

    fn initialize(&self) -> Result<(), SessionError> {
        Ok(())
    }

    fn shutdown(&self) -> Result<(), SessionError> {
        self.drop_kernel();
        Ok(())
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
