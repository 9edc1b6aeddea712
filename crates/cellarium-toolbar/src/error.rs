//! Error types for the toolbar subsystem.

/// Result type alias for toolbar operations.
pub type Result<T> = std::result::Result<T, ToolbarError>;

/// Errors that can occur while assembling toolbars.
#[derive(Debug, thiserror::Error)]
pub enum ToolbarError {
    /// A settings plugin could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors from the settings plugin registry.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The connector has no plugin under the requested id.
    #[error("no settings plugin registered under '{plugin_id}'")]
    PluginNotFound { plugin_id: String },

    /// The storage backend failed to produce the plugin.
    #[error("failed to fetch settings plugin '{plugin_id}': {message}")]
    Fetch { plugin_id: String, message: String },

    /// The plugin's schema document is not valid JSON.
    #[error("invalid schema for settings plugin '{plugin_id}': {source}")]
    InvalidSchema {
        plugin_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    /// Create a fetch error.
    pub fn fetch(plugin_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            plugin_id: plugin_id.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(plugin_id: impl Into<String>) -> Self {
        Self::PluginNotFound {
            plugin_id: plugin_id.into(),
        }
    }
}

/// Errors from kernel requests.
///
/// The session status controls treat every variant as a no-op: a request to
/// an absent or unresponsive kernel is logged and dropped, never surfaced to
/// the user.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// No kernel is connected to the session.
    #[error("no kernel connected")]
    NoKernel,

    /// The kernel rejected or failed the request.
    #[error("kernel {operation} request failed: {message}")]
    RequestFailed { operation: String, message: String },
}

impl KernelError {
    /// Create a request failure for the named operation.
    pub fn request_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Errors from session lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session failed to initialize.
    #[error("session initialization failed: {0}")]
    Initialize(String),

    /// The session failed to shut down.
    #[error("session shutdown failed: {0}")]
    Shutdown(String),

    /// The session has already been disposed.
    #[error("session is disposed")]
    Disposed,
}
