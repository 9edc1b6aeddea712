//! Kernel and session collaborator interfaces.
//!
//! This module defines the narrow seams through which the toolbar subsystem
//! observes a compute kernel: [`KernelConnection`] for issuing requests and
//! [`SessionContext`] for the live binding between a document and its kernel.
//! The transport behind them (message protocol, process management) is a
//! separate concern; implementations live with the application shell.
//!
//! # Example
//!
//! ```ignore
//! use cellarium_toolbar::{KernelStatus, SessionContext};
//!
//! fn watch(session: &dyn SessionContext) {
//!     session.status_changed().connect(|&status| {
//!         println!("kernel is {status}");
//!     });
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use cellarium_core::Signal;

use crate::error::{KernelError, SessionError};

/// Execution status of a kernel.
///
/// Tracks the full lifecycle of a compute kernel, from startup through
/// death. The lowercase token form (via [`as_str`](Self::as_str)) is the
/// wire/status-bar representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KernelStatus {
    /// Status has not been reported yet.
    #[default]
    Unknown,
    /// The kernel process is starting up.
    Starting,
    /// The kernel is idle and ready for work.
    Idle,
    /// The kernel is executing code.
    Busy,
    /// The kernel is shutting down.
    Terminating,
    /// The kernel is restarting on request.
    Restarting,
    /// The kernel died and is being restarted automatically.
    AutoRestarting,
    /// The kernel is dead and will not come back.
    Dead,
}

impl KernelStatus {
    /// The lowercase status token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Starting => "starting",
            Self::Idle => "idle",
            Self::Busy => "busy",
            Self::Terminating => "terminating",
            Self::Restarting => "restarting",
            Self::AutoRestarting => "autorestarting",
            Self::Dead => "dead",
        }
    }

    /// Parse a status token. Unrecognized tokens map to `Unknown`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "starting" => Self::Starting,
            "idle" => Self::Idle,
            "busy" => Self::Busy,
            "terminating" => Self::Terminating,
            "restarting" => Self::Restarting,
            "autorestarting" => Self::AutoRestarting,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }

    /// Whether the kernel can accept requests in this state.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Idle | Self::Busy)
    }

    /// Whether this is a terminal state.
    pub fn is_dead(&self) -> bool {
        matches!(self, Self::Dead)
    }
}

impl fmt::Display for KernelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection state between a session and its kernel.
///
/// Independent of [`KernelStatus`]: a kernel may be `Idle` while the
/// session's connection to it is still being established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionStatus {
    /// Connection is being established.
    #[default]
    Connecting,
    /// Connection is live.
    Connected,
    /// Connection was lost or closed.
    Disconnected,
}

impl ConnectionStatus {
    /// The lowercase token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live connection to a compute kernel.
///
/// Implementations wrap the actual transport. All requests are fallible;
/// the toolbar controls in this crate treat failures as no-ops and log them.
pub trait KernelConnection: Send + Sync {
    /// The kernel spec name, e.g. `python3`.
    fn name(&self) -> String;

    /// Human-readable kernel name for display, e.g. `Python 3 (ipykernel)`.
    fn display_name(&self) -> String {
        self.name()
    }

    /// The kernel's current execution status.
    fn status(&self) -> KernelStatus;

    /// Request an interrupt of the currently executing cell.
    fn interrupt(&self) -> std::result::Result<(), KernelError>;

    /// Request a kernel restart.
    fn restart(&self) -> std::result::Result<(), KernelError>;

    /// Submit code for execution.
    fn execute(&self, code: &str) -> std::result::Result<(), KernelError>;
}

/// The live binding between a document widget and its compute kernel.
///
/// A session context outlives individual kernels: the kernel may be swapped
/// (restart, spec change) while the session identity stays stable. Observers
/// subscribe to the change signals and must disconnect when they are done;
/// the toolbar controls in this crate hold scoped connections so their
/// subscription lifetime equals the control lifetime.
pub trait SessionContext: Send + Sync {
    /// The kernel currently bound to this session, if any.
    ///
    /// `None` while the session is starting up or between kernels.
    fn kernel(&self) -> Option<Arc<dyn KernelConnection>>;

    /// Display name of the current kernel, or the session's placeholder
    /// name when no kernel is connected.
    fn kernel_display_name(&self) -> String;

    /// The session's own name (typically the document path).
    fn session_name(&self) -> String;

    /// Emitted whenever the kernel's execution status changes.
    fn status_changed(&self) -> &Signal<KernelStatus>;

    /// Emitted when the bound kernel is replaced (including first bind).
    fn kernel_changed(&self) -> &Signal<()>;

    /// Emitted when the session's connection state changes.
    fn connection_status_changed(&self) -> &Signal<ConnectionStatus>;

    /// Current connection state.
    fn connection_status(&self) -> ConnectionStatus;

    /// Start the session: allocate and bind a kernel.
    fn initialize(&self) -> std::result::Result<(), SessionError>;

    /// Shut the session's kernel down.
    fn shutdown(&self) -> std::result::Result<(), SessionError>;

    /// Release the session and its subscriptions.
    fn dispose(&self);

    /// Whether the session has been disposed.
    fn is_disposed(&self) -> bool;
}
