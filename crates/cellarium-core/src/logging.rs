//! Logging facilities for Cellarium.
//!
//! Cellarium uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! The [`targets`] module lists the target names emitted by the framework so
//! logs can be filtered per subsystem, e.g.
//! `RUST_LOG=cellarium_toolbar::settings=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "cellarium_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "cellarium_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "cellarium_core::property";
    /// Settings plugin registry target.
    pub const SETTINGS: &str = "cellarium_toolbar::settings";
    /// Toolbar assembly target.
    pub const TOOLBAR: &str = "cellarium_toolbar::toolbar";
    /// Kernel session adapter target.
    pub const SESSION: &str = "cellarium_toolbar::session";
}
