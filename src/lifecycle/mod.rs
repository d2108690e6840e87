//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Initialize logging/metrics → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or trigger() → broadcast → servers drain and exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
