//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (middleware: request ID, tracing, timeout, body limit)
//!     → gateway.rs | weather.rs | rates.rs (one router per service)
//!     → domain modules (weather chain, rate service)
//!     → Send response to client
//! ```

pub mod gateway;
pub mod rates;
pub mod server;
pub mod weather;

pub use server::{serve, with_middleware};
