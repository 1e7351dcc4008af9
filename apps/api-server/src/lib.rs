//! # Quill API Server
//!
//! HTTP surface of the blog backend. The binary in `main.rs` wires these
//! modules together; integration tests build the same app in-process.

pub mod config;
pub mod cors;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;
pub mod upload;

pub use config::AppConfig;
pub use state::AppState;
