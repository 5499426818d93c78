//! Shared application service layer for hydronet.
//!
//! Front-ends go through this crate to load and validate project files,
//! compile them into networks, and drive a [`Session`] that owns the network
//! being edited and solved.

pub mod error;
pub mod project_service;
pub mod query;
pub mod runtime_compile;
pub mod session;
pub mod telemetry;

pub use error::{AppError, AppResult};
pub use project_service::{ProjectSummary, load_project, save_project, summarize, validate_project};
pub use query::{edge_value, list_edge_keys, list_node_keys, node_value};
pub use runtime_compile::{build_equipment, build_pipe, compile_project, compile_settings};
pub use session::Session;
pub use telemetry::{EdgeReading, NodeReading, PortReading, TelemetrySnapshot};
