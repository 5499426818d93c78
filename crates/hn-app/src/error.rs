//! Error types for the hn-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors for the
/// front-ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Network compilation failed: {0}")]
    Compile(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("No network loaded")]
    NoNetwork,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for hn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<hn_project::ProjectError> for AppError {
    fn from(err: hn_project::ProjectError) -> Self {
        match err {
            hn_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<hn_equipment::EquipmentError> for AppError {
    fn from(err: hn_equipment::EquipmentError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<hn_network::NetworkError> for AppError {
    fn from(err: hn_network::NetworkError) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<hn_solver::SolverError> for AppError {
    fn from(err: hn_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}
