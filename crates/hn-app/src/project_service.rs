//! Project loading, saving, validation, and introspection.

use std::path::Path;

use hn_project::schema::{NodeKind, Project};

use crate::error::{AppError, AppResult};

/// Summary of a project for listing.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub name: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub tank_count: usize,
    pub valve_keys: Vec<String>,
}

/// Load a project from a YAML or JSON file, validating it.
pub fn load_project(path: &Path) -> AppResult<Project> {
    if !path.exists() {
        return Err(AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(hn_project::load(path)?)
}

/// Save a project; the format follows the file extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => hn_project::save_json(path, project)?,
        _ => hn_project::save_yaml(path, project)?,
    }
    Ok(())
}

/// Validate project structure, including the presence of a tank.
pub fn validate_project(project: &Project) -> AppResult<()> {
    hn_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))?;

    if project.nodes.is_empty() {
        return Err(AppError::Validation(
            "Project must have at least one node".to_string(),
        ));
    }
    if !project
        .nodes
        .iter()
        .any(|n| matches!(n.kind, NodeKind::Tank { .. }))
    {
        return Err(AppError::Validation(
            "Project needs at least one tank to fix the pressure level".to_string(),
        ));
    }
    Ok(())
}

pub fn summarize(project: &Project) -> ProjectSummary {
    ProjectSummary {
        name: project.name.clone(),
        node_count: project.nodes.len(),
        edge_count: project.edges.len(),
        tank_count: project
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Tank { .. }))
            .count(),
        valve_keys: project
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Valve { .. }))
            .map(|n| n.id.clone())
            .collect(),
    }
}
