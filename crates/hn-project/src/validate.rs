//! Project validation logic.

use crate::schema::{CURRENT_VERSION, EdgeDef, NodeDef, NodeKind, PipeDef, Project, SettingsDef};
use hn_equipment::standards;
use std::collections::{HashMap, HashSet};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > CURRENT_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if let Some(settings) = &project.settings {
        validate_settings(settings)?;
    }

    let mut nodes: HashMap<&str, &NodeKind> = HashMap::new();
    for node in &project.nodes {
        if nodes.insert(node.id.as_str(), &node.kind).is_some() {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
        validate_node(node)?;
    }

    let mut edge_ids = HashSet::new();
    for edge in &project.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: edge.id.clone(),
                context: "edges".to_string(),
            });
        }
        validate_edge(edge, &nodes)?;
    }

    Ok(())
}

fn validate_settings(settings: &SettingsDef) -> Result<(), ValidationError> {
    let positive = [
        ("ambient_temperature_k", settings.ambient_temperature_k),
        ("atmospheric_pressure_pa", settings.atmospheric_pressure_pa),
        ("tolerance", settings.tolerance),
        ("pressure_scale_pa", settings.pressure_scale_pa),
    ];
    for (field, value) in positive {
        if let Some(v) = value {
            positive_finite(&format!("settings {field}"), v)?;
        }
    }
    if let Some(r) = settings.roughness_m {
        non_negative_finite("settings roughness_m", r)?;
    }
    if settings.max_iterations == Some(0) {
        return Err(ValidationError::InvalidValue {
            field: "settings max_iterations".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("node '{}' {}", node.id, name);

    match &node.kind {
        NodeKind::Tank {
            elevation_m,
            level_m,
            temperature_k,
            ..
        } => {
            finite(&field("elevation_m"), *elevation_m)?;
            non_negative_finite(&field("level_m"), *level_m)?;
            if let Some(t) = temperature_k {
                positive_finite(&field("temperature_k"), *t)?;
            }
        }
        NodeKind::Pump { a, b, c } => {
            finite(&field("a"), *a)?;
            finite(&field("b"), *b)?;
            finite(&field("c"), *c)?;
        }
        NodeKind::Valve {
            max_cv,
            opening_pct,
        } => {
            positive_finite(&field("max_cv"), *max_cv)?;
            finite(&field("opening_pct"), *opening_pct)?;
        }
        NodeKind::Orifice {
            pipe_diameter_m,
            bore_m,
        } => {
            positive_finite(&field("pipe_diameter_m"), *pipe_diameter_m)?;
            positive_finite(&field("bore_m"), *bore_m)?;
            if bore_m >= pipe_diameter_m {
                return Err(ValidationError::InvalidValue {
                    field: field("bore_m"),
                    value: bore_m.to_string(),
                    reason: "must be smaller than the pipe diameter".to_string(),
                });
            }
        }
        NodeKind::Filter {
            resistance,
            clogging,
        } => {
            non_negative_finite(&field("resistance"), *resistance)?;
            non_negative_finite(&field("clogging"), *clogging)?;
        }
        NodeKind::HeatExchanger { duty_w, k_factor } => {
            finite(&field("duty_w"), *duty_w)?;
            non_negative_finite(&field("k_factor"), *k_factor)?;
        }
        NodeKind::Mixer { inlets: n } | NodeKind::Splitter { outlets: n } => {
            if *n == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field("branches"),
                    value: "0".to_string(),
                    reason: "a junction needs at least one branch".to_string(),
                });
            }
        }
        NodeKind::Generic => {}
    }
    Ok(())
}

fn validate_edge(edge: &EdgeDef, nodes: &HashMap<&str, &NodeKind>) -> Result<(), ValidationError> {
    let endpoint = |id: &str, role: &str| {
        nodes
            .get(id)
            .copied()
            .ok_or_else(|| ValidationError::MissingReference {
                id: id.to_string(),
                context: format!("edge '{}' {}", edge.id, role),
            })
    };
    let from = endpoint(&edge.from, "from")?;
    let to = endpoint(&edge.to, "to")?;

    if edge.from == edge.to {
        return Err(ValidationError::InvalidValue {
            field: format!("edge '{}' to", edge.id),
            value: edge.to.clone(),
            reason: "an edge may not connect a node to itself".to_string(),
        });
    }

    let (_, from_outlets) = from.port_counts();
    if edge.from_port >= from_outlets {
        return Err(port_error(edge, "from_port", edge.from_port, from_outlets));
    }
    let (to_inlets, _) = to.port_counts();
    if edge.to_port >= to_inlets {
        return Err(port_error(edge, "to_port", edge.to_port, to_inlets));
    }

    validate_pipe(&edge.id, &edge.pipe)
}

fn port_error(edge: &EdgeDef, field: &str, index: usize, len: usize) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("edge '{}' {}", edge.id, field),
        value: index.to_string(),
        reason: format!("node has {len} port(s) on that side"),
    }
}

fn validate_pipe(edge_id: &str, pipe: &PipeDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("edge '{edge_id}' pipe {name}");

    positive_finite(&field("length_m"), pipe.length_m)?;
    if let Some(r) = pipe.roughness_m {
        non_negative_finite(&field("roughness_m"), r)?;
    }
    if let Some(f) = pipe.friction_factor {
        positive_finite(&field("friction_factor"), f)?;
    }

    match (pipe.diameter_m, &pipe.nps) {
        (Some(_), Some(nps)) => Err(ValidationError::InvalidValue {
            field: field("nps"),
            value: nps.clone(),
            reason: "give either diameter_m or nps, not both".to_string(),
        }),
        (Some(d), None) => {
            if pipe.schedule.is_some() {
                return Err(ValidationError::InvalidValue {
                    field: field("schedule"),
                    value: pipe.schedule_or_default().to_string(),
                    reason: "a schedule needs an nps".to_string(),
                });
            }
            positive_finite(&field("diameter_m"), d)
        }
        (None, Some(nps)) => {
            let schedule = pipe.schedule_or_default();
            standards::inner_diameter(nps, schedule)
                .map(|_| ())
                .map_err(|e| ValidationError::InvalidValue {
                    field: field("nps"),
                    value: format!("{nps} sch {schedule}"),
                    reason: e.to_string(),
                })
        }
        (None, None) => Ok(()),
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn positive_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

fn non_negative_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}
