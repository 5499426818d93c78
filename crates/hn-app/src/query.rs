//! Query helpers for extracting values from a telemetry snapshot.

use crate::error::{AppError, AppResult};
use crate::telemetry::{PortReading, TelemetrySnapshot};

/// List all node keys in a snapshot.
pub fn list_node_keys(snapshot: &TelemetrySnapshot) -> Vec<String> {
    snapshot.nodes.iter().map(|n| n.key.clone()).collect()
}

/// List all edge keys in a snapshot.
pub fn list_edge_keys(snapshot: &TelemetrySnapshot) -> Vec<String> {
    snapshot.edges.iter().map(|e| e.key.clone()).collect()
}

fn port_value(port: &PortReading, variable: &str) -> Option<f64> {
    match variable {
        "p_pa" | "pressure" => Some(port.pressure_pa),
        "t_k" | "temperature" => Some(port.temperature_k),
        "q_m3_s" | "flow" => Some(port.flow_m3_s),
        "rho_kg_m3" | "density" => Some(port.density_kg_m3),
        "mu_pa_s" | "viscosity" => Some(port.viscosity_pa_s),
        _ => None,
    }
}

/// Read a node variable. Port variables come from the first inlet unless
/// prefixed with `outlet.`; `dp_pa` is the inlet-to-outlet drop.
pub fn node_value(snapshot: &TelemetrySnapshot, node_key: &str, variable: &str) -> AppResult<f64> {
    let node = snapshot
        .node(node_key)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown node: {}", node_key)))?;

    let value = match variable {
        "dp_pa" | "pressure_drop" => node.pressure_drop_pa(),
        _ => match variable.strip_prefix("outlet.") {
            Some(var) => node.outlets.first().and_then(|p| port_value(p, var)),
            None => node.inlets.first().and_then(|p| port_value(p, variable)),
        },
    };

    value.ok_or_else(|| AppError::InvalidInput(format!("Unknown node variable: {}", variable)))
}

/// Read an edge variable.
pub fn edge_value(snapshot: &TelemetrySnapshot, edge_key: &str, variable: &str) -> AppResult<f64> {
    let edge = snapshot
        .edge(edge_key)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown edge: {}", edge_key)))?;

    let value = match variable {
        "q_m3_s" | "flow" => edge.flow_m3_s,
        "v_m_s" | "velocity" => edge.velocity_m_s,
        "re" | "reynolds" => edge.reynolds,
        "dp_pa" | "pressure_drop" => edge.pressure_drop_pa,
        "mdot_kg_s" | "mass_flow" => edge.flow_m3_s * edge.inlet.density_kg_m3,
        _ => {
            return port_value(&edge.inlet, variable).ok_or_else(|| {
                AppError::InvalidInput(format!("Unknown edge variable: {}", variable))
            });
        }
    };
    Ok(value)
}
