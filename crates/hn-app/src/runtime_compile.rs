//! Compilation of a project description into a solvable network.

use hn_core::units::{k, m, w};
use hn_equipment::{
    Equipment, Filter, GlobalSettings, HeatExchanger, Mixer, Orifice, Pipe, Pump, Splitter, Tank,
    Valve, standards,
};
use hn_fluids::FluidType;
use hn_network::{HydraulicNetwork, NetworkBuilder};
use hn_project::schema::{
    DEFAULT_PIPE_DIAMETER_M, NodeDef, NodeKind, PipeDef, Project, SettingsDef,
};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Apply the project's settings overrides to the built-in defaults.
pub fn compile_settings(settings: Option<&SettingsDef>) -> GlobalSettings {
    let mut out = GlobalSettings::default();
    let Some(def) = settings else {
        return out;
    };

    if let Some(fluid) = &def.fluid {
        out.fluid = FluidType::from_key(fluid);
    }
    if let Some(t) = def.ambient_temperature_k {
        out.ambient_temperature = t;
    }
    if let Some(p) = def.atmospheric_pressure_pa {
        out.atmospheric_pressure = p;
    }
    if let Some(r) = def.roughness_m {
        out.roughness = r;
    }
    if let Some(n) = def.property_iterations {
        out.property_iterations = n;
    }
    if let Some(tol) = def.tolerance {
        out.tolerance = tol;
    }
    if let Some(n) = def.max_iterations {
        out.max_iterations = n;
    }
    if let Some(q) = def.initial_flow_guess_m3ps {
        out.initial_flow_guess = q;
    }
    if let Some(scale) = def.pressure_scale_pa {
        out.pressure_scale = scale;
    }
    out
}

/// Build the equipment model for one node definition.
pub fn build_equipment(node: &NodeDef, settings: &GlobalSettings) -> AppResult<Equipment> {
    let context = |e: hn_equipment::EquipmentError| {
        AppError::Compile(format!("node '{}': {}", node.id, e))
    };

    let equipment = match &node.kind {
        NodeKind::Tank {
            elevation_m,
            level_m,
            temperature_k,
            fluid,
        } => {
            let fluid = fluid
                .as_deref()
                .map_or(settings.fluid, FluidType::from_key);
            let temperature = temperature_k.unwrap_or(settings.ambient_temperature);
            Equipment::Tank(
                Tank::new(m(*elevation_m), m(*level_m), k(temperature), fluid).map_err(context)?,
            )
        }
        NodeKind::Pump { a, b, c } => Equipment::Pump(Pump::new(*a, *b, *c).map_err(context)?),
        NodeKind::Valve {
            max_cv,
            opening_pct,
        } => Equipment::Valve(Valve::new(*max_cv, *opening_pct).map_err(context)?),
        NodeKind::Orifice {
            pipe_diameter_m,
            bore_m,
        } => Equipment::Orifice(Orifice::new(m(*pipe_diameter_m), m(*bore_m)).map_err(context)?),
        NodeKind::Filter {
            resistance,
            clogging,
        } => Equipment::Filter(Filter::new(*resistance, *clogging).map_err(context)?),
        NodeKind::HeatExchanger { duty_w, k_factor } => {
            Equipment::HeatExchanger(HeatExchanger::new(w(*duty_w), *k_factor).map_err(context)?)
        }
        NodeKind::Mixer { inlets } => Equipment::Mixer(Mixer::new(*inlets).map_err(context)?),
        NodeKind::Splitter { outlets } => {
            Equipment::Splitter(Splitter::new(*outlets).map_err(context)?)
        }
        NodeKind::Generic => Equipment::Generic,
    };
    Ok(equipment)
}

/// Build an edge pipe, resolving standard sizes and the default roughness.
pub fn build_pipe(edge_id: &str, def: &PipeDef, settings: &GlobalSettings) -> AppResult<Pipe> {
    let context =
        |e: hn_equipment::EquipmentError| AppError::Compile(format!("edge '{edge_id}': {e}"));

    let diameter = match (&def.nps, def.diameter_m) {
        (Some(nps), _) => standards::inner_diameter(nps, def.schedule_or_default()).map_err(context)?,
        (None, Some(d)) => m(d),
        (None, None) => m(DEFAULT_PIPE_DIAMETER_M),
    };
    let roughness = def.roughness_m.unwrap_or(settings.roughness);

    let pipe = Pipe::new(m(def.length_m), diameter, m(roughness)).map_err(context)?;
    match def.friction_factor {
        Some(f) => pipe.with_friction_factor(f).map_err(context),
        None => Ok(pipe),
    }
}

/// Compile a validated project into a network ready to solve.
pub fn compile_project(project: &Project) -> AppResult<HydraulicNetwork> {
    hn_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))?;

    let settings = compile_settings(project.settings.as_ref());
    let mut builder = NetworkBuilder::with_settings(settings)?;

    for node in &project.nodes {
        let equipment = build_equipment(node, builder.settings())?;
        let name = if node.name.is_empty() {
            node.id.as_str()
        } else {
            node.name.as_str()
        };
        builder.add_node(node.id.as_str(), name, equipment)?;
    }

    for edge in &project.edges {
        let lookup = |key: &str| {
            builder
                .node_id(key)
                .ok_or_else(|| AppError::Compile(format!("edge '{}': node '{key}' not found", edge.id)))
        };
        let source = lookup(&edge.from)?;
        let target = lookup(&edge.to)?;
        let pipe = build_pipe(&edge.id, &edge.pipe, builder.settings())?;
        builder.add_edge_between_ports(
            edge.id.as_str(),
            (source, edge.from_port),
            (target, edge.to_port),
            pipe,
        );
    }

    let network = builder.build()?;
    debug!(
        project = project.name.as_str(),
        nodes = network.nodes().len(),
        edges = network.edges().len(),
        "project compiled"
    );
    Ok(network)
}
