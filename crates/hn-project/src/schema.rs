//! Project schema definitions.
//!
//! Every device parameter that a hand-written file may leave out carries the
//! default used by the network editor, so a minimal file only needs ids,
//! types and the edges between them.

use serde::{Deserialize, Serialize};

/// Schema version written by this crate.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsDef>,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: CURRENT_VERSION,
            name: name.into(),
            settings: None,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeDef> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

/// Overrides for the network-wide settings. Absent fields keep their
/// built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SettingsDef {
    /// Fluid key (`water`, `iso_vg_46`, `iso_vg_32`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_temperature_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmospheric_pressure_pa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_flow_guess_m3ps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_scale_pa: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub kind: NodeKind,
}

impl NodeDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum NodeKind {
    Tank {
        #[serde(default)]
        elevation_m: f64,
        #[serde(default = "default_tank_level")]
        level_m: f64,
        /// Falls back to the ambient temperature
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature_k: Option<f64>,
        /// Falls back to the network fluid
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fluid: Option<String>,
    },
    Pump {
        #[serde(default = "default_pump_a")]
        a: f64,
        #[serde(default)]
        b: f64,
        #[serde(default = "default_pump_c")]
        c: f64,
    },
    Valve {
        #[serde(default = "default_valve_cv")]
        max_cv: f64,
        #[serde(default = "default_valve_opening")]
        opening_pct: f64,
    },
    Orifice {
        #[serde(default = "default_orifice_pipe")]
        pipe_diameter_m: f64,
        #[serde(default = "default_orifice_bore")]
        bore_m: f64,
    },
    Filter {
        resistance: f64,
        #[serde(default = "default_clogging")]
        clogging: f64,
    },
    HeatExchanger {
        duty_w: f64,
        k_factor: f64,
    },
    Mixer {
        #[serde(default = "default_branches")]
        inlets: usize,
    },
    Splitter {
        #[serde(default = "default_branches")]
        outlets: usize,
    },
    Generic,
}

impl NodeKind {
    /// Number of inlet and outlet ports the compiled node will have.
    pub fn port_counts(&self) -> (usize, usize) {
        match self {
            NodeKind::Mixer { inlets } => (*inlets, 1),
            NodeKind::Splitter { outlets } => (1, *outlets),
            _ => (1, 1),
        }
    }

    /// Tank with the editor defaults.
    pub fn tank() -> Self {
        NodeKind::Tank {
            elevation_m: 0.0,
            level_m: default_tank_level(),
            temperature_k: None,
            fluid: None,
        }
    }

    /// Pump with the editor's default head curve.
    pub fn pump() -> Self {
        NodeKind::Pump {
            a: default_pump_a(),
            b: 0.0,
            c: default_pump_c(),
        }
    }

    pub fn valve() -> Self {
        NodeKind::Valve {
            max_cv: default_valve_cv(),
            opening_pct: default_valve_opening(),
        }
    }

    pub fn orifice() -> Self {
        NodeKind::Orifice {
            pipe_diameter_m: default_orifice_pipe(),
            bore_m: default_orifice_bore(),
        }
    }
}

fn default_tank_level() -> f64 {
    1.0
}

fn default_pump_a() -> f64 {
    80.0
}

fn default_pump_c() -> f64 {
    -2000.0
}

fn default_valve_cv() -> f64 {
    0.05
}

fn default_valve_opening() -> f64 {
    50.0
}

fn default_orifice_pipe() -> f64 {
    0.1
}

fn default_orifice_bore() -> f64 {
    0.07
}

fn default_clogging() -> f64 {
    1.0
}

fn default_branches() -> usize {
    2
}

/// A pipe between two node ports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeDef {
    pub id: String,
    pub from: String,
    #[serde(default)]
    pub from_port: usize,
    pub to: String,
    #[serde(default)]
    pub to_port: usize,
    #[serde(default)]
    pub pipe: PipeDef,
}

impl EdgeDef {
    /// Default pipe between the first ports of two nodes.
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            from_port: 0,
            to: to.into(),
            to_port: 0,
            pipe: PipeDef::default(),
        }
    }

    pub fn with_pipe(mut self, pipe: PipeDef) -> Self {
        self.pipe = pipe;
        self
    }
}

/// Pipe geometry. The bore is either a raw `diameter_m` or a standard
/// `nps` + `schedule`; with neither the default diameter applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    #[serde(default = "default_pipe_length")]
    pub length_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Falls back to the network roughness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness_m: Option<f64>,
    /// Fixed Darcy friction factor instead of the Reynolds correlation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_factor: Option<f64>,
}

/// Schedule assumed when only `nps` is given.
pub const DEFAULT_SCHEDULE: &str = "40";
/// Pipe diameter when no bore is given [m].
pub const DEFAULT_PIPE_DIAMETER_M: f64 = 0.1;

fn default_pipe_length() -> f64 {
    25.0
}

impl Default for PipeDef {
    fn default() -> Self {
        Self {
            length_m: default_pipe_length(),
            diameter_m: None,
            nps: None,
            schedule: None,
            roughness_m: None,
            friction_factor: None,
        }
    }
}

impl PipeDef {
    pub fn with_diameter(length_m: f64, diameter_m: f64) -> Self {
        Self {
            length_m,
            diameter_m: Some(diameter_m),
            ..Self::default()
        }
    }

    pub fn standard(length_m: f64, nps: &str, schedule: &str) -> Self {
        Self {
            length_m,
            nps: Some(nps.to_string()),
            schedule: Some(schedule.to_string()),
            ..Self::default()
        }
    }

    pub fn schedule_or_default(&self) -> &str {
        self.schedule.as_deref().unwrap_or(DEFAULT_SCHEDULE)
    }
}
