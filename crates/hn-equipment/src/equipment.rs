//! Closed set of equipment variants and their dispatch.

use crate::error::EquipmentResult;
use crate::filter::Filter;
use crate::heat_exchanger::HeatExchanger;
use crate::junction::{Mixer, Splitter};
use crate::mixing::{apply_outward, mix_ports};
use crate::orifice::Orifice;
use crate::pipe::Pipe;
use crate::port::Port;
use crate::pump::Pump;
use crate::tank::Tank;
use crate::traits::FlowElement;
use crate::valve::Valve;
use hn_core::Real;

/// Discriminant of [`Equipment`], used for reporting and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipmentKind {
    Tank,
    Pipe,
    Pump,
    Valve,
    Orifice,
    Filter,
    HeatExchanger,
    Mixer,
    Splitter,
    Generic,
}

impl EquipmentKind {
    pub fn key(&self) -> &'static str {
        match self {
            EquipmentKind::Tank => "tank",
            EquipmentKind::Pipe => "pipe",
            EquipmentKind::Pump => "pump",
            EquipmentKind::Valve => "valve",
            EquipmentKind::Orifice => "orifice",
            EquipmentKind::Filter => "filter",
            EquipmentKind::HeatExchanger => "heat_exchanger",
            EquipmentKind::Mixer => "mixer",
            EquipmentKind::Splitter => "splitter",
            EquipmentKind::Generic => "generic",
        }
    }
}

impl std::fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One piece of equipment with its physical parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Equipment {
    Tank(Tank),
    Pipe(Pipe),
    Pump(Pump),
    Valve(Valve),
    Orifice(Orifice),
    Filter(Filter),
    HeatExchanger(HeatExchanger),
    Mixer(Mixer),
    Splitter(Splitter),
    /// Pass-through fallback for unrecognized device types
    Generic,
}

impl Equipment {
    pub fn kind(&self) -> EquipmentKind {
        match self {
            Equipment::Tank(_) => EquipmentKind::Tank,
            Equipment::Pipe(_) => EquipmentKind::Pipe,
            Equipment::Pump(_) => EquipmentKind::Pump,
            Equipment::Valve(_) => EquipmentKind::Valve,
            Equipment::Orifice(_) => EquipmentKind::Orifice,
            Equipment::Filter(_) => EquipmentKind::Filter,
            Equipment::HeatExchanger(_) => EquipmentKind::HeatExchanger,
            Equipment::Mixer(_) => EquipmentKind::Mixer,
            Equipment::Splitter(_) => EquipmentKind::Splitter,
            Equipment::Generic => EquipmentKind::Generic,
        }
    }

    /// Fixed `(inlets, outlets)` port counts of this variant.
    pub fn port_counts(&self) -> (usize, usize) {
        match self {
            Equipment::Mixer(m) => (m.inlets, 1),
            Equipment::Splitter(s) => (1, s.outlets),
            _ => (1, 1),
        }
    }

    /// Whether this node fixes its own pressure (a solver boundary).
    pub fn is_boundary(&self) -> bool {
        matches!(self, Equipment::Tank(_))
    }

    /// Thermal transfer law: mixing for every variant, plus the duty-based
    /// shift for heat exchangers. Tanks impose their own state on all ports.
    pub fn propagate_temperature(
        &self,
        inlets: &mut [Port],
        outlets: &mut [Port],
    ) -> EquipmentResult<()> {
        match self {
            Equipment::Tank(tank) => {
                for port in inlets.iter_mut().chain(outlets.iter_mut()) {
                    port.set_thermal(tank.fluid, tank.temperature.value)?;
                }
            }
            Equipment::HeatExchanger(hx) => {
                if let Some(mix) = mix_ports(inlets, outlets)? {
                    let dt = hx.temperature_change(mix.mass_flow, mix.density);
                    apply_outward(inlets, outlets, mix.fluid, mix.temperature + dt)?;
                }
            }
            _ => {
                mix_ports(inlets, outlets)?;
            }
        }
        Ok(())
    }
}

impl FlowElement for Equipment {
    fn pressure_drop(&self, flow: Real, density: Real, viscosity: Real) -> EquipmentResult<Real> {
        match self {
            Equipment::Tank(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::Pipe(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::Pump(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::Valve(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::Orifice(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::Filter(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::HeatExchanger(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::Mixer(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::Splitter(e) => e.pressure_drop(flow, density, viscosity),
            Equipment::Generic => Ok(0.0),
        }
    }
}
