//! Lossless junctions and the pass-through fallback.

use crate::error::{EquipmentError, EquipmentResult};
use crate::traits::FlowElement;
use hn_core::Real;

/// Default port count on the branching side of a junction.
pub const DEFAULT_BRANCHES: usize = 2;

fn check_branches(n: usize) -> EquipmentResult<usize> {
    if n == 0 {
        Err(EquipmentError::InvalidArg {
            what: "junction needs at least one branch",
        })
    } else {
        Ok(n)
    }
}

/// N inlets merging into one outlet at a common pressure.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer {
    pub inlets: usize,
}

impl Mixer {
    pub fn new(inlets: usize) -> EquipmentResult<Self> {
        Ok(Self {
            inlets: check_branches(inlets)?,
        })
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            inlets: DEFAULT_BRANCHES,
        }
    }
}

/// One inlet dividing into N outlets at a common pressure.
///
/// The split itself is not fixed here; downstream resistance decides it.
#[derive(Debug, Clone, PartialEq)]
pub struct Splitter {
    pub outlets: usize,
}

impl Splitter {
    pub fn new(outlets: usize) -> EquipmentResult<Self> {
        Ok(Self {
            outlets: check_branches(outlets)?,
        })
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self {
            outlets: DEFAULT_BRANCHES,
        }
    }
}

impl FlowElement for Mixer {
    fn pressure_drop(&self, _flow: Real, _density: Real, _viscosity: Real) -> EquipmentResult<Real> {
        Ok(0.0)
    }
}

impl FlowElement for Splitter {
    fn pressure_drop(&self, _flow: Real, _density: Real, _viscosity: Real) -> EquipmentResult<Real> {
        Ok(0.0)
    }
}
