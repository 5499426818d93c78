//! Control valve with a Cv-based loss law.

use crate::common::{check_dimension, check_finite};
use crate::error::{EquipmentError, EquipmentResult};
use crate::traits::FlowElement;
use hn_core::Real;
use hn_core::numeric::signed_square;

/// Smallest opening fraction used in the loss law; keeps a shut valve finite.
pub const MIN_EFFECTIVE_OPENING: Real = 0.001;

/// Operator-facing opening limits [%].
pub const MIN_OPENING_PCT: Real = 0.1;
pub const MAX_OPENING_PCT: Real = 100.0;

/// Clamp a requested opening to the operator range `[0.1, 100]` %.
pub fn clamp_opening(pct: Real) -> Real {
    pct.clamp(MIN_OPENING_PCT, MAX_OPENING_PCT)
}

/// Valve with `Δp = (ρ/2)·Q·|Q| / Cv_eff²`,
/// `Cv_eff = max_cv · max(0.001, opening/100)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Valve {
    /// Flow coefficient when fully open
    pub max_cv: Real,
    opening_pct: Real,
}

impl Valve {
    pub fn new(max_cv: Real, opening_pct: Real) -> EquipmentResult<Self> {
        check_dimension(max_cv, "valve max Cv")?;
        let mut valve = Self {
            max_cv,
            opening_pct: MAX_OPENING_PCT,
        };
        valve.set_opening(opening_pct)?;
        Ok(valve)
    }

    /// Current opening [%].
    pub fn opening(&self) -> Real {
        self.opening_pct
    }

    /// Set the opening [%], clamped to `[0.1, 100]`.
    pub fn set_opening(&mut self, pct: Real) -> EquipmentResult<()> {
        if pct.is_nan() {
            return Err(EquipmentError::InvalidArg {
                what: "valve opening is NaN",
            });
        }
        let clamped = clamp_opening(pct);
        if clamped != pct {
            tracing::debug!(requested = pct, applied = clamped, "valve opening clamped");
        }
        self.opening_pct = clamped;
        Ok(())
    }

    /// Effective flow coefficient at the current opening.
    pub fn effective_cv(&self) -> Real {
        self.max_cv * (self.opening_pct / 100.0).max(MIN_EFFECTIVE_OPENING)
    }
}

impl FlowElement for Valve {
    fn pressure_drop(&self, flow: Real, density: Real, _viscosity: Real) -> EquipmentResult<Real> {
        let cv = self.effective_cv();
        check_finite((density / 2.0) * signed_square(flow) / (cv * cv), "valve pressure drop")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_valve_stays_finite() {
        let valve = Valve::new(0.05, 0.0).unwrap();
        assert_eq!(valve.opening(), MIN_OPENING_PCT);
        assert!((valve.effective_cv() - 0.05 * 0.001).abs() < 1e-15);
        let dp = valve.pressure_drop(1e-4, 1000.0, 1e-3).unwrap();
        assert!(dp.is_finite() && dp > 0.0);
    }

    #[test]
    fn closing_increases_drop() {
        let mut valve = Valve::new(0.05, 100.0).unwrap();
        let open = valve.pressure_drop(0.01, 1000.0, 1e-3).unwrap();
        valve.set_opening(25.0).unwrap();
        let throttled = valve.pressure_drop(0.01, 1000.0, 1e-3).unwrap();
        assert!((throttled / open - 16.0).abs() < 1e-9);
    }

    #[test]
    fn reverse_flow_loses_pressure_backwards() {
        let valve = Valve::new(0.05, 50.0).unwrap();
        let fwd = valve.pressure_drop(0.02, 1000.0, 1e-3).unwrap();
        let rev = valve.pressure_drop(-0.02, 1000.0, 1e-3).unwrap();
        assert!((fwd + rev).abs() < 1e-9);
    }

    #[test]
    fn opening_clamped() {
        let mut valve = Valve::new(0.05, 150.0).unwrap();
        assert_eq!(valve.opening(), 100.0);
        valve.set_opening(-5.0).unwrap();
        assert_eq!(valve.opening(), MIN_OPENING_PCT);
        assert!(valve.set_opening(f64::NAN).is_err());
        assert_eq!(clamp_opening(0.0), 0.1);
        assert_eq!(clamp_opening(250.0), 100.0);
    }
}
