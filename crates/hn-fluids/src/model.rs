//! Empirical liquid property correlations.
//!
//! Every function here is a pure function of `(fluid, T)`; the solver calls the
//! same functions wherever density or viscosity is needed so that a network is
//! reproducible from its inputs alone.

use crate::error::{FluidError, FluidResult};
use crate::fluid::FluidType;
use hn_core::Real;

/// Water reference density at 20 °C [kg/m³]
const WATER_RHO_REF: Real = 1000.0;
/// Water volumetric de-rating per kelvin around 20 °C
const WATER_BETA: Real = 0.0002;
/// Oil volumetric de-rating per kelvin around 15 °C
const OIL_BETA: Real = 0.0007;

/// Density of the generic fallback fluid [kg/m³]
const GENERIC_RHO: Real = 1000.0;
/// Viscosity of the generic fallback fluid [Pa·s]
const GENERIC_MU: Real = 1.0e-3;

/// Specific heat of water-like fluids [J/(kg·K)]
const CP_WATER: Real = 4180.0;
/// Specific heat of mineral oils [J/(kg·K)]
const CP_OIL: Real = 2000.0;
/// Densities above this are treated as water-like when selecting cp [kg/m³]
const CP_DENSITY_THRESHOLD: Real = 950.0;

/// Vogel constants for kinematic viscosity: `ln(ν[cSt]) = A + B/(T + C)`.
#[derive(Debug, Clone, Copy)]
struct Vogel {
    a: Real,
    b: Real,
    c: Real,
}

/// Oil grade data: reference density at 15 °C and its viscosity fit.
#[derive(Debug, Clone, Copy)]
struct OilGrade {
    rho_15c: Real,
    vogel: Vogel,
}

// Fitted through the ISO 3448 midpoint at 40 °C and a typical 100 °C value.
const VG46: OilGrade = OilGrade {
    rho_15c: 875.0,
    vogel: Vogel {
        a: -2.963,
        b: 1040.1,
        c: -160.0,
    },
};

const VG32: OilGrade = OilGrade {
    rho_15c: 870.0,
    vogel: Vogel {
        a: -2.707,
        b: 914.5,
        c: -165.0,
    },
};

/// Density and dynamic viscosity evaluated together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProps {
    /// Density [kg/m³]
    pub density: Real,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: Real,
}

fn oil_grade(fluid: FluidType) -> Option<OilGrade> {
    match fluid {
        FluidType::IsoVg46 => Some(VG46),
        FluidType::IsoVg32 => Some(VG32),
        FluidType::Water | FluidType::Generic => None,
    }
}

fn check_temperature(t_kelvin: Real) -> FluidResult<Real> {
    if t_kelvin.is_finite() && t_kelvin > 0.0 {
        Ok(t_kelvin)
    } else {
        Err(FluidError::OutOfRange {
            what: "temperature",
            value: t_kelvin,
        })
    }
}

fn check_positive(value: Real, what: &'static str) -> FluidResult<Real> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FluidError::NonPhysical { what, value })
    }
}

/// Density [kg/m³] at absolute temperature `t_kelvin`.
pub fn density(fluid: FluidType, t_kelvin: Real) -> FluidResult<Real> {
    let t = check_temperature(t_kelvin)?;
    let t_c = t - 273.15;

    let rho = match fluid {
        FluidType::Water => WATER_RHO_REF * (1.0 - WATER_BETA * (t_c - 20.0)),
        FluidType::IsoVg46 | FluidType::IsoVg32 => {
            let rho_15c = oil_grade(fluid).map_or(GENERIC_RHO, |g| g.rho_15c);
            rho_15c * (1.0 - OIL_BETA * (t_c - 15.0))
        }
        FluidType::Generic => GENERIC_RHO,
    };

    check_positive(rho, "density")
}

/// Dynamic viscosity [Pa·s] at absolute temperature `t_kelvin`.
pub fn viscosity(fluid: FluidType, t_kelvin: Real) -> FluidResult<Real> {
    let t = check_temperature(t_kelvin)?;

    let mu = match fluid {
        FluidType::Water => {
            if t <= 140.0 {
                return Err(FluidError::OutOfRange {
                    what: "water viscosity temperature",
                    value: t,
                });
            }
            2.414e-5 * 10.0_f64.powf(247.8 / (t - 140.0))
        }
        FluidType::IsoVg46 | FluidType::IsoVg32 => {
            let Some(grade) = oil_grade(fluid) else {
                return Ok(GENERIC_MU);
            };
            let Vogel { a, b, c } = grade.vogel;
            if t + c <= 0.0 {
                return Err(FluidError::OutOfRange {
                    what: "oil viscosity temperature",
                    value: t,
                });
            }
            // cSt -> m²/s, then scale by the grade's own density
            let nu = (a + b / (t + c)).exp() * 1.0e-6;
            nu * density(fluid, t)?
        }
        FluidType::Generic => GENERIC_MU,
    };

    check_positive(mu, "viscosity")
}

/// Density and viscosity in one call.
pub fn properties(fluid: FluidType, t_kelvin: Real) -> FluidResult<FluidProps> {
    Ok(FluidProps {
        density: density(fluid, t_kelvin)?,
        viscosity: viscosity(fluid, t_kelvin)?,
    })
}

/// Specific heat [J/(kg·K)] selected from density: water-like above 950 kg/m³,
/// oil otherwise.
pub fn specific_heat(density: Real) -> Real {
    if density > CP_DENSITY_THRESHOLD {
        CP_WATER
    } else {
        CP_OIL
    }
}
