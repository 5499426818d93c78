//! hn-fluids: temperature-dependent liquid properties for hydronet.
//!
//! Provides:
//! - Fluid type definitions (water, ISO VG lubricating oils, generic fallback)
//! - Density and dynamic viscosity correlations as pure functions of `(fluid, T)`
//! - Specific heat selection used by heat exchangers
//!
//! # Example
//!
//! ```
//! use hn_fluids::{FluidType, density, viscosity};
//!
//! let rho = density(FluidType::Water, 293.15).unwrap();
//! let mu = viscosity(FluidType::Water, 293.15).unwrap();
//! assert!((rho - 1000.0).abs() < 1e-9);
//! assert!(mu > 9e-4 && mu < 1.1e-3);
//! ```

pub mod error;
pub mod fluid;
pub mod model;

pub use error::{FluidError, FluidResult};
pub use fluid::FluidType;
pub use model::{FluidProps, density, properties, specific_heat, viscosity};
