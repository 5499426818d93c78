//! hn-core: stable foundation for hydronet.
//!
//! Contains:
//! - units (uom SI types + constructors + physical constants)
//! - numeric (Real + float helpers)
//! - ids (compact arena identifiers for nodes and edges)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{HnError, HnResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
