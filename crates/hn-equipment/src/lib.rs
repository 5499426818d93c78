//! hn-equipment: equipment library for hydraulic networks.
//!
//! Provides:
//! - `Port`, the state record at every connection point
//! - `GlobalSettings`, the defaults shared by every node of a network
//! - Device models (tank, pipe, pump, valve, orifice, filter, heat exchanger,
//!   mixer, splitter) behind the `FlowElement` pressure-drop trait
//! - The `Equipment` variant type and the mass-flow-weighted mixing law
//! - `HydraulicNode`, an equipment instance with its ports
//! - ASME B36.10M/B36.19M pipe dimensions
//!
//! # Example
//!
//! ```
//! use hn_equipment::{FlowElement, Pipe};
//! use hn_core::units::m;
//!
//! let pipe = Pipe::new(m(100.0), m(0.1), m(4.5e-5)).unwrap();
//! let dp = pipe.pressure_drop(0.014, 1000.0, 1.0e-3).unwrap();
//! assert!(dp > 25_000.0 && dp < 35_000.0);
//! ```

pub mod common;
pub mod equipment;
pub mod error;
pub mod filter;
pub mod heat_exchanger;
pub mod junction;
pub mod mixing;
pub mod node;
pub mod orifice;
pub mod pipe;
pub mod port;
pub mod pump;
pub mod settings;
pub mod standards;
pub mod tank;
pub mod traits;
pub mod valve;

pub use equipment::{Equipment, EquipmentKind};
pub use error::{EquipmentError, EquipmentResult};
pub use filter::Filter;
pub use heat_exchanger::HeatExchanger;
pub use junction::{Mixer, Splitter};
pub use mixing::{MixState, mix_ports};
pub use node::HydraulicNode;
pub use orifice::Orifice;
pub use pipe::Pipe;
pub use port::{Port, PortRole};
pub use pump::Pump;
pub use settings::GlobalSettings;
pub use tank::Tank;
pub use traits::FlowElement;
pub use valve::{Valve, clamp_opening};
