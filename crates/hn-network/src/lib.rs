//! hn-network: topology layer for hydronet.
//!
//! Provides:
//! - `HydraulicNetwork`, a directed multigraph of equipment nodes joined by
//!   pipe edges, with compact adjacency
//! - `NetworkBuilder`, incremental construction with validation
//! - `IndexMap`, the solver's unknown-vector layout
//!
//! # Example
//!
//! ```
//! use hn_core::units::{k, m};
//! use hn_equipment::{Equipment, Pipe, Tank};
//! use hn_fluids::FluidType;
//! use hn_network::NetworkBuilder;
//!
//! let upper = Tank::new(m(0.0), m(5.0), k(293.15), FluidType::Water).unwrap();
//! let lower = Tank::new(m(0.0), m(2.0), k(293.15), FluidType::Water).unwrap();
//!
//! let mut builder = NetworkBuilder::new();
//! let a = builder.add_node("upper", "Upper tank", Equipment::Tank(upper)).unwrap();
//! let b = builder.add_node("lower", "Lower tank", Equipment::Tank(lower)).unwrap();
//! builder.add_edge("line", a, b, Pipe::new(m(100.0), m(0.1), m(4.5e-5)).unwrap());
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.nodes().len(), 2);
//! assert_eq!(network.outgoing(a).len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod indexing;
pub mod network;
pub(crate) mod validate;

pub use builder::NetworkBuilder;
pub use error::{NetworkError, NetworkResult};
pub use indexing::IndexMap;
pub use network::{Edge, HydraulicNetwork};
