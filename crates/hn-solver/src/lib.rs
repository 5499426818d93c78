//! hn-solver: steady-state hydraulic/thermal network solver.
//!
//! Unknowns are the inlet pressure of every internal (non-tank) node and the
//! signed flow of every edge. Residuals are the volumetric mass balance at
//! each internal node and the momentum balance along each edge. Before every
//! residual evaluation a fixed number of property sweeps carries
//! temperature, fluid, density and viscosity along the current flow guess.
//!
//! The root finder is a damped Newton method on a forward-difference
//! Jacobian with a Levenberg-Marquardt fallback. On success the resolved
//! state is written back onto every node and edge port.
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
//! let a = builder.add_node("upper", "Upper", Equipment::Tank(upper)).unwrap();
//! let b = builder.add_node("lower", "Lower", Equipment::Tank(lower)).unwrap();
//! builder.add_edge("line", a, b, Pipe::new(m(100.0), m(0.1), m(4.5e-5)).unwrap());
//! let mut network = builder.build().unwrap();
//!
//! let solution = hn_solver::solve(&mut network).unwrap();
//! let q = solution.edge_flows[0].value;
//! assert!(q > 0.01 && q < 0.05);
//! ```

pub mod error;
pub mod jacobian;
pub mod newton;
pub mod problem;
pub mod solver;
pub mod steady;
pub mod sweep;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonResult, Termination};
pub use problem::SteadyProblem;
pub use solver::{NetworkSolver, SolverState, solve};
pub use steady::SteadySolution;
pub use sweep::{PropertyField, flow_order, property_sweep};
