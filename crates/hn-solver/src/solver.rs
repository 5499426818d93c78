//! Solver state machine bound to one network.

use hn_network::HydraulicNetwork;
use nalgebra::DVector;
use tracing::{info, warn};

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use crate::newton::{NewtonConfig, newton_solve};
use crate::problem::SteadyProblem;
use crate::steady::{SteadySolution, write_back};
use crate::sweep::property_sweep;

/// Lifecycle of a [`NetworkSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Unsolved,
    Assembling,
    Iterating,
    Converged,
    Failed,
}

/// Steady-state solver over a borrowed network.
///
/// A solver runs once: `solve` is only legal from `Unsolved`. After changing
/// a parameter through [`NetworkSolver::network_mut`], call `reset` before
/// solving again.
#[derive(Debug)]
pub struct NetworkSolver<'a> {
    network: &'a mut HydraulicNetwork,
    config: NewtonConfig,
    state: SolverState,
}

impl<'a> NetworkSolver<'a> {
    /// Bind a solver to `network`, taking tolerance and iteration cap from
    /// its settings.
    pub fn new(network: &'a mut HydraulicNetwork) -> Self {
        let config = NewtonConfig::from_settings(network.settings());
        Self {
            network,
            config,
            state: SolverState::Unsolved,
        }
    }

    /// Override the root-finder configuration.
    pub fn with_config(mut self, config: NewtonConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &NewtonConfig {
        &self.config
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn network(&self) -> &HydraulicNetwork {
        &*self.network
    }

    pub fn network_mut(&mut self) -> &mut HydraulicNetwork {
        &mut *self.network
    }

    /// Return to `Unsolved` so the network can be solved again.
    pub fn reset(&mut self) {
        self.state = SolverState::Unsolved;
    }

    /// Solve the network and write the result onto every port.
    pub fn solve(&mut self) -> SolverResult<SteadySolution> {
        if self.state != SolverState::Unsolved {
            return Err(SolverError::InvalidState {
                what: format!("solve called in state {:?}; reset first", self.state),
            });
        }

        match self.run() {
            Ok(solution) => {
                self.state = SolverState::Converged;
                info!(
                    iterations = solution.iterations,
                    residual = solution.residual_norm,
                    "steady solve converged"
                );
                Ok(solution)
            }
            Err(err) => {
                self.state = SolverState::Failed;
                warn!(error = %err, "steady solve failed");
                Err(err)
            }
        }
    }

    fn run(&mut self) -> SolverResult<SteadySolution> {
        self.state = SolverState::Assembling;
        let problem = SteadyProblem::new(&*self.network)?;

        let (x, residual_norm, iterations) = if problem.unknown_count() == 0 {
            // Tanks only: nothing flows
            (DVector::zeros(0), 0.0, 0)
        } else {
            self.state = SolverState::Iterating;
            let residual = |x: &DVector<f64>| problem.residuals(x);
            let eps = self.config.fd_epsilon;
            let jacobian = |x: &DVector<f64>, r: &DVector<f64>| {
                finite_difference_jacobian(x, r, residual, eps)
            };

            let result = newton_solve(problem.initial_guess(), residual, jacobian, &self.config)?;

            if !(result.converged && result.residual_norm < self.config.tolerance) {
                return Err(SolverError::ConvergenceFailed {
                    residual_norm: result.residual_norm,
                    iterations: result.iterations,
                    reason: result.termination.to_string(),
                });
            }
            (result.x, result.residual_norm, result.iterations)
        };

        let flows = problem.flows(&x);
        let inlet = problem.inlet_pressures(&x);
        let field = property_sweep(problem.network(), &flows)?;
        drop(problem);

        write_back(&mut *self.network, &inlet, &flows, &field)?;
        Ok(SteadySolution::new(&inlet, &flows, residual_norm, iterations))
    }
}

/// Solve `network` in place with its own settings.
pub fn solve(network: &mut HydraulicNetwork) -> SolverResult<SteadySolution> {
    NetworkSolver::new(network).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_core::units::{k, m};
    use hn_equipment::{Equipment, Pipe, Tank};
    use hn_fluids::FluidType;
    use hn_network::NetworkBuilder;

    fn tank(level: f64) -> Equipment {
        Equipment::Tank(Tank::new(m(0.0), m(level), k(293.15), FluidType::Water).unwrap())
    }

    fn drain() -> HydraulicNetwork {
        let mut b = NetworkBuilder::new();
        let t1 = b.add_node("t1", "Upper", tank(5.0)).unwrap();
        let t2 = b.add_node("t2", "Lower", tank(2.0)).unwrap();
        b.add_edge("e", t1, t2, Pipe::new(m(100.0), m(0.1), m(4.5e-5)).unwrap());
        b.build().unwrap()
    }

    #[test]
    fn state_transitions() {
        let mut net = drain();
        let mut solver = NetworkSolver::new(&mut net);
        assert_eq!(solver.state(), SolverState::Unsolved);

        solver.solve().unwrap();
        assert_eq!(solver.state(), SolverState::Converged);

        let err = solver.solve().unwrap_err();
        assert!(matches!(err, SolverError::InvalidState { .. }));

        solver.reset();
        assert_eq!(solver.state(), SolverState::Unsolved);
        solver.solve().unwrap();
    }

    #[test]
    fn failure_marks_state() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("a", "A", Equipment::Generic).unwrap();
        let c = b.add_node("c", "C", Equipment::Generic).unwrap();
        b.add_edge("e", a, c, Pipe::new(m(1.0), m(0.1), m(0.0)).unwrap());
        let mut net = b.build().unwrap();

        let mut solver = NetworkSolver::new(&mut net);
        assert!(matches!(
            solver.solve(),
            Err(SolverError::Topology { .. })
        ));
        assert_eq!(solver.state(), SolverState::Failed);
    }

    #[test]
    fn iteration_cap_surfaces_as_convergence_failure() {
        let mut net = drain();
        let config = NewtonConfig {
            max_iterations: 1,
            tolerance: 1e-14,
            ..NewtonConfig::default()
        };
        let err = NetworkSolver::new(&mut net)
            .with_config(config)
            .solve()
            .unwrap_err();
        match err {
            SolverError::ConvergenceFailed {
                residual_norm,
                iterations,
                ..
            } => {
                assert!(residual_norm > 0.0);
                assert!(iterations <= 1);
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn tanks_only_is_trivial() {
        let mut b = NetworkBuilder::new();
        b.add_node("t1", "Upper", tank(5.0)).unwrap();
        b.add_node("t2", "Lower", tank(2.0)).unwrap();
        let mut net = b.build().unwrap();

        let solution = solve(&mut net).unwrap();
        assert_eq!(solution.iterations, 0);
        assert!(solution.edge_flows.is_empty());
        assert_eq!(solution.node_pressures.len(), 2);
    }
}
