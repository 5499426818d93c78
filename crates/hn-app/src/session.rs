//! Editing session: the one network a front-end works on.

use std::path::Path;

use hn_network::HydraulicNetwork;
use hn_solver::NetworkSolver;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::project_service::load_project;
use crate::runtime_compile::compile_project;
use crate::telemetry::TelemetrySnapshot;

/// Owns the current network and serializes every command against it.
///
/// A solve borrows the session mutably, so a second solve (or a parameter
/// change) cannot start until the first has returned.
#[derive(Debug, Default)]
pub struct Session {
    network: Option<HydraulicNetwork>,
    last: Option<TelemetrySnapshot>,
    solves: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session on a compiled project file.
    pub fn open(path: &Path) -> AppResult<Self> {
        let project = load_project(path)?;
        let mut session = Self::new();
        session.replace_network(compile_project(&project)?);
        Ok(session)
    }

    pub fn network(&self) -> Option<&HydraulicNetwork> {
        self.network.as_ref()
    }

    /// Swap in a new network, dropping results of the old one.
    pub fn replace_network(&mut self, network: HydraulicNetwork) -> Option<HydraulicNetwork> {
        info!(
            nodes = network.nodes().len(),
            edges = network.edges().len(),
            "network replaced"
        );
        self.last = None;
        self.network.replace(network)
    }

    /// Reposition a valve. The opening is clamped to `[0.1, 100]` % before
    /// the network is touched; returns the applied value.
    pub fn set_valve_opening(&mut self, key: &str, opening_pct: f64) -> AppResult<f64> {
        if !opening_pct.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "valve opening must be finite, got {opening_pct}"
            )));
        }
        let network = self.network.as_mut().ok_or(AppError::NoNetwork)?;
        let applied = network.set_valve_opening(key, opening_pct)?;
        self.last = None;
        Ok(applied)
    }

    /// Solve the current network and return its readings.
    pub fn solve(&mut self) -> AppResult<TelemetrySnapshot> {
        let network = self.network.as_mut().ok_or(AppError::NoNetwork)?;
        let solution = NetworkSolver::new(network).solve()?;
        let snapshot = TelemetrySnapshot::capture(network, &solution);

        self.solves += 1;
        self.last = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Readings of the last successful solve, unless the network changed
    /// since.
    pub fn last_snapshot(&self) -> Option<&TelemetrySnapshot> {
        self.last.as_ref()
    }

    pub fn solve_count(&self) -> usize {
        self.solves
    }
}
