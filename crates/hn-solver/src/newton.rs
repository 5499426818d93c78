//! Damped Newton solver with a Levenberg-Marquardt fallback.

use std::fmt;

use crate::error::{SolverError, SolverResult};
use hn_equipment::GlobalSettings;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Newton solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for the residual norm
    pub tolerance: f64,
    /// Relative step for the forward-difference Jacobian
    pub fd_epsilon: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Starting damping for Levenberg-Marquardt steps
    pub lm_initial_lambda: f64,
    /// Damping adjustments tried before giving up on an iteration
    pub max_lm_tries: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
            fd_epsilon: 1e-7,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
            lm_initial_lambda: 1e-3,
            max_lm_tries: 12,
        }
    }
}

impl NewtonConfig {
    /// Iteration cap and tolerance from the network settings.
    pub fn from_settings(settings: &GlobalSettings) -> Self {
        Self {
            max_iterations: settings.max_iterations,
            tolerance: settings.tolerance,
            ..Self::default()
        }
    }
}

/// Why the iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Converged,
    MaxIterations,
    /// Neither a Newton nor a damped step reduced the residual
    Stagnated,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Converged => f.write_str("converged"),
            Termination::MaxIterations => f.write_str("maximum iterations reached"),
            Termination::Stagnated => f.write_str("no step reduced the residual"),
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
    pub termination: Termination,
}

struct Trial {
    x: DVector<f64>,
    r: DVector<f64>,
    norm: f64,
}

/// Evaluate a trial point, treating evaluation failures as a rejected step.
fn try_point<F>(x: DVector<f64>, residual_fn: &F) -> Option<Trial>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let r = residual_fn(&x).ok()?;
    let norm = r.norm();
    norm.is_finite().then_some(Trial { x, r, norm })
}

/// Backtracking along the Newton direction until the residual norm drops.
fn newton_step<F>(
    x: &DVector<f64>,
    r: &DVector<f64>,
    r_norm: f64,
    jac: &DMatrix<f64>,
    residual_fn: &F,
    config: &NewtonConfig,
) -> Option<(Trial, f64)>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let dx = jac.clone().lu().solve(&(-r.clone()))?;
    if !dx.iter().all(|v| v.is_finite()) {
        return None;
    }

    let mut alpha = 1.0;
    for _ in 0..config.max_line_search_iters {
        if let Some(trial) = try_point(x + alpha * &dx, residual_fn)
            && trial.norm < r_norm
        {
            return Some((trial, alpha));
        }
        alpha *= config.line_search_beta;
    }
    None
}

/// Levenberg-Marquardt step `(JᵀJ + λ·diag(JᵀJ) + λI)·dx = −Jᵀr`, adapting λ
/// until the residual norm drops.
fn damped_step<F>(
    x: &DVector<f64>,
    r: &DVector<f64>,
    r_norm: f64,
    jac: &DMatrix<f64>,
    lambda: &mut f64,
    residual_fn: &F,
    config: &NewtonConfig,
) -> Option<Trial>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let jt = jac.transpose();
    let jtj = &jt * jac;
    let rhs = -(&jt * r);

    for _ in 0..config.max_lm_tries {
        let mut a = jtj.clone();
        for i in 0..a.nrows() {
            a[(i, i)] += *lambda * jtj[(i, i)] + *lambda;
        }
        if let Some(dx) = a.lu().solve(&rhs)
            && let Some(trial) = try_point(x + dx, residual_fn)
            && trial.norm < r_norm
        {
            *lambda = (*lambda * 0.1).max(1e-12);
            return Some(trial);
        }
        *lambda *= 10.0;
    }
    None
}

/// Drive `residual_fn` to zero from `x0`.
///
/// Non-convergence is reported through `converged`/`termination`, not as an
/// error; errors are reserved for residual evaluations that fail at the
/// starting point or while building a Jacobian.
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>, &DVector<f64>) -> SolverResult<DMatrix<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    if !r_norm.is_finite() {
        return Err(SolverError::Numeric {
            what: "initial residual is not finite".to_string(),
        });
    }
    let mut lambda = config.lm_initial_lambda;

    for iter in 0..config.max_iterations {
        if r_norm < config.tolerance {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
                termination: Termination::Converged,
            });
        }

        let jac = jacobian_fn(&x, &r)?;

        let trial = match newton_step(&x, &r, r_norm, &jac, &residual_fn, config) {
            Some((trial, alpha)) => {
                debug!(iter, residual = trial.norm, alpha, "newton step");
                Some(trial)
            }
            None => {
                let trial = damped_step(&x, &r, r_norm, &jac, &mut lambda, &residual_fn, config);
                if let Some(t) = &trial {
                    debug!(iter, residual = t.norm, lambda, "damped step");
                }
                trial
            }
        };

        let Some(trial) = trial else {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: false,
                termination: Termination::Stagnated,
            });
        };

        x = trial.x;
        r = trial.r;
        r_norm = trial.norm;
    }

    let converged = r_norm < config.tolerance;
    Ok(NewtonResult {
        x,
        residual_norm: r_norm,
        iterations: config.max_iterations,
        converged,
        termination: if converged {
            Termination::Converged
        } else {
            Termination::MaxIterations
        },
    })
}
