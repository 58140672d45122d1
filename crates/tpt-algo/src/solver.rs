//! End-to-end transportation solve: validate, balance, formulate, solve,
//! project.

use std::sync::Arc;

use tpt_core::{
    ProblemInstance, SolutionReport, TransportError, TransportResult, QUANTITY_TOLERANCE,
};
use tracing::{debug, error, info, info_span, warn};
use web_time::Instant;

use crate::backends::{LpStatus, SolverConfig};
use crate::balance::balance;
use crate::formulation::TransportLp;
use crate::project::{cross_check_cost, project};
use crate::registry::BackendRegistry;

/// Solve a transportation problem with the default backend.
///
/// # Example
///
/// ```
/// use tpt_algo::solve_transportation;
///
/// let report = solve_transportation(
///     vec![10.0],
///     vec![6.0, 6.0],
///     vec![vec![1.0, 1.0]],
/// )?;
/// assert!(report.is_balanced_artificially);
/// assert!((report.total_shortage() - 2.0).abs() < 1e-9);
/// # Ok::<(), tpt_core::TransportError>(())
/// ```
pub fn solve_transportation(
    supply: Vec<f64>,
    demand: Vec<f64>,
    cost: Vec<Vec<f64>>,
) -> TransportResult<SolutionReport> {
    let instance = ProblemInstance::new(supply, demand, cost)?;
    TransportSolver::new().solve(&instance)
}

/// Configurable transportation solver.
#[derive(Debug, Clone)]
pub struct TransportSolver {
    registry: Arc<BackendRegistry>,
    backend: Option<String>,
    config: SolverConfig,
}

impl TransportSolver {
    /// Create a solver over the built-in backends with default settings.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(BackendRegistry::with_defaults()),
            backend: None,
            config: SolverConfig::default(),
        }
    }

    /// Use a specific backend id instead of the preferred one
    pub fn with_backend(mut self, id: impl Into<String>) -> Self {
        self.backend = Some(id.into());
        self
    }

    /// Use a custom registry
    pub fn with_registry(mut self, registry: Arc<BackendRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum pivots
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.config.max_iterations = max_iter;
        self
    }

    /// Set optimality tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.config.tolerance = tol;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve a validated instance.
    pub fn solve(&self, instance: &ProblemInstance) -> TransportResult<SolutionReport> {
        let span = info_span!(
            "solve_transportation",
            m = instance.num_suppliers(),
            n = instance.num_consumers()
        );
        let _enter = span.enter();
        let start = Instant::now();

        let backend = self.registry.select(self.backend.as_deref())?;
        let balanced = balance(instance);
        let lp = TransportLp::from_balanced(&balanced);
        debug!(backend = backend.id(), variables = lp.num_variables(), "formulated LP");

        let outcome = backend.minimize(&lp, &self.config)?;
        match outcome.status {
            LpStatus::Optimal => {}
            LpStatus::Infeasible => {
                error!(backend = backend.id(), "balanced instance reported infeasible");
                return Err(TransportError::Infeasible(format!(
                    "backend `{}` found no feasible plan for a balanced instance",
                    backend.id()
                )));
            }
            LpStatus::Unbounded => {
                error!(backend = backend.id(), "balanced instance reported unbounded");
                return Err(TransportError::Unbounded(format!(
                    "backend `{}` found the objective unbounded",
                    backend.id()
                )));
            }
        }

        let mut report = project(
            &outcome.flows,
            outcome.objective,
            &balanced,
            instance.num_suppliers(),
        )?;
        report.backend = backend.id().to_string();
        report.iterations = outcome.iterations;

        let recomputed = cross_check_cost(&report, instance.cost());
        let scale = report.total_cost.abs().max(1.0);
        if (recomputed - report.total_cost).abs() > QUANTITY_TOLERANCE * scale {
            warn!(
                objective = report.total_cost,
                recomputed, "objective disagrees with genuine shipment cost"
            );
        }

        info!(
            total_cost = report.total_cost,
            shortage = balanced.shortage(),
            iterations = outcome.iterations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "solved transportation problem"
        );
        Ok(report)
    }
}

impl Default for TransportSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let solver = TransportSolver::new();
        assert_eq!(solver.config().max_iterations, 10_000);
        assert_eq!(solver.config().tolerance, 1e-9);
    }

    #[test]
    fn test_builder_overrides() {
        let solver = TransportSolver::new()
            .with_max_iterations(5)
            .with_tolerance(1e-7);
        assert_eq!(solver.config().max_iterations, 5);
        assert_eq!(solver.config().tolerance, 1e-7);
    }

    #[test]
    fn test_report_records_backend() {
        let instance =
            ProblemInstance::new(vec![7.0], vec![7.0], vec![vec![3.0]]).unwrap();
        let report = TransportSolver::new().solve(&instance).unwrap();
        assert_eq!(report.backend, "transport-simplex");
        assert_eq!(report.total_cost, 21.0);
    }

    #[test]
    fn test_unknown_backend_fails_before_solving() {
        let instance =
            ProblemInstance::new(vec![7.0], vec![7.0], vec![vec![3.0]]).unwrap();
        let err = TransportSolver::new()
            .with_backend("nope")
            .solve(&instance)
            .unwrap_err();
        assert!(matches!(err, TransportError::UnknownBackend(_)));
    }

    #[test]
    fn test_negative_supply_surfaces_as_infeasible() {
        // Bypasses validation: a bad supply must not be coerced into a plan.
        let instance = ProblemInstance::new_unchecked(
            vec![-4.0, 1.0],
            vec![1.0],
            vec![vec![1.0], vec![1.0]],
        );
        let err = TransportSolver::new().solve(&instance).unwrap_err();
        assert!(matches!(err, TransportError::Infeasible(_)));
    }

    #[test]
    fn test_negative_infinite_cost_surfaces_as_unbounded() {
        let instance =
            ProblemInstance::new_unchecked(vec![1.0], vec![1.0], vec![vec![f64::NEG_INFINITY]]);
        let err = TransportSolver::new().solve(&instance).unwrap_err();
        assert!(matches!(err, TransportError::Unbounded(_)));
    }
}
