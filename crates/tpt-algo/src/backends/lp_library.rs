//! General LP backends through `good_lp`.
//!
//! The transportation LP is handed over as an ordinary linear program built
//! from [`TransportLp::constraints`]. Clarabel is a pure-Rust interior-point
//! solver: its optimum is exact in value but, on problems with several
//! optimal plans, need not be a vertex. HiGHS (optional) runs dual simplex
//! and returns vertices.

use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel,
    Variable,
};
use tpt_core::{ShipmentPlan, TransportError, TransportResult};
use tracing::debug;

use super::traits::{LpOutcome, LpStatus, SolverConfig, TransportBackend};
use crate::formulation::{LinearConstraint, Sense, TransportLp};

/// Which `good_lp` solver to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Engine {
    #[cfg(feature = "solver-clarabel")]
    Clarabel,
    #[cfg(feature = "solver-highs")]
    Highs,
}

/// Clarabel interior-point LP backend.
#[cfg(feature = "solver-clarabel")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarabelBackend;

#[cfg(feature = "solver-clarabel")]
impl TransportBackend for ClarabelBackend {
    fn id(&self) -> &str {
        "clarabel"
    }

    fn is_available(&self) -> bool {
        true // Always available (pure Rust)
    }

    fn returns_vertex(&self) -> bool {
        false
    }

    fn minimize(&self, lp: &TransportLp, config: &SolverConfig) -> TransportResult<LpOutcome> {
        solve_with(Engine::Clarabel, lp, config)
    }
}

/// HiGHS dual simplex LP backend.
#[cfg(feature = "solver-highs")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsBackend;

#[cfg(feature = "solver-highs")]
impl TransportBackend for HighsBackend {
    fn id(&self) -> &str {
        "highs"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn returns_vertex(&self) -> bool {
        true
    }

    fn minimize(&self, lp: &TransportLp, config: &SolverConfig) -> TransportResult<LpOutcome> {
        solve_with(Engine::Highs, lp, config)
    }
}

fn solve_with(engine: Engine, lp: &TransportLp, _config: &SolverConfig) -> TransportResult<LpOutcome> {
    let mut vars = variables!();
    let x: Vec<Variable> = (0..lp.num_variables())
        .map(|_| vars.add(variable().min(0.0)))
        .collect();

    let objective = lp
        .objective()
        .into_iter()
        .zip(&x)
        .fold(Expression::from(0.0), |acc, (c, &var)| acc + c * var);

    let rows = lp.constraints();
    debug!(
        variables = x.len(),
        constraints = rows.len(),
        ?engine,
        "building general LP"
    );

    let result = match engine {
        #[cfg(feature = "solver-clarabel")]
        Engine::Clarabel => {
            let mut problem = vars
                .minimise(objective)
                .using(good_lp::solvers::clarabel::clarabel);
            for row in &rows {
                problem = problem.with(row_constraint(row, &x));
            }
            problem.solve().map(|solution| read_flows(lp, &solution, &x))
        }
        #[cfg(feature = "solver-highs")]
        Engine::Highs => {
            let mut problem = vars
                .minimise(objective)
                .using(good_lp::solvers::highs::highs);
            for row in &rows {
                problem = problem.with(row_constraint(row, &x));
            }
            problem.solve().map(|solution| read_flows(lp, &solution, &x))
        }
    };

    match result {
        Ok(flows) => {
            let objective = lp.evaluate(&flows.flows);
            Ok(LpOutcome {
                status: LpStatus::Optimal,
                flows,
                objective,
                iterations: 1,
            })
        }
        Err(ResolutionError::Infeasible) => Ok(LpOutcome::failed(LpStatus::Infeasible, lp)),
        Err(ResolutionError::Unbounded) => Ok(LpOutcome::failed(LpStatus::Unbounded, lp)),
        Err(e) => Err(TransportError::Solver(format!("LP solver failed: {:?}", e))),
    }
}

fn row_constraint(row: &LinearConstraint, x: &[Variable]) -> good_lp::Constraint {
    let lhs = row
        .coefficients
        .iter()
        .zip(x)
        .filter(|&(&a, _)| a != 0.0)
        .fold(Expression::from(0.0), |acc, (&a, &var)| acc + a * var);
    match row.sense {
        Sense::LessEqual => constraint!(lhs <= row.rhs),
        Sense::Equal => constraint!(lhs == row.rhs),
    }
}

/// Read the dense assignment, clamping interior-point noise below zero.
fn read_flows(lp: &TransportLp, solution: &impl Solution, x: &[Variable]) -> ShipmentPlan {
    let n = lp.num_consumers();
    let flows = (0..lp.num_suppliers())
        .map(|i| {
            (0..n)
                .map(|j| solution.value(x[lp.var_index(i, j)]).max(0.0))
                .collect()
        })
        .collect();
    ShipmentPlan::from_rows(flows)
}

#[cfg(all(test, feature = "solver-clarabel"))]
mod tests {
    use super::*;

    #[test]
    fn test_clarabel_metadata() {
        let backend = ClarabelBackend;
        assert_eq!(backend.id(), "clarabel");
        assert!(backend.is_available());
        assert!(!backend.returns_vertex());
    }

    #[test]
    fn test_clarabel_two_by_two() {
        let lp = TransportLp {
            supply: vec![20.0, 30.0],
            demand: vec![25.0, 25.0],
            cost: vec![vec![8.0, 6.0], vec![9.0, 5.0]],
        };
        let outcome = ClarabelBackend
            .minimize(&lp, &SolverConfig::default())
            .expect("clarabel should solve a balanced instance");
        assert_eq!(outcome.status, LpStatus::Optimal);
        assert!(
            (outcome.objective - 330.0).abs() < 1e-3,
            "objective should be ~330, got {}",
            outcome.objective
        );
        for j in 0..2 {
            assert!((outcome.flows.column_sum(j) - 25.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_clarabel_rejects_short_supply() {
        let lp = TransportLp {
            supply: vec![1.0],
            demand: vec![5.0],
            cost: vec![vec![1.0]],
        };
        let status = ClarabelBackend
            .minimize(&lp, &SolverConfig::default())
            .map(|outcome| outcome.status);
        assert!(
            !matches!(status, Ok(LpStatus::Optimal)),
            "short supply must not be reported optimal, got {status:?}"
        );
    }
}
