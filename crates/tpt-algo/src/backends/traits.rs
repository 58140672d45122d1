//! Backend interface for the transportation LP.
//!
//! A backend receives a [`TransportLp`] and returns an [`LpOutcome`]. It may
//! exploit the transportation structure or hand the general LP to a library;
//! either way the outcome must be a conserving, optimal assignment.

use serde::{Deserialize, Serialize};
use tpt_core::{ShipmentPlan, TransportResult};

use crate::formulation::TransportLp;

/// Configuration passed to backend solvers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum pivots (or solver iterations)
    pub max_iterations: usize,
    /// Optimality and feasibility tolerance
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            tolerance: 1e-9,
        }
    }
}

/// Terminal state reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LpStatus {
    Optimal,
    Infeasible,
    Unbounded,
}

impl std::fmt::Display for LpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LpStatus::Optimal => write!(f, "optimal"),
            LpStatus::Infeasible => write!(f, "infeasible"),
            LpStatus::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Raw result of a backend solve.
///
/// `flows` is `M' × N`; for non-optimal statuses it is all zeros and
/// `objective` is NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct LpOutcome {
    pub status: LpStatus,
    pub flows: ShipmentPlan,
    pub objective: f64,
    pub iterations: usize,
}

impl LpOutcome {
    /// Outcome for a solve that ended without an optimum.
    pub fn failed(status: LpStatus, lp: &TransportLp) -> Self {
        Self {
            status,
            flows: ShipmentPlan::zeros(lp.num_suppliers(), lp.num_consumers()),
            objective: f64::NAN,
            iterations: 0,
        }
    }
}

/// Minimizes a transportation LP.
pub trait TransportBackend: Send + Sync {
    /// Unique identifier (e.g., "transport-simplex", "clarabel")
    fn id(&self) -> &str;

    /// Whether the backend can run in this build
    fn is_available(&self) -> bool;

    /// Whether solutions are guaranteed to be vertices of the feasible region
    fn returns_vertex(&self) -> bool;

    /// Solve the problem
    fn minimize(&self, lp: &TransportLp, config: &SolverConfig) -> TransportResult<LpOutcome>;
}
