//! Transportation problem value types.
//!
//! All types are immutable values built once per solve request. Matrices are
//! dense `Vec<Vec<f64>>` indexed `[supplier][consumer]`.

use serde::{Deserialize, Serialize};

use crate::validation::validate_inputs;
use crate::TransportResult;

/// Tolerance used when comparing aggregated quantities (sums of supply or
/// demand, row and column totals).
pub const QUANTITY_TOLERANCE: f64 = 1e-6;

/// A transportation problem as supplied by the caller.
///
/// Construct with [`ProblemInstance::new`], which validates dimensions and
/// values. Deserializing goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInstance")]
pub struct ProblemInstance {
    supply: Vec<f64>,
    demand: Vec<f64>,
    cost: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawInstance {
    supply: Vec<f64>,
    demand: Vec<f64>,
    cost: Vec<Vec<f64>>,
}

impl TryFrom<RawInstance> for ProblemInstance {
    type Error = crate::TransportError;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        ProblemInstance::new(raw.supply, raw.demand, raw.cost)
    }
}

impl ProblemInstance {
    /// Create a validated instance.
    pub fn new(supply: Vec<f64>, demand: Vec<f64>, cost: Vec<Vec<f64>>) -> TransportResult<Self> {
        validate_inputs(&supply, &demand, &cost)?;
        Ok(Self {
            supply,
            demand,
            cost,
        })
    }

    /// Create an instance without value checks.
    ///
    /// The caller guarantees the shape: `cost` has `supply.len()` rows of
    /// `demand.len()` entries. Values may be anything, including negative.
    pub fn new_unchecked(supply: Vec<f64>, demand: Vec<f64>, cost: Vec<Vec<f64>>) -> Self {
        Self {
            supply,
            demand,
            cost,
        }
    }

    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn cost(&self) -> &[Vec<f64>] {
        &self.cost
    }

    /// Number of suppliers (M).
    pub fn num_suppliers(&self) -> usize {
        self.supply.len()
    }

    /// Number of consumers (N).
    pub fn num_consumers(&self) -> usize {
        self.demand.len()
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }
}

/// A problem whose total supply covers total demand.
///
/// When `fictitious_added` is set, the last supply entry and cost row belong
/// to a zero-cost synthetic supplier whose shipments represent unmet demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancedInstance {
    pub supply: Vec<f64>,
    pub demand: Vec<f64>,
    pub cost: Vec<Vec<f64>>,
    pub fictitious_added: bool,
    /// Supplier count before balancing (M).
    pub original_suppliers: usize,
}

impl BalancedInstance {
    /// Supplier count after balancing (M').
    pub fn num_suppliers(&self) -> usize {
        self.supply.len()
    }

    pub fn num_consumers(&self) -> usize {
        self.demand.len()
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    /// Supply assigned to the fictitious supplier, or 0 when none was added.
    pub fn shortage(&self) -> f64 {
        if self.fictitious_added {
            self.supply.last().copied().unwrap_or(0.0)
        } else {
            0.0
        }
    }

    /// Index of the fictitious supplier row, if any.
    pub fn fictitious_index(&self) -> Option<usize> {
        self.fictitious_added.then(|| self.supply.len() - 1)
    }
}

/// Optimal flow matrix, one entry per supplier-consumer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentPlan {
    pub flows: Vec<Vec<f64>>,
}

impl ShipmentPlan {
    /// All-zero plan of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            flows: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn from_rows(flows: Vec<Vec<f64>>) -> Self {
        Self { flows }
    }

    pub fn num_rows(&self) -> usize {
        self.flows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.flows.first().map_or(0, Vec::len)
    }

    pub fn row_sum(&self, i: usize) -> f64 {
        self.flows[i].iter().sum()
    }

    pub fn column_sum(&self, j: usize) -> f64 {
        self.flows.iter().map(|row| row[j]).sum()
    }

    /// Total cost of the plan under `cost`. Rows missing from `cost` are
    /// treated as zero-cost, which covers the fictitious supplier.
    pub fn cost_under(&self, cost: &[Vec<f64>]) -> f64 {
        self.flows
            .iter()
            .zip(cost)
            .flat_map(|(flow_row, cost_row)| flow_row.iter().zip(cost_row))
            .map(|(x, c)| x * c)
            .sum()
    }

    /// Number of entries strictly greater than `tolerance`.
    pub fn nonzero_count(&self, tolerance: f64) -> usize {
        self.flows
            .iter()
            .flatten()
            .filter(|&&x| x > tolerance)
            .count()
    }
}

/// Final answer handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// Shipments from genuine suppliers (M x N).
    pub real_shipments: Vec<Vec<f64>>,
    /// Per-consumer unmet demand, present only when a fictitious supplier
    /// was added.
    pub shortage_shipments: Option<Vec<f64>>,
    pub total_cost: f64,
    pub is_balanced_artificially: bool,
    pub total_supply: f64,
    pub total_demand: f64,
    /// Backend that produced the plan.
    #[serde(default)]
    pub backend: String,
    #[serde(default)]
    pub iterations: usize,
}

impl SolutionReport {
    /// Sum of unmet demand across consumers.
    pub fn total_shortage(&self) -> f64 {
        self.shortage_shipments
            .as_ref()
            .map_or(0.0, |row| row.iter().sum())
    }

    /// Display copy with every quantity rounded to `places` decimals.
    ///
    /// Internal computation keeps full precision; call this only when
    /// rendering.
    pub fn rounded(&self, places: u32) -> Self {
        let round_row = |row: &Vec<f64>| row.iter().map(|&x| round_to(x, places)).collect();
        Self {
            real_shipments: self.real_shipments.iter().map(round_row).collect(),
            shortage_shipments: self.shortage_shipments.as_ref().map(round_row),
            total_cost: round_to(self.total_cost, places),
            is_balanced_artificially: self.is_balanced_artificially,
            total_supply: round_to(self.total_supply, places),
            total_demand: round_to(self.total_demand, places),
            backend: self.backend.clone(),
            iterations: self.iterations,
        }
    }
}

/// Round half away from zero to `places` decimals. Negative zero is
/// normalized to zero.
///
/// When `places` is so large that scaling overflows, `value` already has
/// fewer significant decimals than requested and is returned as is.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(i32::MAX as u32) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
