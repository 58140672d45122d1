//! Transportation LP formulation
//!
//! Builds the classical linear program from a balanced instance:
//!
//! ```text
//! minimize    Σ_i Σ_j c[i][j] · x[i][j]
//! subject to  Σ_j x[i][j] ≤ s[i]     for every supplier i
//!             Σ_i x[i][j] = d[j]     for every consumer j
//!             x[i][j] ≥ 0
//! ```
//!
//! Supply rows stay `≤` even after balancing. Together with equality demand
//! rows this keeps every balanced instance feasible: tightening supply to `=`
//! would make instances with surplus supply infeasible.

use serde::{Deserialize, Serialize};
use tpt_core::BalancedInstance;

/// Direction of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sense {
    LessEqual,
    Equal,
}

/// One row of the constraint matrix in dense form.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Row label, `supply_{i}` or `demand_{j}`
    pub name: String,
    /// Dense coefficients over all `M' × N` variables
    pub coefficients: Vec<f64>,
    pub sense: Sense,
    pub rhs: f64,
}

/// The transportation LP over a balanced instance.
///
/// Decision variables are laid out row-major: `x[i][j]` lives at
/// [`TransportLp::var_index`]`(i, j)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportLp {
    pub supply: Vec<f64>,
    pub demand: Vec<f64>,
    pub cost: Vec<Vec<f64>>,
}

impl TransportLp {
    pub fn from_balanced(balanced: &BalancedInstance) -> Self {
        Self {
            supply: balanced.supply.clone(),
            demand: balanced.demand.clone(),
            cost: balanced.cost.clone(),
        }
    }

    /// Number of supply rows (M').
    pub fn num_suppliers(&self) -> usize {
        self.supply.len()
    }

    /// Number of demand rows (N).
    pub fn num_consumers(&self) -> usize {
        self.demand.len()
    }

    pub fn num_variables(&self) -> usize {
        self.num_suppliers() * self.num_consumers()
    }

    pub fn var_index(&self, i: usize, j: usize) -> usize {
        i * self.num_consumers() + j
    }

    /// Dense objective coefficients in variable order.
    pub fn objective(&self) -> Vec<f64> {
        self.cost.iter().flatten().copied().collect()
    }

    /// All constraint rows: supply rows first, then demand rows.
    pub fn constraints(&self) -> Vec<LinearConstraint> {
        let n_vars = self.num_variables();
        let mut rows = Vec::with_capacity(self.num_suppliers() + self.num_consumers());

        for (i, &cap) in self.supply.iter().enumerate() {
            let mut coefficients = vec![0.0; n_vars];
            for j in 0..self.num_consumers() {
                coefficients[self.var_index(i, j)] = 1.0;
            }
            rows.push(LinearConstraint {
                name: format!("supply_{i}"),
                coefficients,
                sense: Sense::LessEqual,
                rhs: cap,
            });
        }

        for (j, &need) in self.demand.iter().enumerate() {
            let mut coefficients = vec![0.0; n_vars];
            for i in 0..self.num_suppliers() {
                coefficients[self.var_index(i, j)] = 1.0;
            }
            rows.push(LinearConstraint {
                name: format!("demand_{j}"),
                coefficients,
                sense: Sense::Equal,
                rhs: need,
            });
        }

        rows
    }

    /// Objective value of a dense assignment.
    pub fn evaluate(&self, flows: &[Vec<f64>]) -> f64 {
        self.cost
            .iter()
            .zip(flows)
            .flat_map(|(c_row, x_row)| c_row.iter().zip(x_row))
            .map(|(c, x)| c * x)
            .sum()
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }
}
