//! Transportation simplex (MODI / stepping-stone) backend.
//!
//! Starts from Vogel's approximation and pivots on u-v potentials until no
//! cell has a negative reduced cost. The basis is kept as a spanning tree over
//! row and column nodes, so the optimum is an extreme point.
//!
//! Surplus supply is routed to an internal zero-cost slack consumer, which
//! turns the `≤` supply rows into the equality form the method needs. The
//! slack column never leaves this module.
//!
//! Pivot selection is deterministic:
//! - entering: most negative reduced cost, ties by lowest row then column;
//! - leaving: smallest flow on the decreasing cells, same tie order.
//!
//! A run of degenerate pivots longer than `rows + cols` switches entering
//! selection to Bland's rule (first negative cell in row-major order), which
//! cannot cycle.

use std::collections::VecDeque;

use tpt_core::{ShipmentPlan, TransportError, TransportResult};
use tracing::{debug, trace, warn};

use super::traits::{LpOutcome, LpStatus, SolverConfig, TransportBackend};
use super::vogel::initial_basis;
use crate::formulation::TransportLp;

/// Specialized transportation-problem simplex. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportSimplexBackend;

impl TransportBackend for TransportSimplexBackend {
    fn id(&self) -> &str {
        "transport-simplex"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn returns_vertex(&self) -> bool {
        true
    }

    fn minimize(&self, lp: &TransportLp, config: &SolverConfig) -> TransportResult<LpOutcome> {
        if lp.cost.iter().flatten().any(|&c| c == f64::NEG_INFINITY) {
            warn!("cost matrix contains -inf; objective is unbounded");
            return Ok(LpOutcome::failed(LpStatus::Unbounded, lp));
        }
        if lp.cost.iter().flatten().any(|c| !c.is_finite()) {
            return Err(TransportError::Solver(
                "cost matrix contains non-finite entries".into(),
            ));
        }
        if lp.supply.iter().chain(&lp.demand).any(|&q| q < 0.0) {
            return Ok(LpOutcome::failed(LpStatus::Infeasible, lp));
        }

        let total_supply = lp.total_supply();
        let total_demand = lp.total_demand();
        let scale = total_supply.max(total_demand).max(1.0);
        if total_demand - total_supply > config.tolerance.max(1e-9) * scale {
            debug!(total_supply, total_demand, "supply cannot cover demand");
            return Ok(LpOutcome::failed(LpStatus::Infeasible, lp));
        }

        let mut tableau = Tableau::new(lp, config);
        let iterations = tableau.optimize(config.max_iterations)?;

        let flows = tableau.into_plan(lp.num_consumers());
        let objective = lp.evaluate(&flows.flows);
        debug!(iterations, objective, "transportation simplex finished");

        Ok(LpOutcome {
            status: LpStatus::Optimal,
            flows,
            objective,
            iterations,
        })
    }
}

/// Working state of the method: costs, current flows and the basis tree.
struct Tableau {
    rows: usize,
    cols: usize,
    cost: Vec<Vec<f64>>,
    flow: Vec<Vec<f64>>,
    basic: Vec<Vec<bool>>,
    /// Reduced costs above `-rc_tolerance` count as non-negative.
    rc_tolerance: f64,
    /// Pivots moving at most this much flow are degenerate.
    flow_tolerance: f64,
}

impl Tableau {
    fn new(lp: &TransportLp, config: &SolverConfig) -> Self {
        let supply = lp.supply.clone();
        let mut demand = lp.demand.clone();
        let mut cost = lp.cost.clone();

        let surplus = lp.total_supply() - lp.total_demand();
        let quantity_scale = lp.total_supply().max(1.0);
        if surplus > config.tolerance * quantity_scale {
            demand.push(surplus);
            for row in &mut cost {
                row.push(0.0);
            }
        }
        // A surplus below tolerance is left to the last allocation.

        let basis = initial_basis(&supply, &demand, &cost);
        let cost_scale = cost
            .iter()
            .flatten()
            .fold(1.0_f64, |acc, c| acc.max(c.abs()));

        Self {
            rows: supply.len(),
            cols: demand.len(),
            cost,
            flow: basis.flow,
            basic: basis.basic,
            rc_tolerance: config.tolerance * cost_scale,
            flow_tolerance: config.tolerance * quantity_scale,
        }
    }

    /// Pivot to optimality. Returns the number of pivots.
    fn optimize(&mut self, max_iterations: usize) -> TransportResult<usize> {
        let mut pivots = 0;
        let mut degenerate_streak = 0;
        let mut bland = false;

        loop {
            let (u, v) = self.potentials()?;
            let entering = if bland {
                self.first_negative(&u, &v)
            } else {
                self.most_negative(&u, &v)
            };
            let Some((p, q)) = entering else {
                return Ok(pivots);
            };

            if pivots >= max_iterations {
                warn!(max_iterations, "transportation simplex hit iteration limit");
                return Err(TransportError::NumericInstability {
                    iterations: max_iterations,
                });
            }
            pivots += 1;

            let theta = self.pivot(p, q)?;
            trace!(pivot = pivots, row = p, col = q, theta, "pivot");

            if theta <= self.flow_tolerance {
                degenerate_streak += 1;
                if !bland && degenerate_streak > self.rows + self.cols {
                    debug!(pivots, "degenerate streak; switching to Bland's rule");
                    bland = true;
                }
            } else {
                degenerate_streak = 0;
            }
        }
    }

    /// Row node `i` is `i`; column node `j` is `rows + j`.
    fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.rows + self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.basic[i][j] {
                    adj[i].push(self.rows + j);
                    adj[self.rows + j].push(i);
                }
            }
        }
        adj
    }

    /// Dual potentials with `u[0] = 0` and `u[i] + v[j] = c[i][j]` on every
    /// basic cell.
    fn potentials(&self) -> TransportResult<(Vec<f64>, Vec<f64>)> {
        let adj = self.adjacency();
        let mut value = vec![f64::NAN; self.rows + self.cols];
        let mut queue = VecDeque::from([0]);
        value[0] = 0.0;

        while let Some(node) = queue.pop_front() {
            for &next in &adj[node] {
                if !value[next].is_nan() {
                    continue;
                }
                value[next] = if node < self.rows {
                    self.cost[node][next - self.rows] - value[node]
                } else {
                    self.cost[next][node - self.rows] - value[node]
                };
                queue.push_back(next);
            }
        }

        if value.iter().any(|x| x.is_nan()) {
            return Err(TransportError::Solver(
                "transportation basis is not a spanning tree".into(),
            ));
        }
        let v = value.split_off(self.rows);
        Ok((value, v))
    }

    fn reduced_cost(&self, u: &[f64], v: &[f64], i: usize, j: usize) -> f64 {
        self.cost[i][j] - u[i] - v[j]
    }

    fn most_negative(&self, u: &[f64], v: &[f64]) -> Option<(usize, usize)> {
        let mut best: Option<(f64, usize, usize)> = None;
        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.basic[i][j] {
                    continue;
                }
                let rc = self.reduced_cost(u, v, i, j);
                if rc < -self.rc_tolerance && best.map_or(true, |(b, _, _)| rc < b) {
                    best = Some((rc, i, j));
                }
            }
        }
        best.map(|(_, i, j)| (i, j))
    }

    fn first_negative(&self, u: &[f64], v: &[f64]) -> Option<(usize, usize)> {
        (0..self.rows)
            .flat_map(|i| (0..self.cols).map(move |j| (i, j)))
            .find(|&(i, j)| !self.basic[i][j] && self.reduced_cost(u, v, i, j) < -self.rc_tolerance)
    }

    /// Tree path from column node `q` to row node `p`, as basic cells in
    /// walking order.
    fn path(&self, p: usize, q: usize) -> TransportResult<Vec<(usize, usize)>> {
        let adj = self.adjacency();
        let start = self.rows + q;
        let mut parent = vec![usize::MAX; self.rows + self.cols];
        parent[start] = start;
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            if node == p {
                break;
            }
            for &next in &adj[node] {
                if parent[next] == usize::MAX {
                    parent[next] = node;
                    queue.push_back(next);
                }
            }
        }
        if parent[p] == usize::MAX {
            return Err(TransportError::Solver(format!(
                "no basis path between row {p} and column {q}"
            )));
        }

        // Walk back from p to q, then reverse so the first cell touches q.
        let mut cells = Vec::new();
        let mut node = p;
        while node != start {
            let prev = parent[node];
            let cell = if node < self.rows {
                (node, prev - self.rows)
            } else {
                (prev, node - self.rows)
            };
            cells.push(cell);
            node = prev;
        }
        cells.reverse();
        Ok(cells)
    }

    /// Bring `(p, q)` into the basis. Returns the flow moved around the cycle.
    fn pivot(&mut self, p: usize, q: usize) -> TransportResult<f64> {
        let path = self.path(p, q)?;

        // Even positions lose flow, odd positions gain it.
        let (leave_i, leave_j) = path
            .iter()
            .step_by(2)
            .copied()
            .fold(None, |best: Option<(usize, usize)>, (i, j)| match best {
                Some((bi, bj))
                    if self.flow[bi][bj] < self.flow[i][j]
                        || (self.flow[bi][bj] == self.flow[i][j] && (bi, bj) < (i, j)) =>
                {
                    Some((bi, bj))
                }
                _ => Some((i, j)),
            })
            .ok_or_else(|| TransportError::Solver("empty pivot cycle".into()))?;
        let theta = self.flow[leave_i][leave_j];

        for (k, &(i, j)) in path.iter().enumerate() {
            if k % 2 == 0 {
                self.flow[i][j] = (self.flow[i][j] - theta).max(0.0);
            } else {
                self.flow[i][j] += theta;
            }
        }
        self.flow[p][q] = theta;
        self.flow[leave_i][leave_j] = 0.0;
        self.basic[leave_i][leave_j] = false;
        self.basic[p][q] = true;

        Ok(theta)
    }

    /// Drop the slack column, keeping the first `cols` consumers.
    fn into_plan(self, cols: usize) -> ShipmentPlan {
        let flows = self
            .flow
            .into_iter()
            .map(|mut row| {
                row.truncate(cols);
                row
            })
            .collect();
        ShipmentPlan::from_rows(flows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(supply: Vec<f64>, demand: Vec<f64>, cost: Vec<Vec<f64>>) -> LpOutcome {
        let lp = TransportLp {
            supply,
            demand,
            cost,
        };
        TransportSimplexBackend
            .minimize(&lp, &SolverConfig::default())
            .expect("solve should succeed")
    }

    fn assert_conserving(outcome: &LpOutcome, supply: &[f64], demand: &[f64]) {
        for (j, &need) in demand.iter().enumerate() {
            let got = outcome.flows.column_sum(j);
            assert!((got - need).abs() < 1e-6, "column {j}: {got} != {need}");
        }
        for (i, &cap) in supply.iter().enumerate() {
            let got = outcome.flows.row_sum(i);
            assert!(got <= cap + 1e-6, "row {i}: {got} > {cap}");
        }
        assert!(outcome.flows.flows.iter().flatten().all(|&x| x >= 0.0));
    }

    #[test]
    fn test_backend_metadata() {
        let backend = TransportSimplexBackend;
        assert_eq!(backend.id(), "transport-simplex");
        assert!(backend.is_available());
        assert!(backend.returns_vertex());
    }

    #[test]
    fn test_two_by_two_optimum() {
        let outcome = solve(
            vec![20.0, 30.0],
            vec![25.0, 25.0],
            vec![vec![8.0, 6.0], vec![9.0, 5.0]],
        );
        assert_eq!(outcome.status, LpStatus::Optimal);
        assert!((outcome.objective - 330.0).abs() < 1e-9);
        assert_eq!(outcome.flows.flows, vec![vec![20.0, 0.0], vec![5.0, 25.0]]);
    }

    #[test]
    fn test_pivots_away_from_vogel_start() {
        // Vogel starts at 475 here; the optimum is 435.
        let supply = vec![15.0, 25.0, 10.0];
        let demand = vec![5.0, 15.0, 15.0, 15.0];
        let cost = vec![
            vec![10.0, 2.0, 20.0, 11.0],
            vec![12.0, 7.0, 9.0, 20.0],
            vec![4.0, 14.0, 16.0, 18.0],
        ];
        let outcome = solve(supply.clone(), demand.clone(), cost);
        assert_conserving(&outcome, &supply, &demand);
        assert!((outcome.objective - 435.0).abs() < 1e-9, "got {}", outcome.objective);
        assert!(outcome.flows.nonzero_count(1e-9) <= supply.len() + demand.len() - 1);
    }

    #[test]
    fn test_surplus_supply_uses_cheapest_sources() {
        let supply = vec![10.0, 10.0];
        let demand = vec![8.0];
        let outcome = solve(supply.clone(), demand.clone(), vec![vec![5.0], vec![1.0]]);
        assert_conserving(&outcome, &supply, &demand);
        assert_eq!(outcome.flows.flows, vec![vec![0.0], vec![8.0]]);
        assert!((outcome.objective - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_zero_costs() {
        let supply = vec![5.0, 5.0];
        let demand = vec![5.0, 5.0];
        let outcome = solve(supply.clone(), demand.clone(), vec![vec![0.0; 2]; 2]);
        assert_conserving(&outcome, &supply, &demand);
        assert_eq!(outcome.objective, 0.0);
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn test_zero_demand_column() {
        let supply = vec![4.0, 6.0];
        let demand = vec![0.0, 10.0];
        let outcome = solve(supply.clone(), demand.clone(), vec![vec![1.0, 2.0], vec![3.0, 1.0]]);
        assert_conserving(&outcome, &supply, &demand);
        assert!((outcome.objective - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_reports_infeasible_when_supply_short() {
        let outcome = solve(vec![1.0], vec![5.0], vec![vec![1.0]]);
        assert_eq!(outcome.status, LpStatus::Infeasible);
        assert!(outcome.objective.is_nan());
    }

    #[test]
    fn test_reports_infeasible_on_negative_supply() {
        let outcome = solve(vec![-1.0, 9.0], vec![5.0], vec![vec![1.0], vec![1.0]]);
        assert_eq!(outcome.status, LpStatus::Infeasible);
    }

    #[test]
    fn test_reports_unbounded_on_negative_infinite_cost() {
        let outcome = solve(vec![5.0], vec![5.0], vec![vec![f64::NEG_INFINITY]]);
        assert_eq!(outcome.status, LpStatus::Unbounded);
    }

    #[test]
    fn test_nan_cost_is_an_error() {
        let lp = TransportLp {
            supply: vec![1.0],
            demand: vec![1.0],
            cost: vec![vec![f64::NAN]],
        };
        let err = TransportSimplexBackend
            .minimize(&lp, &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, TransportError::Solver(_)));
    }

    #[test]
    fn test_iteration_limit() {
        let lp = TransportLp {
            supply: vec![15.0, 25.0, 10.0],
            demand: vec![5.0, 15.0, 15.0, 15.0],
            cost: vec![
                vec![10.0, 2.0, 20.0, 11.0],
                vec![12.0, 7.0, 9.0, 20.0],
                vec![4.0, 14.0, 16.0, 18.0],
            ],
        };
        let config = SolverConfig {
            max_iterations: 0,
            ..SolverConfig::default()
        };
        let result = TransportSimplexBackend.minimize(&lp, &config);
        assert!(matches!(
            result,
            Err(TransportError::NumericInstability { iterations: 0 })
        ));
    }
}
