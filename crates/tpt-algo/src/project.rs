//! Projection of a balanced solution back onto the original suppliers.

use tpt_core::{BalancedInstance, ShipmentPlan, SolutionReport, TransportError, TransportResult};

/// Split solver flows into genuine shipments and the shortage row.
///
/// Rows `[0, original_m)` become `real_shipments`; when a fictitious
/// supplier was added, row `original_m` becomes `shortage_shipments`. The
/// objective is passed through: the fictitious row costs nothing.
///
/// Fails when `flows` or `balanced` has fewer rows than `original_m`
/// requires, which means they do not come from the same solve.
pub fn project(
    flows: &ShipmentPlan,
    objective: f64,
    balanced: &BalancedInstance,
    original_m: usize,
) -> TransportResult<SolutionReport> {
    let needed = original_m + usize::from(balanced.fictitious_added);
    if flows.num_rows() < needed || balanced.supply.len() < original_m {
        return Err(TransportError::Solver(format!(
            "cannot project {} flow rows over {} suppliers onto {original_m} genuine suppliers",
            flows.num_rows(),
            balanced.supply.len()
        )));
    }

    let real_shipments = flows.flows[..original_m].to_vec();
    let shortage_shipments = if balanced.fictitious_added {
        flows.flows.get(original_m).cloned()
    } else {
        None
    };

    Ok(SolutionReport {
        real_shipments,
        shortage_shipments,
        total_cost: objective,
        is_balanced_artificially: balanced.fictitious_added,
        total_supply: balanced.supply[..original_m].iter().sum(),
        total_demand: balanced.total_demand(),
        backend: String::new(),
        iterations: 0,
    })
}

/// Recompute the total cost from genuine shipments and the original costs.
pub fn cross_check_cost(report: &SolutionReport, original_cost: &[Vec<f64>]) -> f64 {
    ShipmentPlan::from_rows(report.real_shipments.clone()).cost_under(original_cost)
}
