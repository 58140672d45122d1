//! Balancing step: append a fictitious supplier when demand exceeds supply.

use tpt_core::{BalancedInstance, ProblemInstance};
use tracing::{debug, info};

/// Per-entry relative tolerance for the "demand exceeds supply" test.
///
/// The allowed gap is `BALANCE_EPSILON * (M + N) * max(|supply|, |demand|, 1)`,
/// which bounds the rounding error of the two sums and nothing more. Any
/// genuine shortfall, however small relative to the totals, gets a
/// fictitious supplier.
pub const BALANCE_EPSILON: f64 = 2.0 * f64::EPSILON;

/// Balance an instance so that total supply covers total demand.
///
/// If total demand does not exceed total supply (exact equality included)
/// the instance is returned unchanged with `fictitious_added = false`.
/// Otherwise a supplier holding the shortage is appended with a row of zero
/// costs. Input values are not validated here.
pub fn balance(instance: &ProblemInstance) -> BalancedInstance {
    balance_parts(
        instance.supply(),
        instance.demand(),
        instance.cost(),
        instance.num_suppliers(),
    )
}

/// Balance an already balanced instance.
///
/// A no-op when supply covers demand, which is always the case for the
/// output of [`balance`]; the original supplier count is preserved.
pub fn rebalance(balanced: &BalancedInstance) -> BalancedInstance {
    let next = balance_parts(
        &balanced.supply,
        &balanced.demand,
        &balanced.cost,
        balanced.original_suppliers,
    );
    if next.fictitious_added {
        next
    } else {
        balanced.clone()
    }
}

fn balance_parts(
    supply: &[f64],
    demand: &[f64],
    cost: &[Vec<f64>],
    original_suppliers: usize,
) -> BalancedInstance {
    let total_supply: f64 = supply.iter().sum();
    let total_demand: f64 = demand.iter().sum();
    debug!(total_supply, total_demand, "balancing instance");

    let mut supply = supply.to_vec();
    let mut cost = cost.to_vec();

    let scale = total_supply.abs().max(total_demand.abs()).max(1.0);
    let terms = (supply.len() + demand.len()) as f64;
    let fictitious_added = total_demand - total_supply > BALANCE_EPSILON * terms * scale;
    if fictitious_added {
        let shortage = total_demand - total_supply;
        info!(shortage, "demand exceeds supply; adding fictitious supplier");
        supply.push(shortage);
        cost.push(vec![0.0; demand.len()]);
    }

    BalancedInstance {
        supply,
        demand: demand.to_vec(),
        cost,
        fictitious_added,
        original_suppliers,
    }
}
