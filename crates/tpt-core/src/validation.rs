//! Input validation for transportation instances.
//!
//! Every check names the offending field the way the caller addressed it,
//! e.g. `supply[2]` or `cost[1][0]`, together with the received value.

use crate::{TransportError, TransportResult};

/// Validate the three raw inputs of a solve request.
///
/// Checks, in order: non-empty supply and demand, finite non-negative
/// entries, and cost dimensions matching `len(supply) x len(demand)`.
pub fn validate_inputs(supply: &[f64], demand: &[f64], cost: &[Vec<f64>]) -> TransportResult<()> {
    if supply.is_empty() {
        return Err(TransportError::validation(
            "supply",
            "at least one supplier is required",
        ));
    }
    if demand.is_empty() {
        return Err(TransportError::validation(
            "demand",
            "at least one consumer is required",
        ));
    }

    check_vector("supply", supply)?;
    check_vector("demand", demand)?;

    if cost.len() != supply.len() {
        return Err(TransportError::validation(
            "cost",
            format!(
                "expected {} rows (one per supplier), got {}",
                supply.len(),
                cost.len()
            ),
        ));
    }
    for (i, row) in cost.iter().enumerate() {
        if row.len() != demand.len() {
            return Err(TransportError::validation(
                format!("cost[{i}]"),
                format!(
                    "expected {} entries (one per consumer), got {}",
                    demand.len(),
                    row.len()
                ),
            ));
        }
        for (j, &value) in row.iter().enumerate() {
            check_value(|| format!("cost[{i}][{j}]"), value)?;
        }
    }

    Ok(())
}

fn check_vector(name: &str, values: &[f64]) -> TransportResult<()> {
    for (i, &value) in values.iter().enumerate() {
        check_value(|| format!("{name}[{i}]"), value)?;
    }
    Ok(())
}

fn check_value(field: impl FnOnce() -> String, value: f64) -> TransportResult<()> {
    if !value.is_finite() {
        return Err(TransportError::validation(
            field(),
            format!("must be a finite number, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(TransportError::validation(
            field(),
            format!("must be non-negative, got {value}"),
        ));
    }
    Ok(())
}
