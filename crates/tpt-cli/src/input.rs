//! Instance input: files and inline flags.
//!
//! Files are JSON or TOML (chosen by extension) with `supply`, `demand` and
//! `cost` keys. Inline flags take comma-separated numbers, with matrix rows
//! separated by `;`. Every parse failure names the offending cell.

use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::Path;
use tpt_core::ProblemInstance;

use crate::config::LimitsConfig;

/// Raw inline values before conversion.
#[derive(Debug, Default, Clone)]
pub struct InlineInput<'a> {
    pub supply: Option<&'a str>,
    pub demand: Option<&'a str>,
    pub cost: Option<&'a str>,
}

impl InlineInput<'_> {
    fn is_empty(&self) -> bool {
        self.supply.is_none() && self.demand.is_none() && self.cost.is_none()
    }
}

/// Load an instance from a file or inline flags and enforce the size limits.
pub fn load_instance(
    path: Option<&Path>,
    inline: &InlineInput<'_>,
    limits: &LimitsConfig,
) -> Result<ProblemInstance> {
    let instance = match path {
        Some(path) => {
            if !inline.is_empty() {
                bail!("pass either an instance file or --supply/--demand/--cost, not both");
            }
            read_instance_file(path)?
        }
        None => parse_inline(inline)?,
    };
    check_limits(&instance, limits)?;
    Ok(instance)
}

/// Read a JSON or TOML instance file.
pub fn read_instance_file(path: &Path) -> Result<ProblemInstance> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading instance file {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let instance = match extension.as_str() {
        "toml" => toml::from_str(&contents).context("parsing TOML instance")?,
        _ => serde_json::from_str(&contents).context("parsing JSON instance")?,
    };
    Ok(instance)
}

fn parse_inline(inline: &InlineInput<'_>) -> Result<ProblemInstance> {
    let supply = parse_vector(
        "supply",
        inline.supply.ok_or_else(|| anyhow!("missing --supply"))?,
    )?;
    let demand = parse_vector(
        "demand",
        inline.demand.ok_or_else(|| anyhow!("missing --demand"))?,
    )?;
    let cost = parse_matrix(inline.cost.ok_or_else(|| anyhow!("missing --cost"))?)?;
    Ok(ProblemInstance::new(supply, demand, cost)?)
}

/// Parse `"20, 30"` into numbers; errors name the entry as `name[i]`.
pub fn parse_vector(name: &str, text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .enumerate()
        .map(|(i, cell)| parse_cell(cell, || format!("{name}[{i}]")))
        .collect()
}

/// Parse `"8,6; 9,5"` into rows; errors name the entry as `cost[i][j]`.
pub fn parse_matrix(text: &str) -> Result<Vec<Vec<f64>>> {
    text.split(';')
        .enumerate()
        .map(|(i, row)| {
            row.split(',')
                .enumerate()
                .map(|(j, cell)| parse_cell(cell, || format!("cost[{i}][{j}]")))
                .collect()
        })
        .collect()
}

fn parse_cell(cell: &str, field: impl Fn() -> String) -> Result<f64> {
    let trimmed = cell.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| anyhow!("{}: `{}` is not a number", field(), trimmed))
}

/// Reject instances outside the configured supplier/consumer range.
pub fn check_limits(instance: &ProblemInstance, limits: &LimitsConfig) -> Result<()> {
    let m = instance.num_suppliers();
    let n = instance.num_consumers();
    if !(1..=limits.max_suppliers).contains(&m) {
        bail!(
            "number of suppliers must be between 1 and {}, got {m}",
            limits.max_suppliers
        );
    }
    if !(1..=limits.max_consumers).contains(&n) {
        bail!(
            "number of consumers must be between 1 and {}, got {n}",
            limits.max_consumers
        );
    }
    Ok(())
}
