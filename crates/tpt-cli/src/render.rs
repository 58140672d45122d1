//! Text rendering of reports and balanced instances.
//!
//! Quantities are rounded here and nowhere earlier.

use anyhow::Result;
use std::io::Write;
use tabwriter::TabWriter;
use tpt_core::{round_to, BalancedInstance, ProblemInstance, SolutionReport};

/// Most decimal places shown; f64 carries no more than this.
pub const MAX_PRECISION: u32 = 15;

fn fmt_num(value: f64, precision: u32) -> String {
    let precision = precision.min(MAX_PRECISION);
    format!("{:.*}", precision as usize, round_to(value, precision))
}

/// Write a table of labelled supplier rows (supply then costs) closed by a
/// DEMAND row.
fn write_cost_table<W: Write>(
    writer: &mut W,
    rows: &[(String, f64, &[f64])],
    demand: &[f64],
    precision: u32,
) -> Result<()> {
    write!(writer, "SUPPLIER\tSUPPLY")?;
    for j in 0..demand.len() {
        write!(writer, "\tC{}", j + 1)?;
    }
    writeln!(writer)?;

    for (label, supply, costs) in rows {
        write!(writer, "{label}\t{}", fmt_num(*supply, precision))?;
        for &c in *costs {
            write!(writer, "\t{}", fmt_num(c, precision))?;
        }
        writeln!(writer)?;
    }

    write!(writer, "DEMAND\t")?;
    for &d in demand {
        write!(writer, "\t{}", fmt_num(d, precision))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write a human-readable solution report: the instance as entered, the
/// shipment plan and the totals.
pub fn write_report<W: Write>(
    out: W,
    instance: &ProblemInstance,
    report: &SolutionReport,
    precision: u32,
) -> Result<()> {
    let mut writer = TabWriter::new(out);

    writeln!(writer, "Unit costs")?;
    let rows: Vec<(String, f64, &[f64])> = instance
        .supply()
        .iter()
        .zip(instance.cost())
        .enumerate()
        .map(|(i, (&s, costs))| (format!("S{}", i + 1), s, costs.as_slice()))
        .collect();
    write_cost_table(&mut writer, &rows, instance.demand(), precision)?;
    writeln!(writer)?;

    writeln!(
        writer,
        "Total supply: {}\tTotal demand: {}",
        fmt_num(report.total_supply, precision),
        fmt_num(report.total_demand, precision)
    )?;
    if report.is_balanced_artificially {
        writeln!(
            writer,
            "Demand exceeds supply by {}; a fictitious supplier covers the shortage.",
            fmt_num(report.total_shortage(), precision)
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "Shipments")?;
    write!(writer, "SUPPLIER")?;
    for j in 0..instance.num_consumers() {
        write!(writer, "\tC{}", j + 1)?;
    }
    writeln!(writer)?;

    for (i, row) in report.real_shipments.iter().enumerate() {
        write!(writer, "S{}", i + 1)?;
        for &x in row {
            write!(writer, "\t{}", fmt_num(x, precision))?;
        }
        writeln!(writer)?;
    }
    if let Some(shortage) = &report.shortage_shipments {
        write!(writer, "SHORTAGE")?;
        for &x in shortage {
            write!(writer, "\t{}", fmt_num(x, precision))?;
        }
        writeln!(writer)?;
    }

    writeln!(writer)?;
    writeln!(writer, "Total cost: {}", fmt_num(report.total_cost, precision))?;
    writeln!(
        writer,
        "Backend: {} ({} pivots)",
        report.backend, report.iterations
    )?;
    writer.flush()?;
    Ok(())
}

/// Write the balanced instance: supplies, demands and the cost matrix.
pub fn write_balanced<W: Write>(out: W, balanced: &BalancedInstance, precision: u32) -> Result<()> {
    let mut writer = TabWriter::new(out);

    if balanced.fictitious_added {
        writeln!(
            writer,
            "Fictitious supplier added with supply {}",
            fmt_num(balanced.shortage(), precision)
        )?;
    } else {
        writeln!(writer, "Already balanced; no fictitious supplier needed")?;
    }
    writeln!(writer)?;

    let rows: Vec<(String, f64, &[f64])> = balanced
        .supply
        .iter()
        .zip(&balanced.cost)
        .enumerate()
        .map(|(i, (&s, costs))| {
            let label = if balanced.fictitious_index() == Some(i) {
                "FICTITIOUS".to_string()
            } else {
                format!("S{}", i + 1)
            };
            (label, s, costs.as_slice())
        })
        .collect();
    write_cost_table(&mut writer, &rows, &balanced.demand, precision)?;
    writer.flush()?;
    Ok(())
}
