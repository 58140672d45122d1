//! `tpt solve`: balance, optimize and report.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tpt_algo::TransportSolver;
use tpt_cli::cli::InstanceArgs;
use tpt_cli::config::{OutputFormat, TptConfig};
use tpt_cli::input::{load_instance, InlineInput};
use tpt_cli::render;
use tpt_core::{ProblemInstance, SolutionReport};
use tracing::info;

pub struct SolveOptions<'a> {
    pub backend: Option<&'a str>,
    pub format: Option<OutputFormat>,
    pub precision: Option<u32>,
    pub out: Option<&'a Path>,
}

pub fn handle(instance: &InstanceArgs, options: &SolveOptions<'_>, config: &TptConfig) -> Result<()> {
    let inline = InlineInput {
        supply: instance.supply.as_deref(),
        demand: instance.demand.as_deref(),
        cost: instance.cost.as_deref(),
    };
    let problem = load_instance(instance.instance.as_deref(), &inline, &config.limits)?;

    let mut solver = TransportSolver::new().with_config(config.solver.solver_config());
    if let Some(id) = options.backend.or(config.solver.backend.as_deref()) {
        solver = solver.with_backend(id);
    }
    let report = solver.solve(&problem).context("solving transportation problem")?;

    let format = options.format.unwrap_or(config.output.format);
    let precision = options.precision.unwrap_or(config.output.precision);
    let rendered = render_report(&problem, &report, format, precision)?;

    match options.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &rendered)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!("Wrote report to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&rendered)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn render_report(
    problem: &ProblemInstance,
    report: &SolutionReport,
    format: OutputFormat,
    precision: u32,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Plain => render::write_report(&mut buf, problem, report, precision)?,
        OutputFormat::Json => {
            let rounded = report.rounded(precision.min(render::MAX_PRECISION));
            serde_json::to_writer_pretty(&mut buf, &rounded)?;
            buf.push(b'\n');
        }
    }
    Ok(buf)
}
