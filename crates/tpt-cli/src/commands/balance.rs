use anyhow::Result;
use std::io;
use tpt_algo::balance;
use tpt_cli::cli::InstanceArgs;
use tpt_cli::config::TptConfig;
use tpt_cli::input::{load_instance, InlineInput};
use tpt_cli::render;

pub fn handle(instance: &InstanceArgs, config: &TptConfig) -> Result<()> {
    let inline = InlineInput {
        supply: instance.supply.as_deref(),
        demand: instance.demand.as_deref(),
        cost: instance.cost.as_deref(),
    };
    let problem = load_instance(instance.instance.as_deref(), &inline, &config.limits)?;
    let balanced = balance(&problem);
    render::write_balanced(io::stdout().lock(), &balanced, config.output.precision)
}
