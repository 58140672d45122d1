use anyhow::{Context, Result};
use clap_complete::{generate, Shell};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use tpt_cli::cli::build_cli_command;

/// Print completions for `shell`, or write them to `out`.
pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let mut cmd = build_cli_command();
    let bin_name = cmd.get_name().to_string();

    let mut script = Vec::new();
    generate(shell, &mut cmd, bin_name, &mut script);

    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &script)
                .with_context(|| format!("writing {shell} completions to {}", path.display()))?;
            info!("Wrote {shell} completions to {}", path.display());
        }
        None => io::stdout().lock().write_all(&script)?,
    }
    Ok(())
}
