use anyhow::Result;
use std::io::{self, Write};
use tabwriter::TabWriter;
use tpt_algo::BackendRegistry;

/// Print every registered backend with its availability and vertex guarantee.
pub fn handle() -> Result<()> {
    let registry = BackendRegistry::with_defaults();
    let default = registry.select(None).ok().map(|b| b.id().to_string());

    let mut tw = TabWriter::new(io::stdout().lock());
    writeln!(tw, "BACKEND\tAVAILABLE\tVERTEX\tDEFAULT")?;
    for id in registry.list() {
        let Some(backend) = registry.get(id) else {
            continue;
        };
        writeln!(
            tw,
            "{}\t{}\t{}\t{}",
            id,
            if backend.is_available() { "yes" } else { "no" },
            if backend.returns_vertex() { "yes" } else { "no" },
            if default.as_deref() == Some(id) { "*" } else { "" }
        )?;
    }
    tw.flush()?;
    Ok(())
}
