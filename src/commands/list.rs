//! List command handler

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use ansimirror::{Catalog, Config};

/// Print every artwork name in the archive, one per line.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, root: Option<PathBuf>) -> Result<()> {
    let root = root.unwrap_or_else(|| config.archive.root.clone());
    let catalog = Catalog::scan(&root)?;

    let mut out = io::stdout().lock();
    for name in catalog.names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
