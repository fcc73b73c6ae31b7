//! Play command handler

use std::io::{self, Write};

use anyhow::{Context, Result};

use ansimirror::cli::PlayArgs;
use ansimirror::{Config, Renderer};

/// Render an artwork to stdout, sleeping for each chunk's wait.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, args: &PlayArgs) -> Result<()> {
    let pacing = args.pacing(config.modem.pacing());
    let renderer = Renderer::open(&args.file, pacing)?;
    tracing::debug!(file = %args.file.display(), %pacing, "playing");

    let mut out = io::stdout().lock();
    for chunk in renderer {
        let chunk = chunk.with_context(|| format!("Failed to render {}", args.file.display()))?;
        if !chunk.wait.is_zero() {
            std::thread::sleep(chunk.wait);
        }
        if chunk.bytes.is_empty() {
            continue;
        }
        match out.write_all(&chunk.bytes).and_then(|()| out.flush()) {
            Ok(()) => {}
            // Reader went away (e.g. piped into `head`)
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
