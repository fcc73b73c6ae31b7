//! Serve command handler

use std::sync::Arc;

use anyhow::{Context, Result};

use ansimirror::cli::ServeArgs;
use ansimirror::{server, Catalog, Config, Site};

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(config: &mut Config, args: ServeArgs) {
    if let Some(root) = args.root {
        config.archive.root = root;
    }
    if let Some(addr) = args.gemini {
        config.server.gemini_listen = addr;
    }
    if let Some(addr) = args.http {
        config.server.http_enabled = true;
        config.server.http_listen = addr;
    }
    if args.no_http {
        config.server.http_enabled = false;
    }
    if let Some(hostname) = args.hostname {
        config.server.hostname = hostname;
    }
}

/// Scan the archive and serve it until interrupted.
#[cfg(not(tarpaulin_include))]
pub fn handle(mut config: Config, args: ServeArgs) -> Result<()> {
    apply_overrides(&mut config, args);

    let catalog = Catalog::scan(&config.archive.root)?;
    if catalog.is_empty() {
        tracing::warn!(root = %catalog.root().display(), "archive contains no artwork");
    }
    let site = Arc::new(
        Site::new(
            Arc::new(catalog),
            config.server.hostname.clone(),
            config.modem.pacing(),
        )
        .with_source_url(config.server.source_url.clone()),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(server::run(site, &config.server))
}
