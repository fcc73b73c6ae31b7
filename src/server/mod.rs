//! Network front ends.
//!
//! - [`gemini`] - Gemini protocol over plain TCP
//! - [`http`] - minimal HTTP/1.1
//! - [`stream`] - paced delivery shared by both

pub mod gemini;
pub mod http;
pub mod stream;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::config::ServerConfig;
use crate::site::Site;

/// Bind the configured listeners and serve until Ctrl-C or a listener fails.
pub async fn run(site: Arc<Site>, config: &ServerConfig) -> Result<()> {
    let timeout = config.request_timeout();
    let mut listeners = JoinSet::new();

    let gemini = bind(&config.gemini_listen).await?;
    tracing::info!(addr = %gemini.local_addr()?, "gemini listening");
    listeners.spawn(gemini::serve(gemini, Arc::clone(&site), timeout));

    if let Some(addr) = config.http_addr() {
        let http = bind(addr).await?;
        tracing::info!(addr = %http.local_addr()?, "http listening");
        listeners.spawn(http::serve(http, Arc::clone(&site), timeout));
    }

    tokio::select! {
        Some(finished) = listeners.join_next() => {
            finished.context("Listener task panicked")??;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            tracing::info!("shutting down");
        }
    }

    listeners.abort_all();
    Ok(())
}

async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))
}
