//! Protocol-independent request handling.
//!
//! Turns a request path into a [`Response`] describing what to send. The
//! Gemini and HTTP front ends translate it into their own framing.
//!
//! - [`routes`] - URL scheme
//! - [`pages`] - static page content

pub mod pages;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::render::Pacing;

pub use routes::Route;

/// What to send back for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A fixed body.
    Page { mime: &'static str, body: String },
    /// An artwork to stream through the renderer.
    Artwork { path: PathBuf, pacing: Pacing },
    NotFound,
    /// The request was understood but malformed.
    BadRequest(String),
}

/// Shared, read-only site state.
#[derive(Debug, Clone)]
pub struct Site {
    catalog: Arc<Catalog>,
    hostname: String,
    default_pacing: Pacing,
    source_url: String,
}

impl Site {
    pub fn new(catalog: Arc<Catalog>, hostname: impl Into<String>, default_pacing: Pacing) -> Self {
        Self {
            catalog,
            hostname: hostname.into(),
            default_pacing,
            source_url: env!("CARGO_PKG_REPOSITORY").to_string(),
        }
    }

    /// Where `/source` points network users for the running code.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Resolve a request path.
    pub fn respond(&self, path: &str) -> Response {
        let route = match Route::parse(path) {
            Ok(Some(route)) => route,
            Ok(None) => return Response::NotFound,
            Err(e) if e.is_client_error() => return Response::BadRequest(e.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, path, "route resolution failed");
                return Response::NotFound;
            }
        };

        match route {
            Route::Front => Response::Page {
                mime: pages::GEMINI_MIME,
                body: pages::front(&self.hostname, self.default_pacing, &self.catalog),
            },
            Route::List => Response::Page {
                mime: pages::GEMINI_MIME,
                body: pages::list(&self.catalog),
            },
            Route::Robots => Response::Page {
                mime: pages::TEXT_MIME,
                body: pages::ROBOTS_TXT.to_string(),
            },
            Route::Source => Response::Page {
                mime: pages::GEMINI_MIME,
                body: pages::source(&self.source_url),
            },
            Route::Artwork { name, pacing } => match self.catalog.get(&name) {
                Some(path) => Response::Artwork {
                    path: path.to_path_buf(),
                    pacing: pacing.unwrap_or(self.default_pacing),
                },
                None => Response::NotFound,
            },
        }
    }
}
