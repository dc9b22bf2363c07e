//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the Leptos SSR tester page, the compiled WASM/CSS
//! bundle under `/pkg`, and a `/healthz` probe. Every request passes through
//! the `tower-http` trace layer.

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Routes that do not depend on Leptos configuration.
fn probe_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Directory holding the compiled `pkg/` bundle. `SITE_ROOT` wins over the
/// Leptos option.
fn resolve_site_root(config: &ServerConfig, leptos_site_root: &str) -> PathBuf {
    config.site_root.clone().unwrap_or_else(|| PathBuf::from(leptos_site_root))
}

/// Full application router: probes + Leptos SSR + static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing
/// `LEPTOS_*` environment or a malformed `[[workspace.metadata.leptos]]`
/// section).
pub fn app(config: &ServerConfig) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root = resolve_site_root(config, leptos_options.site_root.as_ref());
    tracing::debug!(site_root = %site_root.display(), "serving compiled assets");

    Ok(probe_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
