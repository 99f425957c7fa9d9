/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config → AuthService, RouteTable, Forwarder → AppState
 * - Router assembly (routes + HTTP layers) and axum::serve()
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::http::{self, HttpLimits};
use crate::services::auth::build_auth_service;
use crate::services::routing::RouteTable;
use crate::services::upstream::HttpForwarder;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,gateway_auth=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting gateway in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    tracing::info!(
        routes = state.routes.len(),
        open_paths = ?state.auth.classifier().open_fragments(),
        "gateway configured"
    );
    if state.routes.is_empty() {
        tracing::warn!("GATEWAY_ROUTES is empty; every proxied path will answer 404");
    }

    let app = build_router(state, HttpLimits::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    let auth = build_auth_service(config).context("invalid JWT_SECRET")?;
    let routes = Arc::new(RouteTable::new(config.routes.clone()));
    let forwarder = HttpForwarder::new(
        Duration::from_secs(config.upstream_timeout_seconds),
        config.request_body_limit_bytes,
    )?;

    Ok(AppState::new(auth, routes, Arc::new(forwarder)))
}

pub fn build_router(state: AppState, limits: HttpLimits) -> Router {
    http::apply(api::routes(state), limits)
}
