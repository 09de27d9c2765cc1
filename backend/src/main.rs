//! Relay entry point: loads configuration, wires the dispatch backend and
//! serves the REST API until a shutdown signal arrives.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use relay::config::RelaySettings;
use relay::inbound::http::health::HealthState;
use server::{ServerConfig, build_dispatch, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RelaySettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = settings
        .resolve()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(
        environment = %config.environment,
        port = config.port,
        dispatch_mode = config.dispatch.label(),
        task_delay_seconds = config.task_delay_seconds,
        access_token = config.access_token.is_some(),
        "configuration loaded"
    );

    let dispatch = build_dispatch(&config)?;
    let http_state = build_http_state(&config, dispatch);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        http_state,
        ServerConfig::from_runtime(&config),
    )?;

    actix_web::rt::spawn(drain_on_signal(health_state));
    info!(port = config.port, "relay listening");
    server.await
}

/// Flip liveness to 503 as soon as a shutdown signal arrives. The server
/// handles the same signal itself and drains in-flight requests.
async fn drain_on_signal(health_state: web::Data<HealthState>) {
    shutdown_signal().await;
    warn!("shutdown signal received; draining");
    health_state.mark_unhealthy();
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(error) => {
            warn!(%error, "SIGTERM handler unavailable; listening for ctrl-c only");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
