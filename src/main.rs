//! Elternantrag - Elterngeld application wizard

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elternantrag::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elternantrag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Elternantrag wizard...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Build application state (templates parse here, broken markup aborts
    // the start)
    let state = api::AppState::new(config)?;
    tracing::info!("Template engine initialized");

    // Compare the binding table with the live template so field drift shows
    // up in the log at startup, not in a half-empty document later.
    match state.filler.check_template() {
        Ok(report) => {
            if report.is_clean() {
                tracing::info!("Form template matches the binding table");
            } else {
                for name in &report.missing_in_template {
                    tracing::warn!(field = name, "bound field missing in template");
                }
                tracing::info!(
                    unbound = report.unbound_in_template.len(),
                    "template fields without binding"
                );
            }
        }
        Err(e) => {
            tracing::warn!("Form template not usable yet: {e}");
        }
    }

    // Build router
    let app = api::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
