use anyhow::{bail, Context, Result};
use site_content::config::Config;
use site_content::content::verify_manifest;
use site_content::server::{router, AppState};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_content=info".parse()?),
        )
        .init();

    info!("Starting site content service");

    let config = Config::from_env()?;
    let port = config.port;
    let strict = config.strict_content;
    info!(
        "Serving content from {:?} for {}",
        config.content_dir, config.site_base_url
    );

    let state = Arc::new(AppState::from_config(config));

    // Check every locale/namespace pair before taking traffic
    let report = verify_manifest(&state.loader, &state.pages);
    for e in &report.errors {
        error!("Content: {}", e);
    }
    for w in &report.warnings {
        warn!("Content: {}", w);
    }
    if strict && report.has_errors() {
        bail!(
            "Content verification failed with {} error(s) and CONTENT_STRICT is set",
            report.errors.len()
        );
    }

    // Log announcements so signups are visible in the service log
    let mut announcements = state.announcer.subscribe();
    tokio::spawn(async move {
        loop {
            match announcements.recv().await {
                Ok(a) => info!("Announcement [{}]: {}", a.locale, a.message),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Announcement log skipped {} messages", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("✓ Listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
