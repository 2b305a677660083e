use std::net::{IpAddr, SocketAddr};

use anyhow::Context;

use jernkorset_api::config::get_settings;
use jernkorset_api::router::build_app_router;
use jernkorset_api::state::{build_modernizer, AppState};
use jernkorset_api::telemetry::init_tracing;
use jernkorset_core::archive::Archive;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let settings = get_settings().context("Invalid configuration")?;

    // --- Tracing ---
    init_tracing(settings);
    tracing::info!(
        app = %settings.app_name,
        version = %settings.app_version,
        debug = settings.debug,
        "Loaded configuration"
    );

    // --- Archive (must finish before the listener is bound) ---
    let places_path = settings.places_path();
    let letters_path = settings.letters_path();
    let archive = Archive::load(&places_path, &letters_path).inspect_err(|e| {
        tracing::error!(
            error_code = e.error_code(),
            error = %e,
            detail = e.detail().as_deref().unwrap_or(""),
            "Failed to load archive, refusing to start"
        );
    })?;
    tracing::info!(
        letters = archive.letter_count(),
        places = archive.place_count(),
        "Archive loaded"
    );

    // --- Modernizer ---
    let modernizer = build_modernizer(&settings.modernizer);
    tracing::info!(backend = ?settings.modernizer.backend, "Modernizer configured");

    // --- Router ---
    let state = AppState::new(archive, modernizer, settings.clone());
    let app = build_app_router(state);

    // --- Start server ---
    let host: IpAddr = settings
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address {:?}", settings.host))?;
    let addr = SocketAddr::new(host, settings.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
