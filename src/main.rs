// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use axum_server::Handle;
use solium_presale::{
    api::router,
    config::ServerConfig,
    db::PgTimeSource,
    logging::{init_tracing, LogFormat},
    state::AppState,
    tls::{install_crypto_provider, load_rustls_config},
};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env(), None);

    // Must run before any TLS configuration is built
    install_crypto_provider();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let tls_config = load_rustls_config(&config.tls_cert_path, &config.tls_key_path).await?;
    tracing::info!(
        cert = %config.tls_cert_path.display(),
        key = %config.tls_key_path.display(),
        "Loaded TLS credentials"
    );

    let time = PgTimeSource::connect_lazy(&config.database_url)?;
    let app = router(AppState::new(time));

    let handle = Handle::new();
    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            shutdown.cancelled().await;
            tracing::info!("Shutting down");
            handle.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
        });
    }

    tracing::info!(addr = %config.addr, "HTTPS server running (docs at /docs)");
    axum_server::bind_rustls(config.addr, tls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

async fn shutdown_on_ctrl_c(token: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => token.cancel(),
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C"),
    }
}
