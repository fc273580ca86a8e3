use keycloak_domain::{ConfigurationPort, EnvConfigurationAdapter};
use keycloak_rpc_gateway::{router, telemetry, AppState};
use std::net::SocketAddr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EnvConfigurationAdapter::new()?;
    telemetry::init(config.get_logging_config());
    config.validate()?;

    let state = AppState::from_config(config.app_config())?;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.get_server_config().port));
    info!(
        "Starting gateway on {} for realm {} ({})",
        addr,
        config.get_keycloak_config().realm,
        config.app_config().environment
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
