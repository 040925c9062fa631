use tokio::net::TcpListener;
use tracing::{info, warn};

use entity_search::logging::init_logging;
use entity_search::{router, Dependencies, ServiceError, Settings};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    dotenv::dotenv().ok();

    let settings = Settings::from_env()?;
    init_logging(settings.log_format);

    let dependencies = Dependencies::new(&settings)?;
    let app = router(dependencies.state);

    let listener = TcpListener::bind(settings.bind_address).await?;
    info!(address = %settings.bind_address, "Entity search listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
