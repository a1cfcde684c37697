use std::{error::Error, net::SocketAddr, sync::Arc};

use dotenv::dotenv;
use openid::{
    SERVICE_NAME, config::Config, handler::Handler, keys::SigningKeyPair, router::router,
    upstream::LinkedinClient,
};
use setup::{middleware::add_middleware, tracing::init_tracing};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();

    let cfg = Config::from_env()?;
    let telemetry = init_tracing(SERVICE_NAME, cfg.otlp_endpoint.as_deref())?;

    let keys = SigningKeyPair::from_pem_files(&cfg.private_key_path, &cfg.public_key_path)?;
    let upstream = LinkedinClient::new(&cfg);
    let handler = Handler::new(upstream, Arc::new(keys), cfg.client_id.clone());

    let router = add_middleware(router(Arc::new(handler)));

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], cfg.port))).await?;
    info!(
        addr = %listener.local_addr()?,
        remote_logging = telemetry.is_remote(),
        "listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry.shutdown()?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
