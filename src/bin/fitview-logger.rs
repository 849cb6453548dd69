use std::net::SocketAddr;

use fitview::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    fitview::init_tracing(&config);

    tracing::info!("Starting Fitview logger");

    let addr = SocketAddr::new(config.host, config.logger_port);
    let app = fitview::build_logger_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(fitview::shutdown::on_signal("fitview-logger"))
        .await?;

    Ok(())
}
