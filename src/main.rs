use std::net::SocketAddr;

use fitview::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    fitview::init_tracing(&config);

    tracing::info!("Starting Fitview dashboard");

    let addr = SocketAddr::new(config.host, config.port);
    let app = fitview::build_app(config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(fitview::shutdown::on_signal("fitview"))
        .await?;

    Ok(())
}
