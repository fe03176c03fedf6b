use fintrack::config::Config;
use fintrack::server::{build_app, serve};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting fintrack {} on {}", fintrack::VERSION, config.address());

    let (host, port) = (config.host.clone(), config.port);
    let (_state, app) = build_app(config).expect("Failed to initialise application");

    let (actual_port, handle) = serve(app, &host, port)
        .await
        .expect("Failed to bind address");
    tracing::info!("Listening on http://{}:{}", host, actual_port);

    match handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Server error: {}", e),
        Err(e) => tracing::error!("Server task failed: {}", e),
    }
}
