use anyhow::Result;
use pricing_columns::config::Config;
use pricing_columns::offer::HttpOfferLookup;
use pricing_columns::server::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env = config.environment();
    tracing::info!("environment: {env:?}");
    let state = AppState {
        env,
        lookup: Box::new(HttpOfferLookup::new(&config.offers_base_url)?),
    };

    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("listening on http://{address}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
