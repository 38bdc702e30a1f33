use anyhow::Context;
use skytrip_api::{app, AppState, SearchFacade, SkyScrapperClient};
use skytrip_catalog::SeatLayout;
use skytrip_core::InMemoryAuthProvider;
use skytrip_store::app_config::Config;
use skytrip_store::{BlobStore, MemoryBlobStore, RedisBlobStore, StatePersistor};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skytrip_api=debug,skytrip_store=info,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting SkyTrip session service on port {}", config.server.port);

    if config.search_api.api_key.is_empty() {
        tracing::warn!("No search API key configured; flight and airport lookups will fail");
    }

    let store: Arc<dyn BlobStore> = match &config.persistence.redis_url {
        Some(url) => {
            tracing::info!("Persisting session state to Redis");
            Arc::new(RedisBlobStore::new(url).context("Invalid Redis URL")?)
        }
        None => {
            tracing::info!("Persisting session state in memory");
            Arc::new(MemoryBlobStore::new())
        }
    };
    let persistor = StatePersistor::new(
        store,
        config.persistence.root_key.clone(),
        config.persistence.allow_list.iter().cloned(),
    );

    let layout = match &config.seating {
        Some(seating) => SeatLayout::from_labels(
            seating.rows,
            &seating.columns,
            seating.occupied.as_slice(),
            seating.unavailable.as_slice(),
        )
        .context("Invalid seating layout")?,
        None => SeatLayout::standard(),
    };
    tracing::info!("Cabin layout has {} seats", layout.seat_count());

    let search = SearchFacade::new(
        Arc::new(SkyScrapperClient::new(&config.search_api)),
        config.search_api.locale.clone(),
        Duration::from_millis(config.search.debounce_ms),
    );

    let state = AppState::restore(search, Arc::new(InMemoryAuthProvider::new()), persistor, Arc::new(layout)).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
