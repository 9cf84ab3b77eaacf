use adoptme::{
    AdoptionService, InMemoryStore, PostgresStore, Store,
    adapters::config::{DatabaseBackend, Settings},
};
use color_eyre::eyre::{Result, eyre};
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    match settings.database.backend {
        DatabaseBackend::InMemory => {
            tracing::warn!("Using the in-memory store, data is lost on restart");
            serve(InMemoryStore::new(), &settings).await
        }
        DatabaseBackend::Postgres => {
            let url = settings
                .database
                .url
                .as_ref()
                .ok_or_else(|| eyre!("database.url is required for the postgres backend"))?;
            let store = PostgresStore::connect(url, settings.database.max_connections).await?;
            serve(store, &settings).await
        }
    }
}

async fn serve<S: Store>(store: S, settings: &Settings) -> Result<()> {
    let service = AdoptionService::from_settings(store, settings);

    let listener = TcpListener::bind(settings.application.address()).await?;
    tracing::info!("Starting adoption service...");

    service
        .run_standalone(listener, Some(settings.application.allowed_origins.clone()))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
