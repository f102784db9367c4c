use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workshop_allocator::api::{AppState, create_router};
use workshop_allocator::bootstrap::{seed_craftspeople, seed_work_orders};
use workshop_allocator::config::ConfigLoader;
use workshop_allocator::workshop::Workshop;

/// Server settings read from environment variables.
///
/// | Env Var                | Default            |
/// |------------------------|--------------------|
/// | `HOST`                 | `0.0.0.0`          |
/// | `PORT`                 | `3000`             |
/// | `ALLOCATOR_CONFIG_DIR` | `./config/default` |
struct ServerSettings {
    host: String,
    port: u16,
    config_dir: String,
}

impl ServerSettings {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
        let config_dir =
            std::env::var("ALLOCATOR_CONFIG_DIR").unwrap_or_else(|_| "./config/default".into());

        Ok(Self {
            host,
            port,
            config_dir,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workshop_allocator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ServerSettings::from_env()?;

    let loader = ConfigLoader::load(&settings.config_dir).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Using default allocation thresholds");
        ConfigLoader::default()
    });

    let today = chrono::Utc::now().date_naive();
    let craftspeople = seed_craftspeople(ConfigLoader::load_craftspeople(&settings.config_dir));
    let work_orders = seed_work_orders(ConfigLoader::load_work_orders(&settings.config_dir), today);
    tracing::info!(
        craftspeople = craftspeople.records.len(),
        work_orders = work_orders.records.len(),
        sample_roster = craftspeople.is_sample(),
        "Registries seeded"
    );

    let workshop = Workshop::from_records(
        craftspeople.records,
        work_orders.records,
        loader.config().clone(),
    );
    let app = create_router(AppState::new(workshop));

    let addr = SocketAddr::new(settings.host.parse()?, settings.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
