use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use volunteer_match::config::{CacheSettings, LoggingSettings, Settings, StorageBackend};
use volunteer_match::core::Matcher;
use volunteer_match::routes::{self, AppState};
use volunteer_match::services::{
    load_seed, CachedStore, InMemoryStore, MatchService, MatchStore, PostgresStore,
};

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn with_cache<S: MatchStore>(store: S, cache: &CacheSettings) -> Arc<dyn MatchStore> {
    if cache.enabled {
        info!(
            "Store cache enabled (capacity: {} entries, TTL: {}s)",
            cache.capacity, cache.ttl_secs
        );
        Arc::new(CachedStore::new(store, cache.capacity, cache.ttl_secs))
    } else {
        Arc::new(store)
    }
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn MatchStore>> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store");
            Ok(with_cache(InMemoryStore::new(), &settings.cache))
        }
        StorageBackend::Postgres => {
            let db = &settings.database;
            let url = db.url.as_deref().ok_or_else(|| {
                error!("storage.backend is postgres but no database.url is configured");
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "database.url missing")
            })?;

            let store = PostgresStore::from_settings(
                url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;

            info!(
                "PostgreSQL store initialized (max: {} connections)",
                db.max_connections.unwrap_or(10)
            );
            Ok(with_cache(store, &settings.cache))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let loaded = Settings::load();
    init_logging(&loaded.as_ref().map(|s| s.logging.clone()).unwrap_or_default());

    info!("Starting volunteer matching service...");

    let settings = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let store = build_store(&settings).await?;

    if let Some(path) = &settings.seed.path {
        load_seed(path, &*store).await.map_err(|e| {
            error!("Failed to load seed data from {}: {}", path, e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
    }

    let matcher = Matcher::new(settings.matching.min_score);

    info!("Matcher initialized (events must score above {})", matcher.min_score());

    // Build application state
    let app_state = AppState {
        service: MatchService::new(store, matcher),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
