//! Booklens server binary.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use booklens::adapters::google_books::{GoogleBooksClient, GoogleBooksClientConfig};
use booklens::adapters::http::{api_router, BooksAppState, ReviewsAppState};
use booklens::adapters::memory::InMemoryReviewStore;
use booklens::adapters::postgres::{run_migrations, PostgresReviewStore};
use booklens::config::{AppConfig, DatabaseConfig, GoogleBooksConfig, ServerConfig};
use booklens::ports::ReviewStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        google_books_key = config.google_books.has_api_key(),
        "starting booklens"
    );

    let catalogue = Arc::new(catalogue_client(&config.google_books)?);
    let store = review_store(config.database.as_ref()).await?;

    let app = api_router(
        BooksAppState::new(
            catalogue,
            config.search.page_size,
            config.search.max_page_size,
        ),
        ReviewsAppState::new(store),
    )
    .layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.server))
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured level. Production logs are JSON.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if server.is_production() {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn catalogue_client(config: &GoogleBooksConfig) -> Result<GoogleBooksClient, reqwest::Error> {
    let mut client_config =
        GoogleBooksClientConfig::new(&config.base_url).with_timeout(config.timeout());
    if let Some(key) = config.api_key.clone() {
        client_config = client_config.with_api_key(key);
    }
    GoogleBooksClient::new(client_config)
}

async fn review_store(database: Option<&DatabaseConfig>) -> Result<Arc<dyn ReviewStore>, BoxError> {
    let Some(database) = database else {
        info!("no database configured, reviews are kept in memory");
        return Ok(Arc::new(InMemoryReviewStore::new()));
    };

    let pool = database.pool_options().connect(&database.url).await?;

    if database.run_migrations {
        run_migrations(&pool).await?;
        info!("database migrations applied");
    }

    Ok(Arc::new(PostgresReviewStore::new(pool)))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}
