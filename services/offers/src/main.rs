use axum::http::HeaderValue;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use mitfahr_offers::config::OffersConfig;
use mitfahr_offers::infra::geocoder::NominatimGeocoder;
use mitfahr_offers::router::{build_router, cors_layer};
use mitfahr_offers::state::AppState;
use mitfahr_offers_migration::Migrator;

#[tokio::main]
async fn main() {
    mitfahr_core::tracing::init_tracing();

    let config = OffersConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // Creates the offers table on first startup.
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let geocoder = NominatimGeocoder::new(
        &config.geocoder_url,
        config.geocoder_user_agent,
        config.geocoder_country,
    )
    .expect("invalid GEOCODER_URL");

    let state = AppState { db, geocoder };

    let mut router = build_router(state);
    if let Some(origin) = config.cors_allow_origin {
        match HeaderValue::from_str(&origin) {
            Ok(origin) => router = router.layer(cors_layer(origin)),
            Err(e) => warn!(error = %e, %origin, "ignoring invalid CORS_ALLOW_ORIGIN"),
        }
    }

    let addr = format!("0.0.0.0:{}", config.offers_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("offers service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
