use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use mitfahr_core::health::{healthz, readyz};
use mitfahr_core::middleware::with_http_layers;

use crate::handlers::offer::{
    create_offer, edit_offer, list_offers, search_offers, search_offers_in_radius,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Offers
        .route("/api/offer", post(create_offer))
        .route("/api/offers", get(list_offers))
        .route("/api/search", get(search_offers))
        .route("/api/search_radius", get(search_offers_in_radius))
        .route("/api/edit_offer", post(edit_offer).put(edit_offer))
        .with_state(state);
    with_http_layers(router)
}

/// Admit a single browser origin for cross-origin calls to the API.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE])
}
