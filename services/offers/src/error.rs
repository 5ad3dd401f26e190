use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::validation::ValidationError;

/// Failure talking to the external geocoder.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    #[error("geocoder request failed: {0}")]
    Transport(String),
    #[error("geocoder returned status {0}")]
    Status(u16),
    #[error("geocoder response could not be read: {0}")]
    InvalidResponse(String),
}

/// Offers service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum OffersServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("edit_code is required")]
    MissingEditCode,
    #[error("plz and ort are required")]
    MissingSearchParams,
    #[error("radius must be a non-negative whole number of kilometers")]
    InvalidRadius,
    #[error("no offers found")]
    NoOffersFound,
    #[error("no offers found within radius")]
    NoOffersInRadius,
    #[error("offer not found")]
    OfferNotFound,
    #[error("no location found for {0}")]
    LocationNotFound(String),
    #[error("geocoding failed: {0}")]
    Geocoding(#[from] GeocodingError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl OffersServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.kind(),
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingEditCode => "MISSING_EDIT_CODE",
            Self::MissingSearchParams => "MISSING_SEARCH_PARAMS",
            Self::InvalidRadius => "INVALID_RADIUS",
            Self::NoOffersFound => "NO_OFFERS_FOUND",
            Self::NoOffersInRadius => "NO_OFFERS_IN_RADIUS",
            Self::OfferNotFound => "OFFER_NOT_FOUND",
            Self::LocationNotFound(_) => "LOCATION_NOT_FOUND",
            Self::Geocoding(_) => "GEOCODING_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for OffersServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_)
            | Self::InvalidBody(_)
            | Self::MissingEditCode
            | Self::MissingSearchParams
            | Self::InvalidRadius => StatusCode::BAD_REQUEST,
            Self::NoOffersFound | Self::NoOffersInRadius | Self::OfferNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::LocationNotFound(_) | Self::Geocoding(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // TraceLayer records every request; only the 500s need their cause logged here.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
            }
            Self::Geocoding(_) | Self::LocationNotFound(_) => {
                tracing::warn!(error = %self, kind = self.kind(), "geocoding error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
