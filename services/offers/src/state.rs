use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::DbOfferRepository;
use crate::infra::geocoder::NominatimGeocoder;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub geocoder: NominatimGeocoder,
}

impl AppState {
    pub fn offer_repo(&self) -> DbOfferRepository {
        DbOfferRepository {
            db: self.db.clone(),
        }
    }

    pub fn geocoder(&self) -> NominatimGeocoder {
        self.geocoder.clone()
    }
}

/// Lets `mitfahr_core::health::readyz` ping the service database.
impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
