#![allow(async_fn_in_trait)]

use crate::domain::types::{Coordinates, NewOffer, Offer, OfferChanges};
use crate::error::{GeocodingError, OffersServiceError};

/// Repository for ride offers.
pub trait OfferRepository: Send + Sync {
    /// Insert a new offer and return the id assigned by the store.
    async fn create(&self, offer: &NewOffer) -> Result<i32, OffersServiceError>;

    /// All offers, ordered by id.
    async fn list_all(&self) -> Result<Vec<Offer>, OffersServiceError>;

    /// Offers whose postal code and city equal the given values exactly.
    async fn find_by_location(
        &self,
        postal_code: &str,
        city: &str,
    ) -> Result<Vec<Offer>, OffersServiceError>;

    async fn find_by_edit_code(&self, edit_code: &str)
    -> Result<Option<Offer>, OffersServiceError>;

    /// Overwrite the supplied fields of offer `id` in a single statement.
    async fn update(&self, id: i32, changes: &OfferChanges) -> Result<(), OffersServiceError>;
}

/// Port for resolving a postal address to coordinates.
pub trait Geocoder: Send + Sync {
    /// Resolve `postal_code` and `city` (qualified by the geocoder's fixed
    /// country) to the first matching location. `Ok(None)` means the lookup
    /// succeeded but found nothing.
    async fn locate(
        &self,
        postal_code: &str,
        city: &str,
    ) -> Result<Option<Coordinates>, GeocodingError>;
}
