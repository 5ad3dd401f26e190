use rand::RngExt;

use crate::domain::distance::within_radius;
use crate::domain::repository::{Geocoder, OfferRepository};
use crate::domain::types::{
    Coordinates, EDIT_CODE_LEN, NewOffer, Offer, OfferChanges, OfferSubmission,
};
use crate::domain::validation::{
    ValidationError, is_valid_email, is_valid_phone, is_valid_place_or_name,
    is_valid_postal_code, validate_submission,
};
use crate::error::OffersServiceError;

/// Charset for generating edit codes (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_edit_code() -> String {
    let mut rng = rand::rng();
    (0..EDIT_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Resolve a postal code and city, treating an empty result as an error.
async fn resolve<G: Geocoder>(
    geocoder: &G,
    postal_code: &str,
    city: &str,
) -> Result<Coordinates, OffersServiceError> {
    geocoder
        .locate(postal_code, city)
        .await?
        .ok_or_else(|| OffersServiceError::LocationNotFound(format!("{postal_code} {city}")))
}

// ── CreateOffer ──────────────────────────────────────────────────────────────

pub struct CreatedOffer {
    pub id: i32,
    /// Disclosed only here; list and search responses never carry it.
    pub edit_code: String,
}

pub struct CreateOfferUseCase<R, G>
where
    R: OfferRepository,
    G: Geocoder,
{
    pub offers: R,
    pub geocoder: G,
}

impl<R, G> CreateOfferUseCase<R, G>
where
    R: OfferRepository,
    G: Geocoder,
{
    pub async fn execute(
        &self,
        submission: OfferSubmission,
    ) -> Result<CreatedOffer, OffersServiceError> {
        // 1. Validate → 400 on the first failing rule
        let fields = validate_submission(submission)?;

        // 2. Geocode → nothing is stored when this fails
        let coordinates = resolve(&self.geocoder, &fields.postal_code, &fields.city).await?;

        // 3. Persist with a fresh edit code
        let offer = NewOffer {
            fields,
            coordinates,
            edit_code: generate_edit_code(),
        };
        let id = self.offers.create(&offer).await?;
        tracing::info!(offer_id = id, "offer created");

        Ok(CreatedOffer {
            id,
            edit_code: offer.edit_code,
        })
    }
}

// ── ListOffers ───────────────────────────────────────────────────────────────

pub struct ListOffersUseCase<R: OfferRepository> {
    pub offers: R,
}

impl<R: OfferRepository> ListOffersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Offer>, OffersServiceError> {
        self.offers.list_all().await
    }
}

// ── SearchOffers ─────────────────────────────────────────────────────────────

pub struct SearchOffersInput {
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

pub struct SearchOffersUseCase<R: OfferRepository> {
    pub offers: R,
}

impl<R: OfferRepository> SearchOffersUseCase<R> {
    pub async fn execute(&self, input: SearchOffersInput) -> Result<Vec<Offer>, OffersServiceError> {
        let (postal_code, city) = search_location(input.postal_code, input.city)?;
        let found = self.offers.find_by_location(&postal_code, &city).await?;
        if found.is_empty() {
            return Err(OffersServiceError::NoOffersFound);
        }
        Ok(found)
    }
}

fn search_location(
    postal_code: Option<String>,
    city: Option<String>,
) -> Result<(String, String), OffersServiceError> {
    match (non_blank(postal_code), non_blank(city)) {
        (Some(p), Some(c)) => Ok((p, c)),
        _ => Err(OffersServiceError::MissingSearchParams),
    }
}

// ── SearchOffersInRadius ─────────────────────────────────────────────────────

pub struct SearchRadiusInput {
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// Raw query value; must parse as a non-negative integer.
    pub radius_km: Option<String>,
}

pub struct SearchOffersInRadiusUseCase<R, G>
where
    R: OfferRepository,
    G: Geocoder,
{
    pub offers: R,
    pub geocoder: G,
}

impl<R, G> SearchOffersInRadiusUseCase<R, G>
where
    R: OfferRepository,
    G: Geocoder,
{
    pub async fn execute(&self, input: SearchRadiusInput) -> Result<Vec<Offer>, OffersServiceError> {
        let (postal_code, city) = search_location(input.postal_code, input.city)?;
        let radius_km: u32 = non_blank(input.radius_km)
            .ok_or(OffersServiceError::MissingSearchParams)?
            .trim()
            .parse()
            .map_err(|_| OffersServiceError::InvalidRadius)?;

        let center = resolve(&self.geocoder, &postal_code, &city).await?;

        // Linear scan; acceptable for a few thousand rows.
        let matches: Vec<Offer> = self
            .offers
            .list_all()
            .await?
            .into_iter()
            .filter(|o| within_radius(center, o.coordinates, f64::from(radius_km)))
            .collect();
        if matches.is_empty() {
            return Err(OffersServiceError::NoOffersInRadius);
        }
        Ok(matches)
    }
}

// ── EditOffer ────────────────────────────────────────────────────────────────

/// Partial update. Fields that are missing or blank leave the stored value.
#[derive(Default)]
pub struct EditOfferInput {
    pub edit_code: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub class_label: Option<String>,
    pub phone: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub notes: Option<String>,
}

pub struct EditOfferUseCase<R, G>
where
    R: OfferRepository,
    G: Geocoder,
{
    pub offers: R,
    pub geocoder: G,
}

impl<R, G> EditOfferUseCase<R, G>
where
    R: OfferRepository,
    G: Geocoder,
{
    pub async fn execute(&self, input: EditOfferInput) -> Result<(), OffersServiceError> {
        let edit_code = non_blank(input.edit_code).ok_or(OffersServiceError::MissingEditCode)?;

        // 1. Find the offer by its code → 404 if none
        let offer = self
            .offers
            .find_by_edit_code(&edit_code)
            .await?
            .ok_or(OffersServiceError::OfferNotFound)?;

        // 2. Keep non-blank fields and check their format
        let mut changes = OfferChanges {
            postal_code: non_blank(input.postal_code),
            city: non_blank(input.city),
            street: non_blank(input.street),
            name: non_blank(input.name),
            email: non_blank(input.email),
            class_label: non_blank(input.class_label),
            phone: non_blank(input.phone),
            valid_from: non_blank(input.valid_from),
            valid_to: non_blank(input.valid_to),
            notes: non_blank(input.notes),
            coordinates: None,
        };
        validate_changes(&changes)?;

        // 3. Re-geocode when the location moved → whole edit fails on error
        let postal_code_changed = changes
            .postal_code
            .as_ref()
            .is_some_and(|p| *p != offer.fields.postal_code);
        let city_changed = changes
            .city
            .as_ref()
            .is_some_and(|c| *c != offer.fields.city);
        if postal_code_changed || city_changed {
            let postal_code = changes
                .postal_code
                .as_deref()
                .unwrap_or(&offer.fields.postal_code);
            let city = changes.city.as_deref().unwrap_or(&offer.fields.city);
            changes.coordinates = Some(resolve(&self.geocoder, postal_code, city).await?);
        }

        if changes.is_empty() {
            return Ok(());
        }

        // 4. Single-statement update
        self.offers.update(offer.id, &changes).await?;
        tracing::info!(offer_id = offer.id, "offer updated");
        Ok(())
    }
}

fn validate_changes(changes: &OfferChanges) -> Result<(), ValidationError> {
    if changes
        .postal_code
        .as_deref()
        .is_some_and(|v| !is_valid_postal_code(v))
    {
        return Err(ValidationError::InvalidPostalCode);
    }
    if changes
        .city
        .as_deref()
        .is_some_and(|v| !is_valid_place_or_name(v))
    {
        return Err(ValidationError::InvalidCity);
    }
    if changes
        .name
        .as_deref()
        .is_some_and(|v| !is_valid_place_or_name(v))
    {
        return Err(ValidationError::InvalidName);
    }
    if changes.email.as_deref().is_some_and(|v| !is_valid_email(v)) {
        return Err(ValidationError::InvalidEmail);
    }
    if changes.phone.as_deref().is_some_and(|v| !is_valid_phone(v)) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
