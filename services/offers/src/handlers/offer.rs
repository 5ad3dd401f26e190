use axum::{
    Json,
    extract::{RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Offer, OfferSubmission};
use crate::error::OffersServiceError;
use crate::state::AppState;
use crate::usecase::offer::{
    CreateOfferUseCase, EditOfferInput, EditOfferUseCase, ListOffersUseCase, SearchOffersInput,
    SearchOffersInRadiusUseCase, SearchOffersUseCase, SearchRadiusInput,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Public view of an offer. The edit code is deliberately absent.
#[derive(Serialize)]
pub struct OfferResponse {
    pub id: i32,
    pub plz: String,
    pub ort: String,
    pub strasse: Option<String>,
    pub name: String,
    pub email: String,
    pub klasse: Option<String>,
    pub handy: Option<String>,
    pub gueltig_von: Option<String>,
    pub gueltig_bis: Option<String>,
    pub info: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Offer> for OfferResponse {
    fn from(offer: Offer) -> Self {
        let f = offer.fields;
        Self {
            id: offer.id,
            plz: f.postal_code,
            ort: f.city,
            strasse: f.street,
            name: f.name,
            email: f.email,
            klasse: f.class_label,
            handy: f.phone,
            gueltig_von: f.valid_from,
            gueltig_bis: f.valid_to,
            info: f.notes,
            latitude: offer.coordinates.map(|c| c.latitude),
            longitude: offer.coordinates.map(|c| c.longitude),
        }
    }
}

/// Malformed or mistyped JSON bodies answer like any other field error.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, OffersServiceError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| OffersServiceError::InvalidBody(rejection.body_text()))
}

fn to_responses(offers: Vec<Offer>) -> Json<Vec<OfferResponse>> {
    Json(offers.into_iter().map(OfferResponse::from).collect())
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ── POST /api/offer ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateOfferRequest {
    pub plz: Option<String>,
    pub ort: Option<String>,
    pub strasse: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub klasse: Option<String>,
    pub handy: Option<String>,
    pub gueltig_von: Option<String>,
    pub gueltig_bis: Option<String>,
    pub info: Option<String>,
}

#[derive(Serialize)]
pub struct CreateOfferResponse {
    pub message: &'static str,
    pub id: i32,
    pub edit_code: String,
}

pub async fn create_offer(
    State(state): State<AppState>,
    body: Result<Json<CreateOfferRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateOfferResponse>), OffersServiceError> {
    let body = json_body(body)?;
    let usecase = CreateOfferUseCase {
        offers: state.offer_repo(),
        geocoder: state.geocoder(),
    };
    let created = usecase
        .execute(OfferSubmission {
            postal_code: body.plz,
            city: body.ort,
            street: body.strasse,
            name: body.name,
            email: body.email,
            class_label: body.klasse,
            phone: body.handy,
            valid_from: body.gueltig_von,
            valid_to: body.gueltig_bis,
            notes: body.info,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateOfferResponse {
            message: "offer created",
            id: created.id,
            edit_code: created.edit_code,
        }),
    ))
}

// ── GET /api/offers ──────────────────────────────────────────────────────────

pub async fn list_offers(
    State(state): State<AppState>,
) -> Result<Json<Vec<OfferResponse>>, OffersServiceError> {
    let usecase = ListOffersUseCase {
        offers: state.offer_repo(),
    };
    Ok(to_responses(usecase.execute().await?))
}

// ── Query params ─────────────────────────────────────────────────────────────

/// Query string shared by both search endpoints. Values stay raw strings so
/// missing and malformed parameters map to our own error kinds.
#[derive(Deserialize, Default)]
pub struct SearchQuery {
    pub plz: Option<String>,
    pub ort: Option<String>,
    pub radius: Option<String>,
}

fn parse_search_query(raw_query: Option<String>) -> Result<SearchQuery, OffersServiceError> {
    raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| OffersServiceError::MissingSearchParams)
        .map(Option::unwrap_or_default)
}

// ── GET /api/search ──────────────────────────────────────────────────────────

pub async fn search_offers(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<OfferResponse>>, OffersServiceError> {
    let query = parse_search_query(raw_query)?;
    let usecase = SearchOffersUseCase {
        offers: state.offer_repo(),
    };
    let found = usecase
        .execute(SearchOffersInput {
            postal_code: query.plz,
            city: query.ort,
        })
        .await?;
    Ok(to_responses(found))
}

// ── GET /api/search_radius ───────────────────────────────────────────────────

pub async fn search_offers_in_radius(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<OfferResponse>>, OffersServiceError> {
    let query = parse_search_query(raw_query)?;
    let usecase = SearchOffersInRadiusUseCase {
        offers: state.offer_repo(),
        geocoder: state.geocoder(),
    };
    let found = usecase
        .execute(SearchRadiusInput {
            postal_code: query.plz,
            city: query.ort,
            radius_km: query.radius,
        })
        .await?;
    Ok(to_responses(found))
}

// ── PUT|POST /api/edit_offer ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EditOfferRequest {
    pub edit_code: Option<String>,
    pub plz: Option<String>,
    pub ort: Option<String>,
    pub strasse: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub klasse: Option<String>,
    pub handy: Option<String>,
    pub gueltig_von: Option<String>,
    pub gueltig_bis: Option<String>,
    pub info: Option<String>,
}

pub async fn edit_offer(
    State(state): State<AppState>,
    body: Result<Json<EditOfferRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, OffersServiceError> {
    let body = json_body(body)?;
    let usecase = EditOfferUseCase {
        offers: state.offer_repo(),
        geocoder: state.geocoder(),
    };
    usecase
        .execute(EditOfferInput {
            edit_code: body.edit_code,
            postal_code: body.plz,
            city: body.ort,
            street: body.strasse,
            name: body.name,
            email: body.email,
            class_label: body.klasse,
            phone: body.handy,
            valid_from: body.gueltig_von,
            valid_to: body.gueltig_bis,
            notes: body.info,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "offer updated",
    }))
}
