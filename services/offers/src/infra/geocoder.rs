use reqwest::{Client, Url, header::USER_AGENT};
use serde::Deserialize;

use crate::domain::repository::Geocoder;
use crate::domain::types::Coordinates;
use crate::error::GeocodingError;

/// Client for a Nominatim-compatible `/search` endpoint.
///
/// One request per lookup; no caching and no retry. Only the first
/// candidate is used.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: Client,
    search_url: Url,
    user_agent: String,
    country: String,
}

/// One search candidate. Nominatim encodes coordinates as strings.
#[derive(Deserialize)]
struct Candidate {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(
        base_url: &str,
        user_agent: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, GeocodingError> {
        let search_url = Url::parse(&format!("{}/search", base_url.trim_end_matches('/')))
            .map_err(|e| GeocodingError::Transport(format!("invalid geocoder URL: {e}")))?;
        Ok(Self {
            client: Client::new(),
            search_url,
            user_agent: user_agent.into(),
            country: country.into(),
        })
    }

    fn query(&self, postal_code: &str, city: &str) -> String {
        format!("{postal_code} {city}, {}", self.country)
    }
}

impl Geocoder for NominatimGeocoder {
    async fn locate(
        &self,
        postal_code: &str,
        city: &str,
    ) -> Result<Option<Coordinates>, GeocodingError> {
        let query = self.query(postal_code, city);
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        tracing::debug!(%query, "geocoding");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| GeocodingError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Status(status.as_u16()));
        }

        let candidates: Vec<Candidate> = response
            .json()
            .await
            .map_err(|e| GeocodingError::InvalidResponse(e.to_string()))?;

        candidates.first().map(parse_candidate).transpose()
    }
}

fn parse_candidate(candidate: &Candidate) -> Result<Coordinates, GeocodingError> {
    let latitude = parse_degrees("lat", &candidate.lat, 90.0)?;
    let longitude = parse_degrees("lon", &candidate.lon, 180.0)?;
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

/// Finite decimal degrees within `[-limit, limit]`.
fn parse_degrees(field: &str, raw: &str, limit: f64) -> Result<f64, GeocodingError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| GeocodingError::InvalidResponse(format!("invalid {field}: {e}")))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(GeocodingError::InvalidResponse(format!(
            "{field} out of range: {raw}"
        )));
    }
    Ok(value)
}
