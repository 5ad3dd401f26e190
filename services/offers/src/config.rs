/// Offers service configuration loaded from environment variables.
#[derive(Debug)]
pub struct OffersConfig {
    /// Database connection URL (PostgreSQL or SQLite).
    pub database_url: String,
    /// TCP port for the HTTP server (default 5000). Env var: `OFFERS_PORT`.
    pub offers_port: u16,
    /// Base URL of the Nominatim-compatible geocoder. Env var: `GEOCODER_URL`.
    pub geocoder_url: String,
    /// `User-Agent` sent with every geocoder request. Env var: `GEOCODER_USER_AGENT`.
    pub geocoder_user_agent: String,
    /// Country appended to every geocoder query. Env var: `GEOCODER_COUNTRY`.
    pub geocoder_country: String,
    /// Browser origin allowed to call the API cross-origin. Env var: `CORS_ALLOW_ORIGIN`.
    pub cors_allow_origin: Option<String>,
}

impl OffersConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            offers_port: std::env::var("OFFERS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            geocoder_url: std::env::var("GEOCODER_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_owned()),
            geocoder_user_agent: std::env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| "mitfahrboerse".to_owned()),
            geocoder_country: std::env::var("GEOCODER_COUNTRY")
                .unwrap_or_else(|_| "Germany".to_owned()),
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }
}
