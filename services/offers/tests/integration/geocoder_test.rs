use mitfahr_offers::domain::repository::Geocoder;
use mitfahr_offers::error::GeocodingError;

use crate::helpers::{BERLIN, MUNICH, spawn_fake_nominatim, test_geocoder};

#[tokio::test]
async fn should_resolve_known_location() {
    let nominatim = spawn_fake_nominatim().await;
    let geocoder = test_geocoder(&nominatim.base_url);

    let coordinates = geocoder.locate("10115", "Berlin").await.unwrap();
    assert_eq!(coordinates, Some(BERLIN));

    let queries = nominatim.queries.lock().unwrap();
    assert_eq!(*queries, vec!["10115 Berlin, Germany".to_owned()]);
}

#[tokio::test]
async fn should_encode_umlauts_in_query() {
    let nominatim = spawn_fake_nominatim().await;
    let geocoder = test_geocoder(&nominatim.base_url);

    let coordinates = geocoder.locate("80331", "München").await.unwrap();
    assert_eq!(coordinates, Some(MUNICH));
}

#[tokio::test]
async fn should_return_none_for_unknown_location() {
    let nominatim = spawn_fake_nominatim().await;
    let geocoder = test_geocoder(&nominatim.base_url);

    let coordinates = geocoder.locate("99999", "Nirgendwo").await.unwrap();
    assert_eq!(coordinates, None);
}

#[tokio::test]
async fn should_report_error_status() {
    let nominatim = spawn_fake_nominatim().await;
    let geocoder = test_geocoder(&nominatim.base_url);

    let result = geocoder.locate("66666", "Fehlerstadt").await;
    assert!(
        matches!(result, Err(GeocodingError::Status(500))),
        "expected Status(500), got {result:?}"
    );
}

#[tokio::test]
async fn should_report_unexpected_body() {
    let nominatim = spawn_fake_nominatim().await;
    let geocoder = test_geocoder(&nominatim.base_url);

    let result = geocoder.locate("55555", "Kaputt").await;
    assert!(
        matches!(result, Err(GeocodingError::InvalidResponse(_))),
        "expected InvalidResponse, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_unreachable_geocoder() {
    // Bind and release a port so nothing is listening on it.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let geocoder = test_geocoder(&format!("http://{addr}"));
    let result = geocoder.locate("10115", "Berlin").await;
    assert!(
        matches!(result, Err(GeocodingError::Transport(_))),
        "expected Transport, got {result:?}"
    );
}
