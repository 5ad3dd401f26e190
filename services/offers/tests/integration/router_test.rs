use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use crate::helpers::{TestApp, test_app};

async fn server() -> (TestServer, TestApp) {
    let app = test_app().await;
    let server = TestServer::new(app.router.clone()).unwrap();
    (server, app)
}

fn max_mustermann() -> Value {
    json!({
        "plz": "10115",
        "ort": "Berlin",
        "name": "Max Mustermann",
        "email": "max@example.com",
    })
}

async fn create(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/offer").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_healthy_and_ready() {
    let (server, _app) = server().await;

    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_attach_request_id() {
    let (server, _app) = server().await;

    let response = server.get("/api/offers").await;
    let request_id = response.header("x-request-id");
    assert!(!request_id.is_empty());
}

// ── Create and search ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_offer_and_find_it_by_location() {
    let (server, _app) = server().await;

    let created = create(&server, max_mustermann()).await;
    assert_eq!(created["message"], "offer created");
    let edit_code = created["edit_code"].as_str().unwrap();
    assert_eq!(edit_code.len(), 6);
    assert!(edit_code.chars().all(|c| c.is_ascii_alphanumeric()));

    let response = server
        .get("/api/search")
        .add_query_param("plz", "10115")
        .add_query_param("ort", "Berlin")
        .await;
    response.assert_status_ok();
    let found = response.json::<Vec<Value>>();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], created["id"]);
    assert_eq!(found[0]["name"], "Max Mustermann");
    assert_eq!(found[0]["email"], "max@example.com");
    assert_eq!(found[0]["latitude"], 52.532);
    assert_eq!(found[0]["longitude"], 13.384);
    assert!(found[0].get("edit_code").is_none(), "edit code leaked");
}

#[tokio::test]
async fn should_list_offers_without_edit_codes() {
    let (server, _app) = server().await;

    create(&server, max_mustermann()).await;
    create(
        &server,
        json!({
            "plz": "04109",
            "ort": "Leipzig",
            "name": "Erika Musterfrau",
            "email": "erika@example.com",
            "info": "Nur vormittags",
        }),
    )
    .await;

    let response = server.get("/api/offers").await;
    response.assert_status_ok();
    let offers = response.json::<Vec<Value>>();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[1]["ort"], "Leipzig");
    assert_eq!(offers[1]["info"], "Nur vormittags");
    assert!(offers.iter().all(|o| o.get("edit_code").is_none()));
}

#[tokio::test]
async fn should_list_empty_store_as_empty_array() {
    let (server, _app) = server().await;

    let response = server.get("/api/offers").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn should_reject_invalid_submission() {
    let (server, app) = server().await;

    let mut body = max_mustermann();
    body["plz"] = json!("1011");
    let response = server.post("/api/offer").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_POSTAL_CODE");

    let mut body = max_mustermann();
    body.as_object_mut().unwrap().remove("name");
    let response = server.post("/api/offer").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "MISSING_FIELD");
    assert_eq!(json["message"], "name is required");

    assert!(
        app.nominatim.queries.lock().unwrap().is_empty(),
        "invalid submissions must not be geocoded"
    );
}

#[tokio::test]
async fn should_reject_mistyped_or_malformed_body() {
    let (server, _app) = server().await;

    let mut body = max_mustermann();
    body["plz"] = json!(10115);
    let response = server.post("/api/offer").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_BODY");

    let response = server
        .post("/api/offer")
        .bytes("{\"plz\": ".into())
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_BODY");

    let offers = server.get("/api/offers").await.json::<Vec<Value>>();
    assert!(offers.is_empty());
}

#[tokio::test]
async fn should_reject_edit_without_json_content_type() {
    let (server, _app) = server().await;

    let created = create(&server, max_mustermann()).await;
    let body = json!({ "edit_code": created["edit_code"], "info": "x" }).to_string();

    let response = server.put("/api/edit_offer").text(body).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "INVALID_BODY");
    assert!(json["message"].is_string());

    let offers = server.get("/api/offers").await.json::<Vec<Value>>();
    assert_eq!(offers[0]["info"], Value::Null);
}

#[tokio::test]
async fn should_fail_creation_for_unknown_location() {
    let (server, _app) = server().await;

    let mut body = max_mustermann();
    body["plz"] = json!("99999");
    body["ort"] = json!("Nirgendwo");
    let response = server.post("/api/offer").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["kind"], "LOCATION_NOT_FOUND");

    let offers = server.get("/api/offers").await.json::<Vec<Value>>();
    assert!(offers.is_empty());
}

#[tokio::test]
async fn should_require_search_params() {
    let (server, _app) = server().await;

    let response = server.get("/api/search").add_query_param("plz", "10115").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_SEARCH_PARAMS");
}

#[tokio::test]
async fn should_return_not_found_for_empty_search() {
    let (server, _app) = server().await;

    create(&server, max_mustermann()).await;

    let response = server
        .get("/api/search")
        .add_query_param("plz", "04109")
        .add_query_param("ort", "Leipzig")
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "NO_OFFERS_FOUND");
}

// ── Radius search ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_search_within_radius() {
    let (server, _app) = server().await;

    create(&server, max_mustermann()).await;
    let mut leipzig = max_mustermann();
    leipzig["plz"] = json!("04109");
    leipzig["ort"] = json!("Leipzig");
    create(&server, leipzig).await;

    let response = server
        .get("/api/search_radius")
        .add_query_param("plz", "10117")
        .add_query_param("ort", "Berlin")
        .add_query_param("radius", "10")
        .await;
    response.assert_status_ok();
    let found = response.json::<Vec<Value>>();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["ort"], "Berlin");

    let response = server
        .get("/api/search_radius")
        .add_query_param("plz", "10117")
        .add_query_param("ort", "Berlin")
        .add_query_param("radius", "250")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 2);
}

#[tokio::test]
async fn should_map_radius_errors_to_statuses() {
    let (server, _app) = server().await;

    create(&server, max_mustermann()).await;

    let cases = [
        ("80331", "München", "10", StatusCode::NOT_FOUND, "NO_OFFERS_IN_RADIUS"),
        ("10115", "Berlin", "zehn", StatusCode::BAD_REQUEST, "INVALID_RADIUS"),
        (
            "66666",
            "Fehlerstadt",
            "10",
            StatusCode::INTERNAL_SERVER_ERROR,
            "GEOCODING_FAILED",
        ),
        (
            "99999",
            "Nirgendwo",
            "10",
            StatusCode::INTERNAL_SERVER_ERROR,
            "LOCATION_NOT_FOUND",
        ),
    ];
    for (plz, ort, radius, status, kind) in cases {
        let response = server
            .get("/api/search_radius")
            .add_query_param("plz", plz)
            .add_query_param("ort", ort)
            .add_query_param("radius", radius)
            .await;
        assert_eq!(response.status_code(), status, "{plz} {ort} r={radius}");
        assert_eq!(response.json::<Value>()["kind"], kind, "{plz} {ort} r={radius}");
    }

    let response = server
        .get("/api/search_radius")
        .add_query_param("plz", "10115")
        .add_query_param("ort", "Berlin")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_SEARCH_PARAMS");
}

// ── Edit ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_edit_notes_with_put() {
    let (server, _app) = server().await;

    let created = create(&server, max_mustermann()).await;

    let response = server
        .put("/api/edit_offer")
        .json(&json!({
            "edit_code": created["edit_code"],
            "info": "Abfahrt 7:15 am Hauptbahnhof",
            "name": "",
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "offer updated");

    let offers = server.get("/api/offers").await.json::<Vec<Value>>();
    assert_eq!(offers[0]["info"], "Abfahrt 7:15 am Hauptbahnhof");
    assert_eq!(offers[0]["name"], "Max Mustermann");
    assert_eq!(offers[0]["latitude"], 52.532);
}

#[tokio::test]
async fn should_edit_location_with_post_and_regeocode() {
    let (server, app) = server().await;

    let created = create(&server, max_mustermann()).await;

    let response = server
        .post("/api/edit_offer")
        .json(&json!({
            "edit_code": created["edit_code"],
            "plz": "04109",
            "ort": "Leipzig",
        }))
        .await;
    response.assert_status_ok();

    let offers = server.get("/api/offers").await.json::<Vec<Value>>();
    assert_eq!(offers[0]["plz"], "04109");
    assert_eq!(offers[0]["ort"], "Leipzig");
    assert_eq!(offers[0]["latitude"], 51.339);
    assert_eq!(offers[0]["longitude"], 12.374);
    assert_eq!(
        app.nominatim.queries.lock().unwrap().last().map(String::as_str),
        Some("04109 Leipzig, Germany")
    );
}

#[tokio::test]
async fn should_reject_edit_with_unknown_or_missing_code() {
    let (server, _app) = server().await;

    create(&server, max_mustermann()).await;

    let response = server
        .put("/api/edit_offer")
        .json(&json!({ "edit_code": "ZZZZZZ", "info": "x" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "OFFER_NOT_FOUND");

    let response = server
        .put("/api/edit_offer")
        .json(&json!({ "info": "x" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_EDIT_CODE");

    let offers = server.get("/api/offers").await.json::<Vec<Value>>();
    assert_eq!(offers[0]["info"], Value::Null);
}

#[tokio::test]
async fn should_reject_edit_with_invalid_field() {
    let (server, _app) = server().await;

    let created = create(&server, max_mustermann()).await;

    let response = server
        .put("/api/edit_offer")
        .json(&json!({
            "edit_code": created["edit_code"],
            "handy": "ruf an",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_PHONE");
}
