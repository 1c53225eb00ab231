#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flocklink_api::types::{FarmWrite, WorkerWrite};
use flocklink_api::{ApiClient, Error, TokenScheme, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "test-token".to_string().into();
    let client = ApiClient::from_token(
        &server.uri(),
        &token,
        TokenScheme::Token,
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn farm_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "location": "Barn Road 1",
        "integration_type": "none",
        "house_count": 4,
        "worker_count": 7
    })
}

// ── Auth header ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_token_header_attached() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/farms/"))
        .and(header("authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let farms = client.list_farms(None).await.unwrap();
    assert!(farms.is_empty());
}

#[tokio::test]
async fn test_bearer_scheme() {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "jwt-token".to_string().into();
    let client = ApiClient::from_token(
        &server.uri(),
        &token,
        TokenScheme::Bearer,
        &TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/users/me/"))
        .and(header("authorization", "Bearer jwt-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "username": "ops", "email": "ops@example.farm"})),
        )
        .mount(&server)
        .await;

    let profile = client.whoami().await.unwrap();
    assert_eq!(profile.username, "ops");
}

// ── List normalization ──────────────────────────────────────────────

#[tokio::test]
async fn test_list_flat_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/farms/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([farm_json(1, "Hilltop Poultry")])),
        )
        .mount(&server)
        .await;

    let farms = client.list_farms(None).await.unwrap();
    assert_eq!(farms.len(), 1);
    assert_eq!(farms[0].name, "Hilltop Poultry");
    assert_eq!(farms[0].house_count, Some(4));
}

#[tokio::test]
async fn test_list_paginated_results() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/farms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [farm_json(1, "Farm A")]
        })))
        .mount(&server)
        .await;

    let farms = client.list_farms(None).await.unwrap();
    assert_eq!(farms.len(), 1);
    assert_eq!(farms[0].id, 1);
    assert_eq!(farms[0].name, "Farm A");
}

#[tokio::test]
async fn test_list_follows_next_links() {
    let (server, client) = setup().await;

    let page2_url = format!("{}/api/farms/page2/", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/farms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": page2_url,
            "results": [farm_json(1, "Farm A")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/farms/page2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "results": [farm_json(2, "Farm B")]
        })))
        .mount(&server)
        .await;

    let farms = client.list_farms(None).await.unwrap();
    assert_eq!(farms.len(), 2);
    assert_eq!(farms[1].name, "Farm B");
}

#[tokio::test]
async fn test_list_workers_scoped_to_farm() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/workers/"))
        .and(query_param("farm", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 10,
            "farm": 3,
            "name": "Dana",
            "role": "feeder",
            "is_active": true,
            "receive_daily_tasks": true
        }])))
        .mount(&server)
        .await;

    let workers = client.list_workers(Some(3)).await.unwrap();
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0].name, "Dana");
    assert!(workers[0].receive_daily_tasks);
}

#[tokio::test]
async fn test_list_rotem_predictions_passes_limit() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rotem/predictions/"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "farm_id": 1,
            "controller": "gw-hilltop",
            "metric": "temperature",
            "predicted_value": 25.2,
            "predicted_for": "2026-08-30T12:00:00Z",
            "confidence": 0.9
        }])))
        .mount(&server)
        .await;

    let preds = client.list_rotem_predictions(Some(10)).await.unwrap();
    assert_eq!(preds.len(), 1);
    assert_eq!(preds[0].metric, "temperature");
    assert_eq!(preds[0].confidence, Some(0.9));
}

// ── CRUD ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_farm() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/farms/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(farm_json(2, "New Farm")))
        .mount(&server)
        .await;

    let body = FarmWrite {
        name: "New Farm".into(),
        ..FarmWrite::default()
    };
    let farm = client.create_farm(&body).await.unwrap();
    assert_eq!(farm.id, 2);
    assert_eq!(farm.name, "New Farm");
}

#[tokio::test]
async fn test_update_farm() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/farms/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(farm_json(1, "Renamed")))
        .mount(&server)
        .await;

    let body = FarmWrite {
        name: "Renamed".into(),
        ..FarmWrite::default()
    };
    let farm = client.update_farm(1, &body).await.unwrap();
    assert_eq!(farm.name, "Renamed");
}

#[tokio::test]
async fn test_delete_farm() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/farms/1/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_farm(1).await.unwrap();
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_401_maps_to_invalid_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Invalid token."
        })))
        .mount(&server)
        .await;

    let result = client.list_farms(None).await;
    assert!(matches!(result, Err(Error::InvalidToken)));
    assert!(result.unwrap_err().is_auth_expired());
}

#[tokio::test]
async fn test_404_maps_to_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/farms/99/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let result = client.get_farm(99).await;
    match result {
        Err(Error::NotFound { ref resource }) => assert_eq!(resource, "farms/99"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_400_with_field_errors_maps_to_validation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/workers/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "email": ["Enter a valid email address."],
            "phone": ["Phone number must contain at least 7 digits."]
        })))
        .mount(&server)
        .await;

    let body = WorkerWrite {
        farm: 1,
        name: "X".into(),
        email: Some("nope".into()),
        ..WorkerWrite::default()
    };
    let result = client.create_worker(&body).await;

    match result {
        Err(Error::Validation { ref errors }) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().any(|e| e.field == "email"));
        }
        other => panic!("expected Validation error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_409_maps_to_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/farms/1/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "Farm was modified by another session."
        })))
        .mount(&server)
        .await;

    let body = FarmWrite {
        name: "Stale".into(),
        ..FarmWrite::default()
    };
    let result = client.update_farm(1, &body).await;

    match result {
        Err(Error::Conflict { ref message }) => {
            assert!(message.contains("another session"));
        }
        other => panic!("expected Conflict error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_500_maps_to_server_error_with_default_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rotem/summary/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.get_rotem_summary().await;
    match result {
        Err(Error::Server { status, ref message, .. }) => {
            assert_eq!(status, 500);
            assert!(!message.is_empty());
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_maps_to_deserialization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rotem/summary/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.get_rotem_summary().await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}
