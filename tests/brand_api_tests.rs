//! HTTP tests driving the full router through `oneshot`.

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{setup_test_db, test_app};

async fn app() -> Result<Router> {
    Ok(test_app(setup_test_db().await?))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, header::HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, _, created) = send(app, json_request("POST", "/api/brands", body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {created}");
    created
}

#[tokio::test]
async fn create_returns_201_with_location_and_camel_case_body() -> Result<()> {
    let app = app().await?;

    let (status, headers, body) = send(
        &app,
        json_request(
            "POST",
            "/api/brands",
            json!({
                "name": "Acme",
                "logoUrl": "https://cdn.acme.io/logo.png",
                "websiteLink": "http://a.io",
                "certificateUrls": "[\"https://acme.com/iso.pdf\"]",
                "mobileNumber": "+1 (555) 123-4567",
                "address": "1 Main St",
                "id": "00000000-0000-0000-0000-000000000000"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap();
    assert_ne!(id, "00000000-0000-0000-0000-000000000000");
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        &format!("/api/brands/{id}")
    );
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["websiteLink"], "http://a.io");
    assert_eq!(body["mobileNumber"], "+1 (555) 123-4567");
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());

    let (status, _, fetched) = send(&app, get(&format!("/api/brands/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
    Ok(())
}

#[tokio::test]
async fn create_with_violations_returns_400_problem() -> Result<()> {
    let app = app().await?;

    let (status, headers, body) = send(
        &app,
        json_request(
            "POST",
            "/api/brands",
            json!({ "websiteLink": "notaurl", "mobileNumber": "12345" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let violations = body["details"]["violations"].as_array().unwrap();
    let fields: Vec<_> = violations
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "websiteLink", "mobileNumber"]);
    assert_eq!(violations[0]["reason"], "Brand name is required");
    Ok(())
}

#[tokio::test]
async fn duplicate_create_returns_409() -> Result<()> {
    let app = app().await?;
    create(&app, json!({ "name": "Acme" })).await;

    let (status, _, body) = send(
        &app,
        json_request("POST", "/api/brands", json!({ "name": "Acme" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_NAME");

    let (_, _, all) = send(&app, get("/api/brands")).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn malformed_json_returns_400() -> Result<()> {
    let app = app().await?;

    let request = Request::builder()
        .method("POST")
        .uri("/api/brands")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    Ok(())
}

#[tokio::test]
async fn get_by_id_handles_unknown_and_malformed_ids() -> Result<()> {
    let app = app().await?;

    let (status, _, body) = send(&app, get(&format!("/api/brands/{}", Uuid::new_v4()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _, body) = send(&app, get("/api/brands/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    Ok(())
}

#[tokio::test]
async fn query_endpoints_filter_brands() -> Result<()> {
    let app = app().await?;
    create(
        &app,
        json!({ "name": "Acme", "websiteLink": "acme.com", "mobileNumber": "1234567890" }),
    )
    .await;
    create(
        &app,
        json!({ "name": "Globex", "mobileNumber": "1234567890" }),
    )
    .await;
    create(&app, json!({ "name": "Initech" })).await;

    let (status, _, all) = send(&app, get("/api/brands")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, _, found) = send(&app, get("/api/brands/search?name=AC")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Acme");

    let (status, _, found) = send(&app, get("/api/brands/with-website")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["websiteLink"], "acme.com");

    let (status, _, found) = send(&app, get("/api/brands/mobile/1234567890")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 2);

    let (status, _, found) = send(&app, get("/api/brands/name/Globex")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["name"], "Globex");

    let (status, _, _) = send(&app, get("/api/brands/name/globex")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn search_without_name_returns_400() -> Result<()> {
    let app = app().await?;

    let (status, _, body) = send(&app, get("/api/brands/search")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    Ok(())
}

#[tokio::test]
async fn put_replaces_all_mutable_fields() -> Result<()> {
    let app = app().await?;
    let created = create(
        &app,
        json!({ "name": "Acme", "websiteLink": "acme.com", "address": "1 Main St" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, _, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/brands/{id}"),
            json!({ "name": "Acme Holdings", "mobileNumber": "0987654321" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["name"], "Acme Holdings");
    assert_eq!(updated["mobileNumber"], "0987654321");
    assert!(updated["websiteLink"].is_null());
    assert!(updated["address"].is_null());
    Ok(())
}

#[tokio::test]
async fn put_failures_map_to_404_400_and_409() -> Result<()> {
    let app = app().await?;
    let acme = create(&app, json!({ "name": "Acme" })).await;
    create(&app, json!({ "name": "Globex" })).await;
    let id = acme["id"].as_str().unwrap();

    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/brands/{}", Uuid::new_v4()),
            json!({ "name": "Anything" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(
        &app,
        json_request("PUT", &format!("/api/brands/{id}"), json!({ "name": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["violations"][0]["field"], "name");

    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/brands/{id}"),
            json!({ "name": "Globex" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_NAME");

    // Keeping the current name is not a conflict.
    let (status, _, _) = send(
        &app,
        json_request("PUT", &format!("/api/brands/{id}"), json!({ "name": "Acme" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn delete_returns_204_then_404() -> Result<()> {
    let app = app().await?;
    let acme = create(&app, json!({ "name": "Acme" })).await;
    let uri = format!("/api/brands/{}", acme["id"].as_str().unwrap());

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri(&uri)
            .body(Body::empty())
            .unwrap()
    };

    let (status, _, body) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _, body) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn health_endpoints_and_docs_are_served() -> Result<()> {
    let app = app().await?;

    let (status, _, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "brands");

    let (status, _, body) = send(&app, get("/healthz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _, body) = send(&app, get("/readyz")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let (status, _, body) = send(&app, get("/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/brands/{id}"].is_object());
    assert!(body["paths"]["/api/brands/search"].is_object());
    Ok(())
}

#[tokio::test]
async fn readyz_reports_503_once_the_database_is_gone() -> Result<()> {
    let db = setup_test_db().await?;
    let app = test_app(db.clone());
    db.close().await?;

    let (status, headers, body) = send(&app, get("/readyz")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(headers.get(header::RETRY_AFTER).unwrap(), "5");
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    Ok(())
}

#[tokio::test]
async fn trace_id_is_echoed_into_errors() -> Result<()> {
    let app = app().await?;

    let request = Request::builder()
        .uri(format!("/api/brands/{}", Uuid::new_v4()))
        .header("x-trace-id", "trace-abc")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers.get("x-trace-id").unwrap(), "trace-abc");
    assert_eq!(body["trace_id"], "trace-abc");
    Ok(())
}
