//! Router-level tests for the Docgen API.
//!
//! Each test drives the full axum router with `tower::ServiceExt::oneshot`,
//! covering the HTML pages, the API banner, and the generate-pdf contract.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use docgen_api::{router, AppState};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn test_app() -> Router {
    let state = AppState::new().await.expect("in-memory state");
    router(Arc::new(state))
}

fn pdf_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate-pdf")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn api_root_returns_banner() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::builder().uri("/api/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let banner: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(banner["message"], "Docgen Services API");
}

#[tokio::test]
async fn html_pages_are_served() {
    for uri in ["/", "/functions"] {
        let app = test_app().await;
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "page {}", uri);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Docgen Services"));
    }
}

#[tokio::test]
async fn static_assets_are_served() {
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/css/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn generate_pdf_returns_attachment() {
    let app = test_app().await;
    let response = app
        .oneshot(pdf_request(
            r#"{"title":"Meeting Notes","content":"first line\n\nsecond line","type":"docs"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=Meeting_Notes.pdf"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.starts_with(b"%PDF-"));
    assert!(lopdf::Document::load_mem(&body).is_ok());
}

#[tokio::test]
async fn generate_pdf_agenda_end_to_end() {
    // The worked example: one completed agenda record, accented title.
    let app = test_app().await;
    let response = app
        .oneshot(pdf_request(
            r#"{"title":"Relatório","content":"[{\"title\":\"Reunião\",\"date\":\"2024-01-10\",\"time\":\"10:00\",\"completed\":true}]","type":"agenda"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
    assert_eq!(
        disposition.as_bytes(),
        "attachment; filename=Relatório.pdf".as_bytes()
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let doc = lopdf::Document::load_mem(&body).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn generate_pdf_tolerates_unparsable_agenda() {
    let app = test_app().await;
    let response = app
        .oneshot(pdf_request(
            r#"{"title":"Fallback","content":"definitely not json","type":"agenda"}"#,
        ))
        .await
        .unwrap();

    // Parse failure degrades to a plain paragraph, never an error response.
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn generate_pdf_accepts_unknown_type() {
    let app = test_app().await;
    let response = app
        .oneshot(pdf_request(
            r#"{"title":"Só Título","content":"ignored","type":"slides"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .as_bytes(),
        "attachment; filename=Só_Título.pdf".as_bytes()
    );
}

#[tokio::test]
async fn cors_listed_origin_allows_credentials() {
    let app = Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .layer(docgen_api::cors_layer_from(
            "http://example.com, http://other.test",
        ));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://example.com"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn cors_preflight_mirrors_requested_method_and_headers() {
    let app = Router::new()
        .route("/", axum::routing::post(|| async { "ok" }))
        .layer(docgen_api::cors_layer_from("http://example.com"));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .header(header::ORIGIN, "http://example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap(),
        "POST"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap(),
        "content-type"
    );
}

#[tokio::test]
async fn router_boots_with_explicit_cors_origins() {
    // The full router must come up (and answer) with an origin list set.
    std::env::set_var("CORS_ORIGINS", "http://example.com");
    let app = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    std::env::remove_var("CORS_ORIGINS");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://example.com"
    );
}

#[tokio::test]
async fn generate_pdf_rejects_malformed_body() {
    let app = test_app().await;
    let response = app
        .oneshot(pdf_request(r#"{"title":"No content or type"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
