#![cfg(feature = "web")]
//! Web form integration tests.
//!
//! Tests cover:
//! - Form page renders candidate months with config preselection
//! - Summarize returns the results table, chart, and export form
//! - HTMX fragment vs full page responses
//! - CSV download with BOM and attachment filename
//! - Malformed input and unknown routes produce error pages

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use cashprod::adapters::web::{AppState, build_router};
use cashprod::ports::config_port::ConfigPort;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

struct MockConfigPort;

impl ConfigPort for MockConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match (section, key) {
            ("analysis", "months") => Some("2024-01,2024-03".to_string()),
            _ => None,
        }
    }

    fn get_double(&self, _section: &str, _key: &str, default: f64) -> f64 {
        default
    }
}

fn create_test_app() -> Router {
    build_router(AppState {
        config: Arc::new(MockConfigPort),
    })
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_post(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

const SAMPLE_FORM: &str = "month=2024-01&rows_2024-01=A%2C100%2C10%0AB%2C50%2C5\
    &cash_start_2024-01=200&cash_end_2024-01=180";

#[tokio::test]
async fn form_page_lists_candidate_months() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("加重平均キャッシュ生産性"));
    assert!(html.contains("2024-05"));
    assert!(html.contains("value=\"2024-01\" checked"));
    assert!(html.contains("value=\"2024-02\">"));
}

#[tokio::test]
async fn summarize_returns_results_page() {
    let app = create_test_app();

    let response = app.oneshot(form_post("/summarize", SAMPLE_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("結果表"));
    assert!(html.contains("10.00"));
    assert!(html.contains("-20.0"));
    assert!(html.contains("<svg"));
    assert!(html.contains("/export.csv"));
}

#[tokio::test]
async fn summarize_returns_fragment_for_htmx() {
    let app = create_test_app();

    let mut request = form_post("/summarize", SAMPLE_FORM);
    request
        .headers_mut()
        .insert("HX-Request", "true".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(!html.contains("<!DOCTYPE html>"));
    assert!(html.starts_with("<div id=\"results\">"));
}

#[tokio::test]
async fn summarize_without_months_is_bad_request() {
    let app = create_test_app();

    let response = app.oneshot(form_post("/summarize", "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_string(response).await;
    assert!(html.contains("no months selected"));
}

#[tokio::test]
async fn malformed_cash_is_bad_request() {
    let app = create_test_app();

    let response = app
        .oneshot(form_post(
            "/summarize",
            "month=2024-01&cash_start_2024-01=abc",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn export_csv_is_a_bom_attachment() {
    let app = create_test_app();

    let response = app.oneshot(form_post("/export.csv", SAMPLE_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("cash_summary.csv"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert!(text.contains("加重平均TP/LT"));
    assert!(text.contains("2024-01,10,-20"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
