//! Router tests against a two-stump forest.
//!
//! P(malicious): plain URL 0.2, IPv4 host 0.65, shortener 0.45.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use ndarray::Array2;
use serde_json::{json, Value};
use tower::ServiceExt;
use urlsentry_core::logic::features::FEATURE_LAYOUT;
use urlsentry_core::logic::model::ClassProbabilities;
use urlsentry_core::{
    Classifier, FeatureSchema, ForestClassifier, InferenceEngine, InferenceError, ModelInfo,
};

use crate::config::Config;
use crate::{create_router, AppState};

const BOUNDARY: &str = "X-URLSENTRY-BOUNDARY";

fn stump_forest_json() -> String {
    let names: Vec<&str> = FEATURE_LAYOUT.iter().map(|f| f.name()).collect();
    json!({
        "model_type": "random_forest",
        "schema_version": 1,
        "feature_names": names,
        "feature_importances": [
            0.05, 0.05, 0.02, 0.03, 0.1, 0.05, 0.02, 0.02, 0.06, 0.02,
            0.04, 0.04, 0.03, 0.07, 0.05, 0.03, 0.2, 0.12
        ],
        "trees": [
            {
                "children_left":  [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature":        [16, -2, -2],
                "threshold":      [0.5, -2.0, -2.0],
                "value":          [[10.0, 10.0], [9.0, 1.0], [0.0, 10.0]]
            },
            {
                "children_left":  [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature":        [17, -2, -2],
                "threshold":      [0.5, -2.0, -2.0],
                "value":          [[10.0, 10.0], [7.0, 3.0], [1.0, 4.0]]
            }
        ]
    })
    .to_string()
}

fn app_with(config: Config) -> Router {
    let forest = ForestClassifier::from_json(&stump_forest_json(), "<test>").unwrap();
    let state = AppState {
        engine: Arc::new(InferenceEngine::new(Arc::new(forest))),
        config: Arc::new(config),
    };
    create_router(state)
}

fn app() -> Router {
    app_with(Config::default())
}

/// Backend whose session always fails
struct FailingClassifier {
    info: ModelInfo,
    schema: FeatureSchema,
}

impl FailingClassifier {
    fn new() -> Self {
        let schema = FeatureSchema::canonical();
        Self {
            info: ModelInfo {
                backend: "failing".to_string(),
                model_path: "<test>".to_string(),
                estimators: None,
                layout: schema.info(),
                loaded_at: chrono::Utc::now(),
            },
            schema,
        }
    }
}

impl Classifier for FailingClassifier {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict_proba(&self, _features: &Array2<f32>) -> Result<Vec<ClassProbabilities>, InferenceError> {
        Err(InferenceError::Backend("session closed".to_string()))
    }
}

fn failing_app() -> Router {
    let state = AppState {
        engine: Arc::new(InferenceEngine::new(Arc::new(FailingClassifier::new()))),
        config: Arc::new(Config::default()),
    };
    create_router(state)
}

fn multipart_request(uri: &str, csv: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"note\"\r\n\r\n\
         ignored\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"urls.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        csv = csv
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

fn form_request(url: &str) -> Request<Body> {
    let body = format!("url={}", url.replace(':', "%3A").replace('/', "%2F"));
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn json_request(uri: &str, value: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

// ============================================================================
// PAGES
// ============================================================================

#[tokio::test]
async fn test_index_page() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Malicious URL Detection"));
    assert!(html.contains("action=\"/batch\""));
}

#[tokio::test]
async fn test_empty_url_shows_warning() {
    let response = app().oneshot(form_request("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Please enter a URL to analyze."));
    assert!(html.contains("banner warning"));
}

#[tokio::test]
async fn test_form_prediction_malicious() {
    let response = app().oneshot(form_request("http://192.168.1.1/a")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("This URL is <strong>Malicious</strong>."));
    assert!(html.contains("65.00%"));
    assert!(html.contains("<th>Importance</th>"));
}

#[tokio::test]
async fn test_form_prediction_benign() {
    let response = app().oneshot(form_request("http://example.com/page")).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("<strong>Benign</strong> and Safe."));
}

#[tokio::test]
async fn test_batch_page() {
    let csv = "id,url\n1,http://example.com/page\n2,http://192.168.1.1/a\n";
    let response = app().oneshot(multipart_request("/batch", csv)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<strong>urls.csv</strong> processed: 2 rows."));
    assert!(html.contains("data:text/csv;base64,"));
    assert!(html.contains("1 (50.0%)"));
}

#[tokio::test]
async fn test_batch_page_missing_column_banner() {
    let response = app()
        .oneshot(multipart_request("/batch", "link\nhttp://example.com\n"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = body_text(response).await;
    assert!(html.contains("banner error"));
    assert!(html.contains("CSV must contain a &#39;url&#39; column"));
    assert!(!html.contains("<h2>Results</h2>"));
}

#[tokio::test]
async fn test_batch_page_shows_inference_failure() {
    let csv = "url\nhttp://example.com\n";
    let response = failing_app().oneshot(multipart_request("/batch", csv)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = body_text(response).await;
    assert!(html.contains("banner error"));
    assert!(html.contains("Error processing request: Inference failed: session closed"));
}

#[tokio::test]
async fn test_api_batch_hides_inference_failure() {
    let csv = "url\nhttp://example.com\n";
    let response = failing_app()
        .oneshot(multipart_request("/api/v1/batch", csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Internal server error");
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_health() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["backend"], "random_forest");
}

#[tokio::test]
async fn test_model_info() {
    let response = app().oneshot(get("/api/v1/model")).await.unwrap();
    let body = body_json(response).await;

    assert_eq!(body["info"]["layout"]["feature_count"], 18);
    assert_eq!(body["info"]["estimators"], 2);
    assert_eq!(body["feature_importances"][0]["name"], "use_of_ip");
    assert_eq!(body["feature_importances"][1]["name"], "short_url");
}

#[tokio::test]
async fn test_api_predict() {
    let response = app()
        .oneshot(json_request("/api/v1/predict", json!({ "url": "http://192.168.1.1/a" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["label"], "Malicious");
    assert_eq!(body["features"]["use_of_ip"], 1.0);
    assert_eq!(body["features"]["hostname_length"], 11.0);
    assert_eq!(body["layout_version"], 1);
    assert!((body["confidence"].as_f64().unwrap() - 0.65).abs() < 1e-6);
}

#[tokio::test]
async fn test_api_predict_hides_confidence() {
    let config = Config {
        show_confidence: false,
        ..Config::default()
    };
    let response = app_with(config)
        .oneshot(json_request("/api/v1/predict", json!({ "url": "http://bit.ly/xyz" })))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["label"], "Benign");
    assert!(body.get("confidence").is_none());
}

#[tokio::test]
async fn test_api_predict_rejects_empty_url() {
    let response = app()
        .oneshot(json_request("/api/v1/predict", json!({ "url": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_api_batch_keeps_order() {
    let csv = "id,url\n1,http://bit.ly/xyz\n2,http://10.0.0.1/\n3,http://example.com\n";
    let response = app()
        .oneshot(multipart_request("/api/v1/batch", csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["filename"], "urls.csv");
    assert_eq!(body["distribution"]["malicious"], 1);

    let labels: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Benign", "Malicious", "Benign"]);
    assert_eq!(body["results"][1]["url"], "http://10.0.0.1/");
}

#[tokio::test]
async fn test_api_batch_missing_column() {
    let response = app()
        .oneshot(multipart_request("/api/v1/batch", "URL\nhttp://example.com\n"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("'url' column"));
}

#[tokio::test]
async fn test_api_export() {
    let csv = "id,url\n1,http://10.0.0.1/\n";
    let response = app()
        .oneshot(multipart_request("/api/v1/batch/export", csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .starts_with("attachment; filename=\"predictions-"));

    let text = body_text(response).await;
    assert_eq!(text, "id,url,Prediction,Confidence\n1,http://10.0.0.1/,Malicious,0.6500\n");
}

#[tokio::test]
async fn test_upload_over_limit_rejected() {
    let config = Config {
        max_upload_bytes: 64,
        ..Config::default()
    };
    let csv = format!("url\n{}\n", "http://example.com/\n".repeat(20));
    let response = app_with(config)
        .oneshot(multipart_request("/api/v1/batch", &csv))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
