use super::*;
use aerogrid_engine::{BreakpointCatalog, RngVariation, ServiceConfig};
use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;

fn test_app(rate_limit_per_minute: usize) -> Router {
    let service = PredictionService::new(
        ServiceConfig::default(),
        BreakpointCatalog::standard(),
        Box::new(RngVariation::seeded(7)),
    );
    build_app(
        AppState {
            service: Arc::new(service),
        },
        RateLimitState::per_minute(rate_limit_per_minute),
    )
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn scenario_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 38.9,
        "longitude": -77.0,
        "date": "2024-03-15",
        "zoomLevel": 14,
        "bounds": {"north": 39.0, "south": 38.8, "east": -76.9, "west": -77.1}
    })
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::validation("req-1", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_unknown_code_maps_to_internal_error() {
    let response = ApiError::new("req-1", "internal_error", "boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_cache_size() {
    let response = test_app(10)
        .oneshot(get("/api/v1/health"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["cached_responses"], 0);
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let request = Request::builder()
        .uri("/api/v1/health")
        .header("x-request-id", "trace-abc")
        .body(Body::empty())
        .expect("request");
    let response = test_app(10).oneshot(request).await.expect("response");

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("trace-abc")
    );
    let json = body_json(response).await;
    assert_eq!(json["meta"]["request_id"], "trace-abc");
}

#[tokio::test]
async fn viewport_prediction_returns_camel_case_payload() {
    let response = test_app(10)
        .oneshot(post_json("/api/v1/predictions", &scenario_body()))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    let predictions = data["predictions"].as_array().expect("predictions array");
    assert_eq!(predictions.len(), 9);
    assert_eq!(data["centerPoint"]["date"], "2024-03-15");
    assert!((data["centerPoint"]["latitude"].as_f64().unwrap() - 38.9).abs() < 1e-9);

    let values: Vec<f64> = predictions
        .iter()
        .map(|p| p["prediction"].as_f64().expect("prediction value"))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    assert!((data["averagePrediction"].as_f64().unwrap() - mean).abs() < 1e-9);
    for (point, value) in predictions.iter().zip(&values) {
        assert!((5.0..=30.0).contains(value));
        assert!(point["color"].as_str().unwrap().starts_with('#'));
        assert!(point["quality"].is_string());
    }
    assert!(data["minPrediction"].as_f64() <= data["maxPrediction"].as_f64());
}

#[tokio::test]
async fn degenerate_bounds_are_rejected() {
    let mut body = scenario_body();
    body["bounds"]["north"] = serde_json::json!(38.7);
    let response = test_app(10)
        .oneshot(post_json("/api/v1/predictions", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
    let message = json["error"]["message"].as_str().expect("message");
    assert!(message.contains("north"), "got {message}");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn out_of_range_bounds_are_rejected() {
    let mut body = scenario_body();
    body["bounds"]["east"] = serde_json::json!(181.0);
    let response = test_app(10)
        .oneshot(post_json("/api/v1/predictions", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn malformed_prediction_body_uses_error_envelope() {
    let mut body = scenario_body();
    body.as_object_mut().expect("object").remove("bounds");
    let response = test_app(10)
        .oneshot(post_json("/api/v1/predictions", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn out_of_range_center_is_rejected() {
    let mut body = scenario_body();
    body["latitude"] = serde_json::json!(123.0);
    let response = test_app(10)
        .oneshot(post_json("/api/v1/predictions", &body))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearest_prediction_samples_circle() {
    let response = test_app(10)
        .oneshot(get(
            "/api/v1/predictions/nearest?latitude=38.9&longitude=-77.0&date=2024-03-15&zoomLevel=12",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["predictions"].as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn classify_returns_color_and_label() {
    let response = test_app(10)
        .oneshot(get("/api/v1/classify?scale=aqi&value=120"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["scale"], "aqi");
    assert_eq!(json["data"]["color"], "#ff7e00");
    assert_eq!(json["data"]["quality"], "unhealthy_for_sensitive_groups");
    assert_eq!(json["data"]["label"], "Unhealthy for Sensitive Groups");
}

#[tokio::test]
async fn classify_rejects_unknown_scale() {
    let response = test_app(10)
        .oneshot(get("/api/v1/classify?scale=radon&value=1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn legend_lists_six_rows() {
    let response = test_app(10)
        .oneshot(get("/api/v1/legend/so2_simplified"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"]["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[0]["color"], "#00e400");
    assert_eq!(entries[5]["quality"], "hazardous");
    assert_eq!(json["data"]["unit"], "ppb");
}

#[tokio::test]
async fn legend_for_unknown_scale_is_not_found() {
    let response = test_app(10)
        .oneshot(get("/api/v1/legend/radon"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn composite_aqi_reports_dominant_pollutant() {
    let body = serde_json::json!({"pm25": 40.0, "o3": 30.0});
    let response = test_app(10)
        .oneshot(post_json("/api/v1/aqi", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["dominant"], "pm25");
    assert_eq!(json["data"]["aqi"], 112);
    assert_eq!(json["data"]["color"], "#ff7e00");
    let alerts = json["data"]["alerts"].as_array().expect("alerts array");
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[1]["stakeholder"], "school_admin");
    assert_eq!(alerts[1]["level"], "warning");
}

#[tokio::test]
async fn composite_aqi_escalates_alerts_at_200() {
    // PM2.5 150.4 sits on the top edge of the Unhealthy band
    let body = serde_json::json!({"pm25": 150.4});
    let response = test_app(10)
        .oneshot(post_json("/api/v1/aqi", &body))
        .await
        .expect("response");

    let json = body_json(response).await;
    assert_eq!(json["data"]["aqi"], 200);
    let alerts = json["data"]["alerts"].as_array().expect("alerts array");
    assert_eq!(alerts.len(), 4);
    assert_eq!(alerts[3]["level"], "critical");
    assert_eq!(alerts[3]["stakeholder"], "emergency_response");
}

#[tokio::test]
async fn composite_aqi_requires_a_reading() {
    let response = test_app(10)
        .oneshot(post_json("/api/v1/aqi", &serde_json::json!({})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rate_limit_rejects_excess_requests_but_not_health() {
    let app = test_app(1);

    let first = app
        .clone()
        .oneshot(get("/api/v1/legend/aqi"))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(get("/api/v1/legend/aqi"))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(second).await;
    assert_eq!(json["error"]["code"], "rate_limited");

    let health = app
        .oneshot(get("/api/v1/health"))
        .await
        .expect("response");
    assert_eq!(health.status(), StatusCode::OK);
}
