use serde_json::json;

use crate::routes::app;
use crate::routes::test_support::{json_request, send};
use crate::state::test_helpers::test_app_state;
use axum::http::StatusCode;

#[tokio::test]
async fn waterfall_stacks_changes_on_running_total() {
    let req = json_request(
        "POST",
        "/api/widgets/waterfall",
        &json!({
            "height": 100,
            "steps": [
                { "label": "Q2", "kind": "total", "value": 200 },
                { "label": "New deals", "kind": "change", "value": 100 },
                { "label": "Churn", "sublabel": "net", "kind": "change", "value": -50 },
                { "label": "Q3", "kind": "total", "value": 250 }
            ]
        }),
    );
    let (status, body) = send(app(test_app_state()), req).await;
    assert_eq!(status, StatusCode::OK);
    let bars = body.as_array().unwrap();
    assert_eq!(bars.len(), 4);
    assert_eq!(bars[0]["class"], "total");
    assert_eq!(bars[0]["height_px"], 100.0);
    assert_eq!(bars[1]["class"], "increase");
    assert_eq!(bars[1]["bottom_px"], 100.0);
    assert_eq!(bars[1]["height_px"], 50.0);
    assert_eq!(bars[2]["class"], "decrease");
    assert_eq!(bars[2]["bottom_px"], 125.0);
    assert_eq!(bars[2]["height_px"], 25.0);
    assert_eq!(bars[2]["sublabel"], "net");
    assert_eq!(bars[2]["value_text"], "$50");
}

#[tokio::test]
async fn waterfall_empty_steps_draw_nothing() {
    let req = json_request("POST", "/api/widgets/waterfall", &json!({ "steps": [] }));
    let (status, body) = send(app(test_app_state()), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn variance_rows_with_sections() {
    let req = json_request(
        "POST",
        "/api/widgets/variance",
        &json!({
            "items": [
                { "section": "Revenue" },
                { "label": "Services", "current": 150, "prior": 100, "favorable": "up" },
                { "label": "Travel", "current": 150, "prior": 100 }
            ]
        }),
    );
    let (status, body) = send(app(test_app_state()), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0], json!({ "kind": "section", "title": "Revenue" }));
    assert_eq!(body[1]["kind"], "row");
    assert_eq!(body[1]["display"], "+50.0%");
    assert_eq!(body[1]["bar_width_pct"], 50.0);
    assert_eq!(body[1]["favorable"], true);
    assert_eq!(body[2]["favorable"], false);
}

#[tokio::test]
async fn variance_rejects_non_positive_limit() {
    let req = json_request("POST", "/api/widgets/variance", &json!({ "items": [], "max_percent": 0 }));
    let (status, body) = send(app(test_app_state()), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_WIDGET_INVALID");
}

#[tokio::test]
async fn sparkline_points_and_area() {
    let req = json_request("POST", "/api/widgets/sparkline", &json!({ "data": [1, 3, 2] }));
    let (status, body) = send(app(test_app_state()), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points"], "0,32 50,0 100,16");
    assert_eq!(body["area"], "M0,32 L0,32 L50,0 L100,16 L100,32 L0,32 Z");
    assert_eq!(body["end"], json!({ "x": 100.0, "y": 16.0 }));
}

#[tokio::test]
async fn sparkline_needs_two_values() {
    let req = json_request("POST", "/api/widgets/sparkline", &json!({ "data": [4] }));
    let (status, body) = send(app(test_app_state()), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Sparkline needs at least two values");
}
