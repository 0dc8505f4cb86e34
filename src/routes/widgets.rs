//! Finance widget geometry: waterfall bars, variance rows and sparklines.

use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use slide_layout::chart::Point;
use slide_layout::widgets::{
    self, VARIANCE_MAX_PERCENT, VarianceInput, VarianceLine, WATERFALL_HEIGHT_PX, WaterfallBar, WaterfallStep,
};

use crate::error::ApiError;

const SPARKLINE_WIDTH_PX: f64 = 100.0;
const SPARKLINE_HEIGHT_PX: f64 = 32.0;

#[derive(Deserialize)]
pub struct WaterfallBody {
    pub steps: Vec<WaterfallStep>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
}

/// `POST /api/widgets/waterfall`: bar offsets and heights in pixels.
pub async fn waterfall(Json(body): Json<WaterfallBody>) -> Json<Vec<WaterfallBar>> {
    let height = body.height.unwrap_or(WATERFALL_HEIGHT_PX);
    Json(widgets::waterfall(&body.steps, height, body.max_value))
}

#[derive(Deserialize)]
pub struct VarianceBody {
    pub items: Vec<VarianceInput>,
    #[serde(default)]
    pub max_percent: Option<f64>,
}

/// `POST /api/widgets/variance`: section headers and clamped variance bars.
pub async fn variance(Json(body): Json<VarianceBody>) -> Result<Json<Vec<VarianceLine>>, ApiError> {
    let max_percent = body.max_percent.unwrap_or(VARIANCE_MAX_PERCENT);
    if max_percent.is_nan() || max_percent <= 0.0 {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "E_WIDGET_INVALID", "max_percent must be positive"));
    }
    Ok(Json(widgets::variance_rows(&body.items, max_percent)))
}

#[derive(Deserialize)]
pub struct SparklineBody {
    pub data: Vec<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub inset: f64,
}

#[derive(Serialize)]
pub struct SparklineView {
    pub width: f64,
    pub height: f64,
    pub points: String,
    pub area: String,
    pub end: Option<Point>,
}

/// `POST /api/widgets/sparkline`: SVG polyline points and area path.
pub async fn sparkline(Json(body): Json<SparklineBody>) -> Result<Json<SparklineView>, ApiError> {
    let width = body.width.unwrap_or(SPARKLINE_WIDTH_PX);
    let height = body.height.unwrap_or(SPARKLINE_HEIGHT_PX);
    let line = widgets::sparkline(&body.data, width, height, body.inset).ok_or_else(|| {
        ApiError::new(StatusCode::BAD_REQUEST, "E_WIDGET_INVALID", "Sparkline needs at least two values")
    })?;
    Ok(Json(SparklineView {
        width: line.width,
        height: line.height,
        points: line.svg_points(),
        area: line.area_path(),
        end: line.end(),
    }))
}

#[cfg(test)]
#[path = "widgets_test.rs"]
mod tests;
