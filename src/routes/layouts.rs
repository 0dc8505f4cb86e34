//! Layout engine routes: catalogs, placement plans and component previews.
//!
//! The engine is pure, so these handlers never touch `AppState`; they turn
//! query and body parameters into engine calls and serialize the result.

use axum::Json;
use axum::extract::Query;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use slide_layout::aspect::{self, DEFAULT_ASPECT_ID, SlideFrame};
use slide_layout::chart::{SAMPLE_CHART_DATA, Size, layout_chart};
use slide_layout::consts::{DEFAULT_COL_SPLIT_PCT, DEFAULT_PADDING_PX};
use slide_layout::preset::{self, Layout};
use slide_layout::render::{RenderOutput, render_named};
use slide_layout::resize::clamp_split;
use slide_layout::{AspectRatio, ComponentKind, LayoutError, PlacementPlan};

use crate::error::ApiError;

pub(crate) fn layout_error_to_status(err: &LayoutError) -> StatusCode {
    if err.is_not_found() { StatusCode::NOT_FOUND } else { StatusCode::UNPROCESSABLE_ENTITY }
}

fn api_error(err: &LayoutError) -> ApiError {
    let code = if err.is_not_found() { "E_LAYOUT_NOT_FOUND" } else { "E_LAYOUT_INVALID" };
    ApiError::new(layout_error_to_status(err), code, err.to_string())
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Serialize)]
pub struct AspectView {
    #[serde(flatten)]
    pub ratio: AspectRatio,
    pub compact: bool,
    pub frame: SlideFrame,
}

impl From<&AspectRatio> for AspectView {
    fn from(ratio: &AspectRatio) -> Self {
        Self { ratio: *ratio, compact: ratio.compact(), frame: ratio.frame() }
    }
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub presets: Vec<Layout>,
    pub aspect_ratios: Vec<AspectView>,
    pub default_col_split: f64,
}

/// `GET /api/layouts`: preset and aspect-ratio catalogs.
pub async fn list_layouts() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        presets: preset::list_presets(),
        aspect_ratios: aspect::list_aspect_ratios().iter().map(AspectView::from).collect(),
        default_col_split: DEFAULT_COL_SPLIT_PCT,
    })
}

// =============================================================================
// RESOLVE
// =============================================================================

#[derive(Deserialize)]
pub struct RegionOverride {
    pub region: String,
    pub component: Option<ComponentKind>,
    pub padding: Option<u32>,
}

#[derive(Deserialize)]
pub struct ResolveBody {
    pub preset: String,
    #[serde(default)]
    pub aspect: Option<String>,
    #[serde(default)]
    pub col_split: Option<f64>,
    #[serde(default)]
    pub overrides: Vec<RegionOverride>,
}

/// `POST /api/layouts/resolve`: placement plan for a preset with optional
/// per-region overrides.
pub async fn resolve_layout(Json(body): Json<ResolveBody>) -> Result<Json<PlacementPlan>, ApiError> {
    let plan = plan_for(&body).map_err(|e| api_error(&e))?;
    Ok(Json(plan))
}

fn plan_for(body: &ResolveBody) -> Result<PlacementPlan, LayoutError> {
    let mut layout = preset::select_preset(&body.preset)?;
    for change in &body.overrides {
        if let Some(component) = change.component {
            layout = layout.with_region_component(&change.region, component)?;
        }
        if let Some(padding) = change.padding {
            layout = layout.with_region_padding(&change.region, padding)?;
        }
    }
    let ratio = aspect::resolve(body.aspect.as_deref().unwrap_or(DEFAULT_ASPECT_ID))?;
    let split = body
        .col_split
        .filter(|s| s.is_finite())
        .map_or(DEFAULT_COL_SPLIT_PCT, clamp_split);
    Ok(slide_layout::resolve::resolve(&layout, &ratio, split))
}

// =============================================================================
// PREVIEWS
// =============================================================================

#[derive(Deserialize)]
pub struct RenderQuery {
    pub component: String,
    pub aspect: Option<String>,
    pub padding: Option<u32>,
}

/// `GET /api/layouts/render`: content description for one component.
/// Unknown component names render as empty.
pub async fn render_component(Query(query): Query<RenderQuery>) -> Result<Json<RenderOutput>, ApiError> {
    let ratio = aspect::resolve(query.aspect.as_deref().unwrap_or(DEFAULT_ASPECT_ID)).map_err(|e| api_error(&e))?;
    let padding = query.padding.unwrap_or(DEFAULT_PADDING_PX);
    Ok(Json(render_named(&query.component, ratio.compact(), padding)))
}

#[derive(Deserialize)]
pub struct ChartQuery {
    pub width: f64,
    pub height: f64,
    pub aspect: Option<String>,
}

/// `GET /api/layouts/chart`: sample chart geometry for a container size.
/// A container too small to draw in yields `{"geometry": null}`.
pub async fn chart_geometry(Query(query): Query<ChartQuery>) -> Result<Json<Value>, ApiError> {
    let ratio = aspect::resolve(query.aspect.as_deref().unwrap_or(DEFAULT_ASPECT_ID)).map_err(|e| api_error(&e))?;
    let geometry = layout_chart(&SAMPLE_CHART_DATA, Size::new(query.width, query.height), ratio.compact());
    let backing = geometry.as_ref().map(|g| g.backing_size());
    Ok(Json(json!({ "geometry": geometry, "backing_size": backing })))
}

#[cfg(test)]
#[path = "layouts_test.rs"]
mod tests;
