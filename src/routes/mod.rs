//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the JSON API and, as a fallback, the static
//! front-end from `STATIC_DIR` (default `./public`). With the filesystem
//! blob backend and a local public base URL, the blob directory is also
//! mounted so stored files can be downloaded from the URLs the listings
//! hand out.

pub mod ai;
pub mod audit;
pub mod documents;
pub mod files;
pub mod layouts;
pub mod widgets;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use percent_encoding::percent_decode_str;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::files::UploadKind;
use crate::state::AppState;

/// API routes plus health check.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/notes", get(documents::get_notes).post(documents::save_notes))
        .route("/api/page-notes", get(documents::get_page_notes).post(documents::save_page_notes))
        .route("/api/status", get(documents::get_status).post(documents::save_status))
        .route(
            "/api/files",
            get(files::list_files)
                .post(files::upload_file)
                .layer(DefaultBodyLimit::max(UploadKind::File.max_bytes())),
        )
        .route(
            "/api/upload",
            post(files::upload_file).layer(DefaultBodyLimit::max(UploadKind::File.max_bytes())),
        )
        .route("/api/files/{name}", delete(files::delete_file))
        .route(
            "/api/attachments",
            get(files::list_attachments)
                .post(files::upload_attachment)
                .layer(DefaultBodyLimit::max(UploadKind::Attachment.max_bytes())),
        )
        .route("/api/attachments/{name}", delete(files::delete_attachment))
        .route("/api/ai/generate", post(ai::generate))
        .route("/api/ai/file-content/{name}", get(files::file_content))
        .route("/api/layouts", get(layouts::list_layouts))
        .route("/api/layouts/resolve", post(layouts::resolve_layout))
        .route("/api/layouts/render", get(layouts::render_component))
        .route("/api/layouts/chart", get(layouts::chart_geometry))
        .route("/api/audit", get(audit::get_audit))
        .route("/api/audit/run", post(audit::run_audit))
        .route("/api/widgets/waterfall", post(widgets::waterfall))
        .route("/api/widgets/variance", post(widgets::variance))
        .route("/api/widgets/sparkline", post(widgets::sparkline))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Full site: API routes, blob downloads and the static front-end.
///
/// File serving never answers for a path with a dot-prefixed segment, so
/// `.env`, `.git/` and in-flight `.tmp-*` blob writes stay private.
pub fn site(state: AppState, config: &Config) -> Router {
    let mut files = Router::new();
    if let Some(mount) = config.blob_mount_path() {
        files = files.nest_service(mount, ServeDir::new(&config.blob_dir));
    }
    let files = files
        .fallback_service(ServeDir::new(&config.static_dir).append_index_html_on_directories(true))
        .layer(middleware::from_fn(hide_dot_segments));
    app(state).merge(files)
}

async fn hide_dot_segments(request: Request, next: Next) -> Response {
    if has_dot_segment(request.uri().path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(request).await
}

/// Any segment, percent-decoded, that starts with `.`.
fn has_dot_segment(path: &str) -> bool {
    path.split('/')
        .any(|segment| percent_decode_str(segment).decode_utf8_lossy().starts_with('.'))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
