use std::fs;

use super::*;
use crate::routes::app;
use crate::routes::test_support::{empty_request, send};
use crate::services::audit::REPORT_FILE;
use crate::state::test_helpers::test_app_state;

fn front_end() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("css/elements")).unwrap();
    fs::write(dir.path().join("css/elements/badge.css"), ".badge { color: #ff0066; }").unwrap();
    dir
}

#[tokio::test]
async fn get_audit_scans_static_root() {
    let dir = front_end();
    let state = test_app_state().with_static_dir(dir.path().to_path_buf());
    let (status, body) = send(app(state), empty_request("GET", "/api/audit")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"]["inventory"]["elements"], 1);
    assert_eq!(body["categories"]["hardcodedColors"]["issues"][0]["color"], "#ff0066");
    assert_eq!(body["summary"]["high"], 1);
    assert!(body["timestamp"].is_string());
    assert!(!dir.path().join(REPORT_FILE).exists());
}

#[tokio::test]
async fn run_audit_writes_report() {
    let dir = front_end();
    let state = test_app_state().with_static_dir(dir.path().to_path_buf());
    let (status, body) = send(app(state.clone()), empty_request("POST", "/api/audit/run")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["audit"]["summary"]["total"], 1);
    assert!(dir.path().join(REPORT_FILE).exists());

    let (_, body) = send(app(state), empty_request("GET", "/api/audit")).await;
    assert!(body["reportLastModified"].is_string());
}

#[tokio::test]
async fn run_audit_fails_when_report_cannot_be_written() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state().with_static_dir(dir.path().join("missing"));
    let (status, body) = send(app(state), empty_request("POST", "/api/audit/run")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "E_AUDIT_IO");
}
