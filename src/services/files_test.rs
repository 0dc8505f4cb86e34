use time::macros::datetime;

use super::*;
use crate::state::test_helpers::test_app_state;

// =============================================================================
// helpers
// =============================================================================

#[test]
fn file_size_formatting() {
    assert_eq!(format_file_size(0), "0 B");
    assert_eq!(format_file_size(1023), "1023 B");
    assert_eq!(format_file_size(1024), "1.0 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(5 * 1024 * 1024 + 200 * 1024), "5.2 MB");
}

#[test]
fn date_formatting() {
    assert_eq!(format_date(datetime!(2025-03-07 14:00 UTC)), "Mar 7, 2025");
    assert_eq!(format_date(datetime!(2024-12-25 0:00 UTC)), "Dec 25, 2024");
}

#[test]
fn extension_is_lowercased() {
    assert_eq!(extension("Q3 Deck.PPTX").as_deref(), Some("pptx"));
    assert_eq!(extension("archive.tar.gz").as_deref(), Some("gz"));
    assert_eq!(extension("README"), None);
    assert_eq!(extension(".env"), None);
    assert_eq!(extension("trailing."), None);
}

#[test]
fn category_by_extension() {
    assert_eq!(FileCategory::for_extension("key"), FileCategory::Presentations);
    assert_eq!(FileCategory::for_extension("csv"), FileCategory::Spreadsheets);
    assert_eq!(FileCategory::for_extension("pdf"), FileCategory::Documents);
    assert_eq!(FileCategory::for_extension("docx"), FileCategory::Other);
}

#[test]
fn filename_prefers_query_then_header() {
    let now = datetime!(2025-01-01 0:00 UTC);
    assert_eq!(resolve_filename(Some("a.pdf"), Some("b.pdf"), now), "a.pdf");
    assert_eq!(resolve_filename(Some(""), Some("b.pdf"), now), "b.pdf");
    assert_eq!(resolve_filename(None, None, now), format!("file-{}", now.unix_timestamp() * 1000));
}

#[test]
fn filename_is_percent_decoded() {
    let now = OffsetDateTime::UNIX_EPOCH;
    assert_eq!(resolve_filename(None, Some("Q3%20Revenue.xlsx"), now), "Q3 Revenue.xlsx");
    assert_eq!(resolve_filename(None, Some("bad%FF.csv"), now), "bad%FF.csv");
}

// =============================================================================
// upload
// =============================================================================

#[tokio::test]
async fn upload_file_goes_to_category() {
    let state = test_app_state();
    let entry = upload(&state, UploadKind::File, "Q3 Deck.pptx", vec![0; 2048]).await.unwrap();
    assert_eq!(entry.name, "Q3 Deck.pptx");
    assert_eq!(entry.category, Some("presentations"));
    assert_eq!(entry.size, "2.0 KB");
    assert_eq!(entry.file_type, "pptx");
    assert_eq!(entry.url, "/blobs/files/presentations/Q3%20Deck.pptx");
    assert!(state.blobs.get("files/presentations/Q3 Deck.pptx").await.unwrap().is_some());
}

#[tokio::test]
async fn upload_attachment_has_no_category() {
    let state = test_app_state();
    let entry = upload(&state, UploadKind::Attachment, "chart.png", vec![1, 2, 3]).await.unwrap();
    assert_eq!(entry.category, None);
    assert!(state.blobs.get("attachments/chart.png").await.unwrap().is_some());
}

#[tokio::test]
async fn upload_rejects_disallowed_types() {
    let state = test_app_state();
    assert!(matches!(
        upload(&state, UploadKind::File, "logo.png", vec![1]).await,
        Err(UploadError::TypeNotAllowed)
    ));
    assert!(matches!(
        upload(&state, UploadKind::Attachment, "deck.pptx", vec![1]).await,
        Err(UploadError::TypeNotAllowed)
    ));
    assert!(matches!(
        upload(&state, UploadKind::File, "file-1700000000000", vec![1]).await,
        Err(UploadError::TypeNotAllowed)
    ));
}

#[tokio::test]
async fn upload_rejects_oversize() {
    let state = test_app_state();
    let limit = UploadKind::Attachment.max_bytes();
    let err = upload(&state, UploadKind::Attachment, "big.pdf", vec![0; limit + 1]).await.unwrap_err();
    assert!(matches!(err, UploadError::TooLarge { limit: 10_485_760 }));
    assert_eq!(err.to_string(), "File too large (max 10 MB)");
}

#[tokio::test]
async fn upload_rejects_empty_and_path_names() {
    let state = test_app_state();
    assert!(matches!(upload(&state, UploadKind::File, "a.pdf", vec![]).await, Err(UploadError::NoFile)));
    assert!(matches!(
        upload(&state, UploadKind::File, "../etc/passwd.pdf", vec![1]).await,
        Err(UploadError::InvalidName(_))
    ));
    assert!(matches!(
        upload(&state, UploadKind::File, "dir\\a.pdf", vec![1]).await,
        Err(UploadError::InvalidName(_))
    ));
}

// =============================================================================
// list / delete
// =============================================================================

#[tokio::test]
async fn list_files_grouped_by_category() {
    let state = test_app_state();
    for name in ["notes.docx", "budget.xlsx", "memo.pdf", "deck.key", "actuals.csv"] {
        upload(&state, UploadKind::File, name, vec![1]).await.unwrap();
    }
    upload(&state, UploadKind::Attachment, "photo.jpg", vec![1]).await.unwrap();

    let names: Vec<String> = list(&state, UploadKind::File).await.unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["deck.key", "actuals.csv", "budget.xlsx", "memo.pdf", "notes.docx"]);

    let attachments = list(&state, UploadKind::Attachment).await.unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].name, "photo.jpg");
}

#[tokio::test]
async fn list_ignores_unknown_layout() {
    let state = test_app_state();
    state.blobs.put("files/stray.pdf", vec![1]).await.unwrap();
    state.blobs.put("files/archive/old.pdf", vec![1]).await.unwrap();
    assert!(list(&state, UploadKind::File).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_searches_categories() {
    let state = test_app_state();
    upload(&state, UploadKind::File, "memo.pdf", vec![1]).await.unwrap();
    assert!(delete(&state, UploadKind::File, "memo.pdf").await.unwrap());
    assert!(!delete(&state, UploadKind::File, "memo.pdf").await.unwrap());
}

#[tokio::test]
async fn delete_attachment_does_not_touch_files() {
    let state = test_app_state();
    upload(&state, UploadKind::File, "memo.pdf", vec![1]).await.unwrap();
    assert!(!delete(&state, UploadKind::Attachment, "memo.pdf").await.unwrap());
    assert_eq!(list(&state, UploadKind::File).await.unwrap().len(), 1);
}

// =============================================================================
// file_content
// =============================================================================

#[tokio::test]
async fn csv_content_is_text() {
    let state = test_app_state();
    upload(&state, UploadKind::Attachment, "actuals.csv", b"month,revenue\nJan,100".to_vec()).await.unwrap();
    let content = file_content(&state, "actuals.csv").await.unwrap().unwrap();
    assert_eq!(content.content, "month,revenue\nJan,100");
    assert_eq!(content.content_type, "csv");
}

#[tokio::test]
async fn binary_content_is_placeholder() {
    let state = test_app_state();
    upload(&state, UploadKind::File, "memo.pdf", vec![0x25, 0x50]).await.unwrap();
    let content = file_content(&state, "memo.pdf").await.unwrap().unwrap();
    assert_eq!(content.content, "[Binary file: memo.pdf]");
    assert_eq!(content.content_type, ".pdf");
}

#[tokio::test]
async fn content_missing_is_none() {
    let state = test_app_state();
    assert!(file_content(&state, "nope.csv").await.unwrap().is_none());
}

// =============================================================================
// workbooks
// =============================================================================

const BUDGET_XLSX: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/q3-budget.xlsx"));

#[tokio::test]
async fn workbook_content_is_csv_per_sheet() {
    let state = test_app_state();
    upload(&state, UploadKind::File, "q3-budget.xlsx", BUDGET_XLSX.to_vec()).await.unwrap();
    let content = file_content(&state, "q3-budget.xlsx").await.unwrap().unwrap();
    assert_eq!(content.content_type, "xlsx");
    assert_eq!(
        content.content,
        serde_json::json!({
            "Q3": "Month,Revenue\nJul,1200\n\"Aug, est\",1350.5",
            "Notes": "Flat quarter"
        })
    );
}

#[tokio::test]
async fn unreadable_workbook_is_an_error() {
    let state = test_app_state();
    upload(&state, UploadKind::Attachment, "broken.xlsx", b"not a zip".to_vec()).await.unwrap();
    let err = file_content(&state, "broken.xlsx").await.unwrap_err();
    assert!(matches!(err, UploadError::Workbook(_)));
    assert_eq!(err.error_code(), "E_WORKBOOK");
}

#[test]
fn csv_cells_quote_delimiters() {
    assert_eq!(csv_cell(&Data::String("plain".into())), "plain");
    assert_eq!(csv_cell(&Data::String("a,b".into())), "\"a,b\"");
    assert_eq!(csv_cell(&Data::String("say \"hi\"".into())), "\"say \"\"hi\"\"\"");
    assert_eq!(csv_cell(&Data::Float(12.0)), "12");
    assert_eq!(csv_cell(&Data::Bool(true)), "TRUE");
    assert_eq!(csv_cell(&Data::Empty), "");
}
