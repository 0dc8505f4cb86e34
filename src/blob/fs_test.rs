use super::*;

async fn store() -> (tempfile::TempDir, FsBlobStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(dir.path().join("blobs"), "/blobs").await.unwrap();
    (dir, store)
}

#[tokio::test]
async fn open_creates_root() {
    let (_dir, store) = store().await;
    assert!(store.root().is_dir());
}

#[tokio::test]
async fn get_missing_is_none() {
    let (_dir, store) = store().await;
    assert!(store.get("proxa-notes.txt").await.unwrap().is_none());
}

#[tokio::test]
async fn put_creates_nested_dirs_and_overwrites() {
    let (_dir, store) = store().await;
    store.put("files/documents/q3.pdf", b"v1".to_vec()).await.unwrap();
    let meta = store.put("files/documents/q3.pdf", b"version 2".to_vec()).await.unwrap();
    assert_eq!(meta.pathname, "files/documents/q3.pdf");
    assert_eq!(meta.size, 9);
    assert_eq!(meta.url, "/blobs/files/documents/q3.pdf");
    assert!(store.root().join("files").join("documents").join("q3.pdf").is_file());
    assert_eq!(store.get("files/documents/q3.pdf").await.unwrap().as_deref(), Some(&b"version 2"[..]));
}

#[tokio::test]
async fn list_walks_tree_with_prefix() {
    let (_dir, store) = store().await;
    store.put("proxa-status.json", b"{}".to_vec()).await.unwrap();
    store.put("files/spreadsheets/b.csv", b"a,b".to_vec()).await.unwrap();
    store.put("files/documents/a.pdf", b"%PDF".to_vec()).await.unwrap();
    store.put("attachments/c.png", vec![0; 4]).await.unwrap();

    let files: Vec<_> = store.list("files/").await.unwrap().into_iter().map(|m| m.pathname).collect();
    assert_eq!(files, vec!["files/documents/a.pdf", "files/spreadsheets/b.csv"]);
    assert_eq!(store.list("").await.unwrap().len(), 4);
}

#[tokio::test]
async fn list_skips_temp_files() {
    let (_dir, store) = store().await;
    store.put("a.txt", b"x".to_vec()).await.unwrap();
    tokio::fs::write(store.root().join(".tmp-99-0"), b"partial").await.unwrap();
    let keys: Vec<_> = store.list("").await.unwrap().into_iter().map(|m| m.pathname).collect();
    assert_eq!(keys, vec!["a.txt"]);
}

#[tokio::test]
async fn delete_reports_presence() {
    let (_dir, store) = store().await;
    store.put("attachments/x.csv", b"1".to_vec()).await.unwrap();
    assert!(store.delete("attachments/x.csv").await.unwrap());
    assert!(!store.delete("attachments/x.csv").await.unwrap());
    assert!(store.get("attachments/x.csv").await.unwrap().is_none());
}

#[tokio::test]
async fn escaping_keys_rejected() {
    let (_dir, store) = store().await;
    assert!(matches!(store.put("../outside.txt", vec![]).await, Err(BlobError::InvalidKey(_))));
    assert!(matches!(store.delete("files/../../x").await, Err(BlobError::InvalidKey(_))));
}
