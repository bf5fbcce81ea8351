use crate::extractor::{allowed_file, content_type_for, extract, ExtractError, UploadStore};
use crate::sanitize::sanitize_filename;
use tempfile::TempDir;

// ========== Allow-list ==========

#[test]
fn test_allowed_extensions() {
    assert!(allowed_file("notes.txt"));
    assert!(allowed_file("main.py"));
    assert!(allowed_file("photo.jpeg"));
    assert!(allowed_file("doc.pdf"));
}

#[test]
fn test_allowed_case_insensitive() {
    assert!(allowed_file("report.PDF"));
    assert!(allowed_file("IMAGE.PnG"));
}

#[test]
fn test_disallowed_extensions() {
    assert!(!allowed_file("binary.exe"));
    assert!(!allowed_file("data.csv"));
    assert!(!allowed_file("noextension"));
}

#[test]
fn test_final_extension_only() {
    // Judged solely on the substring after the final dot.
    assert!(!allowed_file("archive.tar.gz"));
    assert!(allowed_file("archive.tar.txt"));
}

#[test]
fn test_dotfile_not_allowed() {
    // ".txt" has no stem; there is no extension to accept.
    assert!(!allowed_file(".txt"));
}

// ========== Sanitization ==========

#[test]
fn test_sanitize_plain_name() {
    assert_eq!(sanitize_filename("notes.txt"), Some("notes.txt".into()));
}

#[test]
fn test_sanitize_strips_paths() {
    assert_eq!(sanitize_filename("../../etc/passwd"), Some("passwd".into()));
    assert_eq!(sanitize_filename("/abs/path/file.txt"), Some("file.txt".into()));
    assert_eq!(sanitize_filename(r"C:\dir\file.txt"), Some("file.txt".into()));
}

#[test]
fn test_sanitize_replaces_unsafe_chars() {
    assert_eq!(sanitize_filename("my file (1).txt"), Some("my_file_1_.txt".into()));
}

#[test]
fn test_sanitize_trims_leading_dots() {
    assert_eq!(sanitize_filename("..hidden.txt"), Some("hidden.txt".into()));
}

#[test]
fn test_sanitize_rejects_unusable() {
    assert_eq!(sanitize_filename(".."), None);
    assert_eq!(sanitize_filename(""), None);
    assert_eq!(sanitize_filename("///"), None);
}

// ========== Extraction ==========

#[test]
fn test_extract_text_verbatim() {
    let content = extract("notes.txt", "hello\nworld".as_bytes()).unwrap();
    assert_eq!(content, "hello\nworld");
}

#[test]
fn test_extract_source_code() {
    let content = extract("main.py", b"print('hi')").unwrap();
    assert_eq!(content, "print('hi')");
}

#[test]
fn test_extract_invalid_utf8_is_error() {
    let err = extract("notes.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidUtf8(_)));
}

#[test]
fn test_extract_image_placeholder() {
    let content = extract("photo.png", &[0x89, 0x50, 0x4e, 0x47]).unwrap();
    assert_eq!(content, "[Image uploaded: photo.png]");
}

#[test]
fn test_extract_pdf_placeholder() {
    let content = extract("report.pdf", b"%PDF-1.4").unwrap();
    assert_eq!(content, "[PDF uploaded: report.pdf]");
}

#[test]
fn test_extract_placeholder_case_preserved() {
    let content = extract("report.PDF", b"%PDF-1.4").unwrap();
    assert_eq!(content, "[PDF uploaded: report.PDF]");
}

#[test]
fn test_extract_disallowed_is_error() {
    let err = extract("binary.exe", b"MZ").unwrap_err();
    assert!(matches!(err, ExtractError::DisallowedExtension(_)));
}

// ========== Content Types ==========

#[test]
fn test_content_types() {
    assert_eq!(content_type_for("a.png"), "image/png");
    assert_eq!(content_type_for("a.pdf"), "application/pdf");
    assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    assert_eq!(content_type_for("a.JPG"), "image/jpeg");
}

// ========== Upload Store ==========

#[tokio::test]
async fn test_persist_and_read() {
    let tmp = TempDir::new().unwrap();
    let store = UploadStore::new(tmp.path());
    let name = store.persist("notes.txt", b"hello").await.unwrap();
    assert_eq!(name, "notes.txt");
    assert_eq!(store.read("notes.txt").await.unwrap(), b"hello");
    // The side effect is durable and observable on disk.
    assert!(tmp.path().join("notes.txt").exists());
}

#[tokio::test]
async fn test_persist_sanitizes_name() {
    let tmp = TempDir::new().unwrap();
    let store = UploadStore::new(tmp.path());
    let name = store.persist("../sneaky.txt", b"x").await.unwrap();
    assert_eq!(name, "sneaky.txt");
    assert!(tmp.path().join("sneaky.txt").exists());
    assert!(!tmp.path().parent().unwrap().join("sneaky.txt").exists());
}

#[tokio::test]
async fn test_persist_unusable_name() {
    let tmp = TempDir::new().unwrap();
    let store = UploadStore::new(tmp.path());
    let err = store.persist("..", b"x").await.unwrap_err();
    assert!(matches!(err, ExtractError::BadFilename(_)));
}

#[tokio::test]
async fn test_read_missing_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let store = UploadStore::new(tmp.path());
    let err = store.read("absent.txt").await.unwrap_err();
    assert!(matches!(err, ExtractError::NotFound(_)));
}

#[tokio::test]
async fn test_read_rejects_traversal() {
    let tmp = TempDir::new().unwrap();
    let store = UploadStore::new(tmp.path());
    let err = store.read("../outside.txt").await.unwrap_err();
    assert!(matches!(err, ExtractError::NotFound(_)));
}

#[tokio::test]
async fn test_persist_overwrites() {
    let tmp = TempDir::new().unwrap();
    let store = UploadStore::new(tmp.path());
    store.persist("f.txt", b"v1").await.unwrap();
    store.persist("f.txt", b"v2").await.unwrap();
    assert_eq!(store.read("f.txt").await.unwrap(), b"v2");
}
