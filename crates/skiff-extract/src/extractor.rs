use crate::sanitize::sanitize_filename;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Accepted upload extensions, matched case-insensitively against the
/// substring after the final `.`.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "py", "js", "html", "css",
];

const TEXT_EXTENSIONS: &[&str] = &["txt", "py", "js", "html", "css"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("file type not allowed: {0}")]
    DisallowedExtension(String),
    #[error("file {0} is not valid UTF-8 text")]
    InvalidUtf8(String),
    #[error("unusable filename: {0:?}")]
    BadFilename(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad handling category for an accepted upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// UTF-8 decoded and passed through verbatim.
    Text,
    /// Content not inspected; a placeholder names the file.
    Image,
    Document,
    Other,
}

impl FileKind {
    fn from_extension(ext: &str) -> Self {
        if TEXT_EXTENSIONS.contains(&ext) {
            FileKind::Text
        } else if IMAGE_EXTENSIONS.contains(&ext) {
            FileKind::Image
        } else if DOCUMENT_EXTENSIONS.contains(&ext) {
            FileKind::Document
        } else {
            FileKind::Other
        }
    }
}

/// The lowercased substring after the final `.`, if any.
fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether the filename carries an accepted extension.
pub fn allowed_file(filename: &str) -> bool {
    extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Turn an accepted upload into its textual representation: verbatim text
/// for text-like types, a placeholder naming the file for everything
/// else. Malformed UTF-8 in a text-like file is a caller-visible error.
pub fn extract(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let ext = extension(filename)
        .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
        .ok_or_else(|| ExtractError::DisallowedExtension(filename.to_string()))?;

    match FileKind::from_extension(&ext) {
        FileKind::Text => String::from_utf8(bytes.to_vec())
            .map_err(|_| ExtractError::InvalidUtf8(filename.to_string())),
        FileKind::Image => Ok(format!("[Image uploaded: {filename}]")),
        FileKind::Document => Ok(format!("[PDF uploaded: {filename}]")),
        FileKind::Other => Ok(format!("[File uploaded: {filename}]")),
    }
}

/// Content type for serving a stored upload back to the browser.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension(filename).as_deref() {
        Some("txt") | Some("py") | Some("css") => "text/plain; charset=utf-8",
        Some("js") => "text/javascript",
        Some("html") => "text/html; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Durable storage for accepted uploads under a single directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist an accepted upload under its sanitized name. Returns the
    /// name the file was stored as.
    pub async fn persist(&self, filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
        let name = sanitize_filename(filename)
            .ok_or_else(|| ExtractError::BadFilename(filename.to_string()))?;
        let path = self.dir.join(&name);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(file = %name, bytes = bytes.len(), "stored upload");
        Ok(name)
    }

    /// Read a previously stored upload by name. Only names that survive
    /// sanitization unchanged are looked up, so a request can never reach
    /// outside the upload directory.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, ExtractError> {
        match sanitize_filename(filename) {
            Some(name) if name == filename => {
                let path = self.dir.join(&name);
                match tokio::fs::read(&path).await {
                    Ok(bytes) => Ok(bytes),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        Err(ExtractError::NotFound(filename.to_string()))
                    }
                    Err(e) => Err(e.into()),
                }
            }
            _ => Err(ExtractError::NotFound(filename.to_string())),
        }
    }
}
