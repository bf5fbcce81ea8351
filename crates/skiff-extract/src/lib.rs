//! Upload validation, filename sanitization, and file content extraction.

pub mod extractor;
pub mod sanitize;

pub use extractor::{
    allowed_file, content_type_for, extract, ExtractError, FileKind, UploadStore,
    ALLOWED_EXTENSIONS,
};
pub use sanitize::sanitize_filename;

#[cfg(test)]
mod tests;
