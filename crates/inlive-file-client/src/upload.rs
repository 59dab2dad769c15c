//! In-memory representation of an uploaded file.

use bytes::Bytes;

use inlive_core::{AppError, AppResult};

/// Content types accepted for photo uploads.
pub const IMAGE_CONTENT_TYPES: &[&str] = &["image/png", "image/jpg", "image/jpeg"];

/// Content types accepted for accommodation documents.
pub const DOCUMENT_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "image/png",
    "image/jpg",
    "image/jpeg",
];

/// A file received from a client, held in memory until forwarded to the
/// file-management service.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Validate the file against a set of allowed content types and a size
    /// ceiling. Empty files are rejected.
    pub fn validate(&self, allowed_types: &[&str], max_size_bytes: u64) -> AppResult<()> {
        if self.data.is_empty() {
            return Err(AppError::validation(format!(
                "File '{}' is empty",
                self.filename
            )));
        }
        if self.data.len() as u64 > max_size_bytes {
            return Err(AppError::validation(format!(
                "File '{}' exceeds the maximum size of {} bytes",
                self.filename, max_size_bytes
            )));
        }
        if !allowed_types.contains(&self.content_type.as_str()) {
            return Err(AppError::validation(format!(
                "File '{}' has unsupported content type '{}'",
                self.filename, self.content_type
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(data: &'static [u8]) -> UploadFile {
        UploadFile::new("photo.png", "image/png", Bytes::from_static(data))
    }

    #[test]
    fn test_accepts_valid_image() {
        assert!(png(b"binary").validate(IMAGE_CONTENT_TYPES, 1024).is_ok());
    }

    #[test]
    fn test_rejects_empty_file() {
        assert!(png(b"").validate(IMAGE_CONTENT_TYPES, 1024).is_err());
    }

    #[test]
    fn test_rejects_oversized_file() {
        assert!(png(b"123456").validate(IMAGE_CONTENT_TYPES, 5).is_err());
    }

    #[test]
    fn test_rejects_wrong_content_type() {
        let file = UploadFile::new("doc.pdf", "application/pdf", Bytes::from_static(b"x"));
        assert!(file.validate(IMAGE_CONTENT_TYPES, 1024).is_err());
        assert!(file.validate(DOCUMENT_CONTENT_TYPES, 1024).is_ok());
    }
}
