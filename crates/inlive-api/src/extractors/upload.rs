//! Multipart form parsing for upload endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use serde::de::DeserializeOwned;

use inlive_core::{AppError, AppResult};
use inlive_file_client::UploadFile;

/// A fully read multipart form: text fields plus file parts grouped by
/// part name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadFile>>,
}

impl MultipartForm {
    /// Drain an Axum multipart stream into memory.
    ///
    /// Parts with a filename become [`UploadFile`]s; everything else is
    /// treated as a text field. The router's body limit bounds total size.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Malformed multipart request: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name.is_empty() {
                return Err(AppError::validation("Multipart part without a name"));
            }

            if let Some(filename) = field.file_name() {
                let filename = filename.to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read file '{filename}': {e}"))
                })?;
                form.files
                    .entry(name)
                    .or_default()
                    .push(UploadFile::new(filename, content_type, data));
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::validation(format!("Failed to read field '{name}': {e}"))
                })?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Deserialize a JSON text field.
    pub fn json_field<T: DeserializeOwned>(&self, name: &str) -> AppResult<T> {
        let raw = self
            .fields
            .get(name)
            .ok_or_else(|| AppError::validation(format!("Missing required field '{name}'")))?;
        serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("Field '{name}' is not valid JSON: {e}")))
    }

    /// Take the files uploaded under a part name, empty when absent.
    pub fn take_files(&mut self, name: &str) -> Vec<UploadFile> {
        self.files.remove(name).unwrap_or_default()
    }

    /// Take exactly one file uploaded under a part name.
    pub fn take_single_file(&mut self, name: &str) -> AppResult<UploadFile> {
        let mut files = self.take_files(name);
        match files.len() {
            1 => Ok(files.remove(0)),
            0 => Err(AppError::validation(format!(
                "Missing required file part '{name}'"
            ))),
            _ => Err(AppError::validation(format!(
                "Expected exactly one file in part '{name}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn form_with(name: &str, count: usize) -> MultipartForm {
        let mut form = MultipartForm::default();
        for i in 0..count {
            form.files.entry(name.to_string()).or_default().push(
                UploadFile::new(format!("f{i}.png"), "image/png", Bytes::from_static(b"x")),
            );
        }
        form
    }

    #[test]
    fn test_take_single_file() {
        assert!(form_with("photo", 1).take_single_file("photo").is_ok());
        assert!(form_with("photo", 0).take_single_file("photo").is_err());
        assert!(form_with("photo", 2).take_single_file("photo").is_err());
    }

    #[test]
    fn test_json_field() {
        let mut form = MultipartForm::default();
        form.fields
            .insert("data".to_string(), "{\"price\": 100.0}".to_string());

        #[derive(serde::Deserialize)]
        struct Payload {
            price: f64,
        }
        let parsed: Payload = form.json_field("data").expect("valid json");
        assert_eq!(parsed.price, 100.0);
        assert!(form.json_field::<Payload>("missing").is_err());
    }
}
