//! HTTP client for the file-management service.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use inlive_core::config::FileApiConfig;
use inlive_core::error::ErrorKind;
use inlive_core::{AppError, AppResult};

use crate::token::ServiceTokenProvider;
use crate::upload::UploadFile;

/// Client for the external file-management service.
///
/// Uploads are multipart/form-data with one `files` part per file; the
/// service responds with the stored file URLs.
#[derive(Clone)]
pub struct FileManagerClient {
    config: FileApiConfig,
    http: reqwest::Client,
    tokens: ServiceTokenProvider,
}

impl FileManagerClient {
    pub fn new(config: FileApiConfig, tokens: ServiceTokenProvider) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build the file-manager HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            config,
            http,
            tokens,
        })
    }

    pub fn config(&self) -> &FileApiConfig {
        &self.config
    }

    /// Upload files into a remote directory and return their stored URLs.
    pub async fn upload_files(
        &self,
        directory: &str,
        files: Vec<UploadFile>,
        generate_file_name: bool,
    ) -> AppResult<Vec<String>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let mut form = Form::new();
        for file in files {
            let part = Part::stream(file.data)
                .file_name(file.filename.clone())
                .mime_str(&file.content_type)
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Validation,
                        format!("File '{}' has a malformed content type", file.filename),
                        e,
                    )
                })?;
            form = form.part("files", part);
        }

        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}/{}/upload/files?generate-file-name={}",
            self.config.base_url, directory, generate_file_name
        );
        debug!(directory = %directory, "uploading files");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status, "File upload"));
        }

        let urls: Vec<String> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "File manager returned a malformed upload response",
                e,
            )
        })?;

        info!(directory = %directory, count = urls.len(), "files uploaded");
        Ok(urls)
    }

    /// Delete a stored file from a remote directory.
    pub async fn delete_file(&self, directory: &str, filename: &str) -> AppResult<()> {
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}/{}/remove/files/{}",
            self.config.base_url, directory, filename
        );

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status, "File deletion"));
        }

        info!(directory = %directory, filename = %filename, "file deleted");
        Ok(())
    }
}

fn map_transport_error(e: reqwest::Error) -> AppError {
    let message = if e.is_timeout() {
        "File manager request timed out"
    } else {
        "Failed to reach the file manager"
    };
    AppError::with_source(ErrorKind::ExternalService, message, e)
}

fn map_status_error(status: reqwest::StatusCode, operation: &str) -> AppError {
    match status {
        reqwest::StatusCode::NOT_FOUND => AppError::not_found("File not found"),
        s if s.is_client_error() => {
            AppError::validation(format!("{operation} rejected by the file manager ({s})"))
        }
        s => AppError::external_service(format!("{operation} failed: file manager returned {s}")),
    }
}
