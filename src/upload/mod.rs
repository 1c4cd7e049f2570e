/**
 * Image Upload Client
 *
 * This module wraps the external image hosting service. Clients send images
 * as base64 data URIs; the service stores the image and returns a hosted URL
 * that gets persisted with the message instead of the raw bytes.
 *
 * # Configuration
 *
 * The service base URL is read from the `UPLOAD_SERVICE_URL` environment
 * variable. When unset the uploader is not constructed and image sends fail
 * with an internal error.
 */

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Client for the image hosting service
#[derive(Clone, Debug)]
pub struct ImageUploader {
    client: reqwest::Client,
    base_url: String,
}

impl ImageUploader {
    /// Create an uploader against the given service base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create an uploader from `UPLOAD_SERVICE_URL`, if set
    pub fn from_env() -> Option<Self> {
        match std::env::var("UPLOAD_SERVICE_URL") {
            Ok(url) => Some(Self::new(url)),
            Err(_) => {
                tracing::warn!("UPLOAD_SERVICE_URL not set. Image uploads will be disabled.");
                None
            }
        }
    }

    /// Upload a base64 image and return its hosted URL
    ///
    /// Any transport failure or non-2xx response is an upstream error; the
    /// caller aborts the send without persisting anything.
    pub async fn upload(&self, image: &str) -> Result<String, AppError> {
        let url = format!("{}/upload", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&UploadRequest { file: image })
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "upload service returned {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("invalid upload response: {}", e)))?;

        Ok(body.secure_url)
    }
}
