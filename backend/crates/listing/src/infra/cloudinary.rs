//! Cloudinary signed upload adapter
//!
//! Uploads go to `{endpoint}/{cloud}/image/upload`, deletions to
//! `{endpoint}/{cloud}/image/destroy`. Both are signed: SHA-1 over the
//! signed parameters sorted by name and joined as `k=v&k=v`, followed by
//! the API secret.

use chrono::Utc;
use kernel::error::app_error::{AppError, AppResult};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::application::config::ImageStoreConfig;
use crate::domain::ports::ImageUploader;
use crate::domain::value_object::{
    image_upload::{ALLOWED_FORMATS, ImageUpload},
    listing_image::ListingImage,
};
use crate::infra::{status_error, transport_error};

const SERVICE: &str = "Image store";

pub struct CloudinaryUploader {
    client: Client,
    upload_url: String,
    destroy_url: String,
    api_key: String,
    api_secret: String,
    folder: String,
}

impl CloudinaryUploader {
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn new(config: &ImageStoreConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal("Failed to build HTTP client").with_source(e))?;

        let base = format!(
            "{}/{}/image",
            config.endpoint.trim_end_matches('/'),
            config.cloud_name
        );

        Ok(Self {
            client,
            upload_url: format!("{base}/upload"),
            destroy_url: format!("{base}/destroy"),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            folder: config.folder.clone(),
        })
    }

    /// Signed parameters plus `api_key` and `signature`, as a multipart form
    fn signed_form(&self, mut params: Vec<(&'static str, String)>) -> Form {
        params.push(("timestamp", Utc::now().timestamp().to_string()));
        let signature = sign(&params, &self.api_secret);

        params
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
    }

    async fn post(&self, url: &str, form: Form) -> AppResult<Vec<u8>> {
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        if !status.is_success() {
            return Err(status_error(SERVICE, status, error_message(&body)));
        }
        Ok(body.to_vec())
    }
}

impl ImageUploader for CloudinaryUploader {
    async fn upload(&self, image: ImageUpload) -> AppResult<ListingImage> {
        let size = image.size();
        let file_name = image.file_name().to_string();
        let content_type = image
            .content_type()
            .filter(|ct| ct.starts_with("image/"))
            .map(str::to_string)
            .or_else(|| content_type_of(&file_name).map(str::to_string));

        let mut part = Part::bytes(image.into_bytes()).file_name(file_name);
        if let Some(content_type) = content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| AppError::bad_request("Invalid image content type").with_source(e))?;
        }

        let form = self
            .signed_form(vec![
                ("allowed_formats", ALLOWED_FORMATS.join(",")),
                ("folder", self.folder.clone()),
            ])
            .part("file", part);

        let body = self.post(&self.upload_url, form).await?;
        let uploaded: UploadResponse = serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_gateway("Invalid image store response").with_source(e))?;

        tracing::info!(
            public_id = %uploaded.public_id,
            bytes = size,
            "Image uploaded"
        );

        Ok(ListingImage::new(uploaded.secure_url, uploaded.public_id))
    }

    async fn discard(&self, image: &ListingImage) -> AppResult<()> {
        let form = self.signed_form(vec![("public_id", image.filename.clone())]);
        self.post(&self.destroy_url, form).await?;

        tracing::info!(public_id = %image.filename, "Image discarded");
        Ok(())
    }
}

/// SHA-1 hex of `k1=v1&k2=v2...{secret}` with keys sorted
fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by_key(|(name, _)| *name);

    let joined = sorted
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    platform::crypto::sha1_hex(format!("{joined}{api_secret}").as_bytes())
}

/// Declared type for the part, derived from the already validated extension
fn content_type_of(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
}
