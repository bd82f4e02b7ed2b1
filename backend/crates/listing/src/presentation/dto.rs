//! Listing form DTOs and view payloads
//!
//! Forms arrive as `multipart/form-data` with fields named `listing[title]`,
//! `listing[description]`, `listing[price]`, `listing[location]`,
//! `listing[country]` and the file in `listing[image]`. Any other field is
//! ignored, so a request cannot set owner, geometry or image URL.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::http::StatusCode;
use serde::Serialize;

use crate::application::EditListingOutput;
use crate::domain::entity::listing::Listing;
use crate::domain::value_object::{image_upload::ImageUpload, listing_fields::ListingFields};
use crate::error::{ListingError, ListingResult};

pub struct ListingSubmission {
    pub fields: ListingFields,
    /// `None` when no file was chosen
    pub image: Option<ImageUpload>,
}

impl ListingSubmission {
    /// Takes the extractor result so a request that is not a multipart form
    /// is rejected only after the guard chain has run.
    pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> ListingResult<Self> {
        let mut multipart = multipart.map_err(|e| {
            tracing::debug!(error = %e, "Listing form is not multipart");
            invalid_form()
        })?;
        let mut fields = ListingFields::default();
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            let slot = match name.as_str() {
                "listing[title]" => &mut fields.title,
                "listing[description]" => &mut fields.description,
                "listing[price]" => &mut fields.price,
                "listing[location]" => &mut fields.location,
                "listing[country]" => &mut fields.country,
                "listing[image]" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(multipart_error)?;

                    // Browsers send an empty part when no file was chosen
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    image = Some(
                        ImageUpload::new(file_name, content_type, bytes.to_vec())
                            .map_err(|e| ListingError::Upload(e.message().to_string()))?,
                    );
                    continue;
                }
                other => {
                    tracing::debug!(field = other, "Ignoring unexpected form field");
                    continue;
                }
            };
            *slot = Some(field.text().await.map_err(multipart_error)?);
        }

        Ok(Self { fields, image })
    }
}

fn multipart_error(e: MultipartError) -> ListingError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ListingError::Upload("The image is too large".to_string())
    } else {
        tracing::debug!(error = %e, "Malformed listing form");
        invalid_form()
    }
}

fn invalid_form() -> ListingError {
    ListingError::Validation("Send valid data for listing".to_string())
}

#[derive(Debug, Serialize)]
pub struct IndexView {
    pub listings: Vec<Listing>,
}

/// Where the form posts to
#[derive(Debug, Serialize)]
pub struct NewFormView {
    pub action: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EditFormView {
    #[serde(flatten)]
    pub edit: EditListingOutput,
    /// Browsers only submit POST; the override turns it into a PUT
    pub action: String,
}

impl From<EditListingOutput> for EditFormView {
    fn from(edit: EditListingOutput) -> Self {
        Self {
            action: format!("/listings/{}?_method=PUT", edit.listing.id),
            edit,
        }
    }
}
