//! Listing form fields
//!
//! `ListingFields` is what the form submitted. It becomes a `ListingDraft`
//! on create (every field required) or a `ListingPatch` on update (only
//! submitted fields change). Nothing else about a listing can be set from
//! a request.

use kernel::error::app_error::{AppError, AppResult};

use crate::domain::value_object::price::Price;

pub const TITLE_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 5000;
pub const LOCATION_MAX_LENGTH: usize = 200;
pub const COUNTRY_MAX_LENGTH: usize = 200;

const EMPTY_SUBMISSION: &str = "Send valid data for listing";

/// Raw submitted values, `None` when the field was not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
}

impl ListingFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.location.is_none()
            && self.country.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    pub country: String,
}

impl ListingDraft {
    pub fn new(fields: ListingFields) -> AppResult<Self> {
        if fields.is_empty() {
            return Err(AppError::bad_request(EMPTY_SUBMISSION));
        }

        Ok(Self {
            title: text("Title", fields.title, TITLE_MAX_LENGTH)?,
            description: text("Description", fields.description, DESCRIPTION_MAX_LENGTH)?,
            price: Price::parse(fields.price.as_deref().unwrap_or_default())?,
            location: text("Location", fields.location, LOCATION_MAX_LENGTH)?,
            country: text("Country", fields.country, COUNTRY_MAX_LENGTH)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub location: Option<String>,
    pub country: Option<String>,
}

impl ListingPatch {
    /// A submitted field must still be valid; blank does not mean "unset"
    pub fn new(fields: ListingFields) -> AppResult<Self> {
        if fields.is_empty() {
            return Err(AppError::bad_request(EMPTY_SUBMISSION));
        }

        Ok(Self {
            title: optional_text("Title", fields.title, TITLE_MAX_LENGTH)?,
            description: optional_text(
                "Description",
                fields.description,
                DESCRIPTION_MAX_LENGTH,
            )?,
            price: fields.price.as_deref().map(Price::parse).transpose()?,
            location: optional_text("Location", fields.location, LOCATION_MAX_LENGTH)?,
            country: optional_text("Country", fields.country, COUNTRY_MAX_LENGTH)?,
        })
    }
}

fn text(label: &str, value: Option<String>, max: usize) -> AppResult<String> {
    let value = value.unwrap_or_default();
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{label} is required")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn optional_text(label: &str, value: Option<String>, max: usize) -> AppResult<Option<String>> {
    value.map(|v| text(label, Some(v), max)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ListingFields {
        ListingFields {
            title: Some(" Cozy Beachfront Cottage ".to_string()),
            description: Some("Steps from the sand".to_string()),
            price: Some("1500".to_string()),
            location: Some("Malibu".to_string()),
            country: Some("United States".to_string()),
        }
    }

    #[test]
    fn test_draft_trims_and_parses() {
        let draft = ListingDraft::new(fields()).unwrap();
        assert_eq!(draft.title, "Cozy Beachfront Cottage");
        assert_eq!(draft.price.amount(), 1500);
    }

    #[test]
    fn test_draft_requires_every_field() {
        let err = ListingDraft::new(ListingFields {
            country: None,
            ..fields()
        })
        .unwrap_err();
        assert_eq!(err.message(), "Country is required");

        let err = ListingDraft::new(ListingFields {
            title: Some("   ".to_string()),
            ..fields()
        })
        .unwrap_err();
        assert_eq!(err.message(), "Title is required");
    }

    #[test]
    fn test_empty_submission() {
        assert_eq!(
            ListingDraft::new(ListingFields::default())
                .unwrap_err()
                .message(),
            EMPTY_SUBMISSION
        );
        assert!(ListingPatch::new(ListingFields::default()).is_err());
    }

    #[test]
    fn test_length_limits() {
        let err = ListingDraft::new(ListingFields {
            title: Some("x".repeat(TITLE_MAX_LENGTH + 1)),
            ..fields()
        })
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_patch_keeps_absent_fields_absent() {
        let patch = ListingPatch::new(ListingFields {
            price: Some("99".to_string()),
            ..ListingFields::default()
        })
        .unwrap();
        assert_eq!(patch.price.map(|p| p.amount()), Some(99));
        assert_eq!(patch.title, None);
        assert_eq!(patch.location, None);
    }

    #[test]
    fn test_patch_rejects_blank_field() {
        assert!(
            ListingPatch::new(ListingFields {
                location: Some(String::new()),
                ..ListingFields::default()
            })
            .is_err()
        );
    }
}
