//! Image Upload Value Object
//!
//! A file submitted with a listing form, checked before it leaves the server.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Formats accepted by the image store
pub const ALLOWED_FORMATS: &[&str] = &["png", "jpg", "jpeg"];

pub struct ImageUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Rejects empty files and extensions outside [`ALLOWED_FORMATS`]
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> AppResult<Self> {
        let file_name = file_name.into();

        if bytes.is_empty() {
            return Err(AppError::bad_request("The uploaded image is empty"));
        }

        let format = extension(&file_name);
        if !format.is_some_and(|f| ALLOWED_FORMATS.contains(&f.as_str())) {
            return Err(AppError::bad_request(format!(
                "Only {} images are allowed",
                ALLOWED_FORMATS.join(", ")
            )));
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Size in bytes, never zero
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    (!stem.is_empty()).then(|| ext.to_ascii_lowercase())
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_formats_case_insensitive() {
        for name in ["villa.png", "villa.JPG", "villa.jpeg"] {
            assert!(ImageUpload::new(name, None, vec![1, 2, 3]).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_other_formats_and_empty_files() {
        assert!(ImageUpload::new("villa.gif", None, vec![1]).is_err());
        assert!(ImageUpload::new("villa", None, vec![1]).is_err());
        assert!(ImageUpload::new(".png", None, vec![1]).is_err());
        assert!(ImageUpload::new("villa.png", None, Vec::new()).is_err());
    }
}
