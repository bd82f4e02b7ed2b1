//! Stored listing image: public URL plus the provider's identifier

use serde::{Deserialize, Serialize};

const UPLOAD_SEGMENT: &str = "/upload";
const THUMBNAIL_SEGMENT: &str = "/upload/h_150,w_150";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingImage {
    pub url: String,
    /// Provider-side id, needed to delete the image
    pub filename: String,
}

impl ListingImage {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }

    /// 150x150 variant served by the image CDN. Only the first `/upload`
    /// is rewritten; URLs without one are returned unchanged.
    pub fn thumbnail_url(&self) -> String {
        self.url.replacen(UPLOAD_SEGMENT, THUMBNAIL_SEGMENT, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_rewrites_first_upload_only() {
        let image = ListingImage::new(
            "https://res.cloudinary.com/demo/image/upload/v1/wanderlust_DEV/upload/a.png",
            "wanderlust_DEV/a",
        );
        assert_eq!(
            image.thumbnail_url(),
            "https://res.cloudinary.com/demo/image/upload/h_150,w_150/v1/wanderlust_DEV/upload/a.png"
        );
    }

    #[test]
    fn test_thumbnail_without_upload_segment() {
        let image = ListingImage::new("https://images.unsplash.com/photo-1", "listingimage");
        assert_eq!(image.thumbnail_url(), image.url);
    }
}
