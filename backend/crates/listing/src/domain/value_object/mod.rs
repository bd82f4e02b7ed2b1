//! Value Object Module

pub mod geometry;
pub mod image_upload;
pub mod listing_fields;
pub mod listing_image;
pub mod price;
