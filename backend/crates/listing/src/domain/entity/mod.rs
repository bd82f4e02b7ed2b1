//! Entity Module

pub mod listing;
pub mod listing_details;
