//! Sample listings

use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use listing::domain::entity::listing::Listing;
use listing::domain::value_object::{
    geometry::Geometry,
    listing_fields::{ListingDraft, ListingFields},
    listing_image::ListingImage,
};

/// Seeded images live outside the image store; they all share this filename.
pub const SEED_IMAGE_FILENAME: &str = "listingimage";

struct Sample {
    title: &'static str,
    description: &'static str,
    image_url: &'static str,
    price: i64,
    location: &'static str,
    country: &'static str,
    lng: f64,
    lat: f64,
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "Cozy Beachfront Cottage",
        description: "Escape to this charming beachfront cottage for a relaxing getaway. Enjoy stunning ocean views and easy access to the beach.",
        image_url: "https://images.unsplash.com/photo-1552733407-5d5c46c3bb3b?auto=format&fit=crop&w=800&q=60",
        price: 1500,
        location: "Malibu",
        country: "United States",
        lng: -118.7798,
        lat: 34.0259,
    },
    Sample {
        title: "Modern Loft in Downtown",
        description: "Stay in the heart of the city in this stylish loft apartment. Perfect for urban explorers!",
        image_url: "https://images.unsplash.com/photo-1501785888041-af3ef285b470?auto=format&fit=crop&w=800&q=60",
        price: 1200,
        location: "New York City",
        country: "United States",
        lng: -74.0060,
        lat: 40.7128,
    },
    Sample {
        title: "Mountain Retreat",
        description: "Unplug and unwind in this peaceful mountain cabin. Surrounded by nature, it's a perfect place to recharge.",
        image_url: "https://images.unsplash.com/photo-1571896349842-33c89424de2d?auto=format&fit=crop&w=800&q=60",
        price: 1000,
        location: "Aspen",
        country: "United States",
        lng: -106.8175,
        lat: 39.1911,
    },
    Sample {
        title: "Historic Villa in Tuscany",
        description: "Experience the charm of Tuscany in this beautifully restored villa. Explore the rolling hills and vineyards.",
        image_url: "https://images.unsplash.com/photo-1566073771259-6a8506099945?auto=format&fit=crop&w=800&q=60",
        price: 2500,
        location: "Florence",
        country: "Italy",
        lng: 11.2558,
        lat: 43.7696,
    },
    Sample {
        title: "Secluded Treehouse Getaway",
        description: "Live among the treetops in this unique treehouse retreat. A true nature lover's paradise.",
        image_url: "https://images.unsplash.com/photo-1488462237308-ecaa28b729d7?auto=format&fit=crop&w=800&q=60",
        price: 800,
        location: "Portland",
        country: "United States",
        lng: -122.6765,
        lat: 45.5231,
    },
    Sample {
        title: "Beachfront Paradise",
        description: "Step out of your door onto the sandy beach. This beachfront condo offers the ultimate relaxation.",
        image_url: "https://images.unsplash.com/photo-1571003123894-1f0594d2b5d9?auto=format&fit=crop&w=800&q=60",
        price: 2000,
        location: "Cancun",
        country: "Mexico",
        lng: -86.8515,
        lat: 21.1619,
    },
    Sample {
        title: "Rustic Cabin by the Lake",
        description: "Spend your days fishing and kayaking on the serene lake. This cozy cabin is perfect for outdoor enthusiasts.",
        image_url: "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?auto=format&fit=crop&w=800&q=60",
        price: 900,
        location: "Lake Tahoe",
        country: "United States",
        lng: -120.0324,
        lat: 39.0968,
    },
    Sample {
        title: "Luxury Penthouse with City Views",
        description: "Indulge in luxury living with panoramic city views from this stunning penthouse apartment.",
        image_url: "https://images.unsplash.com/photo-1622396481328-9b1b78cdd9fd?auto=format&fit=crop&w=800&q=60",
        price: 3500,
        location: "Los Angeles",
        country: "United States",
        lng: -118.2437,
        lat: 34.0522,
    },
    Sample {
        title: "Ski-In/Ski-Out Chalet",
        description: "Hit the slopes right from your doorstep in this ski-in/ski-out chalet in the Swiss Alps.",
        image_url: "https://images.unsplash.com/photo-1502784444187-359ac186c5bb?auto=format&fit=crop&w=800&q=60",
        price: 3000,
        location: "Verbier",
        country: "Switzerland",
        lng: 7.2286,
        lat: 46.0961,
    },
    Sample {
        title: "Safari Lodge in the Serengeti",
        description: "Experience the thrill of the wild in a comfortable safari lodge. Witness the Great Migration up close.",
        image_url: "https://images.unsplash.com/photo-1493246507139-91e8fad9978e?auto=format&fit=crop&w=800&q=60",
        price: 4000,
        location: "Serengeti National Park",
        country: "Tanzania",
        lng: 34.8333,
        lat: -2.3333,
    },
    Sample {
        title: "Historic Canal House",
        description: "Stay in a piece of history in this beautifully preserved canal house in Amsterdam's iconic district.",
        image_url: "https://images.unsplash.com/photo-1504280390367-361c6d9f38f4?auto=format&fit=crop&w=800&q=60",
        price: 1800,
        location: "Amsterdam",
        country: "Netherlands",
        lng: 4.9041,
        lat: 52.3676,
    },
    Sample {
        title: "Private Island Retreat",
        description: "Have an entire island to yourself for a truly exclusive and unforgettable vacation experience.",
        image_url: "https://images.unsplash.com/photo-1618140052121-39fc6db33972?auto=format&fit=crop&w=800&q=60",
        price: 10000,
        location: "Fiji",
        country: "Fiji",
        lng: 178.0650,
        lat: -17.7134,
    },
];

/// The sample data set, every listing owned by `owner`
pub fn sample_listings(owner: UserId) -> AppResult<Vec<Listing>> {
    SAMPLES
        .iter()
        .map(|sample| {
            let draft = ListingDraft::new(ListingFields {
                title: Some(sample.title.to_string()),
                description: Some(sample.description.to_string()),
                price: Some(sample.price.to_string()),
                location: Some(sample.location.to_string()),
                country: Some(sample.country.to_string()),
            })?;
            Ok(Listing::new(
                draft,
                owner,
                ListingImage::new(sample.image_url, SEED_IMAGE_FILENAME),
                Geometry::point(sample.lng, sample.lat)?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_samples_are_valid_and_owned() {
        let owner = UserId::new();
        let listings = sample_listings(owner).unwrap();

        assert_eq!(listings.len(), SAMPLES.len());
        assert!(listings.iter().all(|l| l.owner_id == owner));
        assert!(listings.iter().all(|l| l.image.filename == SEED_IMAGE_FILENAME));

        let ids: HashSet<_> = listings.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), listings.len());
    }
}
