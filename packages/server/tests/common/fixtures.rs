//! Test fixtures for listing forms and images.

use bytes::Bytes;
use marketplace_core::domains::listings::{ImageUpload, Listing, ListingFields};
use marketplace_core::kernel::ServerDeps;

/// Listing form with every field valid.
pub fn listing_fields(title: &str, price: &str, category: &str) -> ListingFields {
    ListingFields {
        title: title.to_string(),
        description: format!("{} in good condition", title),
        price: price.to_string(),
        seller_email: "seller@example.com".to_string(),
        category: category.to_string(),
    }
}

/// The form from the browse-after-create scenario: no description, no image.
pub fn bike_fields() -> ListingFields {
    ListingFields {
        title: "Bike".to_string(),
        description: String::new(),
        price: "150".to_string(),
        seller_email: "a@b.com".to_string(),
        category: "Vehicles".to_string(),
    }
}

pub fn png_image(file_name: &str) -> ImageUpload {
    ImageUpload {
        file_name: file_name.to_string(),
        content_type: Some("image/png".to_string()),
        bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\nfake"),
    }
}

/// Insert listings through the creation workflow, returning them in creation order.
pub async fn seed_listings(deps: &ServerDeps, rows: &[(&str, &str)]) -> Vec<Listing> {
    let mut created = Vec::new();
    for (title, category) in rows {
        let listing = marketplace_core::domains::listings::create_listing(
            &listing_fields(title, "10", category),
            None,
            deps,
        )
        .await
        .expect("seed listing");
        created.push(listing);
    }
    created
}
