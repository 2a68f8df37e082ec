//! Listing endpoints.
//!
//! - `GET  /api/categories`
//! - `GET  /api/listings?search=&category=`
//! - `GET  /api/listings/:id`
//! - `POST /api/listings` (multipart form, optional `image` file part)

use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domains::listings::{
    create_listing, get_listing, query_listings, Category, CreatedListing, ImageUpload, Listing,
    ListingFields,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

pub async fn categories_handler() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.label()).collect())
}

pub async fn list_listings_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let listings = query_listings(
        query.search.as_deref(),
        query.category.as_deref(),
        &state.deps,
    )
    .await?;
    Ok(Json(listings))
}

pub async fn get_listing_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, ApiError> {
    get_listing(&id, &state.deps)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Listing"))
}

pub async fn create_listing_handler(
    Extension(state): Extension<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedListing>), ApiError> {
    let (fields, image) = read_listing_form(multipart).await?;
    let listing = create_listing(&fields, image, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(CreatedListing { id: listing.id })))
}

/// Collects the listing form. Unknown parts are ignored; an empty file part
/// (no file chosen) counts as no image.
async fn read_listing_form(
    mut multipart: Multipart,
) -> Result<(ListingFields, Option<ImageUpload>), ApiError> {
    let mut fields = ListingFields::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "title" => fields.title = field.text().await?,
            "description" => fields.description = field.text().await?,
            "price" => fields.price = field.text().await?,
            "email" | "seller_email" => fields.seller_email = field.text().await?,
            "category" => fields.category = field.text().await?,
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok((fields, image))
}
