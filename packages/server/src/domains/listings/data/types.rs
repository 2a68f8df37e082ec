use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::common::validation::{parse_price, require, require_email};
use crate::common::{ListingId, ValidationError};
use crate::domains::listings::models::{Category, NewListing};

/// Listing form exactly as the caller typed it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(alias = "email")]
    pub seller_email: String,
    pub category: String,
}

impl ListingFields {
    /// Checks every field and produces an insertable listing. `image_url` is
    /// left empty; the creation workflow fills it after a successful upload.
    pub fn validate(&self) -> Result<NewListing, ValidationError> {
        let title = require("title", &self.title)?;
        let price = parse_price(&self.price)?;
        let seller_email = require_email("seller_email", &self.seller_email)?;
        let category = require("category", &self.category)?.parse::<Category>()?;

        Ok(NewListing {
            title,
            description: self.description.trim().to_string(),
            price,
            seller_email,
            category,
            image_url: None,
        })
    }
}

/// Image attached to a listing form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original file name, used only for its extension.
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Identifier returned to callers after a create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedListing {
    pub id: ListingId,
}
