use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::validation::{require, require_email};
use crate::common::{ListingId, MessageId, StoreError, ValidationError};

/// Message - a buyer's note to the seller of a listing. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: MessageId,
    /// Not checked against stored listings unless the deployment opts in.
    pub listing_id: ListingId,
    pub buyer_email: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Validated message, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub listing_id: ListingId,
    pub buyer_email: String,
    pub body: String,
}

impl NewMessage {
    pub fn validate(
        listing_id: ListingId,
        buyer_email: &str,
        body: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            listing_id,
            buyer_email: require_email("buyer_email", buyer_email)?,
            body: require("body", body)?,
        })
    }
}

impl Message {
    /// Append a message (returns inserted record)
    pub async fn create(message: &NewMessage, pool: &PgPool) -> Result<Self, StoreError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (listing_id, buyer_email, body)
            VALUES ($1, $2, $3)
            RETURNING id, listing_id, buyer_email, body, created_at
            "#,
        )
        .bind(message.listing_id)
        .bind(&message.buyer_email)
        .bind(&message.body)
        .fetch_one(pool)
        .await?;
        Ok(message)
    }
}
