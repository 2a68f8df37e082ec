use thiserror::Error;
use tracing::info;

use crate::common::{ListingId, StoreError, ValidationError};
use crate::domains::messages::models::{Message, NewMessage};
use crate::kernel::ServerDeps;

#[derive(Error, Debug)]
pub enum SendMessageError {
    #[error("Invalid message: {0}")]
    Validation(#[from] ValidationError),

    #[error("Listing {0} not found")]
    ListingNotFound(ListingId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Record a buyer's message to the seller of `listing_id`.
///
/// The listing is only looked up when `ServerDeps::messages_require_listing`
/// is set; otherwise messages for unknown listings are stored as-is.
pub async fn send_message(
    listing_id: ListingId,
    buyer_email: &str,
    body: &str,
    deps: &ServerDeps,
) -> Result<Message, SendMessageError> {
    let message = NewMessage::validate(listing_id, buyer_email, body)?;

    if deps.messages_require_listing && deps.listings.find_by_id(listing_id).await?.is_none() {
        return Err(SendMessageError::ListingNotFound(listing_id));
    }

    let message = deps.messages.insert(&message).await?;
    info!(message_id = %message.id, listing_id = %message.listing_id, "Message sent");
    Ok(message)
}
