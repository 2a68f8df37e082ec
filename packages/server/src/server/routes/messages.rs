//! `POST /api/listings/:id/messages`

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{ListingId, MessageId};
use crate::domains::messages::send_message;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub buyer_email: String,
    #[serde(alias = "message")]
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SentMessage {
    pub id: MessageId,
}

pub async fn send_message_handler(
    Extension(state): Extension<AppState>,
    Path(listing_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<SentMessage>), ApiError> {
    let listing_id = ListingId::parse(&listing_id).map_err(|_| ApiError::not_found("Listing"))?;
    let message = send_message(listing_id, &request.buyer_email, &request.body, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(SentMessage { id: message.id })))
}
