//! Caller-side message form.
//!
//! `Idle → Sending → Sent | Error`. Fields are cleared once the message is
//! sent and kept on error so the buyer can resubmit.

use crate::common::{ListingId, MessageId};
use crate::kernel::ServerDeps;

use super::{send_message, SendMessageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendStatus {
    Idle,
    Sending,
    Sent(MessageId),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct MessageDraft {
    listing_id: ListingId,
    pub buyer_email: String,
    pub body: String,
    status: SendStatus,
}

impl MessageDraft {
    pub fn new(listing_id: ListingId) -> Self {
        Self {
            listing_id,
            buyer_email: String::new(),
            body: String::new(),
            status: SendStatus::Idle,
        }
    }

    pub fn listing_id(&self) -> ListingId {
        self.listing_id
    }

    pub fn status(&self) -> &SendStatus {
        &self.status
    }

    /// Submit the draft. Allowed from any state; `&mut self` keeps a single
    /// send in flight.
    pub async fn submit(&mut self, deps: &ServerDeps) -> Result<MessageId, SendMessageError> {
        self.status = SendStatus::Sending;

        match send_message(self.listing_id, &self.buyer_email, &self.body, deps).await {
            Ok(message) => {
                self.buyer_email.clear();
                self.body.clear();
                self.status = SendStatus::Sent(message.id);
                Ok(message.id)
            }
            Err(e) => {
                self.status = SendStatus::Error(e.to_string());
                Err(e)
            }
        }
    }
}
