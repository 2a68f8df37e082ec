//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use marketplace_core::common::{ListingId, MessageId};
//!
//! let listing_id = ListingId::new();
//! let message_id = MessageId::new();
//!
//! // This would be a compile error:
//! // let wrong: MessageId = listing_id;
//! # let _ = (listing_id, message_id);
//! ```

pub use super::id::Id;

/// Marker type for Listing entities (items for sale).
pub struct Listing;

/// Marker type for Message entities (buyer to seller).
pub struct Message;

/// Typed ID for Listing entities.
pub type ListingId = Id<Listing>;

/// Typed ID for Message entities.
pub type MessageId = Id<Message>;
