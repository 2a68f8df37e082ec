// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Validation and workflow sequencing live in the domain actions that use them.
//
// Naming convention: Base* for trait names (e.g., BaseAssetStore, BaseListingStore)

use async_trait::async_trait;
use bytes::Bytes;

use crate::common::{ListingId, StoreError, UploadError};
use crate::domains::listings::models::{Listing, ListingFilter, NewListing};
use crate::domains::messages::models::{Message, NewMessage};

// =============================================================================
// Asset Store Trait (Infrastructure - binary objects with public URLs)
// =============================================================================

#[async_trait]
pub trait BaseAssetStore: Send + Sync {
    /// Store a binary object under `proposed_name` and return the stored name.
    /// A name that is already taken is an `UploadError::Conflict`.
    async fn upload(
        &self,
        bytes: Bytes,
        proposed_name: &str,
        content_type: Option<&str>,
    ) -> Result<String, UploadError>;

    /// Public URL for a stored object. Deterministic; assumes the object exists.
    fn public_url(&self, stored_name: &str) -> String;
}

// =============================================================================
// Listing Store Trait (Infrastructure - relational `listings` table)
// =============================================================================

#[async_trait]
pub trait BaseListingStore: Send + Sync {
    /// Insert a validated listing, returning it with store-assigned id and timestamp
    async fn insert(&self, listing: &NewListing) -> Result<Listing, StoreError>;

    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, StoreError>;

    /// Listings matching `filter`, newest first
    async fn find_filtered(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError>;

    /// Connectivity probe for health checks
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// =============================================================================
// Message Store Trait (Infrastructure - relational `messages` table)
// =============================================================================

#[async_trait]
pub trait BaseMessageStore: Send + Sync {
    /// Append a validated message
    async fn insert(&self, message: &NewMessage) -> Result<Message, StoreError>;
}
