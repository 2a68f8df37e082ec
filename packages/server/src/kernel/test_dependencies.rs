// TestDependencies - in-memory implementations for testing
//
// Provides store and asset doubles that can be injected into ServerDeps for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use super::{BaseAssetStore, BaseListingStore, BaseMessageStore, ServerDeps};
use crate::common::{ListingId, MessageId, StoreError, UploadError};
use crate::domains::listings::models::{Listing, ListingFilter, NewListing};
use crate::domains::messages::models::{Message, NewMessage};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// In-memory listing + message store
// =============================================================================

#[derive(Default)]
pub struct InMemoryStore {
    listings: Mutex<Vec<Listing>>,
    messages: Mutex<Vec<Message>>,
    fail_writes: Mutex<Option<String>>,
    fail_reads: Mutex<Option<String>>,
    insert_calls: Mutex<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail with `StoreError::Unavailable`
    pub fn fail_writes(&self, reason: &str) {
        *lock(&self.fail_writes) = Some(reason.to_string());
    }

    /// Make every subsequent query fail with `StoreError::Unavailable`
    pub fn fail_reads(&self, reason: &str) {
        *lock(&self.fail_reads) = Some(reason.to_string());
    }

    pub fn listings(&self) -> Vec<Listing> {
        lock(&self.listings).clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        lock(&self.messages).clone()
    }

    /// Number of insert attempts (listings and messages), including failed ones
    pub fn insert_calls(&self) -> usize {
        *lock(&self.insert_calls)
    }

    fn check_write(&self) -> Result<(), StoreError> {
        *lock(&self.insert_calls) += 1;
        match lock(&self.fail_writes).as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn check_read(&self) -> Result<(), StoreError> {
        match lock(&self.fail_reads).as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BaseListingStore for InMemoryStore {
    async fn insert(&self, listing: &NewListing) -> Result<Listing, StoreError> {
        self.check_write()?;
        let stored = Listing {
            id: ListingId::new(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: listing.price,
            seller_email: listing.seller_email.clone(),
            category: listing.category,
            image_url: listing.image_url.clone(),
            created_at: Utc::now(),
        };
        lock(&self.listings).push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        self.check_read()?;
        Ok(lock(&self.listings).iter().find(|l| l.id == id).cloned())
    }

    async fn find_filtered(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        self.check_read()?;
        // Insertion order reversed = newest first
        Ok(lock(&self.listings)
            .iter()
            .rev()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_read()
    }
}

#[async_trait]
impl BaseMessageStore for InMemoryStore {
    async fn insert(&self, message: &NewMessage) -> Result<Message, StoreError> {
        self.check_write()?;
        let stored = Message {
            id: MessageId::new(),
            listing_id: message.listing_id,
            buyer_email: message.buyer_email.clone(),
            body: message.body.clone(),
            created_at: Utc::now(),
        };
        lock(&self.messages).push(stored.clone());
        Ok(stored)
    }
}

// =============================================================================
// Mock asset store
// =============================================================================

/// Arguments captured from an upload call
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCall {
    pub name: String,
    pub size: usize,
    pub content_type: Option<String>,
}

pub struct MockAssetStore {
    base_url: String,
    stored: Mutex<Vec<String>>,
    calls: Mutex<Vec<UploadCall>>,
    failures: Mutex<Vec<UploadError>>,
}

impl MockAssetStore {
    pub fn new() -> Self {
        Self {
            base_url: "https://assets.test/listing-images".to_string(),
            stored: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure for the next upload
    pub fn with_failure(self, error: UploadError) -> Self {
        lock(&self.failures).push(error);
        self
    }

    /// Queue a failure on an already shared store
    pub fn fail_next_upload(&self, error: UploadError) {
        lock(&self.failures).push(error);
    }

    /// Pre-populate a name so the next upload under it conflicts
    pub fn with_existing(self, name: &str) -> Self {
        lock(&self.stored).push(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<UploadCall> {
        lock(&self.calls).clone()
    }

    pub fn stored_names(&self) -> Vec<String> {
        lock(&self.stored).clone()
    }
}

impl Default for MockAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAssetStore for MockAssetStore {
    async fn upload(
        &self,
        bytes: Bytes,
        proposed_name: &str,
        content_type: Option<&str>,
    ) -> Result<String, UploadError> {
        lock(&self.calls).push(UploadCall {
            name: proposed_name.to_string(),
            size: bytes.len(),
            content_type: content_type.map(str::to_string),
        });

        let mut failures = lock(&self.failures);
        if !failures.is_empty() {
            return Err(failures.remove(0));
        }
        drop(failures);

        let mut stored = lock(&self.stored);
        if stored.iter().any(|n| n == proposed_name) {
            return Err(UploadError::Conflict(proposed_name.to_string()));
        }
        stored.push(proposed_name.to_string());
        Ok(proposed_name.to_string())
    }

    fn public_url(&self, stored_name: &str) -> String {
        format!("{}/{}", self.base_url, stored_name)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundles the doubles with the `ServerDeps` built from them, so tests can
/// both drive actions and inspect what reached the stores.
pub struct TestDependencies {
    pub store: Arc<InMemoryStore>,
    pub assets: Arc<MockAssetStore>,
    messages_require_listing: bool,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            assets: Arc::new(MockAssetStore::new()),
            messages_require_listing: false,
        }
    }

    pub fn with_assets(mut self, assets: MockAssetStore) -> Self {
        self.assets = Arc::new(assets);
        self
    }

    pub fn with_messages_require_listing(mut self) -> Self {
        self.messages_require_listing = true;
        self
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(self.store.clone(), self.store.clone(), self.assets.clone())
            .with_messages_require_listing(self.messages_require_listing)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
