//! Postgres-backed stores. SQL lives on the models; this adapter only routes
//! trait calls to them.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::{ListingId, StoreError};
use crate::domains::listings::models::{Listing, ListingFilter, NewListing};
use crate::domains::messages::models::{Message, NewMessage};
use crate::kernel::{BaseListingStore, BaseMessageStore};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseListingStore for PostgresStore {
    async fn insert(&self, listing: &NewListing) -> Result<Listing, StoreError> {
        Listing::create(listing, &self.pool).await
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, StoreError> {
        Listing::find_by_id(id, &self.pool).await
    }

    async fn find_filtered(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        Listing::search(filter, &self.pool).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl BaseMessageStore for PostgresStore {
    async fn insert(&self, message: &NewMessage) -> Result<Message, StoreError> {
        Message::create(message, &self.pool).await
    }
}
