//! Server dependencies for domain actions (using traits for testability)
//!
//! Every action receives its collaborators through `ServerDeps`; nothing reaches
//! for a process-wide client.

use std::sync::Arc;

use sqlx::PgPool;

use crate::kernel::{
    object_store::HttpObjectStore, postgres::PostgresStore, BaseAssetStore, BaseListingStore,
    BaseMessageStore,
};

#[derive(Clone)]
pub struct ServerDeps {
    pub listings: Arc<dyn BaseListingStore>,
    pub messages: Arc<dyn BaseMessageStore>,
    pub assets: Arc<dyn BaseAssetStore>,
    /// Reject messages whose listing the store does not know about
    pub messages_require_listing: bool,
}

impl ServerDeps {
    pub fn new(
        listings: Arc<dyn BaseListingStore>,
        messages: Arc<dyn BaseMessageStore>,
        assets: Arc<dyn BaseAssetStore>,
    ) -> Self {
        Self {
            listings,
            messages,
            assets,
            messages_require_listing: false,
        }
    }

    /// Production wiring: Postgres for both tables, HTTP object storage for images
    pub fn production(pool: PgPool, assets: HttpObjectStore) -> Self {
        let store = Arc::new(PostgresStore::new(pool));
        Self::new(store.clone(), store, Arc::new(assets))
    }

    pub fn with_messages_require_listing(mut self, required: bool) -> Self {
        self.messages_require_listing = required;
        self
    }
}

impl std::fmt::Debug for ServerDeps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerDeps")
            .field("messages_require_listing", &self.messages_require_listing)
            .finish_non_exhaustive()
    }
}
