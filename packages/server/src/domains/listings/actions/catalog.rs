//! Catalog queries: filter composition, single-listing lookup, and sequencing
//! for callers that re-query on every keystroke.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::debug;

use crate::common::{ListingId, StoreError, ValidationError};
use crate::domains::listings::models::{Category, Listing, ListingFilter};
use crate::kernel::ServerDeps;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid filter: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ListingFilter {
    /// Builds a filter from raw search inputs. Search text is matched as
    /// typed, surrounding spaces included; only an empty string is unconstrained.
    /// A blank category is unconstrained.
    pub fn from_inputs(
        search_text: Option<&str>,
        category: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let title_contains = search_text
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let category = category
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<Category>)
            .transpose()?;
        Ok(Self {
            title_contains,
            category,
        })
    }
}

/// Listings matching the search text and category, newest first.
pub async fn query_listings(
    search_text: Option<&str>,
    category: Option<&str>,
    deps: &ServerDeps,
) -> Result<Vec<Listing>, QueryError> {
    let filter = ListingFilter::from_inputs(search_text, category)?;
    let listings = deps.listings.find_filtered(&filter).await?;
    debug!(
        title = ?filter.title_contains,
        category = ?filter.category,
        count = listings.len(),
        "Catalog query"
    );
    Ok(listings)
}

/// Single listing lookup. A malformed id is reported the same as a missing
/// row: `Ok(None)`.
pub async fn get_listing(id: &str, deps: &ServerDeps) -> Result<Option<Listing>, StoreError> {
    let Ok(id) = ListingId::parse(id) else {
        debug!(id, "Malformed listing id");
        return Ok(None);
    };
    deps.listings.find_by_id(id).await
}

/// Ticket for one issued catalog query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Result of the most recently issued query
    Current(Vec<Listing>),
    /// A newer query was issued while this one ran; discard the result
    Superseded,
}

/// Orders overlapping catalog queries so only the most recently issued one is
/// applied to the visible results.
#[derive(Debug, Default)]
pub struct CatalogSearch {
    latest: AtomicU64,
}

impl CatalogSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket; any earlier ticket becomes stale.
    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Run a query under `ticket`.
    pub async fn run(
        &self,
        ticket: QueryTicket,
        search_text: Option<&str>,
        category: Option<&str>,
        deps: &ServerDeps,
    ) -> Result<SearchOutcome, QueryError> {
        let listings = query_listings(search_text, category, deps).await?;
        if self.is_current(ticket) {
            Ok(SearchOutcome::Current(listings))
        } else {
            debug!(ticket = ticket.0, "Discarding superseded catalog result");
            Ok(SearchOutcome::Superseded)
        }
    }

    /// Issue a ticket and run the query under it.
    pub async fn search(
        &self,
        search_text: Option<&str>,
        category: Option<&str>,
        deps: &ServerDeps,
    ) -> Result<SearchOutcome, QueryError> {
        let ticket = self.issue();
        self.run(ticket, search_text, category, deps).await
    }
}
