pub mod actions;
pub mod data;
pub mod models;

pub use actions::{
    create_listing, get_listing, query_listings, CatalogSearch, CreateListingError,
    CreationPhase, CreationState, ListingCreation, QueryError, QueryTicket, SearchOutcome,
};
pub use data::{CreatedListing, ImageUpload, ListingFields};
pub use models::{Category, Listing, ListingFilter, NewListing};
