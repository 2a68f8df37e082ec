pub mod catalog;
pub mod create_listing;

pub use catalog::*;
pub use create_listing::*;
