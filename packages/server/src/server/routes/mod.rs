// HTTP routes
pub mod health;
pub mod listings;
pub mod messages;

pub use health::*;
pub use listings::*;
pub use messages::*;
