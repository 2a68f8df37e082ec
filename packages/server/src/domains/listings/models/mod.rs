pub mod category;
pub mod listing;

pub use category::*;
pub use listing::*;
