//! Kernel module - infrastructure adapters and dependency wiring.

pub mod deps;
pub mod object_store;
pub mod postgres;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use object_store::HttpObjectStore;
pub use postgres::PostgresStore;
pub use test_dependencies::{InMemoryStore, MockAssetStore, TestDependencies, UploadCall};
pub use traits::*;
