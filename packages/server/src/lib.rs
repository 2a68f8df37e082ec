// Marketplace - Listing Catalog & Messaging core
//
// Sellers post listings (optionally with a photo), buyers browse and filter the
// catalog and message sellers. External services (relational store, object
// store) are reached only through the traits in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
