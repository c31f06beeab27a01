//! Loading the provider feature collection.
//!
//! The collection is read once per session. There are no retries; a failed
//! load leaves the map without provider markers.

mod cache;
mod loader;

pub use cache::CachePolicy;
pub use loader::{load_collection, parse_collection, LoadError};
