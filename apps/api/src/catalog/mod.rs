// Technology catalog: loading, merging, in-memory storage and search.
// The scanner only ever sees an immutable snapshot of the merged list.

pub mod fetch;
pub mod handlers;
pub mod merge;
pub mod search;
pub mod store;

pub use fetch::{default_sources, CatalogClient, StaticProvider, TechnologyProvider};
pub use store::CatalogStore;
