//! Read access to a persisted index.

mod index_store;

pub use index_store::{IndexStats, IndexStore};
