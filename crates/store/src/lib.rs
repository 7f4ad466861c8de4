//! In-memory catalog persistence.
//!
//! This is the console's persistence collaborator: plain maps behind
//! `RwLock`s. Intended for tests/dev. Not optimized for performance.

pub mod error;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::CatalogStore;
