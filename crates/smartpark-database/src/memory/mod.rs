//! In-memory store for single-node demos and tests.

mod store;

pub use store::MemoryStore;
