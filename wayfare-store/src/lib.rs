pub mod app_config;
pub mod memory_repo;
pub mod snapshot;

pub use memory_repo::{MemoryStore, StoreError};
pub use snapshot::{CollectionLayout, Snapshot, SnapshotLoader};
