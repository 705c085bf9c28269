pub mod auth_store;
pub mod client;
pub mod context;
pub mod persistence;
pub mod token;

pub use auth_store::{AuthStore, AuthSubscription, StorageWatch};
pub use client::{parse_response, PocketBase, RecordService};
pub use context::{use_pocket_base, PocketBaseProvider};
pub use persistence::{AuthPersistence, LocalStoragePersistence, MemoryPersistence, PersistedAuth};
