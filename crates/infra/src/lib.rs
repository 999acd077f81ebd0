//! Infrastructure layer: persisted state and the services that write it.

pub mod codec;
pub mod service;
pub mod session_store;
pub mod snapshot_store;

pub use codec::{decode_store, encode_store};
pub use service::{InventoryService, ServiceError};
pub use session_store::SessionRepository;
pub use snapshot_store::{FileSnapshotStore, InMemorySnapshotStore, PersistenceError, SnapshotStore};
