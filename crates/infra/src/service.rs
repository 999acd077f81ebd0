//! Inventory service: the store plus write-through persistence.

use chrono::{DateTime, Utc};
use thiserror::Error;

use invtrack_catalog::find_tenant;
use invtrack_core::{DomainError, ItemId, TenantId};
use invtrack_inventory::{
    DashboardSummary, FurnitureItem, InventoryStats, InventoryStore, ItemPatch, NewItem,
    summarize, validate_new_item, validate_patch,
};

use crate::codec::{decode_store, encode_store};
use crate::snapshot_store::{PersistenceError, SnapshotStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Owns the inventory state for the process lifetime.
///
/// Constructed from persisted bytes (or seeded defaults), mutated only through
/// the methods below, and written back after every successful mutation. Input
/// is validated before the store is touched, so a rejected call changes
/// nothing. A failed write is reported, but the in-memory mutation stands.
#[derive(Debug)]
pub struct InventoryService<S> {
    store: InventoryStore,
    backend: S,
}

impl<S: SnapshotStore> InventoryService<S> {
    /// Load persisted state, falling back to the seeded default.
    ///
    /// Falling back writes the default immediately so the next load sees it.
    pub fn open(backend: S, now: DateTime<Utc>) -> Result<Self, ServiceError> {
        let restored = backend.read()?.as_deref().and_then(decode_store);

        let service = match restored {
            Some(snapshot) => {
                let store = InventoryStore::from_snapshot(snapshot);
                tracing::info!(
                    tenant_id = %store.active_tenant_id(),
                    items = store.items().len(),
                    "inventory restored"
                );
                Self { store, backend }
            }
            None => {
                tracing::info!("no usable inventory snapshot; starting from defaults");
                let service = Self {
                    store: InventoryStore::seeded(now),
                    backend,
                };
                service.save()?;
                service
            }
        };
        Ok(service)
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Write the current state to the backend.
    pub fn save(&self) -> Result<(), ServiceError> {
        let bytes = encode_store(&self.store.snapshot())?;
        self.backend.write(&bytes)?;
        Ok(())
    }

    /// Switch to a catalog tenant; unknown ids are rejected.
    pub fn switch_tenant(&mut self, tenant_id: TenantId) -> Result<(), ServiceError> {
        if find_tenant(&tenant_id).is_none() {
            return Err(DomainError::validation(format!("unknown tenant {tenant_id}")).into());
        }
        self.store.switch_tenant(tenant_id);
        self.save()
    }

    pub fn items(&self) -> &[FurnitureItem] {
        self.store.items()
    }

    pub fn find_by_id(&self, id: ItemId) -> Result<&FurnitureItem, ServiceError> {
        Ok(self.store.find_by_id(id).ok_or_else(DomainError::not_found)?)
    }

    pub fn add_item(
        &mut self,
        fields: NewItem,
        now: DateTime<Utc>,
    ) -> Result<FurnitureItem, ServiceError> {
        validate_new_item(&fields)?;
        let item = self.store.add_item(fields, now)?;
        self.save()?;
        Ok(item)
    }

    pub fn update_item(
        &mut self,
        id: ItemId,
        patch: ItemPatch,
        now: DateTime<Utc>,
    ) -> Result<FurnitureItem, ServiceError> {
        validate_patch(&patch)?;
        let item = self.store.update_item(id, patch, now)?.clone();
        self.save()?;
        Ok(item)
    }

    pub fn delete_item(&mut self, id: ItemId) -> Result<FurnitureItem, ServiceError> {
        let removed = self.store.delete_item(id)?;
        self.save()?;
        Ok(removed)
    }

    pub fn aggregates(&self) -> InventoryStats {
        self.store.aggregates()
    }

    pub fn summary(&self, now: DateTime<Utc>) -> DashboardSummary {
        summarize(self.store.items(), now)
    }
}
