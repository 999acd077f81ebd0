//! Per-tenant inventory state and its mutations.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use invtrack_catalog::{Tenant, default_tenant, find_tenant};
use invtrack_core::{DomainError, DomainResult, Entity, ItemId, TenantId};

use crate::inv_number::generate_inventory_number;
use crate::item::{FurnitureItem, ItemPatch, NewItem};
use crate::location::LocationSnapshot;
use crate::stats::{InventoryStats, compute_aggregates};

/// Persisted format version. Snapshots carrying any other value are discarded.
pub const SNAPSHOT_VERSION: u32 = 3;

/// Serializable form of the whole store (all tenants).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub version: u32,
    pub active_tenant_id: TenantId,
    #[serde(default)]
    pub seq_by_tenant: BTreeMap<TenantId, u64>,
    #[serde(default)]
    pub furniture_by_tenant: BTreeMap<TenantId, Vec<FurnitureItem>>,
}

/// In-memory inventory for every tenant, scoped to one active tenant.
///
/// All reads and writes go through the active tenant's collection. The store
/// does no validation and no IO; callers validate input beforehand and persist
/// `snapshot()` afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryStore {
    active_tenant_id: TenantId,
    seq_by_tenant: BTreeMap<TenantId, u64>,
    furniture_by_tenant: BTreeMap<TenantId, Vec<FurnitureItem>>,
}

impl InventoryStore {
    /// Empty store with `tenant_id` active.
    pub fn new(tenant_id: TenantId) -> Self {
        let mut store = Self {
            active_tenant_id: tenant_id.clone(),
            seq_by_tenant: BTreeMap::new(),
            furniture_by_tenant: BTreeMap::new(),
        };
        store.switch_tenant(tenant_id);
        store
    }

    /// Fresh default state: the first catalog tenant holding one demo desk.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let tenant = default_tenant();
        let mut store = Self::new(tenant.tenant_id());

        let region = &tenant.regions[0];
        let city = &region.cities[0];
        let location = LocationSnapshot::new(
            region.name,
            city.name,
            city.organizations[0],
            city.buildings[0],
            city.rooms[0].name,
        );
        // An empty collection always has room for id 1.
        let _ = store.add_item(
            NewItem {
                name: "Student Desk".to_string(),
                item_type: "Desk".to_string(),
                condition: Some("Good".to_string()),
                status: Some("Active".to_string()),
                price: Some(0.0),
                photo: None,
                location,
            },
            now,
        );
        store
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self {
            active_tenant_id: snapshot.active_tenant_id.clone(),
            seq_by_tenant: snapshot.seq_by_tenant,
            furniture_by_tenant: snapshot.furniture_by_tenant,
        };
        store.switch_tenant(snapshot.active_tenant_id);
        store
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            version: SNAPSHOT_VERSION,
            active_tenant_id: self.active_tenant_id.clone(),
            seq_by_tenant: self.seq_by_tenant.clone(),
            furniture_by_tenant: self.furniture_by_tenant.clone(),
        }
    }

    pub fn active_tenant_id(&self) -> &TenantId {
        &self.active_tenant_id
    }

    /// Catalog entry for the active tenant, or the default tenant if the id is unknown.
    pub fn active_tenant(&self) -> &'static Tenant {
        find_tenant(&self.active_tenant_id).unwrap_or_else(default_tenant)
    }

    /// Make `tenant_id` active, creating empty state on first use.
    pub fn switch_tenant(&mut self, tenant_id: TenantId) {
        self.seq_by_tenant.entry(tenant_id.clone()).or_insert(0);
        self.furniture_by_tenant
            .entry(tenant_id.clone())
            .or_default();
        tracing::debug!(tenant_id = %tenant_id, "active tenant switched");
        self.active_tenant_id = tenant_id;
    }

    /// Current sequence counter of the active tenant.
    pub fn sequence(&self) -> u64 {
        self.seq_by_tenant
            .get(&self.active_tenant_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn items(&self) -> &[FurnitureItem] {
        self.furniture_by_tenant
            .get(&self.active_tenant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<&FurnitureItem> {
        self.items().iter().find(|item| *item.id() == id)
    }

    /// Create an item in the active tenant and return it.
    ///
    /// Consumes one sequence value (never reused) and assigns
    /// `max(existing id) + 1`. Fails with `InvalidId` when the largest id
    /// cannot be advanced; the store is left untouched in that case.
    pub fn add_item(
        &mut self,
        fields: NewItem,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<FurnitureItem> {
        let tenant = self.active_tenant();
        let next_sequence = self.sequence() + 1;
        let new_id = match self.items().iter().map(|item| item.id_typed()).max() {
            None => ItemId::new(1),
            Some(max) => max.checked_next().ok_or_else(|| {
                DomainError::invalid_id(format!("ItemId: no id follows {max}"))
            })?,
        };

        let inv_number = generate_inventory_number(
            occurred_at.year(),
            tenant.country_code,
            &fields.location,
            next_sequence,
        );
        let item = fields.into_item(new_id, inv_number, tenant.country_code, occurred_at);

        self.seq_by_tenant
            .insert(self.active_tenant_id.clone(), next_sequence);
        self.active_items_mut().push(item.clone());

        tracing::info!(
            tenant_id = %self.active_tenant_id,
            item_id = %item.id_typed(),
            inv_number = %item.inv_number(),
            "item created"
        );
        Ok(item)
    }

    /// Merge `patch` into the item with `id`.
    ///
    /// The inventory number never changes. A `Move` history entry is appended
    /// when any location field differs afterwards. Unknown ids leave the store
    /// untouched and return `NotFound`.
    pub fn update_item(
        &mut self,
        id: ItemId,
        patch: ItemPatch,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<&FurnitureItem> {
        let tenant_id = self.active_tenant_id.clone();
        let item = self
            .active_items_mut()
            .iter_mut()
            .find(|item| item.id_typed() == id)
            .ok_or_else(DomainError::not_found)?;

        let moved = patch.apply_to(item, occurred_at);
        tracing::info!(tenant_id = %tenant_id, item_id = %id, moved, "item updated");
        Ok(&*item)
    }

    /// Remove the item with `id`. The sequence counter is left alone.
    pub fn delete_item(&mut self, id: ItemId) -> DomainResult<FurnitureItem> {
        let tenant_id = self.active_tenant_id.clone();
        let items = self.active_items_mut();
        let pos = items
            .iter()
            .position(|item| item.id_typed() == id)
            .ok_or_else(DomainError::not_found)?;

        let removed = items.remove(pos);
        tracing::info!(tenant_id = %tenant_id, item_id = %id, "item deleted");
        Ok(removed)
    }

    /// Aggregate statistics over the active tenant's items.
    pub fn aggregates(&self) -> InventoryStats {
        compute_aggregates(self.items())
    }

    fn active_items_mut(&mut self) -> &mut Vec<FurnitureItem> {
        self.furniture_by_tenant
            .entry(self.active_tenant_id.clone())
            .or_default()
    }
}
