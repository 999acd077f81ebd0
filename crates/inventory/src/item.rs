use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invtrack_catalog::{DEFAULT_CONDITION, DEFAULT_STATUS};
use invtrack_core::{Entity, ItemId};

use crate::location::LocationSnapshot;

pub const CREATE_NOTE: &str = "Initial placement";
pub const MOVE_NOTE: &str = "Location updated";

/// Kind of event recorded in an item's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    Create,
    Move,
}

/// Immutable record of a creation or relocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub action: HistoryAction,
    /// `None` for `Create`.
    pub from: Option<LocationSnapshot>,
    pub to: LocationSnapshot,
    pub note: String,
}

impl HistoryEntry {
    pub fn created(at: DateTime<Utc>, to: LocationSnapshot) -> Self {
        Self {
            at,
            action: HistoryAction::Create,
            from: None,
            to,
            note: CREATE_NOTE.to_string(),
        }
    }

    pub fn moved(at: DateTime<Utc>, from: LocationSnapshot, to: LocationSnapshot) -> Self {
        Self {
            at,
            action: HistoryAction::Move,
            from: Some(from),
            to,
            note: MOVE_NOTE.to_string(),
        }
    }
}

/// A tracked piece of furniture.
///
/// `inv_number` is fixed at creation and `history` only grows; both are
/// read-only outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureItem {
    pub(crate) id: ItemId,
    pub(crate) inv_number: String,

    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub condition: String,
    pub status: String,
    #[serde(default)]
    pub price: Option<f64>,
    /// Inline `data:` URL.
    #[serde(default)]
    pub photo: Option<String>,

    pub(crate) country_code: String,
    pub(crate) region: String,
    pub(crate) city: String,
    pub(crate) organization: String,
    pub(crate) building: String,
    pub(crate) room: String,

    #[serde(default)]
    pub(crate) history: Vec<HistoryEntry>,
}

impl Entity for FurnitureItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl FurnitureItem {
    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn inv_number(&self) -> &str {
        &self.inv_number
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn building(&self) -> &str {
        &self.building
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn location(&self) -> LocationSnapshot {
        LocationSnapshot {
            region: self.region.clone(),
            city: self.city.clone(),
            organization: self.organization.clone(),
            building: self.building.clone(),
            room: self.room.clone(),
        }
    }

    pub fn moves(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history
            .iter()
            .filter(|h| h.action == HistoryAction::Move)
    }

    fn set_location(&mut self, location: LocationSnapshot) {
        self.region = location.region;
        self.city = location.city;
        self.organization = location.organization;
        self.building = location.building;
        self.room = location.room;
    }
}

/// Fields supplied when creating an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    /// Defaults to "Good".
    #[serde(default)]
    pub condition: Option<String>,
    /// Defaults to "Active".
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub photo: Option<String>,
    pub location: LocationSnapshot,
}

impl NewItem {
    pub(crate) fn into_item(
        self,
        id: ItemId,
        inv_number: String,
        country_code: &str,
        created_at: DateTime<Utc>,
    ) -> FurnitureItem {
        let location = self.location;
        FurnitureItem {
            id,
            inv_number,
            name: self.name,
            item_type: self.item_type,
            condition: self
                .condition
                .unwrap_or_else(|| DEFAULT_CONDITION.to_string()),
            status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            price: self.price,
            photo: self.photo,
            country_code: country_code.to_string(),
            region: location.region.clone(),
            city: location.city.clone(),
            organization: location.organization.clone(),
            building: location.building.clone(),
            room: location.room.clone(),
            history: vec![HistoryEntry::created(created_at, location)],
        }
    }
}

/// Partial update. `None` keeps the current value.
///
/// Identity fields (`id`, inventory number, country code) and history are not
/// part of the mergeable set. `price` and `photo` are doubly optional so a
/// patch can clear them: `Some(None)` removes the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub price: Option<Option<f64>>,
    pub photo: Option<Option<String>>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub organization: Option<String>,
    pub building: Option<String>,
    pub room: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn touches_location(&self) -> bool {
        self.region.is_some()
            || self.city.is_some()
            || self.organization.is_some()
            || self.building.is_some()
            || self.room.is_some()
    }

    /// The location `item` would have after this patch.
    pub fn location_after(&self, item: &FurnitureItem) -> LocationSnapshot {
        let pick = |patched: &Option<String>, current: &str| {
            patched.clone().unwrap_or_else(|| current.to_string())
        };
        LocationSnapshot {
            region: pick(&self.region, &item.region),
            city: pick(&self.city, &item.city),
            organization: pick(&self.organization, &item.organization),
            building: pick(&self.building, &item.building),
            room: pick(&self.room, &item.room),
        }
    }

    /// Merge into `item`, appending a `Move` entry when the location changed.
    ///
    /// Returns whether a `Move` entry was appended.
    pub(crate) fn apply_to(self, item: &mut FurnitureItem, at: DateTime<Utc>) -> bool {
        let before = item.location();
        let after = self.location_after(item);

        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(item_type) = self.item_type {
            item.item_type = item_type;
        }
        if let Some(condition) = self.condition {
            item.condition = condition;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(photo) = self.photo {
            item.photo = photo;
        }

        if before == after {
            return false;
        }
        item.set_location(after.clone());
        item.history.push(HistoryEntry::moved(at, before, after));
        true
    }
}
