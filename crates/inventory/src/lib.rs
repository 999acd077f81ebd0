//! Inventory domain module.
//!
//! Per-tenant furniture records with generated inventory numbers and an
//! append-only relocation history, implemented purely as deterministic domain
//! logic (no IO, no storage). Timestamps are always passed in by the caller.

pub mod inv_number;
pub mod item;
pub mod location;
pub mod search;
pub mod stats;
pub mod store;
pub mod validation;

pub use inv_number::{generate_inventory_number, split_for_display};
pub use item::{FurnitureItem, HistoryAction, HistoryEntry, ItemPatch, NewItem};
pub use location::LocationSnapshot;
pub use search::{ItemFilter, organization_options};
pub use stats::{
    ConditionShare, DashboardSummary, InventoryStats, LabelCount, MoveRecord, compute_aggregates,
    summarize,
};
pub use store::{InventoryStore, SNAPSHOT_VERSION, StoreSnapshot};
pub use validation::{PhotoFormat, encode_photo, validate_new_item, validate_patch};
