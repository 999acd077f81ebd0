//! `invtrack-catalog` — static reference data.
//!
//! Tenants own a location hierarchy (regions → cities → organizations,
//! buildings, rooms). Item attributes (types, conditions, statuses) are shared
//! by every tenant. Everything here is read-only and lookups never fail: an
//! unknown key yields an empty result.

pub mod attributes;
pub mod tenant;

pub use attributes::{
    CONDITIONS, DEFAULT_CONDITION, DEFAULT_STATUS, FURNITURE_TYPES, NEEDS_REPAIR, STATUSES,
    WRITTEN_OFF,
};
pub use tenant::{City, Region, Room, Tenant, default_tenant, find_tenant, tenants};
