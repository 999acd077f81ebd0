//! Read-side projections over a tenant's items.
//!
//! Nothing here is cached: every call recomputes from the item list.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use invtrack_catalog::{NEEDS_REPAIR, STATUSES, WRITTEN_OFF};

use crate::item::{FurnitureItem, HistoryAction};
use crate::location::LocationSnapshot;

/// Number of regions/organizations reported in the top lists.
pub const TOP_LIMIT: usize = 6;
/// Number of relocations reported in `recent_moves`.
pub const RECENT_MOVES_LIMIT: usize = 8;
/// Window for `DashboardSummary::added_last_30_days`.
pub const RECENT_CREATION_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub value: usize,
}

/// A `Move` history entry, flattened with the item it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub inv_number: String,
    pub name: String,
    pub at: DateTime<Utc>,
    pub from: Option<LocationSnapshot>,
    pub to: LocationSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: usize,
    /// One entry per catalog status, in catalog order, zeros included.
    pub by_status: Vec<LabelCount>,
    pub needs_repair: usize,
    pub top_regions: Vec<LabelCount>,
    pub top_organizations: Vec<LabelCount>,
    /// Newest first.
    pub recent_moves: Vec<MoveRecord>,
}

pub fn compute_aggregates(items: &[FurnitureItem]) -> InventoryStats {
    let by_status = STATUSES
        .iter()
        .map(|status| LabelCount {
            label: (*status).to_string(),
            value: items.iter().filter(|i| i.status == *status).count(),
        })
        .collect();

    let mut recent_moves: Vec<MoveRecord> = items
        .iter()
        .flat_map(|item| {
            item.moves().map(move |entry| MoveRecord {
                inv_number: item.inv_number().to_string(),
                name: item.name.clone(),
                at: entry.at,
                from: entry.from.clone(),
                to: entry.to.clone(),
            })
        })
        .collect();
    recent_moves.sort_by(|a, b| b.at.cmp(&a.at));
    recent_moves.truncate(RECENT_MOVES_LIMIT);

    InventoryStats {
        total: items.len(),
        by_status,
        needs_repair: count_needs_repair(items),
        top_regions: top_counts(items, |i| i.region(), TOP_LIMIT),
        top_organizations: top_counts(items, |i| i.organization(), TOP_LIMIT),
        recent_moves,
    }
}

/// Count observed values of `key` in first-observed order.
fn observed_counts<F>(items: &[FurnitureItem], key: F) -> Vec<LabelCount>
where
    F: Fn(&FurnitureItem) -> &str,
{
    let mut counts: Vec<LabelCount> = Vec::new();
    for item in items {
        let label = key(item);
        match counts.iter_mut().find(|c| c.label == label) {
            Some(entry) => entry.value += 1,
            None => counts.push(LabelCount {
                label: label.to_string(),
                value: 1,
            }),
        }
    }
    counts
}

/// Most frequent values of `key` first; ties keep first-observed order.
fn top_counts<F>(items: &[FurnitureItem], key: F, limit: usize) -> Vec<LabelCount>
where
    F: Fn(&FurnitureItem) -> &str,
{
    let mut counts = observed_counts(items, key);
    counts.sort_by(|a, b| b.value.cmp(&a.value));
    counts.truncate(limit);
    counts
}

fn count_needs_repair(items: &[FurnitureItem]) -> usize {
    items.iter().filter(|i| i.condition == NEEDS_REPAIR).count()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionShare {
    pub condition: String,
    pub count: usize,
    pub percent: u32,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total: usize,
    /// Sum of known prices; unknown prices count as zero.
    pub total_value: f64,
    pub priced_items: usize,
    /// Rounded mean over priced items only; `None` when nothing is priced.
    pub average_price: Option<f64>,
    pub needs_repair: usize,
    pub needs_repair_percent: u32,
    pub written_off: usize,
    pub added_last_30_days: usize,
    /// First-observed order.
    pub conditions: Vec<ConditionShare>,
}

pub fn summarize(items: &[FurnitureItem], now: DateTime<Utc>) -> DashboardSummary {
    let total = items.len();
    let prices: Vec<f64> = items
        .iter()
        .filter_map(|i| i.price.filter(|p| p.is_finite()))
        .collect();
    let total_value: f64 = prices.iter().sum();
    let average_price = (!prices.is_empty()).then(|| (total_value / prices.len() as f64).round());

    let needs_repair = count_needs_repair(items);
    let window = Duration::days(RECENT_CREATION_DAYS);
    let added_last_30_days = items
        .iter()
        .filter(|i| {
            i.history()
                .iter()
                .any(|h| h.action == HistoryAction::Create && now - h.at <= window)
        })
        .count();

    let conditions = observed_counts(items, |i| i.condition.as_str())
        .into_iter()
        .map(|c| ConditionShare {
            percent: percent(c.value, total),
            condition: c.label,
            count: c.value,
        })
        .collect();

    DashboardSummary {
        total,
        total_value,
        priced_items: prices.len(),
        average_price,
        needs_repair,
        needs_repair_percent: percent(needs_repair, total),
        written_off: items.iter().filter(|i| i.status == WRITTEN_OFF).count(),
        added_last_30_days,
        conditions,
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
