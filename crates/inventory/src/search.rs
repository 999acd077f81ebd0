//! List filtering for the item browser.

use serde::{Deserialize, Serialize};

use crate::item::FurnitureItem;

/// Filters combine with AND; empty/absent filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    /// Case-insensitive substring of inventory number, name or id.
    pub search: Option<String>,
    /// Exact region.
    pub region: Option<String>,
    /// Exact organization.
    pub organization: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &FurnitureItem) -> bool {
        let needle = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();
        let matches_search = needle.is_empty()
            || item.inv_number().to_lowercase().contains(&needle)
            || item.name.to_lowercase().contains(&needle)
            || item.id_typed().to_string().contains(&needle);

        let matches_region = non_empty(&self.region).is_none_or(|r| item.region() == r);
        let matches_org = non_empty(&self.organization).is_none_or(|o| item.organization() == o);

        matches_search && matches_region && matches_org
    }

    pub fn apply<'a>(&self, items: &'a [FurnitureItem]) -> Vec<&'a FurnitureItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Distinct organizations present in `items`, sorted.
pub fn organization_options(items: &[FurnitureItem]) -> Vec<String> {
    let mut orgs: Vec<String> = items.iter().map(|i| i.organization().to_string()).collect();
    orgs.sort();
    orgs.dedup();
    orgs
}
