//! Text and JSON output for command results.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use invtrack_catalog::{CONDITIONS, FURNITURE_TYPES, STATUSES, Tenant, tenants as catalog_tenants};
use invtrack_core::TenantId;
use invtrack_inventory::{
    DashboardSummary, FurnitureItem, HistoryAction, InventoryStats, LabelCount, split_for_display,
};

use crate::commands::CatalogArgs;

fn print_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn price(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |p| format!("{p:.2}"))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TenantRow {
    id: &'static str,
    name: &'static str,
    country_code: &'static str,
    active: bool,
}

pub fn tenants(out: &mut dyn Write, active: &TenantId, json: bool) -> Result<()> {
    let rows: Vec<TenantRow> = catalog_tenants()
        .iter()
        .map(|t| TenantRow {
            id: t.id,
            name: t.name,
            country_code: t.country_code,
            active: t.id == active.as_str(),
        })
        .collect();
    if json {
        return print_json(out, &rows);
    }
    for row in rows {
        let marker = if row.active { '*' } else { ' ' };
        writeln!(out, "{marker} {} {}", row.id, row.name)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct CatalogView {
    tenant: &'static str,
    regions: Vec<&'static str>,
    cities: Vec<&'static str>,
    organizations: &'static [&'static str],
    buildings: &'static [&'static str],
    rooms: Vec<&'static str>,
    types: &'static [&'static str],
    conditions: &'static [&'static str],
    statuses: &'static [&'static str],
}

/// Cascading lookup: each level is filled once its parent is selected.
pub fn catalog(
    out: &mut dyn Write,
    tenant: &'static Tenant,
    args: &CatalogArgs,
    json: bool,
) -> Result<()> {
    let region = args.region.as_deref();
    let city = region.zip(args.city.as_deref());
    let view = CatalogView {
        tenant: tenant.id,
        regions: tenant.regions_of(),
        cities: region.map(|r| tenant.cities_of(r)).unwrap_or_default(),
        organizations: city
            .map(|(r, c)| tenant.organizations_of(r, c))
            .unwrap_or_default(),
        buildings: city
            .map(|(r, c)| tenant.buildings_of(r, c))
            .unwrap_or_default(),
        rooms: match (city, args.building.as_deref()) {
            (Some((r, c)), Some(b)) => tenant.rooms_of(r, c, b).iter().map(|room| room.name).collect(),
            _ => Vec::new(),
        },
        types: FURNITURE_TYPES,
        conditions: CONDITIONS,
        statuses: STATUSES,
    };
    if json {
        return print_json(out, &view);
    }

    writeln!(out, "Tenant {} ({})", tenant.name, tenant.id)?;
    let sections: [(&str, &[&str]); 8] = [
        ("Regions", view.regions.as_slice()),
        ("Cities", view.cities.as_slice()),
        ("Organizations", view.organizations),
        ("Buildings", view.buildings),
        ("Rooms", view.rooms.as_slice()),
        ("Types", view.types),
        ("Conditions", view.conditions),
        ("Statuses", view.statuses),
    ];
    for (title, values) in sections {
        if !values.is_empty() {
            writeln!(out, "{title}: {}", values.join(", "))?;
        }
    }
    Ok(())
}

fn item_row(out: &mut dyn Write, item: &FurnitureItem) -> Result<()> {
    writeln!(
        out,
        "- #{} {} • {} ({}) • {} / {} • {}",
        item.id_typed(),
        item.inv_number(),
        item.name,
        item.item_type,
        item.condition,
        item.status,
        item.location()
    )?;
    Ok(())
}

#[derive(Serialize)]
struct ItemListView<'a> {
    items: &'a [&'a FurnitureItem],
    organizations: &'a [String],
}

/// Matching items plus the organizations available for `--organization`.
pub fn item_list(
    out: &mut dyn Write,
    items: &[&FurnitureItem],
    organizations: &[String],
    json: bool,
) -> Result<()> {
    if json {
        return print_json(
            out,
            &ItemListView {
                items,
                organizations,
            },
        );
    }
    if items.is_empty() {
        writeln!(out, "No items matched the provided filters.")?;
    } else {
        writeln!(out, "Items ({} total):", items.len())?;
        for item in items {
            item_row(out, item)?;
        }
    }
    if !organizations.is_empty() {
        writeln!(out, "Organizations: {}", organizations.join(", "))?;
    }
    Ok(())
}

pub fn item_detail(out: &mut dyn Write, item: &FurnitureItem, json: bool) -> Result<()> {
    if json {
        return print_json(out, item);
    }
    let (first, second) = split_for_display(item.inv_number());
    writeln!(out, "Item #{}", item.id_typed())?;
    writeln!(out, "  Inventory no.: {first}")?;
    if !second.is_empty() {
        writeln!(out, "                 {second}")?;
    }
    writeln!(out, "  Name:          {}", item.name)?;
    writeln!(out, "  Type:          {}", item.item_type)?;
    writeln!(out, "  Condition:     {}", item.condition)?;
    writeln!(out, "  Status:        {}", item.status)?;
    writeln!(out, "  Price:         {}", price(item.price))?;
    writeln!(out, "  Photo:         {}", if item.photo.is_some() { "attached" } else { "none" })?;
    writeln!(out, "  Location:      {}", item.location())?;
    writeln!(out, "  History:")?;
    for entry in item.history() {
        match (entry.action, &entry.from) {
            (HistoryAction::Move, Some(from)) => writeln!(
                out,
                "    {} MOVE {} -> {} ({})",
                entry.at.to_rfc3339(),
                from,
                entry.to,
                entry.note
            )?,
            _ => writeln!(
                out,
                "    {} CREATE {} ({})",
                entry.at.to_rfc3339(),
                entry.to,
                entry.note
            )?,
        }
    }
    Ok(())
}

pub fn item_saved(out: &mut dyn Write, verb: &str, item: &FurnitureItem, json: bool) -> Result<()> {
    if json {
        return print_json(out, item);
    }
    writeln!(out, "{verb} item #{} ({})", item.id_typed(), item.inv_number())?;
    Ok(())
}

fn label_counts(out: &mut dyn Write, title: &str, counts: &[LabelCount]) -> Result<()> {
    writeln!(out, "{title}:")?;
    if counts.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for count in counts {
        writeln!(out, "  {:<24} {}", count.label, count.value)?;
    }
    Ok(())
}

pub fn stats(out: &mut dyn Write, stats: &InventoryStats, json: bool) -> Result<()> {
    if json {
        return print_json(out, stats);
    }
    writeln!(out, "Total items: {}", stats.total)?;
    writeln!(out, "Needs repair: {}", stats.needs_repair)?;
    label_counts(out, "By status", &stats.by_status)?;
    label_counts(out, "Top regions", &stats.top_regions)?;
    label_counts(out, "Top organizations", &stats.top_organizations)?;
    writeln!(out, "Recent moves:")?;
    if stats.recent_moves.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for record in &stats.recent_moves {
        let from = record
            .from
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        writeln!(
            out,
            "  {} {} {}: {} -> {}",
            record.at.to_rfc3339(),
            record.inv_number,
            record.name,
            from,
            record.to
        )?;
    }
    Ok(())
}

pub fn summary(out: &mut dyn Write, summary: &DashboardSummary, json: bool) -> Result<()> {
    if json {
        return print_json(out, summary);
    }
    writeln!(out, "Total items:        {}", summary.total)?;
    writeln!(
        out,
        "Total value:        {:.2} ({} priced)",
        summary.total_value, summary.priced_items
    )?;
    writeln!(out, "Average price:      {}", price(summary.average_price))?;
    writeln!(
        out,
        "Needs repair:       {} ({}%)",
        summary.needs_repair, summary.needs_repair_percent
    )?;
    writeln!(out, "Written off:        {}", summary.written_off)?;
    writeln!(out, "Added last 30 days: {}", summary.added_last_30_days)?;
    writeln!(out, "Conditions:")?;
    for share in &summary.conditions {
        writeln!(
            out,
            "  {:<24} {} ({}%)",
            share.condition, share.count, share.percent
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use invtrack_inventory::InventoryStore;

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn store() -> InventoryStore {
        InventoryStore::seeded(Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap())
    }

    #[test]
    fn tenants_mark_the_active_one() {
        let text = render(|out| tenants(out, &TenantId::new("KG"), false));
        assert!(text.contains("* KG Kyrgyzstan"));
        assert!(text.contains("  KZ Kazakhstan"));

        let json = render(|out| tenants(out, &TenantId::new("KZ"), true));
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(rows[1]["active"], true);
        assert_eq!(rows[1]["countryCode"], "KZ");
    }

    #[test]
    fn catalog_cascades_from_selection() {
        let store = store();
        let tenant = store.active_tenant();

        let top = render(|out| catalog(out, tenant, &CatalogArgs::default(), true));
        let view: serde_json::Value = serde_json::from_str(&top).unwrap();
        assert_eq!(view["regions"][0], "Chui");
        assert!(view["cities"].as_array().unwrap().is_empty());

        let args = CatalogArgs {
            region: Some("Chui".into()),
            city: Some("Bishkek".into()),
            building: Some("A".into()),
        };
        let text = render(|out| catalog(out, tenant, &args, false));
        assert!(text.contains("Organizations: SCH1"));
        assert!(text.contains("Rooms: 101"));
    }

    #[test]
    fn detail_splits_long_inventory_numbers() {
        let store = store();
        let text = render(|out| item_detail(out, &store.items()[0], false));
        assert!(text.contains("Inventory no.: INV-2026-KG-CHU-BIS-SCH1-A-101\n"));
        assert!(text.contains("                 0001\n"));
        assert!(text.contains("CREATE Chui / Bishkek / SCH1 / A / 101 (Initial placement)"));
        assert!(text.contains("Price:         0.00"));
    }

    #[test]
    fn empty_list_says_so() {
        let text = render(|out| item_list(out, &[], &[], false));
        assert_eq!(text, "No items matched the provided filters.\n");
    }
}
