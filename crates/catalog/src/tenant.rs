//! Tenant location hierarchy and cascade lookups.

use serde::Serialize;

use invtrack_core::TenantId;

/// Isolated top-level scope (a country) with its own regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: &'static str,
    pub name: &'static str,
    pub country_code: &'static str,
    pub regions: &'static [Region],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub cities: &'static [City],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct City {
    pub name: &'static str,
    pub organizations: &'static [&'static str],
    pub buildings: &'static [&'static str],
    pub rooms: &'static [Room],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Room {
    pub id: u32,
    pub name: &'static str,
    pub building: &'static str,
}

static TENANTS: &[Tenant] = &[
    Tenant {
        id: "KG",
        name: "Kyrgyzstan",
        country_code: "KG",
        regions: &[
            Region {
                name: "Chui",
                cities: &[City {
                    name: "Bishkek",
                    organizations: &["SCH1", "SCH12", "COLL3"],
                    buildings: &["A", "B"],
                    rooms: &[
                        Room { id: 1, name: "101", building: "A" },
                        Room { id: 2, name: "102", building: "A" },
                        Room { id: 3, name: "201", building: "B" },
                        Room { id: 4, name: "202", building: "B" },
                    ],
                }],
            },
            Region {
                name: "Osh",
                cities: &[City {
                    name: "Osh",
                    organizations: &["SCH7", "LYC2"],
                    buildings: &["A"],
                    rooms: &[
                        Room { id: 11, name: "11", building: "A" },
                        Room { id: 12, name: "12", building: "A" },
                    ],
                }],
            },
        ],
    },
    Tenant {
        id: "KZ",
        name: "Kazakhstan",
        country_code: "KZ",
        regions: &[Region {
            name: "Almaty",
            cities: &[City {
                name: "Almaty",
                organizations: &["SCH5", "UNI1"],
                buildings: &["A", "C"],
                rooms: &[
                    Room { id: 21, name: "A-10", building: "A" },
                    Room { id: 22, name: "A-11", building: "A" },
                    Room { id: 23, name: "C-20", building: "C" },
                ],
            }],
        }],
    },
];

/// All tenants, in catalog order.
pub fn tenants() -> &'static [Tenant] {
    TENANTS
}

/// Tenant used for fresh state and as the fallback for unknown ids.
pub fn default_tenant() -> &'static Tenant {
    &TENANTS[0]
}

pub fn find_tenant(id: &TenantId) -> Option<&'static Tenant> {
    TENANTS.iter().find(|t| t.id == id.as_str())
}

impl Tenant {
    pub fn tenant_id(&self) -> TenantId {
        TenantId::new(self.id)
    }

    /// Region names, in catalog order.
    pub fn regions_of(&self) -> Vec<&'static str> {
        self.regions.iter().map(|r| r.name).collect()
    }

    pub fn region(&self, region: &str) -> Option<&'static Region> {
        self.regions.iter().find(|r| r.name == region)
    }

    pub fn city(&self, region: &str, city: &str) -> Option<&'static City> {
        self.region(region)?.cities.iter().find(|c| c.name == city)
    }

    pub fn cities_of(&self, region: &str) -> Vec<&'static str> {
        self.region(region)
            .map(|r| r.cities.iter().map(|c| c.name).collect())
            .unwrap_or_default()
    }

    pub fn organizations_of(&self, region: &str, city: &str) -> &'static [&'static str] {
        self.city(region, city).map(|c| c.organizations).unwrap_or(&[])
    }

    pub fn buildings_of(&self, region: &str, city: &str) -> &'static [&'static str] {
        self.city(region, city).map(|c| c.buildings).unwrap_or(&[])
    }

    /// Rooms of `building` in the given city; empty when nothing matches.
    pub fn rooms_of(&self, region: &str, city: &str, building: &str) -> Vec<&'static Room> {
        self.city(region, city)
            .map(|c| c.rooms.iter().filter(|r| r.building == building).collect())
            .unwrap_or_default()
    }
}
