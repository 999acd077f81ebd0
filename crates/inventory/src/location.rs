//! Location snapshot value object.

use serde::{Deserialize, Serialize};

use invtrack_core::ValueObject;

/// Where an item physically sits: the five-field tuple recorded in history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSnapshot {
    pub region: String,
    pub city: String,
    pub organization: String,
    pub building: String,
    pub room: String,
}

impl ValueObject for LocationSnapshot {}

impl LocationSnapshot {
    pub fn new(
        region: impl Into<String>,
        city: impl Into<String>,
        organization: impl Into<String>,
        building: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            city: city.into(),
            organization: organization.into(),
            building: building.into(),
            room: room.into(),
        }
    }
}

impl core::fmt::Display for LocationSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} / {} / {} / {} / {}",
            self.region, self.city, self.organization, self.building, self.room
        )
    }
}
