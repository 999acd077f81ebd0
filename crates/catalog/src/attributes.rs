//! Item attribute vocabularies.

/// Furniture kinds offered by the create/edit flows.
pub const FURNITURE_TYPES: &[&str] = &["Desk", "Chair", "Table", "Cabinet"];

/// Physical conditions, best first.
pub const CONDITIONS: &[&str] = &["Excellent", "Good", "Fair", NEEDS_REPAIR];

/// Lifecycle statuses. Aggregates report a count for every entry, including zeros.
pub const STATUSES: &[&str] = &["Active", "In Repair", WRITTEN_OFF, "Archived"];

pub const NEEDS_REPAIR: &str = "Needs Repair";
pub const WRITTEN_OFF: &str = "Written Off";

pub const DEFAULT_CONDITION: &str = "Good";
pub const DEFAULT_STATUS: &str = "Active";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_belong_to_their_vocabularies() {
        assert!(CONDITIONS.contains(&DEFAULT_CONDITION));
        assert!(STATUSES.contains(&DEFAULT_STATUS));
        assert!(CONDITIONS.contains(&NEEDS_REPAIR));
        assert!(STATUSES.contains(&WRITTEN_OFF));
    }
}
