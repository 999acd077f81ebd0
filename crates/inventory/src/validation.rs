//! Input checks run before any store mutation.
//!
//! The store itself trusts its input; the create/edit flows call into here first
//! so a rejected request never leaves partial state behind.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use invtrack_core::{DomainError, DomainResult};

use crate::item::{ItemPatch, NewItem};

/// Largest accepted photo source, in bytes.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Accepted photo formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
}

impl PhotoFormat {
    pub fn mime(self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "image/jpeg",
            PhotoFormat::Png => "image/png",
        }
    }

    /// Resolve from a file extension (`jpg`, `jpeg`, `png`; case-insensitive).
    pub fn from_extension(ext: &str) -> DomainResult<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(PhotoFormat::Jpeg),
            "png" => Ok(PhotoFormat::Png),
            other => Err(DomainError::validation(format!(
                "only JPG and PNG photos are allowed (got .{other})"
            ))),
        }
    }
}

/// Check size and encode `bytes` as an inline `data:` URL.
pub fn encode_photo(format: PhotoFormat, bytes: &[u8]) -> DomainResult<String> {
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(DomainError::validation(format!(
            "photo is {} bytes; max file size is 5MB",
            bytes.len()
        )));
    }
    Ok(format!("data:{};base64,{}", format.mime(), STANDARD.encode(bytes)))
}

fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Required fields for creation: name, type, organization, building, room.
pub fn validate_new_item(item: &NewItem) -> DomainResult<()> {
    require("name", &item.name)?;
    require("type", &item.item_type)?;
    require("organization", &item.location.organization)?;
    require("building", &item.location.building)?;
    require("room", &item.location.room)?;
    if let Some(price) = item.price {
        validate_price(price)?;
    }
    Ok(())
}

/// A patch may not blank a required field, and a building change must name
/// the new room (rooms belong to buildings).
pub fn validate_patch(patch: &ItemPatch) -> DomainResult<()> {
    let required = [
        ("name", &patch.name),
        ("type", &patch.item_type),
        ("organization", &patch.organization),
        ("building", &patch.building),
        ("room", &patch.room),
    ];
    for (field, value) in required {
        if let Some(value) = value {
            require(field, value)?;
        }
    }
    if patch.building.is_some() && patch.room.is_none() {
        return Err(DomainError::validation(
            "room is required when the building changes",
        ));
    }
    if let Some(Some(price)) = patch.price {
        validate_price(price)?;
    }
    Ok(())
}

fn validate_price(price: f64) -> DomainResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::validation(format!(
            "price must be a non-negative number (got {price})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationSnapshot;

    fn valid() -> NewItem {
        NewItem {
            name: "Chair".into(),
            item_type: "Chair".into(),
            location: LocationSnapshot::new("Chui", "Bishkek", "SCH1", "A", "101"),
            ..NewItem::default()
        }
    }

    #[test]
    fn accepts_complete_items() {
        assert_eq!(validate_new_item(&valid()), Ok(()));
    }

    #[test]
    fn rejects_missing_required_fields() {
        let mut item = valid();
        item.location.room = "  ".into();
        assert_eq!(
            validate_new_item(&item),
            Err(DomainError::validation("room is required"))
        );

        let mut item = valid();
        item.name.clear();
        assert!(matches!(validate_new_item(&item), Err(DomainError::Validation(_))));
    }

    #[test]
    fn region_and_city_are_optional() {
        let mut item = valid();
        item.location.region.clear();
        item.location.city.clear();
        assert_eq!(validate_new_item(&item), Ok(()));
    }

    #[test]
    fn rejects_negative_prices() {
        let mut item = valid();
        item.price = Some(-1.0);
        assert!(validate_new_item(&item).is_err());
        item.price = Some(f64::NAN);
        assert!(validate_new_item(&item).is_err());
    }

    #[test]
    fn patch_rules() {
        assert_eq!(validate_patch(&ItemPatch::default()), Ok(()));

        let blank_name = ItemPatch {
            name: Some(String::new()),
            ..ItemPatch::default()
        };
        assert!(validate_patch(&blank_name).is_err());

        let building_only = ItemPatch {
            building: Some("B".into()),
            ..ItemPatch::default()
        };
        assert!(validate_patch(&building_only).is_err());

        let building_and_room = ItemPatch {
            building: Some("B".into()),
            room: Some("201".into()),
            ..ItemPatch::default()
        };
        assert_eq!(validate_patch(&building_and_room), Ok(()));
    }

    #[test]
    fn photo_formats_resolve_from_extension() {
        assert_eq!(PhotoFormat::from_extension(".JPG"), Ok(PhotoFormat::Jpeg));
        assert_eq!(PhotoFormat::from_extension("jpeg"), Ok(PhotoFormat::Jpeg));
        assert!(PhotoFormat::from_extension("gif").is_err());
        assert!(PhotoFormat::from_extension("webp").is_err());
    }

    #[test]
    fn photos_are_encoded_as_data_urls() {
        let url = encode_photo(PhotoFormat::Png, &[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn oversized_photos_are_rejected() {
        let bytes = vec![0u8; MAX_PHOTO_BYTES + 1];
        assert!(matches!(
            encode_photo(PhotoFormat::Jpeg, &bytes),
            Err(DomainError::Validation(_))
        ));
        assert!(encode_photo(PhotoFormat::Jpeg, &bytes[..MAX_PHOTO_BYTES]).is_ok());
    }
}
