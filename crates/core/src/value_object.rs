//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances with the same attribute values
/// are the same value. A location snapshot is the canonical example here: the
/// same five fields always describe the same place.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Place {
///     city: String,
///     room: String,
/// }
///
/// impl ValueObject for Place {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
