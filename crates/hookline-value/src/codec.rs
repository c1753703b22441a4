use crate::object_id::ObjectId;
use crate::validation::ValidationError;
use std::fmt;
use std::sync::Arc;

/// Validates and constructs strict object identifiers.
///
/// Identifier coercion is only attempted when a codec is available; see
/// [`probe`].
pub trait IdentifierCodec: fmt::Debug + Send + Sync {
    /// Returns true when `value` is a well-formed identifier string.
    fn is_valid(&self, value: &str) -> bool;

    /// Builds the identifier from a string that passed [`Self::is_valid`].
    fn construct(&self, value: &str) -> Result<ObjectId, ValidationError>;
}

/// Built-in codec for 24-character hexadecimal identifiers.
#[cfg(feature = "object-id")]
#[derive(Debug, Default, Clone, Copy)]
pub struct HexObjectIdCodec;

#[cfg(feature = "object-id")]
impl IdentifierCodec for HexObjectIdCodec {
    fn is_valid(&self, value: &str) -> bool {
        ObjectId::is_valid(value)
    }

    fn construct(&self, value: &str) -> Result<ObjectId, ValidationError> {
        ObjectId::parse(value)
    }
}

/// Resolves the identifier codec compiled into this build, if any.
///
/// Returns `None` when the `object-id` feature is disabled; callers then leave
/// identifier strings untouched.
pub fn probe() -> Option<Arc<dyn IdentifierCodec>> {
    #[cfg(feature = "object-id")]
    {
        Some(Arc::new(HexObjectIdCodec))
    }
    #[cfg(not(feature = "object-id"))]
    {
        None
    }
}
