//! Value primitives shared by the hookline request hooks.
//!
//! A [`Value`] is a JSON document extended with two opaque scalars, dates and
//! object identifiers, so that coerced trees can carry typed leaves. The
//! [`walker`] rebuilds a tree while handing every leaf, together with its
//! [`TreePath`], to a caller-supplied transform.
//!
#![deny(missing_docs)]

/// Pluggable identifier codecs.
pub mod codec;
/// Twelve-byte object identifiers.
pub mod object_id;
/// Structural and dotted paths into a value tree.
pub mod path;
/// Validation errors for value primitives.
pub mod validation;
/// The JSON-like value tree.
pub mod value;
/// Path-aware tree mapping.
pub mod walker;

#[cfg(feature = "object-id")]
pub use codec::HexObjectIdCodec;
pub use codec::{probe, IdentifierCodec};
pub use object_id::ObjectId;
pub use path::{DotPath, TreePath};
pub use validation::ValidationError;
pub use value::{format_date, Map, Value};
pub use walker::{tree_map, try_tree_map};
