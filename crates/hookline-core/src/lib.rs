//! Request hooks for JSON web services.
//!
//! This crate provides:
//! - A path-aware coercion policy turning string-encoded booleans, numbers,
//!   dates and object identifiers into typed values
//! - Hooks applying that policy to request bodies and query parameters
//! - Stamping hooks recording who created or updated a record, and when
//! - List hooks splitting delimited strings and deduplicating arrays
//!
//! Every hook takes a [`Context`] by value and returns it. Hooks never fail on
//! unexpected shapes; they leave the context untouched instead.
//!
#![deny(missing_docs)]

/// Request-processing context.
pub mod context;
/// Error types for hooks and coercion.
pub mod errors;
/// The hook trait and the coercion hooks.
pub mod hooks;
/// List splitting and deduplication hooks.
pub mod lists;
/// Coercion options, rules and the coercer.
pub mod policy;
/// Timestamp and userstamp hooks.
pub mod stamp;

pub use context::{Context, HookKind, Method, Params};
pub use errors::{CoercionError, HookError};
pub use hooks::{
    coerce, coerce_default, coerce_query, coerce_query_default, hook_fn, Coerce, CoerceQuery,
    Hook, HookFn,
};
pub use hookline_value::{DotPath, Map, ObjectId, TreePath, ValidationError, Value};
pub use lists::{split_list, unique_array, SplitList, SplitOptions, UniqueArray};
pub use policy::{parse_number, Coercer, CoercionOptions, Rule};
pub use stamp::{timestamp, userstamp, Timestamp, Userstamp};
