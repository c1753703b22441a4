use hookline_value::ValidationError;
use thiserror::Error;

/// Errors raised while coercing a value tree.
#[derive(Error, Debug)]
pub enum CoercionError {
    /// The identifier codec rejected a string that passed the hex check.
    #[error("identifier construction failed at {path}: {source}")]
    Identifier {
        /// Tree path of the offending leaf.
        path: String,
        /// Codec error.
        #[source]
        source: ValidationError,
    },
}

/// Errors returned by hooks.
#[derive(Error, Debug)]
pub enum HookError {
    /// Coercion of a payload failed.
    #[error("coercion failed: {0}")]
    Coercion(#[from] CoercionError),
    /// Failure raised by a caller-supplied hook.
    #[error("{0}")]
    Other(String),
}
