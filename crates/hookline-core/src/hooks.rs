use crate::context::Context;
use crate::errors::HookError;
use crate::policy::{Coercer, CoercionOptions};
use hookline_value::Value;
use std::fmt;

/// A unary context transform run by the host framework.
///
/// Hooks are immutable once built and may be shared across threads. Chaining
/// is left to the host.
pub trait Hook: Send + Sync {
    /// Runs the hook and returns the (possibly modified) context.
    fn call(&self, context: Context) -> Result<Context, HookError>;
}

/// Adapts a closure into a [`Hook`].
pub struct HookFn<F>(F);

/// Wraps `f` as a [`Hook`].
pub fn hook_fn<F>(f: F) -> HookFn<F>
where
    F: Fn(Context) -> Result<Context, HookError> + Send + Sync,
{
    HookFn(f)
}

impl<F> Hook for HookFn<F>
where
    F: Fn(Context) -> Result<Context, HookError> + Send + Sync,
{
    fn call(&self, context: Context) -> Result<Context, HookError> {
        (self.0)(context)
    }
}

impl<F> fmt::Debug for HookFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookFn").finish_non_exhaustive()
    }
}

impl<H: Hook + ?Sized> Hook for Box<H> {
    fn call(&self, context: Context) -> Result<Context, HookError> {
        (**self).call(context)
    }
}

/// Coerces string leaves of the request body.
#[derive(Debug, Clone)]
pub struct Coerce {
    coercer: Coercer,
}

impl Coerce {
    /// Builds the hook around an existing coercer.
    pub fn with_coercer(coercer: Coercer) -> Self {
        Self { coercer }
    }
}

impl Hook for Coerce {
    fn call(&self, mut context: Context) -> Result<Context, HookError> {
        let Some(data) = context.data.take() else {
            tracing::debug!(method = %context.method, "no request body; coercion skipped");
            return Ok(context);
        };
        context.data = Some(self.coercer.coerce_tree(data)?);
        Ok(context)
    }
}

/// Coerces string leaves of the query parameters.
#[derive(Debug, Clone)]
pub struct CoerceQuery {
    coercer: Coercer,
}

impl CoerceQuery {
    /// Builds the hook around an existing coercer.
    pub fn with_coercer(coercer: Coercer) -> Self {
        Self { coercer }
    }
}

impl Hook for CoerceQuery {
    fn call(&self, mut context: Context) -> Result<Context, HookError> {
        match context.params.query.take() {
            Some(query @ Value::Object(_)) => {
                context.params.query = Some(self.coercer.coerce_tree(query)?);
            }
            other => {
                let kind = other.as_ref().map_or("absent", |query| query.kind());
                tracing::debug!(kind, "query is not an object; coercion skipped");
                context.params.query = other;
            }
        }
        Ok(context)
    }
}

/// Hook coercing the request body with `options`.
pub fn coerce(options: CoercionOptions) -> Coerce {
    Coerce::with_coercer(Coercer::new(options))
}

/// [`coerce`] with [`CoercionOptions::data`].
pub fn coerce_default() -> Coerce {
    coerce(CoercionOptions::data())
}

/// Hook coercing the query parameters with `options`.
pub fn coerce_query(options: CoercionOptions) -> CoerceQuery {
    CoerceQuery::with_coercer(Coercer::new(options))
}

/// [`coerce_query`] with [`CoercionOptions::query`].
pub fn coerce_query_default() -> CoerceQuery {
    coerce_query(CoercionOptions::query())
}
