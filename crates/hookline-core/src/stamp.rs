use crate::context::{Context, Method};
use crate::errors::HookError;
use crate::hooks::Hook;
use chrono::{DateTime, Utc};
use hookline_value::{Map, Value};

const CREATED_AT: &str = "created_at";
const UPDATED_AT: &str = "updated_at";
const CREATED_BY: &str = "created_by";
const UPDATED_BY: &str = "updated_by";

/// Which audit fields a method writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stamp {
    CreatedAndUpdated,
    Updated,
}

impl Stamp {
    fn for_method(method: &Method) -> Option<Self> {
        if method.as_str() == "create" {
            Some(Stamp::CreatedAndUpdated)
        } else if method.is_modification() {
            Some(Stamp::Updated)
        } else {
            None
        }
    }

    fn write(self, item: &mut Map, created: &str, updated: &str, value: &Value) {
        if self == Stamp::CreatedAndUpdated {
            item.insert(created.to_string(), value.clone());
        }
        item.insert(updated.to_string(), value.clone());
    }
}

/// Applies `f` to every record: a single object or each object in a list.
/// Non-object records are skipped. Returns how many records were visited.
fn for_each_item(context: &mut Context, mut f: impl FnMut(&mut Map)) -> usize {
    match context.items_mut() {
        Some(Value::Object(item)) => {
            f(item);
            1
        }
        Some(Value::Array(items)) => {
            let mut visited = 0;
            for item in items.iter_mut().filter_map(Value::as_object_mut) {
                f(item);
                visited += 1;
            }
            visited
        }
        _ => 0,
    }
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Sets `created_at`/`updated_at` on the records of a create, and
/// `updated_at` on the records of an update or patch.
///
/// All records of one call share the same instant.
pub struct Timestamp {
    clock: Clock,
}

impl Timestamp {
    /// Stamps with the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Stamps with a caller-provided clock.
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            clock: Box::new(clock),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for Timestamp {
    fn call(&self, mut context: Context) -> Result<Context, HookError> {
        let Some(stamp) = Stamp::for_method(&context.method) else {
            return Ok(context);
        };
        let now = Value::Date((self.clock)());
        let visited = for_each_item(&mut context, |item| {
            stamp.write(item, CREATED_AT, UPDATED_AT, &now)
        });
        tracing::debug!(method = %context.method, records = visited, "timestamped records");
        Ok(context)
    }
}

/// Sets `created_by`/`updated_by` from the authenticated identity.
///
/// Does nothing when the identity is missing, is not an object, or lacks the
/// id field.
#[derive(Debug, Clone)]
pub struct Userstamp {
    id_field: String,
}

impl Userstamp {
    /// Reads the user id from the `_id` field of the identity.
    pub fn new() -> Self {
        Self {
            id_field: "_id".to_string(),
        }
    }

    /// Reads the user id from `field` instead.
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }
}

impl Default for Userstamp {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for Userstamp {
    fn call(&self, mut context: Context) -> Result<Context, HookError> {
        let Some(stamp) = Stamp::for_method(&context.method) else {
            return Ok(context);
        };
        let user_id = match context.params.user.as_ref() {
            Some(Value::Object(user)) => match user.get(&self.id_field) {
                Some(id) => id.clone(),
                None => {
                    tracing::debug!(field = %self.id_field, "identity has no id; userstamp skipped");
                    return Ok(context);
                }
            },
            _ => {
                tracing::debug!("no identity; userstamp skipped");
                return Ok(context);
            }
        };
        let visited = for_each_item(&mut context, |item| {
            stamp.write(item, CREATED_BY, UPDATED_BY, &user_id)
        });
        tracing::debug!(method = %context.method, records = visited, "userstamped records");
        Ok(context)
    }
}

/// Hook stamping records with the current time.
pub fn timestamp() -> Timestamp {
    Timestamp::new()
}

/// Hook stamping records with the authenticated user's id.
pub fn userstamp() -> Userstamp {
    Userstamp::new()
}
