use hookline_value::{DotPath, Map, Value};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Service method a hook runs for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Method {
    /// Record creation.
    Create,
    /// Full replacement.
    Update,
    /// Partial update.
    Patch,
    /// Any other method (`find`, `get`, `remove`, ...).
    Other(String),
}

impl Method {
    /// Parses a method name; unknown names become [`Method::Other`].
    pub fn parse(name: &str) -> Self {
        match name {
            "create" => Method::Create,
            "update" => Method::Update,
            "patch" => Method::Patch,
            other => Method::Other(other.to_string()),
        }
    }

    /// Method name as sent by the host framework.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Create => "create",
            Method::Update => "update",
            Method::Patch => "patch",
            Method::Other(name) => name,
        }
    }

    /// True for `update` and `patch`.
    pub fn is_modification(&self) -> bool {
        matches!(self.as_str(), "update" | "patch")
    }
}

impl From<String> for Method {
    fn from(value: String) -> Self {
        Method::parse(&value)
    }
}

impl From<Method> for String {
    fn from(value: Method) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the hook runs before or after the service method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    /// Runs on the incoming request; items live in `data`.
    #[default]
    Before,
    /// Runs on the service result; items live in `result`.
    After,
}

/// Keeps an explicit `null` distinct from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Framework parameters attached to a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Params {
    /// Query-string parameters.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub query: Option<Value>,
    /// Authenticated identity.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<Value>,
    /// Any other framework parameter.
    #[serde(flatten)]
    pub extra: Map,
}

/// Request-processing envelope passed through a hook chain.
///
/// `None` means a payload is absent; `Some(Value::Null)` means it was sent as
/// `null`. Hooks take the context by value and hand it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Service method.
    pub method: Method,
    /// Before or after the service call.
    #[serde(rename = "type", default)]
    pub kind: HookKind,
    /// Request body.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    /// Service result.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<Value>,
    /// Framework parameters.
    #[serde(default)]
    pub params: Params,
}

impl Context {
    /// Creates a before-hook context with no payloads.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            kind: HookKind::Before,
            data: None,
            result: None,
            params: Params::default(),
        }
    }

    /// Sets the hook kind.
    pub fn with_kind(mut self, kind: HookKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the request body.
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the service result.
    pub fn with_result(mut self, result: impl Into<Value>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Sets the query parameters.
    pub fn with_query(mut self, query: impl Into<Value>) -> Self {
        self.params.query = Some(query.into());
        self
    }

    /// Sets the authenticated identity.
    pub fn with_user(mut self, user: impl Into<Value>) -> Self {
        self.params.user = Some(user.into());
        self
    }

    /// The records a stamping hook acts on: `data` before the service call,
    /// `result` after it.
    pub fn items_mut(&mut self) -> Option<&mut Value> {
        match self.kind {
            HookKind::Before => self.data.as_mut(),
            HookKind::After => self.result.as_mut(),
        }
    }

    /// Resolves a dotted path such as `params.query.tags` or `data.0.name`.
    pub fn get_by_dot(&self, path: &DotPath) -> Option<&Value> {
        let (root, rest) = match path.segments() {
            [first, rest @ ..] if first == "data" => (self.data.as_ref()?, rest),
            [first, rest @ ..] if first == "result" => (self.result.as_ref()?, rest),
            [first, second, rest @ ..] if first == "params" => match second.as_str() {
                "query" => (self.params.query.as_ref()?, rest),
                "user" => (self.params.user.as_ref()?, rest),
                key => (self.params.extra.get(key)?, rest),
            },
            _ => return None,
        };
        root.get_path(rest)
    }

    /// Mutable twin of [`Context::get_by_dot`].
    pub fn get_by_dot_mut(&mut self, path: &DotPath) -> Option<&mut Value> {
        let (root, rest) = match path.segments() {
            [first, rest @ ..] if first == "data" => (self.data.as_mut()?, rest),
            [first, rest @ ..] if first == "result" => (self.result.as_mut()?, rest),
            [first, second, rest @ ..] if first == "params" => match second.as_str() {
                "query" => (self.params.query.as_mut()?, rest),
                "user" => (self.params.user.as_mut()?, rest),
                key => (self.params.extra.get_mut(key)?, rest),
            },
            _ => return None,
        };
        root.get_path_mut(rest)
    }
}
