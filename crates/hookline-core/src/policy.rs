use crate::errors::CoercionError;
use chrono::{DateTime, NaiveDateTime, Utc};
use hookline_value::{probe, try_tree_map, IdentifierCodec, TreePath, Value};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};

static BOOL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(false|true)$").expect("invalid regex"));
static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").expect("invalid regex")
});
static NAIVE_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(\.[0-9]{3})?$",
    )
    .expect("invalid regex")
});
static UTC_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(\.[0-9]{3})?Z$",
    )
    .expect("invalid regex")
});
static ID_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[A-Za-z0-9_$]*_ids?(/.*)?$").expect("invalid regex"));
static ID_STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{24}$").expect("invalid regex"));
static TEXT_SEARCH_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[A-Za-z0-9_$]*\$text/\$search$").expect("invalid regex"));

/// Toggles for each coercion rule.
///
/// Missing fields deserialize as `false`, so `{"naive": true}` enables only
/// naive dates. Use the presets and `with_*` setters to start from the hook
/// defaults instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoercionOptions {
    /// `"true"`/`"false"` to booleans.
    pub bool: bool,
    /// Finite decimal literals to numbers.
    pub num: bool,
    /// Zone-less timestamps, read as UTC.
    pub naive: bool,
    /// `Z`-suffixed timestamps.
    pub utc: bool,
    /// 24-hex strings at `_id`/`_ids` paths to object identifiers.
    pub id: bool,
    /// Leaves `$text/$search` values alone.
    pub text: bool,
}

impl CoercionOptions {
    /// Every rule off.
    pub fn none() -> Self {
        Self::default()
    }

    /// Preset for request bodies: identifiers and UTC dates.
    pub fn data() -> Self {
        Self {
            id: true,
            utc: true,
            ..Self::default()
        }
    }

    /// Preset for query parameters: booleans, numbers, identifiers,
    /// text-search passthrough and UTC dates.
    pub fn query() -> Self {
        Self {
            bool: true,
            num: true,
            id: true,
            text: true,
            utc: true,
            ..Self::default()
        }
    }

    /// Sets the boolean rule.
    pub fn with_bool(mut self, on: bool) -> Self {
        self.bool = on;
        self
    }

    /// Sets the numeric rule.
    pub fn with_num(mut self, on: bool) -> Self {
        self.num = on;
        self
    }

    /// Sets the naive-date rule.
    pub fn with_naive(mut self, on: bool) -> Self {
        self.naive = on;
        self
    }

    /// Sets the UTC-date rule.
    pub fn with_utc(mut self, on: bool) -> Self {
        self.utc = on;
        self
    }

    /// Sets the identifier rule.
    pub fn with_id(mut self, on: bool) -> Self {
        self.id = on;
        self
    }

    /// Sets the text-search passthrough.
    pub fn with_text(mut self, on: bool) -> Self {
        self.text = on;
        self
    }
}

/// A coercion rule, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Full-text search values stay strings.
    Text,
    /// Boolean literals.
    Bool,
    /// Decimal numbers.
    Num,
    /// Zone-less timestamps.
    Naive,
    /// UTC timestamps.
    Utc,
    /// Object identifiers.
    Id,
}

impl Rule {
    /// Evaluation order; the first matching enabled rule wins.
    pub const ORDER: [Rule; 6] = [
        Rule::Text,
        Rule::Bool,
        Rule::Num,
        Rule::Naive,
        Rule::Utc,
        Rule::Id,
    ];

    /// Whether `options` turns this rule on.
    pub fn enabled(self, options: &CoercionOptions) -> bool {
        match self {
            Rule::Text => options.text,
            Rule::Bool => options.bool,
            Rule::Num => options.num,
            Rule::Naive => options.naive,
            Rule::Utc => options.utc,
            Rule::Id => options.id,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Text => "text",
            Rule::Bool => "bool",
            Rule::Num => "num",
            Rule::Naive => "naive",
            Rule::Utc => "utc",
            Rule::Id => "id",
        };
        f.write_str(name)
    }
}

/// Parses a strict finite decimal literal, ignoring surrounding whitespace.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if !NUMERIC_REGEX.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parses `YYYY-MM-DDTHH:MM:SS[.mmm]` (optionally `Z`-suffixed) as a UTC
/// instant. Calendar-invalid dates yield `None`.
fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let normalized = s.to_ascii_uppercase();
    let naive = normalized.strip_suffix('Z').unwrap_or(&normalized);
    let format = if naive.contains('.') {
        "%Y-%m-%dT%H:%M:%S%.3f"
    } else {
        "%Y-%m-%dT%H:%M:%S"
    };
    NaiveDateTime::parse_from_str(naive, format)
        .ok()
        .map(|dt| dt.and_utc())
}

/// Path-aware string classifier applied to every leaf of a payload.
#[derive(Debug, Clone)]
pub struct Coercer {
    options: CoercionOptions,
    codec: Option<Arc<dyn IdentifierCodec>>,
}

impl Coercer {
    /// Builds a coercer with whatever identifier codec this build provides.
    pub fn new(options: CoercionOptions) -> Self {
        Self::with_codec(options, probe())
    }

    /// Builds a coercer with an explicit codec; `None` disables identifier
    /// coercion.
    pub fn with_codec(options: CoercionOptions, codec: Option<Arc<dyn IdentifierCodec>>) -> Self {
        Self { options, codec }
    }

    /// The toggles this coercer was built with.
    pub fn options(&self) -> &CoercionOptions {
        &self.options
    }

    /// True when identifier coercion can run.
    pub fn has_codec(&self) -> bool {
        self.codec.is_some()
    }

    /// The first enabled rule that matches `value` at `path`, if any.
    pub fn matching_rule(&self, value: &str, path: &TreePath) -> Option<Rule> {
        let rendered = path.to_string();
        Rule::ORDER
            .into_iter()
            .filter(|rule| rule.enabled(&self.options))
            .find(|rule| self.matches(*rule, value, &rendered))
    }

    /// Converts one leaf. Non-strings and unmatched strings come back as-is.
    pub fn classify(&self, value: Value, path: &TreePath) -> Result<Value, CoercionError> {
        let Value::String(s) = value else {
            return Ok(value);
        };
        let rendered = path.to_string();
        for rule in Rule::ORDER {
            if !rule.enabled(&self.options) {
                continue;
            }
            if let Some(coerced) = self.apply(rule, &s, &rendered) {
                tracing::trace!(rule = %rule, path = %rendered, "coerced value");
                return coerced;
            }
        }
        Ok(Value::String(s))
    }

    /// Walks `value` and classifies every leaf.
    pub fn coerce_tree(&self, value: Value) -> Result<Value, CoercionError> {
        try_tree_map(value, |leaf, path| self.classify(leaf, path))
    }

    fn matches(&self, rule: Rule, s: &str, path: &str) -> bool {
        match rule {
            Rule::Text => TEXT_SEARCH_PATH_REGEX.is_match(path),
            Rule::Bool => BOOL_REGEX.is_match(s),
            Rule::Num => parse_number(s).is_some(),
            Rule::Naive => NAIVE_DATE_REGEX.is_match(s) && parse_instant(s).is_some(),
            Rule::Utc => UTC_DATE_REGEX.is_match(s) && parse_instant(s).is_some(),
            Rule::Id => match &self.codec {
                Some(codec) => {
                    ID_PATH_REGEX.is_match(path)
                        && ID_STRING_REGEX.is_match(s)
                        && codec.is_valid(s)
                }
                None => false,
            },
        }
    }

    /// Applies `rule`; `None` means the rule does not match and evaluation
    /// falls through to the next one.
    fn apply(&self, rule: Rule, s: &str, path: &str) -> Option<Result<Value, CoercionError>> {
        match rule {
            Rule::Text => TEXT_SEARCH_PATH_REGEX
                .is_match(path)
                .then(|| Ok(Value::String(s.to_string()))),
            Rule::Bool => BOOL_REGEX
                .is_match(s)
                .then(|| Ok(Value::Bool(s.eq_ignore_ascii_case("true")))),
            Rule::Num => parse_number(s).map(|n| Ok(Value::Number(n))),
            Rule::Naive if NAIVE_DATE_REGEX.is_match(s) => {
                parse_instant(s).map(|date| Ok(Value::Date(date)))
            }
            Rule::Utc if UTC_DATE_REGEX.is_match(s) => {
                parse_instant(s).map(|date| Ok(Value::Date(date)))
            }
            Rule::Naive | Rule::Utc => None,
            Rule::Id => {
                if !self.matches(Rule::Id, s, path) {
                    return None;
                }
                let codec = self.codec.as_ref()?;
                Some(
                    codec
                        .construct(s)
                        .map(Value::ObjectId)
                        .map_err(|source| CoercionError::Identifier {
                            path: path.to_string(),
                            source,
                        }),
                )
            }
        }
    }
}

impl Default for Coercer {
    fn default() -> Self {
        Self::new(CoercionOptions::data())
    }
}
