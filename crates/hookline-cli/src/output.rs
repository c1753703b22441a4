//! Output formatting utilities.

use hookline_core::{Context, Value};

/// Formats a value tree as pretty JSON.
pub fn format_value(value: &Value) -> String {
    serde_json::to_string_pretty(&serde_json::Value::from(value))
        .unwrap_or_else(|_| "null".to_string())
}

/// Formats a context document as pretty JSON.
pub fn format_context(context: &Context) -> String {
    serde_json::to_string_pretty(context).unwrap_or_else(|_| "{}".to_string())
}
