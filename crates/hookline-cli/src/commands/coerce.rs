//! Coerce command implementation.

use super::read_input;
use crate::output::format_value;
use hookline_core::{Coercer, CoercionOptions, Value};

pub fn run(input: Option<String>, options: CoercionOptions) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let coercer = Coercer::new(options);
    if options.id && !coercer.has_codec() {
        tracing::warn!("identifier codec unavailable; ids are left as strings");
    }
    let coerced = coercer
        .coerce_tree(value)
        .map_err(|e| format!("Coercion failed: {}", e))?;

    println!("{}", format_value(&coerced));
    Ok(())
}
