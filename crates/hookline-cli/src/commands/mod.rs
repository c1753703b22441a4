//! Subcommand implementations.

pub mod apply;
pub mod coerce;

use std::io::{self, Read};

/// Reads a document from `input`, or from stdin when no path is given.
pub fn read_input(input: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?;
        Ok(text)
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}
