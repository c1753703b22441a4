use crate::context::Context;
use crate::errors::HookError;
use crate::hooks::Hook;
use hookline_value::{DotPath, ValidationError, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Post-processing applied to split tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Trim tokens and drop the empty ones.
    pub trim: bool,
    /// Keep only the first occurrence of each token.
    pub unique: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            trim: true,
            unique: true,
        }
    }
}

/// Splits a delimited string field into a list of strings.
#[derive(Debug, Clone)]
pub struct SplitList {
    path: DotPath,
    separator: String,
    options: SplitOptions,
}

impl SplitList {
    /// Splits the field at `path` on commas, trimming and deduplicating.
    pub fn new(path: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            path: DotPath::parse(path)?,
            separator: ",".to_string(),
            options: SplitOptions::default(),
        })
    }

    /// Uses `separator` instead of a comma. An empty separator splits into
    /// characters.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Replaces the trim/unique options.
    pub fn options(mut self, options: SplitOptions) -> Self {
        self.options = options;
        self
    }

    fn split(&self, raw: &str) -> Vec<String> {
        let mut tokens: Vec<String> = if self.separator.is_empty() {
            raw.chars().map(String::from).collect()
        } else {
            raw.split(self.separator.as_str()).map(str::to_string).collect()
        };
        if self.options.trim {
            tokens = tokens
                .into_iter()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect();
        }
        if self.options.unique {
            let mut seen = HashSet::new();
            tokens.retain(|token| seen.insert(token.clone()));
        }
        tokens
    }
}

impl Hook for SplitList {
    fn call(&self, mut context: Context) -> Result<Context, HookError> {
        match context.get_by_dot_mut(&self.path) {
            Some(slot @ Value::String(_)) => {
                let tokens = self.split(slot.as_str().unwrap_or_default());
                *slot = Value::Array(tokens.into_iter().map(Value::String).collect());
            }
            _ => tracing::debug!(path = %self.path, "no string at path; split skipped"),
        }
        Ok(context)
    }
}

/// Removes repeated elements from a list field, keeping first occurrences.
#[derive(Debug, Clone)]
pub struct UniqueArray {
    path: DotPath,
}

impl UniqueArray {
    /// Deduplicates the list at `path`.
    pub fn new(path: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            path: DotPath::parse(path)?,
        })
    }
}

impl Hook for UniqueArray {
    fn call(&self, mut context: Context) -> Result<Context, HookError> {
        match context.get_by_dot_mut(&self.path) {
            Some(Value::Array(items)) => {
                let mut unique: Vec<Value> = Vec::with_capacity(items.len());
                for item in items.drain(..) {
                    if !unique.contains(&item) {
                        unique.push(item);
                    }
                }
                *items = unique;
            }
            _ => tracing::debug!(path = %self.path, "no list at path; dedupe skipped"),
        }
        Ok(context)
    }
}

/// Hook splitting the string at `path` with default options.
pub fn split_list(path: &str) -> Result<SplitList, ValidationError> {
    SplitList::new(path)
}

/// Hook deduplicating the list at `path`.
pub fn unique_array(path: &str) -> Result<UniqueArray, ValidationError> {
    UniqueArray::new(path)
}
