use crate::validation::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Location of a leaf inside a tree, from the root down.
///
/// Renders as `/key/0/key`; the root renders as the empty string. Path-based
/// classification rules match against this rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath {
    segments: Vec<String>,
}

impl TreePath {
    /// The empty path.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns a new path extended by an object key.
    pub fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    /// Returns a new path extended by an array index.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index.to_string());
        Self { segments }
    }

    /// Path segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Dot-separated address of a field, such as `params.query.tags`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPath {
    segments: Vec<String>,
}

impl DotPath {
    /// Parses a dotted path. Empty paths and empty segments are rejected.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref();
        if s.is_empty() || s.split('.').any(str::is_empty) {
            return Err(ValidationError::PatternMismatch {
                field: "DotPath",
                value: s.to_string(),
            });
        }
        Ok(Self {
            segments: s.split('.').map(str::to_string).collect(),
        })
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl FromStr for DotPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
