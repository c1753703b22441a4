use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static HEX_24: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{24}$").expect("invalid regex"));

/// Twelve-byte database object identifier, written as 24 hexadecimal characters.
///
/// Parsing accepts either letter case; the canonical rendering is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Number of hexadecimal characters in the textual form.
    pub const HEX_LEN: usize = 24;

    /// Returns the raw identifier bytes.
    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Returns true when `value` is exactly 24 hexadecimal characters.
    pub fn is_valid(value: &str) -> bool {
        HEX_24.is_match(value)
    }

    /// Parses a validated identifier from its hexadecimal form.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref();
        if s.len() != Self::HEX_LEN {
            return Err(ValidationError::InvalidLength {
                field: "ObjectId",
                expected: Self::HEX_LEN,
                actual: s.len(),
            });
        }
        if !Self::is_valid(s) {
            return Err(ValidationError::PatternMismatch {
                field: "ObjectId",
                value: s.to_string(),
            });
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ValidationError::PatternMismatch {
            field: "ObjectId",
            value: s.to_string(),
        })?;
        Ok(Self(bytes))
    }

    /// Lowercase hexadecimal rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for ObjectId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_case_and_renders_lowercase() {
        let id = ObjectId::parse("592F155746A1B867a114e010").unwrap();
        assert_eq!(id.to_hex(), "592f155746a1b867a114e010");
        assert_eq!(id.bytes()[0], 0x59);
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert_eq!(
            ObjectId::parse("592f1557"),
            Err(ValidationError::InvalidLength {
                field: "ObjectId",
                expected: 24,
                actual: 8,
            })
        );
        assert!(matches!(
            ObjectId::parse("592f155746a1b867a114e01g"),
            Err(ValidationError::PatternMismatch { .. })
        ));
    }
}
