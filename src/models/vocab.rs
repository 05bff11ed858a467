//! Shared decoding for the rule vocabularies.
//!
//! Convention files written by older releases store `level` and `type` as
//! integers; newer files use names. Both shapes go through one decode path:
//! resolve a name to its ordinal first, fall back to the raw integer, then
//! bounds-check the ordinal no matter which shape it came from.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
/// A vocabulary value as it appears on the wire.
pub enum RawToken {
    Name(String),
    Ordinal(i64),
}

impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawToken::Name(name) => write!(f, "\"{}\"", name),
            RawToken::Ordinal(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RawToken {
    fn from(s: &str) -> Self {
        RawToken::Name(s.to_string())
    }
}

impl From<i64> for RawToken {
    fn from(n: i64) -> Self {
        RawToken::Ordinal(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} {raw}")]
/// A token that names no value of the vocabulary, or an out-of-range ordinal.
pub struct DecodeError {
    pub field: &'static str,
    pub raw: RawToken,
}

/// A closed set of named values with stable ordinals.
pub trait Vocabulary: Copy + Sized + 'static {
    /// JSON field name, used in decode errors.
    const FIELD: &'static str;
    /// Every value in ordinal order: `VARIANTS[i]` has ordinal `i`.
    const VARIANTS: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Whether a resolved ordinal may be produced by decode.
    fn accepts(ordinal: i64) -> bool {
        ordinal >= 0 && (ordinal as usize) < Self::VARIANTS.len()
    }

    fn decode(raw: RawToken) -> Result<Self, DecodeError> {
        let ordinal = match &raw {
            RawToken::Name(name) => Self::VARIANTS
                .iter()
                .position(|v| v.as_str() == name)
                .map(|i| i as i64),
            RawToken::Ordinal(n) => Some(*n),
        };
        match ordinal {
            Some(n) if Self::accepts(n) => Ok(Self::VARIANTS[n as usize]),
            _ => Err(DecodeError {
                field: Self::FIELD,
                raw,
            }),
        }
    }
}

/// Any other JSON value, kept so the error can show it.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireToken {
    Token(RawToken),
    Other(serde_json::Value),
}

/// serde entry point shared by the vocabulary `Deserialize` impls.
pub(crate) fn deserialize_vocab<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Vocabulary,
{
    match WireToken::deserialize(deserializer)? {
        WireToken::Token(raw) => T::decode(raw).map_err(D::Error::custom),
        WireToken::Other(value) => Err(D::Error::custom(format!(
            "invalid {} {}",
            T::FIELD,
            value
        ))),
    }
}
