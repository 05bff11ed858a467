//! Strictness levels: how mandatory a rule is.

use super::vocab::{deserialize_vocab, DecodeError, RawToken, Vocabulary};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrictnessLevel {
    Prohibited = 0,
    Optional = 1,
    Preferred = 2,
    Required = 3,
}

impl Vocabulary for StrictnessLevel {
    const FIELD: &'static str = "level";
    const VARIANTS: &'static [Self] = &[
        StrictnessLevel::Prohibited,
        StrictnessLevel::Optional,
        StrictnessLevel::Preferred,
        StrictnessLevel::Required,
    ];

    fn as_str(self) -> &'static str {
        match self {
            StrictnessLevel::Prohibited => "prohibited",
            StrictnessLevel::Optional => "optional",
            StrictnessLevel::Preferred => "preferred",
            StrictnessLevel::Required => "required",
        }
    }
}

impl fmt::Display for StrictnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrictnessLevel {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(RawToken::from(s))
    }
}

impl Serialize for StrictnessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StrictnessLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_vocab(deserializer)
    }
}
