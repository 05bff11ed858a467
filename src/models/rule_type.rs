//! Rule types: which kind of filesystem entry a rule inspects.

use super::vocab::{deserialize_vocab, DecodeError, RawToken, Vocabulary};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleType {
    /// Never produced by decode.
    Unspecified = 0,
    Directory = 1,
    File = 2,
    /// Glob pattern relative to the checked directory.
    Pattern = 3,
    /// Reserved: decodes, but evaluation reports it as unknown.
    FilesystemPolicy = 4,
}

impl Vocabulary for RuleType {
    const FIELD: &'static str = "type";
    const VARIANTS: &'static [Self] = &[
        RuleType::Unspecified,
        RuleType::Directory,
        RuleType::File,
        RuleType::Pattern,
        RuleType::FilesystemPolicy,
    ];

    fn as_str(self) -> &'static str {
        match self {
            RuleType::Unspecified => "unspecified",
            RuleType::Directory => "directory",
            RuleType::File => "file",
            RuleType::Pattern => "pattern",
            RuleType::FilesystemPolicy => "filesystem policy",
        }
    }

    fn accepts(ordinal: i64) -> bool {
        (RuleType::Directory as i64..=RuleType::FilesystemPolicy as i64).contains(&ordinal)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(RawToken::from(s))
    }
}

impl Serialize for RuleType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_vocab(deserializer)
    }
}
