//! A single structural expectation: (level, type, value).

use super::{RuleType, StrictnessLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// One rule of a convention.
///
/// `value` is a path (directory/file rules) or a glob pattern (pattern
/// rules), relative to the directory being checked. It is kept verbatim:
/// no case folding and no path cleaning.
pub struct Rule {
    pub level: StrictnessLevel,
    #[serde(rename = "type")]
    pub kind: RuleType,
    pub value: String,
}

impl Rule {
    pub fn new(level: StrictnessLevel, kind: RuleType, value: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            value: value.into(),
        }
    }

    /// Decode one rule object. `level` and `type` may be names or ordinals.
    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }

    /// Encode with canonical names; ordinals are never emitted.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
