//! Data models: the rule vocabularies, conventions, check results and
//! license metadata.

pub mod convention;
pub mod level;
pub mod license;
pub mod result;
pub mod rule;
pub mod rule_type;
pub mod vocab;

pub use convention::Convention;
pub use level::StrictnessLevel;
pub use license::{License, Licenses};
pub use result::{CheckResult, RuleResult};
pub use rule::Rule;
pub use rule_type::RuleType;
pub use vocab::{DecodeError, RawToken, Vocabulary};
