//! Named, ordered rule sets. One JSON document per convention.

use super::{CheckResult, Rule, Vocabulary};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Convention {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Convention {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Tabular listing used by `convention list`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.name);
        if self.rules.is_empty() {
            out.push_str(": No Rules Specified!\n");
            return out;
        }
        out.push('\n');
        for r in &self.rules {
            let _ = writeln!(
                out,
                "  - {:<20} {:<15} {:<10}",
                r.value,
                r.kind.as_str(),
                r.level.as_str()
            );
        }
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    /// Shorthand for [`crate::check::evaluate`].
    pub fn evaluate(&self, target_dir: &Path) -> CheckResult {
        crate::check::evaluate(self, target_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RuleType, StrictnessLevel};

    #[test]
    fn test_render_without_rules() {
        let c = Convention::new("Empty", vec![]);
        assert_eq!(c.render(), "Empty: No Rules Specified!\n");
    }

    #[test]
    fn test_render_aligns_columns_in_rule_order() {
        let c = Convention::new(
            "Go",
            vec![
                Rule::new(StrictnessLevel::Optional, RuleType::Directory, "configs"),
                Rule::new(StrictnessLevel::Required, RuleType::File, "LICENSE"),
            ],
        );
        let want = concat!(
            "Go\n",
            "  - configs              directory       optional  \n",
            "  - LICENSE              file            required  \n",
        );
        assert_eq!(c.render(), want);
    }

    #[test]
    fn test_decode_document() {
        let c: Convention = serde_json::from_str(
            r#"{"name":"Node","rules":[{"level":"required","type":"file","value":"package.json"},{"level":0,"type":1,"value":"bower_components"}]}"#,
        )
        .unwrap();
        assert_eq!(c.name, "Node");
        assert_eq!(c.rules.len(), 2);
        assert_eq!(c.rules[1].level, StrictnessLevel::Prohibited);
    }

    #[test]
    fn test_one_bad_rule_fails_the_document() {
        let res = serde_json::from_str::<Convention>(
            r#"{"name":"Bad","rules":[{"level":"required","type":"file","value":"a"},{"level":"sometimes","type":"file","value":"b"}]}"#,
        );
        assert!(res.is_err());
    }
}
