//! Evaluation output: per-rule outcomes plus summary counters.

use super::{Rule, StrictnessLevel, Vocabulary};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Outcome of one rule. Created once per rule, in rule order.
pub struct RuleResult {
    pub rule: Rule,
    pub passed: bool,
    pub message: String,
}

impl RuleResult {
    pub fn new(rule: Rule, passed: bool, message: impl Into<String>) -> Self {
        Self {
            rule,
            passed,
            message: message.into(),
        }
    }

    /// Status glyph shown in front of the rule line.
    pub fn glyph(&self) -> &'static str {
        if self.passed {
            return "✓";
        }
        match self.rule.level {
            StrictnessLevel::Required | StrictnessLevel::Prohibited => "✗",
            StrictnessLevel::Preferred => "⚠",
            StrictnessLevel::Optional => "○",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Aggregated outcome of one convention against one directory.
///
/// Counters are only ever bumped by [`CheckResult::push`], so
/// `pass + fail + warn + skip == results.len()` always holds.
pub struct CheckResult {
    convention: String,
    directory: String,
    results: Vec<RuleResult>,
    pass_count: usize,
    fail_count: usize,
    warn_count: usize,
    skip_count: usize,
}

impl CheckResult {
    pub fn new(convention: impl Into<String>, directory: impl Into<String>) -> Self {
        Self::with_capacity(convention, directory, 0)
    }

    pub fn with_capacity(
        convention: impl Into<String>,
        directory: impl Into<String>,
        capacity: usize,
    ) -> Self {
        Self {
            convention: convention.into(),
            directory: directory.into(),
            results: Vec::with_capacity(capacity),
            pass_count: 0,
            fail_count: 0,
            warn_count: 0,
            skip_count: 0,
        }
    }

    /// Append a rule outcome and classify it into exactly one counter.
    pub fn push(&mut self, result: RuleResult) {
        if result.passed {
            self.pass_count += 1;
        } else {
            match result.rule.level {
                StrictnessLevel::Required | StrictnessLevel::Prohibited => self.fail_count += 1,
                StrictnessLevel::Preferred => self.warn_count += 1,
                StrictnessLevel::Optional => self.skip_count += 1,
            }
        }
        self.results.push(result);
    }

    /// Sole failure signal for exit codes.
    pub fn has_failures(&self) -> bool {
        self.fail_count > 0
    }

    pub fn convention(&self) -> &str {
        &self.convention
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    pub fn fail_count(&self) -> usize {
        self.fail_count
    }

    pub fn warn_count(&self) -> usize {
        self.warn_count
    }

    pub fn skip_count(&self) -> usize {
        self.skip_count
    }

    /// Human report. Scripts scrape this; keep widths and labels stable.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "Checking convention '{}' against directory: {}\n\n",
            self.convention, self.directory
        );
        for r in &self.results {
            let _ = writeln!(
                out,
                "  {} {:<20} {:<12} {:<10} {}",
                r.glyph(),
                r.rule.value,
                r.rule.kind.as_str(),
                r.rule.level.as_str(),
                r.message
            );
        }
        let _ = writeln!(
            out,
            "\nSummary: {} passed, {} failed, {} warnings, {} skipped",
            self.pass_count, self.fail_count, self.warn_count, self.skip_count
        );
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }
}
