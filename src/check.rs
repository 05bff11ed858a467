//! Convention evaluation against a directory tree.
//!
//! Walks the rule list once, probes the filesystem for each rule, applies the
//! decision table and folds the outcome into a `CheckResult`. Nothing here
//! returns an error: unreadable paths count as absent, bad globs and
//! unsupported rule types become failed rule results.

use crate::models::{CheckResult, Convention, Rule, RuleResult, RuleType, StrictnessLevel};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What the filesystem says about one rule target.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Probe {
    /// Target exists with the kind the rule asks for.
    Present,
    /// Target is missing, unreadable, or of the other kind.
    Absent,
    Matched(usize),
    InvalidPattern(String),
    Unsupported,
}

/// Evaluate every rule of `convention` against `target_dir`, in order.
///
/// The caller is expected to have verified that `target_dir` exists and is a
/// directory.
pub fn evaluate(convention: &Convention, target_dir: &Path) -> CheckResult {
    let mut result = CheckResult::with_capacity(
        convention.name.as_str(),
        target_dir.to_string_lossy(),
        convention.rules.len(),
    );
    for rule in &convention.rules {
        let outcome = evaluate_rule(rule, target_dir);
        debug!(
            value = %rule.value,
            kind = %rule.kind,
            level = %rule.level,
            passed = outcome.passed,
            message = %outcome.message,
            "rule evaluated"
        );
        result.push(outcome);
    }
    info!(
        convention = %convention.name,
        directory = %target_dir.display(),
        passed = result.pass_count(),
        failed = result.fail_count(),
        warnings = result.warn_count(),
        skipped = result.skip_count(),
        "convention evaluated"
    );
    result
}

/// Evaluate a single rule.
pub fn evaluate_rule(rule: &Rule, target_dir: &Path) -> RuleResult {
    let (passed, message) = decide(rule, &probe(rule, target_dir));
    RuleResult::new(rule.clone(), passed, message)
}

fn probe(rule: &Rule, target_dir: &Path) -> Probe {
    match rule.kind {
        RuleType::Directory => probe_entry(&resolve(target_dir, &rule.value), true),
        RuleType::File => probe_entry(&resolve(target_dir, &rule.value), false),
        RuleType::Pattern => probe_pattern(target_dir, &rule.value),
        RuleType::Unspecified | RuleType::FilesystemPolicy => Probe::Unsupported,
    }
}

/// Join a rule value under the target directory. A leading separator does not
/// escape the target; `..` segments are left untouched.
fn resolve(target_dir: &Path, value: &str) -> PathBuf {
    target_dir.join(value.trim_start_matches(std::path::is_separator))
}

fn probe_entry(path: &Path, want_dir: bool) -> Probe {
    // metadata follows symlinks, so a link to a directory counts as one
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() == want_dir => Probe::Present,
        _ => Probe::Absent,
    }
}

const GLOB_META: &[char] = &['*', '?', '[', '\\'];
const BAD_PATTERN: &str = "syntax error in pattern";

// Names within one directory; `*` and `?` never cross a separator.
const SEGMENT_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug)]
enum Segment {
    Literal(String),
    Wild(Pattern),
}

/// Expand a pattern under `target_dir` one path segment at a time.
///
/// `*` matches within a single segment, so `**` is the same as `*`. Classes
/// negate with `^`, and `\` escapes the next character. The whole pattern is
/// validated before any directory is read.
fn probe_pattern(target_dir: &Path, value: &str) -> Probe {
    let segments = match compile_segments(value) {
        Ok(s) => s,
        Err(e) => return Probe::InvalidPattern(e.to_string()),
    };
    let mut found = vec![target_dir.to_path_buf()];
    for segment in &segments {
        found = match segment {
            Segment::Literal(name) => found
                .into_iter()
                .map(|p| p.join(name))
                .filter(|p| fs::symlink_metadata(p).is_ok())
                .collect(),
            Segment::Wild(pattern) => found
                .iter()
                .flat_map(|dir| matching_children(dir, pattern))
                .collect(),
        };
        if found.is_empty() {
            break;
        }
    }
    Probe::Matched(found.len())
}

/// Split into cleaned segments: empty and `.` segments drop out and `..`
/// cancels the segment before it.
fn compile_segments(value: &str) -> Result<Vec<Segment>, &'static str> {
    let mut parts: Vec<&str> = Vec::new();
    for part in value.split('/') {
        match part {
            "" | "." => {}
            ".." if parts.last().is_some_and(|p| *p != "..") => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    parts
        .into_iter()
        .map(|part| {
            if part.contains(GLOB_META) {
                let translated = translate_segment(part)?;
                Pattern::new(&translated)
                    .map(Segment::Wild)
                    .map_err(|_| BAD_PATTERN)
            } else {
                Ok(Segment::Literal(part.to_string()))
            }
        })
        .collect()
}

/// Rewrite one segment into `glob::Pattern` syntax.
fn translate_segment(segment: &str) -> Result<String, &'static str> {
    let mut out = String::with_capacity(segment.len() + 2);
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push('*');
            }
            '?' => out.push('?'),
            '\\' => {
                let escaped = chars.next().ok_or(BAD_PATTERN)?;
                out.push_str(&Pattern::escape(&escaped.to_string()));
            }
            '[' => {
                let negated = chars.peek() == Some(&'^');
                if negated {
                    chars.next();
                }
                let mut body = String::new();
                loop {
                    match chars.next() {
                        None => return Err(BAD_PATTERN),
                        Some(']') if body.is_empty() => return Err(BAD_PATTERN),
                        Some(']') => break,
                        Some('\\') => body.push(chars.next().ok_or(BAD_PATTERN)?),
                        Some(m) => body.push(m),
                    }
                }
                if body.starts_with('-') {
                    return Err(BAD_PATTERN);
                }
                // A leading `!` would read as negation; it is a plain member here.
                if body == "!" && !negated {
                    out.push('!');
                    continue;
                }
                if body.starts_with('!') && body.len() > 1 {
                    body = format!("{}!", &body[1..]);
                }
                out.push('[');
                if negated {
                    out.push('!');
                }
                out.push_str(&body);
                out.push(']');
            }
            other => out.push_str(&Pattern::escape(&other.to_string())),
        }
    }
    Ok(out)
}

fn matching_children(dir: &Path, pattern: &Pattern) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            pattern.matches_with(&entry.file_name().to_string_lossy(), SEGMENT_MATCH)
        })
        .map(|entry| entry.path())
        .collect()
}

/// The decision table, keyed on probe outcome and strictness level.
fn decide(rule: &Rule, probe: &Probe) -> (bool, String) {
    use StrictnessLevel::*;
    match (probe, rule.level) {
        (Probe::Present, Prohibited) => (false, format!("prohibited {} exists", rule.kind)),
        (Probe::Present, _) => (true, "found".to_string()),

        (Probe::Absent, Prohibited) => (true, "not present (good)".to_string()),
        (Probe::Absent, Required) => (false, "missing".to_string()),
        (Probe::Absent, Preferred) => (false, "recommended but missing".to_string()),
        (Probe::Absent, Optional) => (true, "not present (optional)".to_string()),

        (Probe::Matched(0), Prohibited) => (true, "no matches (good)".to_string()),
        (Probe::Matched(0), Required) => (false, "no matches".to_string()),
        (Probe::Matched(0), Preferred) => (false, "recommended but no matches".to_string()),
        (Probe::Matched(0), Optional) => (true, "no matches (optional)".to_string()),
        (Probe::Matched(n), Prohibited) => {
            (false, format!("prohibited pattern matched {} item(s)", n))
        }
        (Probe::Matched(n), _) => (true, format!("matched {} item(s)", n)),

        (Probe::InvalidPattern(e), _) => (false, format!("invalid pattern: {}", e)),
        (Probe::Unsupported, _) => (false, "unknown rule type".to_string()),
    }
}
