//! License metadata in the shape published by the OSI license API.

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// An identifier within a naming scheme (e.g. SPDX, DEP5).
pub struct Identifier {
    pub scheme: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub note: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherName {
    #[serde(default)]
    pub note: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Where the full text of a license can be fetched.
pub struct Text {
    pub title: String,
    pub url: String,
    pub media_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub superseded_by: Option<String>,
    #[serde(default)]
    pub identifiers: Vec<Identifier>,
    #[serde(default)]
    pub text: Vec<Text>,
    #[serde(default)]
    pub other_names: Option<Vec<OtherName>>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl License {
    /// One-line summary: padded id followed by the full name.
    pub fn render(&self) -> String {
        format!("{:<20}({})", self.id, self.name)
    }

    /// Multi-section description. `color` toggles ANSI styling.
    pub fn render_details(&self, color: bool) -> String {
        let mut out = String::new();
        let head = self.render();
        if color {
            let _ = writeln!(out, "{}", head.bold());
        } else {
            let _ = writeln!(out, "{}", head);
        }

        if !self.keywords.is_empty() {
            let kw = self.keywords.join(", ");
            if color {
                let _ = writeln!(out, "{}", kw.italic());
            } else {
                let _ = writeln!(out, "{}", kw);
            }
        }

        if let Some(by) = &self.superseded_by {
            let warn = format!("This license is superseded by {}", by);
            if color {
                let _ = writeln!(out, "{}", warn.red().italic());
            } else {
                let _ = writeln!(out, "{}", warn);
            }
        }

        if let Some(names) = self.other_names.as_ref().filter(|n| !n.is_empty()) {
            section(&mut out, "Common names", color);
            for other in names {
                let _ = writeln!(out, "  * {}", other.name);
            }
        }

        if !self.identifiers.is_empty() {
            section(&mut out, "License Standards", color);
            for id in &self.identifiers {
                let _ = writeln!(out, "  * {:<10} {}", id.scheme, id.identifier);
            }
        }

        if !self.links.is_empty() {
            section(&mut out, "Links", color);
            for link in &self.links {
                out.push_str("  * ");
                out.push_str(&link.url);
                if let Some(note) = &link.note {
                    let note = format!(" ({})", note);
                    if color {
                        let _ = write!(out, "{}", note.italic());
                    } else {
                        out.push_str(&note);
                    }
                }
                out.push('\n');
            }
        }
        out
    }

    fn matches(&self, term: &str) -> bool {
        if self.id.to_lowercase().contains(&term.to_lowercase()) {
            return true;
        }
        let by_identifier = self.identifiers.iter().any(|i| {
            (i.scheme == "SPDX" && i.identifier == term) || fuzzy_match_fold(term, &i.identifier)
        });
        if by_identifier || fuzzy_match_fold(term, &self.name) {
            return true;
        }
        self.other_names
            .iter()
            .flatten()
            .any(|o| fuzzy_match_fold(term, &o.name))
    }
}

fn section(out: &mut String, title: &str, color: bool) {
    out.push('\n');
    if color {
        let _ = writeln!(out, "{}", title.bold());
    } else {
        let _ = writeln!(out, "{}", title);
    }
}

/// Case-insensitive subsequence match: every char of `needle` appears in
/// `haystack` in order, gaps allowed.
pub fn fuzzy_match_fold(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars().flat_map(char::to_lowercase);
    needle
        .chars()
        .flat_map(char::to_lowercase)
        .all(|n| hay.any(|h| h == n))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// The license catalog with its lookup operations.
pub struct Licenses(pub Vec<License>);

impl Licenses {
    pub fn iter(&self) -> std::slice::Iter<'_, License> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First license whose id contains `id`, ignoring case.
    pub fn find_by_id(&self, id: &str) -> Option<&License> {
        let needle = id.to_lowercase();
        self.0.iter().find(|l| l.id.to_lowercase().contains(&needle))
    }

    pub fn find_by_keyword(&self, keyword: &str) -> Vec<&License> {
        self.0
            .iter()
            .filter(|l| l.keywords.iter().any(|k| k == keyword))
            .collect()
    }

    /// Loose free-form search across id, identifiers, name and other names.
    pub fn search(&self, term: &str) -> Vec<&License> {
        self.0.iter().filter(|l| l.matches(term)).collect()
    }
}
