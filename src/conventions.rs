//! Convention sources: the built-in set, the user convention directory, and
//! single convention files.
//!
//! Loading user conventions is soft-failing: a file that cannot be read or
//! decoded becomes a [`LoadEntry::Skipped`] carrying the reason, and the rest
//! of the directory still loads.

use crate::config::Config;
use crate::error::{OssifyError, Result};
use crate::models::{Convention, Rule, RuleType, StrictnessLevel};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use RuleType::{Directory, File};
use StrictnessLevel::{Optional, Prohibited, Required};

/// A convention compiled into the binary.
pub struct BuiltinConvention {
    pub name: &'static str,
    pub rules: &'static [(StrictnessLevel, RuleType, &'static str)],
}

impl BuiltinConvention {
    pub fn to_convention(&self) -> Convention {
        Convention::new(
            self.name,
            self.rules
                .iter()
                .map(|&(level, kind, value)| Rule::new(level, kind, value))
                .collect(),
        )
    }
}

pub static STANDARD_DISTRIBUTION: BuiltinConvention = BuiltinConvention {
    name: "Standard Distribution",
    rules: &[
        (Required, Directory, "dist"),
        (Required, Directory, "docs"),
        (Optional, Directory, "lib"),
        (Required, Directory, "src"),
        (Required, Directory, "test"),
        (Optional, Directory, "tools"),
        (Required, File, "LICENSE"),
        (Required, File, "README.md"),
    ],
};

pub static GO: BuiltinConvention = BuiltinConvention {
    name: "Go",
    rules: &[
        (Optional, Directory, "configs"),
        (Optional, Directory, "init"),
        (Optional, Directory, "scripts"),
        (Required, Directory, "docs"),
        (Optional, Directory, "tools"),
        (Optional, Directory, "deployments"),
        (Optional, Directory, "test"),
        (Optional, Directory, "build"),
        (Optional, Directory, "vendor"),
        (Prohibited, Directory, "src"),
        (Required, File, "LICENSE"),
        (Required, File, "README.md"),
    ],
};

pub static BUILTIN_CONVENTIONS: [&BuiltinConvention; 2] = [&STANDARD_DISTRIBUTION, &GO];

pub fn builtins() -> Vec<Convention> {
    BUILTIN_CONVENTIONS
        .iter()
        .map(|b| b.to_convention())
        .collect()
}

#[derive(Debug)]
/// Outcome for one file of the user convention directory.
pub enum LoadEntry {
    Loaded(Convention),
    Skipped { path: PathBuf, reason: String },
}

/// Read every non-directory entry of `dir`, sorted by file name.
///
/// A missing directory yields no entries; any other failure to list the
/// directory is an error.
pub fn scan_dir(dir: &Path) -> Result<Vec<LoadEntry>> {
    let listing = match fs::read_dir(dir) {
        Ok(l) => l,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(OssifyError::io(
                format!("failed to list {}", dir.display()),
                e,
            ))
        }
    };
    let mut files: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| !p.is_dir())
        .collect();
    files.sort();

    Ok(files.into_iter().map(load_entry).collect())
}

fn load_entry(path: PathBuf) -> LoadEntry {
    let data = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            return LoadEntry::Skipped {
                path,
                reason: e.to_string(),
            }
        }
    };
    match serde_json::from_str::<Convention>(&data) {
        Ok(c) => LoadEntry::Loaded(c),
        Err(e) => LoadEntry::Skipped {
            path,
            reason: e.to_string(),
        },
    }
}

/// Built-in conventions followed by the user's, in file name order.
pub fn load(config: &Config) -> Result<Vec<Convention>> {
    if config.convention_path.is_empty() {
        return Err(OssifyError::config("invalid convention path"));
    }
    let mut all = builtins();
    for entry in scan_dir(Path::new(&config.convention_path))? {
        match entry {
            LoadEntry::Loaded(c) => {
                debug!(name = %c.name, rules = c.rules.len(), "loaded user convention");
                all.push(c);
            }
            LoadEntry::Skipped { path, reason } => {
                warn!(path = %path.display(), %reason, "skipping convention file");
            }
        }
    }
    Ok(all)
}

/// Case-insensitive exact name lookup. The first match wins, so a built-in
/// takes precedence over a user convention of the same name.
pub fn find_by_name<'a>(conventions: &'a [Convention], name: &str) -> Option<&'a Convention> {
    let wanted = name.to_lowercase();
    conventions
        .iter()
        .find(|c| c.name.to_lowercase() == wanted)
}

/// Load a convention named on the command line.
///
/// An empty name falls back to the file name; an empty rule list is rejected.
pub fn load_from_file(path: &Path) -> Result<Convention> {
    let data = fs::read_to_string(path).map_err(|e| OssifyError::io("failed to read file", e))?;
    let mut convention: Convention = serde_json::from_str(&data)?;
    if convention.name.is_empty() {
        convention.name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
    }
    if convention.rules.is_empty() {
        return Err(OssifyError::invalid_convention(
            "convention must have at least one rule",
        ));
    }
    Ok(convention)
}

/// Turn a convention id into a file stem.
pub fn sanitize_id(id: &str) -> String {
    id.replace([' ', '/'], "-").to_lowercase()
}

/// Store a user convention as `<dir>/<id>.json`; `id` defaults to the
/// convention name. Existing files are never overwritten.
pub fn add(dir: &Path, convention: &Convention, id: Option<&str>) -> Result<PathBuf> {
    if convention.name.is_empty() {
        return Err(OssifyError::invalid_convention("convention must have a name"));
    }
    if convention.rules.is_empty() {
        return Err(OssifyError::invalid_convention(
            "convention must have at least one rule",
        ));
    }
    let id = sanitize_id(id.filter(|s| !s.is_empty()).unwrap_or(&convention.name));
    fs::create_dir_all(dir)
        .map_err(|e| OssifyError::io(format!("failed to create {}", dir.display()), e))?;
    let target = dir.join(format!("{}.json", id));
    if target.exists() {
        return Err(OssifyError::invalid_convention(format!(
            "convention '{}' already exists at {}",
            id,
            target.display()
        )));
    }
    let body = serde_json::to_string_pretty(convention)?;
    fs::write(&target, body)
        .map_err(|e| OssifyError::io(format!("failed to write {}", target.display()), e))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_for(dir: &Path) -> Config {
        Config {
            license_path: String::new(),
            convention_path: dir.to_string_lossy().to_string(),
        }
    }

    fn names(conventions: &[Convention]) -> Vec<&str> {
        conventions.iter().map(|c| c.name.as_str()).collect()
    }

    fn write_convention(dir: &Path, file: &str, name: &str, value: &str) {
        let c = Convention::new(name, vec![Rule::new(Required, File, value)]);
        fs::write(dir.join(file), serde_json::to_string(&c).unwrap()).unwrap();
    }

    #[test]
    fn test_builtins_match_expected_rules() {
        let b = builtins();
        assert_eq!(names(&b), ["Standard Distribution", "Go"]);
        assert_eq!(b[0].rules.len(), 8);
        assert_eq!(b[1].rules.len(), 12);
        assert_eq!(b[1].rules[9], Rule::new(Prohibited, Directory, "src"));
    }

    #[test]
    fn test_load_defaults_when_dir_is_empty() {
        let dir = tempdir().unwrap();
        let all = load(&config_for(dir.path())).unwrap();
        assert_eq!(names(&all), ["Standard Distribution", "Go"]);
    }

    #[test]
    fn test_load_defaults_when_dir_is_missing() {
        let dir = tempdir().unwrap();
        let all = load(&config_for(&dir.path().join("nope"))).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_load_appends_user_conventions_in_file_order() {
        let dir = tempdir().unwrap();
        write_convention(dir.path(), "python.json", "Python", "setup.py");
        write_convention(dir.path(), "nodejs.json", "Node.js", "package.json");
        let all = load(&config_for(dir.path())).unwrap();
        assert_eq!(names(&all), ["Standard Distribution", "Go", "Node.js", "Python"]);
    }

    #[test]
    fn test_invalid_files_and_subdirs_are_skipped() {
        let dir = tempdir().unwrap();
        write_convention(dir.path(), "valid.json", "Valid", "README.md");
        fs::write(dir.path().join("invalid.json"), "this is not valid json {{{").unwrap();
        fs::write(
            dir.path().join("badlevel.json"),
            r#"{"name":"Bad","rules":[{"level":"unspecified","type":"file","value":"x"}]}"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let entries = scan_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 3);
        let skipped: Vec<String> = entries
            .iter()
            .filter_map(|e| match e {
                LoadEntry::Skipped { path, .. } => {
                    Some(path.file_name().unwrap().to_string_lossy().to_string())
                }
                LoadEntry::Loaded(_) => None,
            })
            .collect();
        assert_eq!(skipped, ["badlevel.json", "invalid.json"]);

        let all = load(&config_for(dir.path())).unwrap();
        assert_eq!(names(&all), ["Standard Distribution", "Go", "Valid"]);
    }

    #[test]
    fn test_empty_convention_path_is_an_error() {
        let err = load(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("invalid convention path"));
    }

    #[test]
    fn test_find_by_name() {
        let all = vec![
            Convention::new("Go", vec![Rule::new(Required, File, "go.mod")]),
            Convention::new("Standard Distribution", vec![Rule::new(Required, Directory, "src")]),
            Convention::new("Node.js", vec![Rule::new(Required, File, "package.json")]),
        ];
        let cases = [
            ("Go", Some("Go")),
            ("go", Some("Go")),
            ("GO", Some("Go")),
            ("standard distribution", Some("Standard Distribution")),
            ("Python", None),
            ("Stand", None),
        ];
        for (search, want) in cases {
            assert_eq!(
                find_by_name(&all, search).map(|c| c.name.as_str()),
                want,
                "search {:?}",
                search
            );
        }
    }

    #[test]
    fn test_builtin_wins_over_same_named_user_convention() {
        let mut all = builtins();
        all.push(Convention::new("go", vec![Rule::new(Required, File, "go.work")]));
        let found = find_by_name(&all, "Go").unwrap();
        assert_eq!(found.name, "Go");
        assert_eq!(found.rules.len(), GO.rules.len());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("multi.json");
        fs::write(
            &p,
            r#"{"name":"Multi Rule","rules":[
                {"level":"required","type":"file","value":"README.md"},
                {"level":"optional","type":"directory","value":"src"},
                {"level":"prohibited","type":"directory","value":"vendor"}]}"#,
        )
        .unwrap();
        let c = load_from_file(&p).unwrap();
        assert_eq!(c.name, "Multi Rule");
        assert_eq!(c.rules.len(), 3);
    }

    #[test]
    fn test_load_from_file_errors() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not valid json").unwrap();
        assert!(load_from_file(&bad).unwrap_err().to_string().contains("invalid JSON"));

        let empty = dir.path().join("empty.json");
        fs::write(&empty, r#"{"name":"Empty Rules","rules":[]}"#).unwrap();
        assert!(load_from_file(&empty)
            .unwrap_err()
            .to_string()
            .contains("at least one rule"));

        let missing = load_from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(missing.to_string().contains("failed to read file"));
    }

    #[test]
    fn test_load_from_file_uses_file_name_when_unnamed() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("anon.json");
        fs::write(&p, r#"{"rules":[{"level":"required","type":"file","value":"README.md"}]}"#)
            .unwrap();
        assert_eq!(load_from_file(&p).unwrap().name, "anon.json");
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("My Team/Rust"), "my-team-rust");
    }

    #[test]
    fn test_add_writes_and_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let conv_dir = dir.path().join("conventions");
        let c = Convention::new("My Convention", vec![Rule::new(Required, Directory, "src")]);

        let path = add(&conv_dir, &c, None).unwrap();
        assert_eq!(path, conv_dir.join("my-convention.json"));
        let stored: Convention =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored, c);

        let err = add(&conv_dir, &c, None).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        let custom = add(&conv_dir, &c, Some("Team X")).unwrap();
        assert_eq!(custom, conv_dir.join("team-x.json"));

        let all = load(&config_for(&conv_dir)).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_add_validates_convention() {
        let dir = tempdir().unwrap();
        let unnamed = Convention::new("", vec![Rule::new(Required, File, "x")]);
        assert!(add(dir.path(), &unnamed, None).is_err());
        let empty = Convention::new("Empty", vec![]);
        assert!(add(dir.path(), &empty, None).is_err());
    }
}
