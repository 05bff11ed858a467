//! License catalog and custom license texts.
//!
//! The metadata catalog ships inside the binary (`data/licenses.json`, OSI
//! license API shape). Full license texts are user-provided: `license add`
//! stores a template under the configured license path, keyed by id, and
//! that file is what `license <id>` prints.

use crate::error::{OssifyError, Result};
use crate::models::{License, Licenses};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CATALOG: &str = include_str!("../data/licenses.json");

/// Decode the embedded catalog.
pub fn load() -> Result<Licenses> {
    Ok(serde_json::from_str(CATALOG)?)
}

/// Text for `license`: the user's custom text if one exists, otherwise the
/// published text locations.
pub fn license_text(license: &License, custom_dir: &Path) -> Result<String> {
    let custom = custom_dir.join(&license.id);
    if custom.is_file() {
        debug!(path = %custom.display(), "using custom license text");
        return fs::read_to_string(&custom)
            .map_err(|e| OssifyError::io(format!("failed to read {}", custom.display()), e));
    }
    if license.text.is_empty() {
        return Err(OssifyError::not_found(format!(
            "no text available for license {}",
            license.id
        )));
    }
    Ok(license
        .text
        .iter()
        .map(|t| format!("{} ({}): {}", t.title, t.media_type, t.url))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Copy `template` into `custom_dir` as the text for `id`.
pub fn add(custom_dir: &Path, id: &str, template: &Path) -> Result<PathBuf> {
    if id.is_empty() {
        return Err(OssifyError::config("invalid id: you must provide a id value"));
    }
    if id.contains(std::path::is_separator) || id == "." || id == ".." {
        return Err(OssifyError::config(format!("invalid id: {}", id)));
    }
    let data = fs::read(template)
        .map_err(|e| OssifyError::io(format!("failed to read {}", template.display()), e))?;
    fs::create_dir_all(custom_dir)
        .map_err(|e| OssifyError::io(format!("failed to create {}", custom_dir.display()), e))?;
    let target = custom_dir.join(id);
    fs::write(&target, data)
        .map_err(|e| OssifyError::io(format!("failed to write {}", target.display()), e))?;
    Ok(target)
}
