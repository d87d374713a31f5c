//! Reading import files and writing the import template.
//!
//! Provides the small amount of filesystem handling the picker needs:
//! - **Import**: Files are size-checked before reading so a mistaken pick of
//!   a huge binary does not stall the UI.
//! - **Template export**: Never overwrites; a numeric suffix is appended when
//!   the target name already exists.
//! - **Home expansion**: Paths typed as `~/...` resolve against the home
//!   directory.

use crate::engine::import::{TEMPLATE, TEMPLATE_FILE_NAME};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Read an import file as text, refusing anything larger than `max_bytes`.
pub fn read_import(path: &Path, max_bytes: u64) -> Result<String> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;
    if !meta.is_file() {
        bail!("{} is not a file", path.display());
    }
    if meta.len() > max_bytes {
        bail!(
            "{} is {} bytes, larger than the {} byte import limit",
            path.display(),
            meta.len(),
            max_bytes
        );
    }
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the import template into `dir` and return the path written.
pub fn write_template(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    let path = free_path(dir, TEMPLATE_FILE_NAME)
        .with_context(|| format!("No free file name for the template in {}", dir.display()))?;
    std::fs::write(&path, TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// First path in `dir` named `filename`, or `stem_N.ext` if taken.
fn free_path(dir: &Path, filename: &str) -> Option<PathBuf> {
    let path = dir.join(filename);
    if !path.exists() {
        return Some(path);
    }

    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let ext = Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    for i in 1..1000 {
        let new_name = if ext.is_empty() {
            format!("{}_{}", stem, i)
        } else {
            format!("{}_{}.{}", stem, i, ext)
        };
        let new_path = dir.join(&new_name);
        if !new_path.exists() {
            return Some(new_path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_template(dir.path()).unwrap();
        let second = write_template(dir.path()).unwrap();
        assert_eq!(first.file_name().unwrap(), "number_import_template.csv");
        assert_eq!(second.file_name().unwrap(), "number_import_template_1.csv");
        assert_eq!(std::fs::read_to_string(second).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_read_import_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.csv");
        std::fs::write(&path, "1,2,3\n4,5,6").unwrap();
        assert_eq!(read_import(&path, 1024).unwrap(), "1,2,3\n4,5,6");
        assert!(read_import(&path, 4).is_err());
        assert!(read_import(dir.path(), 1024).is_err());
        assert!(read_import(&dir.path().join("missing.csv"), 1024).is_err());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("data/x.csv"), PathBuf::from("data/x.csv"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.csv"), home.join("x.csv"));
        }
    }
}
