//! File relocation into month-named directories
//!
//! Destination is `<dest_root>/<full English month name>/<file name>`.
//! The move is a plain rename, so it is atomic on one filesystem and
//! leaves the source untouched on failure. Name collisions at the
//! destination are resolved with a numeric suffix rather than
//! overwriting.

use crate::error::{Error, Result};
use crate::task::Task;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Move the task's source file into the month directory for `timestamp`.
///
/// Creates the month directory if needed (already existing is fine,
/// workers race on this), then renames the source into it. Returns the
/// final destination path. On success one status line is printed to
/// stdout.
pub fn relocate(task: &Task, timestamp: &NaiveDateTime) -> Result<PathBuf> {
    let dest_dir = task.dest_root.join(timestamp.format("%B").to_string());

    fs::create_dir_all(&dest_dir).map_err(|e| Error::CreateDir {
        dir: dest_dir.clone(),
        source: e,
    })?;

    let dest_path = resolve_collision(dest_dir.join(&task.name), &task.name, &dest_dir)?;

    fs::rename(&task.source, &dest_path).map_err(|e| Error::Move {
        name: task.name.clone(),
        dir: dest_dir.clone(),
        source: e,
    })?;

    debug!(source = %task.source.display(), dest = %dest_path.display(), "Relocated file");
    println!("Moved '{}' to '{}' ...", task.name, dest_dir.display());

    Ok(dest_path)
}

/// Resolve a destination collision by adding a numeric suffix
fn resolve_collision(mut path: PathBuf, name: &str, dest_dir: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path);
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let parent = path.parent().map(|p| p.to_path_buf()).unwrap_or_default();

    for i in 1..10000 {
        let new_name = format!("{}_{}{}", stem, i, extension);
        path = parent.join(new_name);
        if !path.exists() {
            return Ok(path);
        }
    }

    Err(Error::Move {
        name: name.to_string(),
        dir: dest_dir.to_path_buf(),
        source: std::io::Error::other("could not resolve destination name collision"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn june_15() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_relocate_into_month_directory() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.jpg");
        fs::write(&source, b"payload").unwrap();
        let out = dir.path().join("out");

        let task = Task::new("a.jpg".into(), source.clone(), out.clone());
        let dest = relocate(&task, &june_15()).unwrap();

        assert_eq!(dest, out.join("June").join("a.jpg"));
        assert!(dest.exists());
        assert!(!source.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn test_relocate_keeps_source_on_failure() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("gone.jpg");
        fs::write(&source, b"x").unwrap();

        // A file where the month directory should be makes creation fail.
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("June"), b"not a directory").unwrap();

        let task = Task::new("gone.jpg".into(), source.clone(), out);
        let err = relocate(&task, &june_15()).unwrap_err();

        assert!(matches!(err, Error::CreateDir { .. }));
        assert!(source.exists());
    }

    #[test]
    fn test_collision_gets_numeric_suffix() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let month = out.join("June");
        fs::create_dir_all(&month).unwrap();
        fs::write(month.join("a.jpg"), b"first").unwrap();

        let source = dir.path().join("a.jpg");
        fs::write(&source, b"second").unwrap();

        let task = Task::new("a.jpg".into(), source, out.clone());
        let dest = relocate(&task, &june_15()).unwrap();

        assert_eq!(dest, month.join("a_1.jpg"));
        assert_eq!(fs::read(month.join("a.jpg")).unwrap(), b"first");
        assert_eq!(fs::read(&dest).unwrap(), b"second");
    }

    #[test]
    fn test_month_name_is_full_english() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(dt.format("%B").to_string(), "January");
    }
}
