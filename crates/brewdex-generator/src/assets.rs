//! Static asset copying.
//!
//! Copies the static directory (stylesheets, images, robots.txt) into the
//! output directory before pages are rendered.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Asset copying errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured static directory does not exist.
    #[error("static directory not found: {}", .0.display())]
    MissingSource(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copy every file under `source_dir` into `dest_dir`, preserving the
/// directory layout. Hidden files and directories are skipped. Returns the
/// number of files copied. A missing source directory aborts the build like
/// any other filesystem error.
pub fn copy_assets(source_dir: &Path, dest_dir: &Path) -> Result<usize> {
    if !source_dir.is_dir() {
        return Err(AssetError::MissingSource(source_dir.to_path_buf()));
    }

    info!(
        source = %source_dir.display(),
        dest = %dest_dir.display(),
        "copying static assets"
    );

    let count = copy_dir(source_dir, dest_dir)?;
    info!(count, "assets copied");
    Ok(count)
}

fn copy_dir(source: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest)?;
    let mut count = 0;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();

        // Skip hidden files/directories
        if path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'))
        {
            continue;
        }

        let target = dest.join(entry.file_name());
        if path.is_dir() {
            count += copy_dir(&path, &target)?;
        } else if path.is_file() {
            fs::copy(&path, &target)?;
            debug!(path = %target.display(), "copied asset");
            count += 1;
        }
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_copy_nested_assets() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        fs::write(source.path().join("style.css"), "body {}").unwrap();
        fs::create_dir(source.path().join("img")).unwrap();
        fs::write(source.path().join("img/logo.svg"), "<svg/>").unwrap();

        let count = copy_assets(source.path(), dest.path()).unwrap();

        assert_eq!(count, 2);
        assert!(dest.path().join("style.css").exists());
        assert!(dest.path().join("img/logo.svg").exists());
    }

    #[test]
    fn test_hidden_files_skipped() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        fs::write(source.path().join(".gitignore"), "output").unwrap();
        fs::write(source.path().join("robots.txt"), "User-agent: *").unwrap();

        let count = copy_assets(source.path(), dest.path()).unwrap();

        assert_eq!(count, 1);
        assert!(!dest.path().join(".gitignore").exists());
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let dest = TempDir::new().unwrap();
        let err = copy_assets(Path::new("does/not/exist"), dest.path()).unwrap_err();
        assert!(matches!(err, AssetError::MissingSource(_)));
        assert!(err.to_string().contains("does/not/exist"));
    }
}
