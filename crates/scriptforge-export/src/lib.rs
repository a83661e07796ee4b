//! # Scriptforge Export
//!
//! Gets a finished script out of the application: onto the system
//! clipboard or into a timestamped `.py` file. Both actions take the
//! plain fence-stripped script text, never the display markup.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while exporting a script.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Places `script` on the system clipboard.
pub fn copy_to_clipboard(script: &str) -> ExportResult<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
    clipboard
        .set_text(script)
        .map_err(|err| ExportError::Clipboard(err.to_string()))?;
    tracing::debug!(len = script.len(), "script copied to clipboard");
    Ok(())
}

/// Writes `script` into `dir` under a timestamped name and returns the
/// path written.
pub fn save_script(dir: &Path, script: &str) -> ExportResult<PathBuf> {
    let path = dir.join(script_filename(Local::now()));
    std::fs::write(&path, script)?;
    tracing::info!(path = %path.display(), "script saved");
    Ok(path)
}

/// File name for a script exported at `at`, e.g.
/// `revit_script_2024-05-01T09-30-00.py`. Colons and dots are avoided so
/// the name is valid on every platform.
fn script_filename(at: DateTime<Local>) -> String {
    format!("revit_script_{}.py", at.format("%Y-%m-%dT%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_filename_has_no_reserved_characters() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let name = script_filename(at);
        assert_eq!(name, "revit_script_2024-05-01T09-30-00.py");
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_save_script_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_script(dir.path(), "x = 1\n").unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(path.extension().unwrap(), "py");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "x = 1\n");
    }

    #[test]
    fn test_save_script_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            save_script(&missing, "x"),
            Err(ExportError::Io(_))
        ));
    }
}
