//! Export artifact materialization.
//!
//! # Responsibility
//! - Sanitize export file names.
//! - Write artifact bytes atomically so no partial file is ever visible.
//!
//! # Invariants
//! - Bytes land at the destination path only after a complete temp write;
//!   a failure leaves any previous artifact unchanged.

use crate::export::{ExportError, ExportResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const FORBIDDEN_CHARS: &[char] = &['/', '\\', '?', '%', '*', '|', '"', '<', '>', ':'];

static DOUBLE_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("valid space regex"));

/// Sanitizes a raw export file name.
///
/// Filesystem-hostile characters become `-`, runs of spaces collapse to
/// one, and surrounding whitespace is trimmed. The extension is the
/// caller's concern.
pub fn sanitize_file_name(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '-' } else { c })
        .collect();
    DOUBLE_SPACE_RE.replace_all(&replaced, " ").trim().to_string()
}

/// Writes bytes to `path` atomically.
///
/// The content goes to a temp file in the destination directory first and
/// is moved into place by rename, so readers never observe a partially
/// written or zero-byte artifact.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = match dir {
        Some(dir) => NamedTempFile::new_in(dir),
        None => NamedTempFile::new(),
    }
    .map_err(io_error)?;

    temp.write_all(bytes).map_err(io_error)?;
    temp.flush().map_err(io_error)?;
    temp.persist(path).map_err(|err| ExportError::Io {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{sanitize_file_name, write_atomic};
    use crate::export::ExportError;

    #[test]
    fn sanitize_replaces_forbidden_characters() {
        assert_eq!(
            sanitize_file_name(r#"Registro: 2026/enero?"#),
            "Registro- 2026-enero-"
        );
    }

    #[test]
    fn sanitize_collapses_spaces_and_trims() {
        assert_eq!(sanitize_file_name("  Mi   registro  "), "Mi registro");
    }

    #[test]
    fn sanitize_keeps_already_clean_names() {
        assert_eq!(sanitize_file_name("Registro 2026"), "Registro 2026");
    }

    #[test]
    fn write_atomic_replaces_previous_content_completely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registro.md");

        write_atomic(&path, b"primera version").unwrap();
        write_atomic(&path, b"segunda").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"segunda");
    }

    #[test]
    fn write_atomic_to_missing_directory_fails_without_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_existe").join("registro.md");

        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(!path.exists());
    }
}
