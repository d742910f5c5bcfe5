//! Export composition: selection, Markdown, paginated PDF, file output.
//!
//! # Responsibility
//! - Turn a selected, ordered slice of the journal into document artifacts.
//!
//! # Invariants
//! - Composition is deterministic: identical input produces identical
//!   output bytes, page counts and break positions.
//! - A failed or cancelled export leaves previously written artifacts
//!   untouched; no partial file ever lands at the destination path.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub mod layout;
pub mod markdown;
pub mod pdf;
pub mod selection;
pub mod writer;

pub type ExportResult<T> = Result<T, ExportError>;

/// Failure surface for export generation and materialization.
#[derive(Debug)]
pub enum ExportError {
    /// Temp/destination write failure during output materialization.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The in-flight composition was cancelled; the result was discarded.
    Cancelled,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "export write failed at `{}`: {source}", path.display())
            }
            Self::Cancelled => write!(f, "export cancelled"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Cancelled => None,
        }
    }
}

/// Shared cancellation flag for long-running export composition.
///
/// Cloning shares the flag. Cancellation discards the in-flight result;
/// the caller starts a fresh computation with a fresh token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the computation holding this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
