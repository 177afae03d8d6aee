//! Error types for the checklist engine.
//!
//! Engine operations return typed errors so the presentation layer can decide
//! what is fatal. Parse and per-record problems are contained in output data;
//! structural problems (bad catalog, bad snapshot) surface here once.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering a substep description template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template names a placeholder that is not part of the identifier set.
    #[error("unknown placeholder '{{{name}}}' in template for '{substep}'")]
    UnknownPlaceholder {
        /// Substep whose template failed
        substep: String,
        /// Placeholder name as written in the template
        name: String,
    },
    /// A `{` without a closing `}`, or a lone `}`.
    #[error("malformed template for '{substep}': unbalanced brace at byte {offset}")]
    UnbalancedBrace {
        /// Substep whose template failed
        substep: String,
        /// Byte offset of the offending brace
        offset: usize,
    },
}

/// Why a snapshot could not be restored.
#[derive(Debug, Error)]
pub enum SnapshotLoadError {
    /// The snapshot file does not exist.
    #[error("session file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but is not a readable YAML document.
    #[error("malformed session document: {0}")]
    Malformed(String),
    /// The document parsed but does not fit the loaded catalog.
    #[error("session does not match the catalog: {0}")]
    Shape(String),
}

/// Errors returned by the session command handlers.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The rack string has no `rk<digits>` token. Non-fatal: the raw input is
    /// stored and previously derived identifiers are kept.
    #[error("rack name '{0}' does not contain an rk<number> token")]
    Parse(String),
    /// The step is not part of the catalog.
    #[error("unknown step '{0}'")]
    UnknownStep(String),
    /// The substep index is out of range for the step.
    #[error("substep index {index} out of range for '{step}' ({len} substeps)")]
    InvalidIndex {
        /// Step name
        step: String,
        /// Requested index
        index: usize,
        /// Number of substeps in the step
        len: usize,
    },
    /// Template rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Snapshot could not be restored; in-memory state is untouched.
    #[error(transparent)]
    SnapshotLoad(#[from] SnapshotLoadError),
    /// A snapshot or generated table could not be serialized.
    #[error("failed to serialize {0}")]
    Serialize(String),
    /// Writing a snapshot or artifact failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Returns true for errors that leave the session usable and only need a warning.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
