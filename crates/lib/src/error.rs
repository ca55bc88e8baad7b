//! Error types for jsondb.
//!
//! Only `load` and `save` (and the typed `get_as`/`set_as` helpers) can fail.
//! Every failure belongs to one of three kinds, see [`ErrorKind`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout jsondb.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The document could not be opened, read, created, or written.
  Io,
  /// The document is not valid JSON, or not a top-level object.
  Decode,
  /// A value could not be represented as JSON.
  Encode,
}

/// Errors that can occur when loading or saving a store.
#[derive(Debug, Error)]
pub enum StoreError {
  /// Failed to open or read the document.
  #[error("failed to read document {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to create, write, or replace the document.
  #[error("failed to write document {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to create the document's parent directory.
  #[error("failed to create directory {}: {source}", .path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to parse JSON into the expected shape.
  #[error("failed to parse document: {0}")]
  Parse(#[source] serde_json::Error),

  /// Failed to serialize a value as JSON.
  #[error("failed to serialize document: {0}")]
  Serialize(#[source] serde_json::Error),
}

impl StoreError {
  /// The kind of failure this error represents.
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Read { .. } | Self::Write { .. } | Self::CreateDir { .. } => ErrorKind::Io,
      Self::Parse(_) => ErrorKind::Decode,
      Self::Serialize(_) => ErrorKind::Encode,
    }
  }

  /// Whether the error was caused by the document not existing.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
  }
}
