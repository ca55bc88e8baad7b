//! Reading and writing the backing document.
//!
//! The document is a single JSON object whose keys are the store's keys.
//! It is always read and written whole; file handles live only for the
//! duration of each call.
//!
//! # Example Document
//!
//! ```json
//! {
//!   "name": "demo",
//!   "retries": 3,
//!   "tags": ["a", "b"]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::options::{StoreOptions, WriteMode};
use crate::value::Value;

/// Suffix of the staging file used by [`WriteMode::Atomic`].
const TEMP_SUFFIX: &str = ".tmp";

/// Bindings as held in memory.
pub(crate) type Bindings = HashMap<String, Value>;

/// Read and decode the document at `path`.
pub(crate) fn read(path: &Path) -> Result<Bindings> {
  debug!(path = %path.display(), "reading document");

  let content = fs::read(path).map_err(|source| StoreError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  decode(&content)
}

/// Like [`read`], but a missing document yields `Ok(None)`.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<Bindings>> {
  match read(path) {
    Ok(bindings) => Ok(Some(bindings)),
    Err(e) if e.is_not_found() => Ok(None),
    Err(e) => Err(e),
  }
}

/// Decode document bytes. The content must be UTF-8 and the top-level
/// value must be an object.
pub(crate) fn decode(content: &[u8]) -> Result<Bindings> {
  serde_json::from_slice(content).map_err(StoreError::Parse)
}

/// Encode bindings as document bytes.
///
/// Keys are emitted in sorted order so that saving the same bindings twice
/// produces identical bytes. The document ends with a newline.
pub(crate) fn encode(bindings: &Bindings, pretty: bool) -> Result<Vec<u8>> {
  let sorted: BTreeMap<&str, &Value> = bindings.iter().map(|(k, v)| (k.as_str(), v)).collect();

  let mut bytes = if pretty {
    serde_json::to_vec_pretty(&sorted)
  } else {
    serde_json::to_vec(&sorted)
  }
  .map_err(StoreError::Serialize)?;

  bytes.push(b'\n');
  Ok(bytes)
}

/// Encode `bindings` and replace the document at `path` with them.
pub(crate) fn write(path: &Path, bindings: &Bindings, options: &StoreOptions) -> Result<()> {
  // Encode before touching the file so an encode error leaves it intact.
  let bytes = encode(bindings, options.pretty)?;

  if options.create_dirs {
    ensure_parent(path)?;
  }

  debug!(
    path = %path.display(),
    mode = ?options.write_mode,
    bytes = bytes.len(),
    "writing document"
  );

  match options.write_mode {
    WriteMode::Truncate => fs::write(path, &bytes).map_err(|source| write_error(path, source)),
    WriteMode::Atomic => write_atomic(path, &bytes),
  }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
  let temp_path = temp_path(path);

  if let Err(source) = fs::write(&temp_path, bytes) {
    let _ = fs::remove_file(&temp_path);
    return Err(write_error(path, source));
  }
  if let Err(source) = fs::rename(&temp_path, path) {
    let _ = fs::remove_file(&temp_path);
    return Err(write_error(path, source));
  }

  Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
      path: parent.to_path_buf(),
      source,
    })?;
  }
  Ok(())
}

/// Sibling staging path: `db.json` becomes `db.json.tmp`.
fn temp_path(path: &Path) -> PathBuf {
  let mut name = OsString::from(path.as_os_str());
  name.push(TEMP_SUFFIX);
  PathBuf::from(name)
}

fn write_error(path: &Path, source: io::Error) -> StoreError {
  StoreError::Write {
    path: path.to_path_buf(),
    source,
  }
}
