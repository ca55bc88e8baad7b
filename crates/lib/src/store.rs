//! The key-value store.
//!
//! A [`Store`] holds every binding in memory and is bound to one document
//! on disk. Nothing touches the file except [`Store::load`],
//! [`Store::load_or_default`], and [`Store::save`].
//!
//! ```no_run
//! use jsondb::{Store, json};
//!
//! let mut store = Store::new("settings.json");
//! store.load_or_default()?;
//!
//! store.set("theme", "dark");
//! store.set("recent", json!(["a.txt", "b.txt"]));
//! store.save()?;
//! # Ok::<(), jsondb::StoreError>(())
//! ```

use std::collections::hash_map;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::document::{self, Bindings};
use crate::error::Result;
use crate::options::StoreOptions;
use crate::value::{self, Value};

/// In-memory key-value store backed by a single JSON document.
///
/// Iteration order of [`keys`](Self::keys), [`values`](Self::values), and
/// [`iter`](Self::iter) is unspecified. The three agree with each other as
/// long as the store is not modified in between.
#[derive(Debug, Clone)]
pub struct Store {
  path: PathBuf,
  data: Bindings,
  loaded: bool,
  options: StoreOptions,
}

impl Store {
  /// Create an empty, unloaded store bound to `path`.
  ///
  /// No I/O happens here; the file need not exist.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self::with_options(path, StoreOptions::default())
  }

  /// Create an empty, unloaded store with explicit options.
  pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
    Self {
      path: path.into(),
      data: Bindings::new(),
      loaded: false,
      options,
    }
  }

  /// Create a store bound to `path` and load it.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let mut store = Self::new(path);
    store.load()?;
    Ok(store)
  }

  /// Replace all bindings with the contents of the document.
  ///
  /// On error the in-memory bindings and the loaded flag are unchanged.
  pub fn load(&mut self) -> Result<()> {
    let data = document::read(&self.path)?;
    info!(path = %self.path.display(), entries = data.len(), "loaded document");

    self.data = data;
    self.loaded = true;
    Ok(())
  }

  /// Like [`load`](Self::load), but a missing document counts as empty.
  ///
  /// Any other failure, including a corrupt document, is returned.
  pub fn load_or_default(&mut self) -> Result<()> {
    match document::read_if_exists(&self.path)? {
      Some(data) => {
        info!(path = %self.path.display(), entries = data.len(), "loaded document");
        self.data = data;
      }
      None => {
        warn!(path = %self.path.display(), "document not found, starting empty");
        self.data.clear();
      }
    }

    self.loaded = true;
    Ok(())
  }

  /// Write every binding to the document, replacing its previous content.
  pub fn save(&self) -> Result<()> {
    document::write(&self.path, &self.data, &self.options)?;
    info!(path = %self.path.display(), entries = self.data.len(), "saved document");
    Ok(())
  }

  /// The value bound to `key`, or `None` if absent.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.data.get(key)
  }

  /// Look up `key` and convert its value to `T`.
  ///
  /// Returns `Ok(None)` for an absent key and a decode error when the
  /// stored value does not fit `T`.
  pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
    self.data.get(key).map(value::from_value).transpose()
  }

  /// Bind `key` to `value`, replacing any previous binding.
  ///
  /// `Value`'s `From<f64>` turns NaN and infinities into `Value::Null`.
  /// Use [`set_as`](Self::set_as) to have them rejected instead.
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    self.data.insert(key.into(), value.into());
  }

  /// Convert `value` with serde and bind it to `key`.
  ///
  /// Fails with an encode error, leaving the store unchanged, when `value`
  /// has no JSON representation.
  pub fn set_as<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> Result<()> {
    let encoded = value::to_value(value)?;
    self.data.insert(key.into(), encoded);
    Ok(())
  }

  /// Remove `key`. Does nothing if it is absent.
  pub fn delete(&mut self, key: &str) {
    self.data.remove(key);
  }

  /// Remove `key`, returning its previous value.
  pub fn remove(&mut self, key: &str) -> Option<Value> {
    self.data.remove(key)
  }

  /// Whether `key` has a binding.
  pub fn has(&self, key: &str) -> bool {
    self.data.contains_key(key)
  }

  /// All bound keys, in unspecified order.
  pub fn keys(&self) -> Vec<&str> {
    self.data.keys().map(String::as_str).collect()
  }

  /// All bound values, in the same order as [`keys`](Self::keys).
  pub fn values(&self) -> Vec<&Value> {
    self.data.values().collect()
  }

  /// Iterate over all bindings, in unspecified order.
  pub fn iter(&self) -> Iter<'_> {
    Iter {
      inner: self.data.iter(),
    }
  }

  /// Remove every binding. The document is untouched until [`save`](Self::save).
  pub fn clear(&mut self) {
    self.data = Bindings::new();
  }

  /// Number of bindings.
  pub fn size(&self) -> usize {
    self.data.len()
  }

  /// Alias of [`size`](Self::size).
  pub fn len(&self) -> usize {
    self.size()
  }

  /// Whether the store has no bindings.
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Whether a load has succeeded at least once.
  ///
  /// Set by a successful [`load`](Self::load) or
  /// [`load_or_default`](Self::load_or_default). Never reset.
  pub fn is_loaded(&self) -> bool {
    self.loaded
  }

  /// Path of the backing document.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Options the store was constructed with.
  pub fn options(&self) -> &StoreOptions {
    &self.options
  }
}

/// Iterator over a store's bindings.
pub struct Iter<'a> {
  inner: hash_map::Iter<'a, String, Value>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = (&'a String, &'a Value);

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Store {
  type Item = (&'a String, &'a Value);
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Store {
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    for (key, value) in iter {
      self.set(key, value);
    }
  }
}
