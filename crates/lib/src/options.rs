//! Options controlling how a store writes its document.

/// How `save` replaces the document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
  /// Create or truncate the document and write it in place.
  #[default]
  Truncate,
  /// Write to a sibling `.tmp` file, then rename it over the document.
  Atomic,
}

/// Options fixed at store construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
  /// Pretty-print the document with two-space indentation.
  pub pretty: bool,
  /// Create missing parent directories before writing.
  pub create_dirs: bool,
  /// How `save` replaces the document.
  pub write_mode: WriteMode,
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self {
      pretty: true,
      create_dirs: false,
      write_mode: WriteMode::Truncate,
    }
  }
}

impl StoreOptions {
  /// Set whether documents are pretty-printed.
  pub fn pretty(mut self, pretty: bool) -> Self {
    self.pretty = pretty;
    self
  }

  /// Set whether missing parent directories are created on save.
  pub fn create_dirs(mut self, create_dirs: bool) -> Self {
    self.create_dirs = create_dirs;
    self
  }

  /// Set how `save` replaces the document.
  pub fn write_mode(mut self, write_mode: WriteMode) -> Self {
    self.write_mode = write_mode;
    self
  }
}
