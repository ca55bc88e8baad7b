//! jsondb: an in-memory key-value store persisted to one JSON document
//!
//! This crate provides:
//! - `Store`: string keys bound to dynamically typed values, loaded from and
//!   saved to a single file, each time as a whole
//! - `Value`: the JSON value model, with serde conversion helpers
//! - `StoreOptions`: how documents are written (pretty, atomic, parent dirs)
//! - `StoreError`: I/O, decode, and encode failures from load and save
//!
//! A store is a plain owned value with no internal locking. Wrap it in a
//! mutex to share it between threads.

mod document;
pub mod error;
pub mod options;
pub mod store;
pub mod value;

pub use error::{ErrorKind, Result, StoreError};
pub use options::{StoreOptions, WriteMode};
pub use store::{Iter, Store};
pub use value::{Map, Value, json};
