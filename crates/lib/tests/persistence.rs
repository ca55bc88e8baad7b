//! End-to-end load/save behavior through the public API.

use std::fs;

use jsondb::{ErrorKind, Store, StoreOptions, Value, WriteMode, json};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tempfile::TempDir;

fn sorted(mut keys: Vec<&str>) -> Vec<&str> {
  keys.sort_unstable();
  keys
}

#[test]
fn fresh_store_save_and_reload() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("db.json");

  let mut store = Store::new(&path);
  assert!(store.is_empty());

  store.set("a", 1);
  store.set("b", "x");
  assert_eq!(store.size(), 2);
  store.save().unwrap();

  let mut reopened = Store::new(&path);
  reopened.load().unwrap();

  assert_eq!(reopened.get("a"), Some(&json!(1)));
  assert_eq!(reopened.get("b"), Some(&json!("x")));
  assert_eq!(sorted(reopened.keys()), vec!["a", "b"]);
}

#[test]
fn every_value_shape_survives_a_roundtrip() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("shapes.json");

  let mut store = Store::new(&path);
  store.set("null", Value::Null);
  store.set("bool", false);
  store.set("int", -7);
  store.set("float", 0.25);
  store.set("string", "héllo \"quoted\"\n");
  store.set("list", json!([1, "two", [3], {"four": 4}]));
  store.set("map", json!({"inner": {"deeper": [null, true]}}));
  store.save().unwrap();

  let reopened = Store::open(&path).unwrap();
  assert_eq!(reopened.size(), store.size());
  for (key, value) in &store {
    assert_eq!(reopened.get(key), Some(value), "key: {key}");
  }
}

#[test]
fn floats_roundtrip_exactly() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("floats.json");

  let mut floats = vec![
    2.0956494844563438e177,
    0.1 + 0.2,
    f64::MIN_POSITIVE,
    5e-324,
    f64::MAX,
    f64::MIN,
    -0.0,
    1e21,
    123456789.12345678,
  ];
  let mut rng = StdRng::seed_from_u64(0x6a73_6f6e_6462);
  while floats.len() < 5000 {
    let candidate = f64::from_bits(rng.next_u64());
    if candidate.is_finite() {
      floats.push(candidate);
    }
  }

  let mut store = Store::new(&path);
  for (i, f) in floats.iter().enumerate() {
    store.set(format!("f{i}"), *f);
  }
  store.save().unwrap();

  let reopened = Store::open(&path).unwrap();
  for (i, f) in floats.iter().enumerate() {
    let key = format!("f{i}");
    let got = reopened.get(&key).and_then(Value::as_f64).map(f64::to_bits);
    assert_eq!(got, Some(f.to_bits()), "key {key}: saved {f:e}");
  }
}

#[test]
fn consecutive_saves_decode_to_same_mapping() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("db.json");

  let mut store = Store::new(&path);
  store.extend((0..50).map(|i| (format!("key{i}"), json!(i * i))));

  store.save().unwrap();
  let first = Store::open(&path).unwrap();
  store.save().unwrap();
  let second = Store::open(&path).unwrap();

  assert_eq!(first.size(), 50);
  for (key, value) in &first {
    assert_eq!(second.get(key), Some(value));
  }
}

#[test]
fn failed_loads_leave_store_untouched() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("db.json");

  let mut store = Store::new(&path);
  store.set("keep", "me");

  let err = store.load().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Io);

  fs::write(&path, "{\"keep\": ").unwrap();
  let err = store.load().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Decode);

  fs::write(&path, "null").unwrap();
  let err = store.load().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Decode);

  assert_eq!(store.keys(), vec!["keep"]);
  assert!(!store.is_loaded());
}

#[test]
fn clear_then_save_empties_document() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("db.json");

  let mut store = Store::new(&path);
  store.set("a", 1);
  store.save().unwrap();

  store.clear();
  assert!(store.is_empty());
  store.save().unwrap();

  let reopened = Store::open(&path).unwrap();
  assert!(reopened.is_empty());
}

#[test]
fn atomic_store_in_new_directory() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("state").join("settings.json");
  let options = StoreOptions::default()
    .create_dirs(true)
    .write_mode(WriteMode::Atomic);

  let mut store = Store::with_options(&path, options);
  store.load_or_default().unwrap();
  assert!(store.is_loaded());

  store.set("theme", "dark");
  store.save().unwrap();

  let entries: Vec<_> = fs::read_dir(path.parent().unwrap())
    .unwrap()
    .map(|e| e.unwrap().file_name().into_string().unwrap())
    .collect();
  assert_eq!(entries, vec!["settings.json"]);
  assert_eq!(Store::open(&path).unwrap().get("theme"), Some(&json!("dark")));
}
