/* tests/store_tests.rs */

use holdfast::holder::{HoldError, Map, Store, StoreEvent, Target, Value};
use std::sync::{Arc, Mutex};

fn record_events(store: &Store) -> Arc<Mutex<Vec<StoreEvent>>> {
	let events = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&events);
	store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
	events
}

#[test]
fn test_store_set_get() {
	let store = Store::new();
	store.set("key", 42);

	assert!(store.has("key"));
	assert_eq!(store.get("key"), Some(Value::Int(42)));
	assert_eq!(store.get("missing"), None);
	assert_eq!(store.get_or("missing", "fallback"), Value::from("fallback"));
}

#[test]
fn test_store_get_returns_copy() {
	let store = Store::new();
	store.set("list", vec![1, 2, 3]);

	let mut copy = store.get("list").unwrap();
	if let Value::List(items) = &mut copy {
		items.push(Value::Int(4));
	}

	assert_eq!(store.get("list"), Some(Value::from(vec![1, 2, 3])));
	assert_ne!(store.get("list"), Some(copy));

	let mut all = store.get_all();
	all.insert("other".to_string(), Value::Null);
	assert!(!store.has("other"));
}

#[test]
fn test_store_set_fires_once() {
	let store = Store::new();
	let events = record_events(&store);

	store.set("key", "value");
	store.set("key", "value");
	store.set("key", "other");

	assert_eq!(
		*events.lock().unwrap(),
		vec![
			StoreEvent::Changed { key: "key".to_string() },
			StoreEvent::Changed { key: "key".to_string() },
		]
	);
}

#[test]
fn test_store_delete() {
	let store = Store::new();
	store.set("key", 1);
	let events = record_events(&store);

	assert!(store.delete("key"));
	assert!(!store.delete("key"));
	assert!(!store.has("key"));
	assert_eq!(
		*events.lock().unwrap(),
		vec![StoreEvent::Removed { key: "key".to_string() }]
	);
}

#[test]
fn test_store_unsubscribe() {
	let store = Store::new();
	let events = Arc::new(Mutex::new(0));
	let sink = Arc::clone(&events);
	let id = store.subscribe(move |_| *sink.lock().unwrap() += 1);

	store.set("a", 1);
	assert!(store.unsubscribe(id));
	assert!(!store.unsubscribe(id));
	store.set("b", 2);

	assert_eq!(*events.lock().unwrap(), 1);
}

#[test]
fn test_store_handler_can_read_back() {
	let store = Store::new();
	let seen = Arc::new(Mutex::new(None));
	let sink = Arc::clone(&seen);
	let handle = store.clone();
	store.subscribe(move |event| {
		*sink.lock().unwrap() = handle.get(event.key());
	});

	store.set("key", 7);
	assert_eq!(*seen.lock().unwrap(), Some(Value::Int(7)));
}

#[test]
fn test_store_get_values() {
	let store = Store::new();
	store.set("a", 1);
	store.set("c", "three");

	assert_eq!(
		store.get_values(&["a", "b", "c"]),
		vec![Some(Value::Int(1)), None, Some(Value::from("three"))]
	);
	assert_eq!(store.keys(), vec!["a".to_string(), "c".to_string()]);
	assert_eq!(store.len(), 2);
}

#[test]
fn test_get_as_string() {
	let store = Store::new();
	store.set("int", 101);
	store.set("float", 13.501);
	store.set("whole_float", 2.0);
	store.set("bool", true);
	store.set("string", "test_case");

	assert_eq!(store.get_as_string("int", None), Some("101".to_string()));
	assert_eq!(store.get_as_string("float", None), Some("13.501".to_string()));
	assert_eq!(store.get_as_string("whole_float", None), Some("2.0".to_string()));
	assert_eq!(store.get_as_string("bool", None), Some("true".to_string()));
	assert_eq!(store.get_as_string("string", None), Some("test_case".to_string()));
	assert_eq!(
		store.get_as_string("missing", Some("default".to_string())),
		Some("default".to_string())
	);
}

#[test]
fn test_get_as_int_and_float() {
	let store = Store::new();
	store.set("int", 7);
	store.set("float", 3.9);
	store.set("negative_float", -3.9);
	store.set("numeric", " 12 ");
	store.set("word", "twelve");
	store.set("bool", true);
	store.set("null", Value::Null);

	assert_eq!(store.get_as_int("int", None), Some(7));
	assert_eq!(store.get_as_int("float", None), Some(3));
	assert_eq!(store.get_as_int("negative_float", None), Some(-3));
	assert_eq!(store.get_as_int("numeric", None), Some(12));
	assert_eq!(store.get_as_int("bool", None), Some(1));
	assert_eq!(store.get_as_int("word", Some(-1)), Some(-1));
	assert_eq!(store.get_as_int("null", Some(5)), Some(5));
	assert_eq!(store.get_as_int("missing", None), None);

	assert_eq!(store.get_as_float("int", None), Some(7.0));
	assert_eq!(store.get_as_float("numeric", None), Some(12.0));
	assert_eq!(store.get_as_float("word", Some(0.5)), Some(0.5));
}

#[test]
fn test_get_as_boolean() {
	let store = Store::new();
	let cases: Vec<(&str, Value, bool)> = vec![
		("int_zero", Value::Int(0), false),
		("int_not_zero", Value::Int(1), true),
		("int_negative", Value::Int(-1), true),
		("float", Value::Float(13.501), true),
		("bool_true", Value::Bool(true), true),
		("bool_false", Value::Bool(false), false),
		("string_yes", Value::from("yes"), true),
		("string_true", Value::from("true"), true),
		("string_no", Value::from("no"), false),
		("string_no_upper", Value::from("NO"), false),
		("string_false", Value::from("false"), false),
		("string_1", Value::from("1"), true),
		("string_0", Value::from("0"), false),
		("float_0", Value::from("0.00"), false),
		("float_half", Value::from("0.5"), false),
		("float_not_zero", Value::from("13.37"), true),
		("exponent", Value::from("1e3"), true),
		("empty_list", Value::List(Vec::new()), false),
	];

	for (key, value, _) in &cases {
		store.set(key, value.clone());
	}
	for (key, _, expected) in &cases {
		assert_eq!(store.get_as_boolean(key, None), Some(*expected), "key {key}");
	}
}

#[test]
fn test_set_as_boolean_stores_cast() {
	let store = Store::new();
	store.set_as_boolean("no", "no").unwrap();
	store.set_as_boolean("number", "13.37").unwrap();
	store.set_as_boolean("zero", 0).unwrap();

	assert_eq!(store.get("no"), Some(Value::Bool(false)));
	assert_eq!(store.get("number"), Some(Value::Bool(true)));
	assert_eq!(store.get("zero"), Some(Value::Bool(false)));
}

#[test]
fn test_set_as_typed_round_trip() {
	let store = Store::new();
	store.set_as_int("int", "42").unwrap();
	store.set_as_int("truncated", 9.99).unwrap();
	store.set_as_float("float", "1.5").unwrap();
	store.set_as_float("from_int", 3).unwrap();
	store.set_as_string("string", 101).unwrap();
	store.set_as_string("bool_string", true).unwrap();

	assert_eq!(store.get("int"), Some(Value::Int(42)));
	assert_eq!(store.get("truncated"), Some(Value::Int(9)));
	assert_eq!(store.get("float"), Some(Value::Float(1.5)));
	assert_eq!(store.get("from_int"), Some(Value::Float(3.0)));
	assert_eq!(store.get("string"), Some(Value::from("101")));
	assert_eq!(store.get("bool_string"), Some(Value::from("true")));
}

#[test]
fn test_set_as_cast_failure_leaves_store() {
	let store = Store::new();
	store.set("key", 1);
	let events = record_events(&store);

	let err = store.set_as_int("key", "not a number").unwrap_err();
	match err {
		HoldError::Cast { target, .. } => assert_eq!(target, Target::Int),
		_ => panic!("Expected Cast error"),
	}
	assert!(store.set_as_float("key", vec![1, 2]).is_err());
	assert!(store.set_as_float("key", f64::NAN).is_err());
	assert!(store.set_as_float("key", "inf").is_err());

	assert_eq!(store.get("key"), Some(Value::Int(1)));
	assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_list_accessors() {
	let store = Store::new();
	store.set_as_list("list", vec!["a", "b"]).unwrap();
	store.set("scalar", 1);

	assert_eq!(
		store.get_as_list("list", None),
		Some(vec![Value::from("a"), Value::from("b")])
	);
	assert_eq!(
		store.get_as_list("scalar", vec![Value::Int(0)]),
		Some(vec![Value::Int(0)])
	);
	assert_eq!(store.get_as_list("missing", None), None);

	let err = store.set_as_list("list", "nope").unwrap_err();
	assert!(matches!(err, HoldError::TypeMismatch { expected: "list", .. }));
	assert_eq!(store.get_as_list("list", None).map(|l| l.len()), Some(2));
}

#[test]
fn test_set_as_sub_store() {
	let store = Store::new();
	let mut entries = Map::new();
	entries.insert("my_float".to_string(), Value::Float(2.5));
	let sub = Store::from_map(entries.clone());

	store.set_as_sub_store("sub", &sub);
	assert_eq!(store.get("sub"), Some(Value::Map(entries.clone())));

	store.set_as_map("copy", entries.clone()).unwrap();
	assert_eq!(store.get("copy"), Some(Value::Map(entries)));

	let err = store.set_as_map("sub", 5).unwrap_err();
	assert!(matches!(err, HoldError::TypeMismatch { expected: "mapping", .. }));
	assert_eq!(store.get("sub").and_then(|v| v.into_map()).map(|m| m.len()), Some(1));
}

#[test]
fn test_sibling_sub_stores_share_key() {
	let store = Store::new();
	let first = store.get_as_sub_store("net", None).unwrap();
	let second = store.get_as_sub_store("net", None).unwrap();

	first.set("host", "a");
	second.set("port", 80);

	let net = store.get("net").and_then(Value::into_map).unwrap();
	assert_eq!(net.get("host"), Some(&Value::from("a")));
	assert_eq!(net.get("port"), Some(&Value::Int(80)));

	second.set("host", "b");
	assert!(second.delete("port"));
	let net = store.get("net").and_then(Value::into_map).unwrap();
	assert_eq!(net.get("host"), Some(&Value::from("b")));
	assert_eq!(net.get("port"), None);
}

#[test]
fn test_sub_store_keeps_direct_parent_writes() {
	let store = Store::new();
	let sub = store.get_as_sub_store("net", None).unwrap();

	let mut direct = Map::new();
	direct.insert("timeout".to_string(), Value::Int(30));
	store.set_as_map("net", direct).unwrap();
	sub.set("retries", 3);

	let net = store.get("net").and_then(Value::into_map).unwrap();
	assert_eq!(net.get("timeout"), Some(&Value::Int(30)));
	assert_eq!(net.get("retries"), Some(&Value::Int(3)));
}

#[test]
fn test_get_as_sub_store_materializes_default() {
	let store = Store::new();
	let events = record_events(&store);

	let sub = store.get_as_sub_store("settings", None).unwrap();
	assert!(sub.is_empty());
	assert_eq!(store.get("settings"), Some(Value::Map(Map::new())));
	assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn test_get_as_sub_store_rejects_non_mapping() {
	let store = Store::new();
	store.set("scalar", "text");

	assert!(store.get_as_sub_store("scalar", None).is_none());
	assert_eq!(store.get("scalar"), Some(Value::from("text")));
}

#[test]
fn test_sub_store_writes_through() {
	let store = Store::new();
	let sub = store.get_as_sub_store("network", None).unwrap();
	let events = record_events(&store);

	sub.set("port", 8080);
	let nested = sub.get_as_sub_store("tls", None).unwrap();
	nested.set("enabled", true);

	let network = store.get("network").unwrap();
	let network = network.as_map().unwrap();
	assert_eq!(network.get("port"), Some(&Value::Int(8080)));
	assert_eq!(
		network.get("tls").and_then(|tls| tls.as_map()).and_then(|tls| tls.get("enabled")),
		Some(&Value::Bool(true))
	);
	assert!(events.lock().unwrap().iter().all(|event| event.key() == "network"));
}

#[test]
fn test_sub_store_outlives_parent() {
	let store = Store::new();
	let sub = store.get_as_sub_store("orphan", None).unwrap();
	drop(store);

	sub.set("still", "works");
	assert_eq!(sub.get("still"), Some(Value::from("works")));
}

#[test]
fn test_store_concurrent_writers() {
	let store = Store::new();
	let handles: Vec<_> = (0..8)
		.map(|t| {
			let store = store.clone();
			std::thread::spawn(move || {
				for i in 0..100 {
					store.set(&format!("t{t}-{i}"), i);
				}
			})
		})
		.collect();
	for handle in handles {
		handle.join().unwrap();
	}

	assert_eq!(store.len(), 800);
}
