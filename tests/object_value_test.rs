use halite::collection::ObjectValue;
use halite::common::{FieldPath, Value};
use halite::{val, vmap};

fn path(input: &str) -> FieldPath {
    FieldPath::parse(input).unwrap()
}

fn object(value: Value) -> ObjectValue {
    ObjectValue::try_from(value).unwrap()
}

#[test]
fn overlay_scenario_set_then_delete() {
    let original = object(vmap! { "a": { "b": 1, "c": 2 } });

    let updated = original
        .set(&path("a.b"), val!(5))
        .unwrap()
        .delete(&path("a.c"))
        .unwrap();

    assert_eq!(updated.get(&path("a")), Some(vmap! { "b": 5 }));
    assert_eq!(updated.get(&path("a.c")), None);
    // the original snapshot still reports the old value
    assert_eq!(original.get(&path("a.c")), Some(val!(2)));
}

#[test]
fn set_get_round_trip_for_every_kind() {
    let leaves = vec![
        Value::Null,
        val!(true),
        val!(42),
        val!(1.25),
        val!("text"),
        Value::Bytes(vec![1, 2, 3]),
        Value::Reference("a/b".to_string()),
        val!([1, "x"]),
        vmap! { "nested": 1 },
        vmap! {},
    ];

    for leaf in leaves {
        let deep = path("outer.inner.leaf");
        let state = ObjectValue::empty().set(&deep, leaf.clone()).unwrap();
        assert_eq!(state.get(&deep), Some(leaf.clone()), "round trip failed for {}", leaf);

        let shallow = path("top");
        let state = ObjectValue::empty().set(&shallow, leaf.clone()).unwrap();
        assert_eq!(state.get(&shallow), Some(leaf));
    }
}

#[test]
fn delete_then_get_is_none() {
    let state = object(vmap! { "a": 1, "b": { "c": 2 } });
    assert_eq!(state.delete(&path("a")).unwrap().get(&path("a")), None);
    assert_eq!(
        state.delete(&path("b.c")).unwrap().get(&path("b.c")),
        None
    );
}

#[test]
fn snapshots_share_base_and_diverge_independently() {
    let snapshot = object(vmap! { "counter": 0, "title": "draft" });

    let first = snapshot.set(&path("counter"), val!(1)).unwrap();
    let second = snapshot.set(&path("counter"), val!(2)).unwrap();

    assert_eq!(snapshot.get(&path("counter")), Some(val!(0)));
    assert_eq!(first.get(&path("counter")), Some(val!(1)));
    assert_eq!(second.get(&path("counter")), Some(val!(2)));
    // untouched fields read through to the shared base on every version
    for state in [&snapshot, &first, &second] {
        assert_eq!(state.get(&path("title")), Some(val!("draft")));
    }
}

#[test]
fn merged_iteration_is_strictly_increasing_and_complete() {
    let state = object(vmap! { "b": 1, "d": 2, "f": 3 })
        .set(&path("a"), val!(10))
        .unwrap()
        .set(&path("d"), val!(20))
        .unwrap()
        .delete(&path("f"))
        .unwrap()
        .delete(&path("zz"))
        .unwrap();

    let entries: Vec<(String, Value)> = state.iter().collect();
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "d"]);
    for window in names.windows(2) {
        assert!(window[0] < window[1]);
    }
    // overlay wins on the tied name
    assert_eq!(entries[2].1, val!(20));
}

#[test]
fn setting_null_survives_iteration_and_get() {
    let state = object(vmap! { "a": 1 })
        .set(&path("a"), Value::Null)
        .unwrap();
    assert_eq!(state.get(&path("a")), Some(Value::Null));
    assert_eq!(
        state.iter().collect::<Vec<_>>(),
        vec![("a".to_string(), Value::Null)]
    );

    // deleting instead removes the field entirely
    let deleted = object(vmap! { "a": 1 }).delete(&path("a")).unwrap();
    assert_eq!(deleted.get(&path("a")), None);
    assert!(deleted.iter().next().is_none());
}

#[test]
fn field_mask_round_trip_reconstructs_object() {
    let original = object(vmap! {
        "a": { "b": 1, "c": { "d": 2 }, "empty": {} },
        "e": [1, 2, 3],
        "f": "text"
    });

    let mask = original.field_mask();
    let mut rebuilt = ObjectValue::empty();
    for leaf in mask.paths() {
        rebuilt = rebuilt.set(leaf, original.get(leaf).unwrap()).unwrap();
    }

    assert_eq!(rebuilt, original);
    assert_eq!(rebuilt.to_value(), original.to_value());
}

#[test]
fn field_mask_covers_nested_paths() {
    let mask = object(vmap! { "a": { "b": 1 } }).field_mask();
    assert!(mask.covers(&path("a.b")));
    assert!(mask.covers(&path("a.b.deeper")));
    assert!(!mask.covers(&path("a")));
}

#[test]
fn deep_set_materialises_intermediate_maps() {
    let state = ObjectValue::empty()
        .set(&path("a.b.c.d"), val!(1))
        .unwrap();
    assert_eq!(
        state.to_value(),
        vmap! { "a": { "b": { "c": { "d": 1 } } } }
    );
}

#[test]
fn object_equality_is_by_logical_state() {
    let from_base = object(vmap! { "x": 1, "y": 2 });
    let from_overlays = ObjectValue::empty()
        .set(&path("y"), val!(2))
        .unwrap()
        .set(&path("x"), val!(1))
        .unwrap();
    assert_eq!(from_base, from_overlays);
    assert_eq!(from_base.hash_code(), from_overlays.hash_code());
    assert_eq!(from_base.to_value(), from_overlays.to_value());
}
