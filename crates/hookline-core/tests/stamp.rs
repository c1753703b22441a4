use chrono::{TimeZone, Utc};
use hookline_core::{timestamp, userstamp, Context, Hook, HookKind, Method, Timestamp, Value};
use serde_json::json;

fn make_record(something: &str) -> serde_json::Value {
    json!({
        "created_at": "created_at",
        "updated_at": "updated_at",
        "created_by": "created_by",
        "updated_by": "updated_by",
        "something": something
    })
}

fn make_user() -> Value {
    Value::from(json!({"_id": "user-id"}))
}

fn fixed_clock() -> Timestamp {
    Timestamp::with_clock(|| Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

#[test]
fn timestamp_create_sets_both_fields_to_one_instant() {
    let context = Context::new(Method::Create).with_data(Value::from(make_record("something")));
    let context = timestamp().call(context).unwrap();
    let data = context.data.unwrap();

    assert_eq!(data.get("something"), Some(&Value::from("something")));
    let created = data.get("created_at").and_then(Value::as_date).unwrap();
    let updated = data.get("updated_at").and_then(Value::as_date).unwrap();
    assert_eq!(created, updated);
}

#[test]
fn timestamp_create_stamps_every_record() {
    let data = Value::from(json!([make_record("something"), make_record("something-else")]));
    let context = fixed_clock()
        .call(Context::new(Method::Create).with_data(data))
        .unwrap();
    let data = context.data.unwrap();
    let expected = Value::Date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

    for (idx, something) in ["something", "something-else"].iter().enumerate() {
        let record = &data.as_array().unwrap()[idx];
        assert_eq!(record.get("something"), Some(&Value::from(*something)));
        assert_eq!(record.get("created_at"), Some(&expected));
        assert_eq!(record.get("updated_at"), Some(&expected));
    }
}

#[test]
fn timestamp_update_and_patch_leave_created_at() {
    for method in [Method::Update, Method::Patch] {
        let context = Context::new(method).with_data(Value::from(make_record("something")));
        let data = timestamp().call(context).unwrap().data.unwrap();

        assert_eq!(data.get("created_at"), Some(&Value::from("created_at")));
        assert!(data.get("updated_at").and_then(Value::as_date).is_some());
    }
}

#[test]
fn timestamp_other_methods_and_missing_items_are_noops() {
    let record = Value::from(make_record("something"));
    let context = Context::new(Method::Other("remove".into())).with_data(record.clone());
    assert_eq!(timestamp().call(context).unwrap().data, Some(record));

    let context = timestamp().call(Context::new(Method::Create)).unwrap();
    assert_eq!(context.data, None);
}

#[test]
fn hand_built_method_names_stamp_like_parsed_ones() {
    let record = Value::from(make_record("something"));

    let context = Context::new(Method::Other("create".into()))
        .with_data(record.clone())
        .with_user(make_user());
    let context = fixed_clock().call(userstamp().call(context).unwrap()).unwrap();
    let data = context.data.unwrap();
    assert!(data.get("created_at").and_then(Value::as_date).is_some());
    assert_eq!(data.get("created_by"), Some(&Value::from("user-id")));

    let context = Context::new(Method::Other("patch".into())).with_data(record);
    let data = fixed_clock().call(context).unwrap().data.unwrap();
    assert_eq!(data.get("created_at"), Some(&Value::from("created_at")));
    assert!(data.get("updated_at").and_then(Value::as_date).is_some());
}

#[test]
fn timestamp_after_hooks_stamp_the_result() {
    let context = Context::new(Method::Create)
        .with_kind(HookKind::After)
        .with_data(Value::from(json!({"something": "in"})))
        .with_result(Value::from(json!({"something": "out"})));
    let context = fixed_clock().call(context).unwrap();

    assert!(context.data.unwrap().get("created_at").is_none());
    assert!(context
        .result
        .unwrap()
        .get("created_at")
        .and_then(Value::as_date)
        .is_some());
}

#[test]
fn timestamp_skips_non_object_records() {
    let data = Value::from(json!([{"something": "x"}, "loose", 3]));
    let data = fixed_clock()
        .call(Context::new(Method::Create).with_data(data))
        .unwrap()
        .data
        .unwrap();
    let items = data.as_array().unwrap();

    assert!(items[0].get("updated_at").is_some());
    assert_eq!(items[1], Value::from("loose"));
    assert_eq!(items[2], Value::Number(3.0));
}

#[test]
fn userstamp_create_sets_both_fields() {
    let data = Value::from(json!([make_record("something"), make_record("something-else")]));
    let context = Context::new(Method::Create)
        .with_data(data)
        .with_user(make_user());
    let data = userstamp().call(context).unwrap().data.unwrap();

    for record in data.as_array().unwrap() {
        assert_eq!(record.get("created_by"), Some(&Value::from("user-id")));
        assert_eq!(record.get("updated_by"), Some(&Value::from("user-id")));
    }
}

#[test]
fn userstamp_update_and_patch_set_only_updated_by() {
    for method in [Method::Update, Method::Patch] {
        let context = Context::new(method)
            .with_data(Value::from(make_record("something")))
            .with_user(make_user());
        let data = userstamp().call(context).unwrap().data.unwrap();

        assert_eq!(data.get("something"), Some(&Value::from("something")));
        assert_eq!(data.get("created_by"), Some(&Value::from("created_by")));
        assert_eq!(data.get("updated_by"), Some(&Value::from("user-id")));
    }
}

#[test]
fn userstamp_without_identity_is_a_noop() {
    let record = Value::from(make_record("something"));

    let context = Context::new(Method::Create).with_data(record.clone());
    assert_eq!(userstamp().call(context).unwrap().data, Some(record.clone()));

    let context = Context::new(Method::Create)
        .with_data(record.clone())
        .with_user(Value::from("user-id"));
    assert_eq!(userstamp().call(context).unwrap().data, Some(record.clone()));

    let context = Context::new(Method::Create)
        .with_data(record.clone())
        .with_user(Value::from(json!({"id": "user-id"})));
    assert_eq!(userstamp().call(context).unwrap().data, Some(record));
}

#[test]
fn userstamp_reads_a_configured_id_field() {
    let context = Context::new(Method::Patch)
        .with_data(Value::from(json!({})))
        .with_user(Value::from(json!({"id": 7})));
    let data = userstamp().id_field("id").call(context).unwrap().data.unwrap();
    assert_eq!(data.get("updated_by"), Some(&Value::Number(7.0)));
}
