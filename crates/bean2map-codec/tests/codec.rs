//! Codec contract tests
//!
//! - encode: null handling, primitives, date rendering, exclusions
//! - decode: coercion, defaults for absent keys, no partial entities
//! - filter: idempotence, no new keys, no nulls
//! - construction: accessor validation

mod common;

use bean2map_codec::{BeanCodec, CodecError, Entity, MapCodec, WriteError};
use bean2map_model::{FieldDef, MethodDef, PropertyResolver, TypeDef, TypeModel};
use bean2map_types::{CoercionError, DateFormat, FromValue, Value, ValueMap};
use chrono::{TimeZone, Utc};
use common::{Parent, Simple};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

fn simple_codec() -> BeanCodec<Simple> {
    BeanCodec::from_resolver(&common::resolver()).unwrap()
}

fn parent_codec() -> BeanCodec<Parent> {
    BeanCodec::from_resolver(&common::resolver()).unwrap()
}

fn map(entries: &[(&str, Value)]) -> ValueMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// === encode ===

#[test]
fn test_encode_sample() {
    let encoded = simple_codec().encode(&common::sample());

    let keys: Vec<_> = encoded.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["rules", "valid", "id", "goods"]);
    assert_eq!(encoded["id"], Value::string("111"));
    assert_eq!(encoded["goods"], Value::Map(common::goods()));
    assert_eq!(encoded["rules"], Value::List(vec![Value::string("test")]));
    assert_eq!(encoded["valid"], Value::Bool(false));
}

#[test]
fn test_decode_sample_restores_entity() {
    let codec = simple_codec();
    let original = common::sample();
    let decoded = codec.decode(&codec.encode(&original)).unwrap();
    assert_eq!(decoded.parent, original.parent);
    assert_eq!(decoded, original);
}

#[test]
fn test_overridden_name_uses_subtype_accessor() {
    let codec = simple_codec();
    let entity = Simple {
        name: Some("leaf".to_string()),
        ..Simple::default()
    };
    let encoded = codec.encode(&entity);
    assert_eq!(encoded["name"], Value::string("leaf"));

    let decoded = codec.decode(&map(&[("name", Value::string("again"))])).unwrap();
    assert_eq!(decoded.name.as_deref(), Some("again"));
    assert_eq!(decoded.parent.name, None);
}

#[test]
fn test_encode_epoch_millis_date() {
    let entity = Parent {
        create_time: Some(Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap()),
        ..Parent::default()
    };
    let encoded = parent_codec().encode(&entity);
    assert_eq!(encoded["createTime"], Value::Long(1_609_545_600_000));
}

#[test]
fn test_epoch_millis_round_trip() {
    let codec = parent_codec();
    let decoded = codec
        .decode(&map(&[("createTime", Value::Long(1_609_545_600_000))]))
        .unwrap();
    let encoded = codec.encode(&decoded);
    assert_eq!(encoded["createTime"], Value::Long(1_609_545_600_000));
}

#[derive(Debug, Default)]
struct Event {
    at: Option<chrono::DateTime<Utc>>,
    day: Option<chrono::DateTime<Utc>>,
    note: Option<String>,
    flag: Option<bool>,
}

impl Entity for Event {
    const TYPE_NAME: &'static str = "Event";

    fn read(&self, accessor: &str) -> Option<Value> {
        Some(match accessor {
            "getAt" => self.at.into(),
            "getDay" => self.day.into(),
            "getNote" => self.note.clone().into(),
            "getFlag" => self.flag.into(),
            _ => return None,
        })
    }

    fn write(&mut self, accessor: &str, value: Value) -> Result<(), WriteError> {
        match accessor {
            "setAt" => self.at = FromValue::from_value(value)?,
            "setDay" => self.day = FromValue::from_value(value)?,
            "setNote" => self.note = FromValue::from_value(value)?,
            "setFlag" => self.flag = FromValue::from_value(value)?,
            _ => return Err(WriteError::UnknownAccessor),
        }
        Ok(())
    }
}

fn event_resolver() -> PropertyResolver {
    let day_format = DateFormat::pattern(DateFormat::DATE).unwrap();
    let event = TypeDef::class("Event")
        .property("at", "Date")
        .method(MethodDef::getter("getDay", "Date").with_date_format(day_format))
        .method(MethodDef::setter("setDay", "Date"))
        .field(FieldDef::new("note", "String").ignored())
        .method(MethodDef::getter("getNote", "String"))
        .method(MethodDef::setter("setNote", "String"))
        .property("flag", "Boolean");
    PropertyResolver::new(TypeModel::new("events").with_type(event).unwrap())
}

#[test]
fn test_default_date_format_and_markers() {
    let codec: BeanCodec<Event> = BeanCodec::from_resolver(&event_resolver()).unwrap();
    let instant = Utc.with_ymd_and_hms(2021, 1, 2, 3, 4, 5).unwrap();
    let encoded = codec.encode(&Event {
        at: Some(instant),
        day: Some(instant),
        note: Some("secret".to_string()),
        flag: None,
    });

    assert_eq!(encoded["at"], Value::string("2021-01-02 03:04:05"));
    assert_eq!(encoded["day"], Value::string("2021-01-02"));
    assert!(!encoded.contains_key("note"));
    assert!(!encoded.contains_key("flag"));
}

#[test]
fn test_boxed_boolean_written_when_present() {
    let codec: BeanCodec<Event> = BeanCodec::from_resolver(&event_resolver()).unwrap();
    let encoded = codec.encode(&Event {
        flag: Some(false),
        ..Event::default()
    });
    assert_eq!(encoded.get("flag"), Some(&Value::Bool(false)));
}

#[test]
fn test_excluded_property_ignored_everywhere() {
    let codec: BeanCodec<Event> = BeanCodec::from_resolver(&event_resolver()).unwrap();
    let input = map(&[("note", Value::string("x")), ("flag", Value::string("true"))]);

    let decoded = codec.decode(&input).unwrap();
    assert_eq!(decoded.note, None);
    assert_eq!(decoded.flag, Some(true));

    assert_eq!(codec.filter(&input), map(&[("flag", Value::string("true"))]));
}

// === decode ===

#[test]
fn test_decode_coerces_loose_values() {
    let decoded = parent_codec()
        .decode(&map(&[
            ("name", Value::string("42")),
            ("createTime", Value::string("2021-01-02")),
        ]))
        .unwrap();
    assert_eq!(decoded.name, Some(42));
    assert_eq!(
        decoded.create_time,
        Some(Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_decode_absent_null_and_empty_leave_defaults() {
    let decoded = simple_codec()
        .decode(&map(&[
            ("id", Value::Null),
            ("valid", Value::string("")),
            ("unknown", Value::Long(1)),
        ]))
        .unwrap();
    assert_eq!(decoded, Simple::default());
}

#[test]
fn test_decode_invalid_date_fails_without_entity() {
    let result = parent_codec().decode(&map(&[
        ("id", Value::string("111")),
        ("createTime", Value::string("not-a-date")),
    ]));
    let err = result.unwrap_err();
    assert!(matches!(
        err.coercion_error(),
        Some(CoercionError::InvalidFormat { .. })
    ));
    assert!(err.to_string().contains("createTime"));
}

#[test]
fn test_decode_direct_assignment_mismatch() {
    let err = simple_codec()
        .decode(&map(&[("rules", Value::string("not a list"))]))
        .unwrap_err();
    assert!(matches!(
        err,
        CodecError::Coercion {
            ref property,
            source: CoercionError::UnsupportedCoercion { .. },
        } if property == "rules"
    ));
}

// === construction ===

#[derive(Debug, Default)]
struct Incomplete;

impl Entity for Incomplete {
    const TYPE_NAME: &'static str = "Parent";

    fn read(&self, accessor: &str) -> Option<Value> {
        (accessor == "getId").then_some(Value::Null)
    }

    fn write(&mut self, _accessor: &str, _value: Value) -> Result<(), WriteError> {
        Err(WriteError::UnknownAccessor)
    }
}

#[test]
fn test_codec_rejects_entity_missing_accessors() {
    let err = BeanCodec::<Incomplete>::from_resolver(&common::resolver())
        .err()
        .unwrap();
    assert!(matches!(err, CodecError::MissingAccessor { .. }));
}

#[test]
fn test_codec_rejects_other_type() {
    let resolved = common::resolver().resolve("Parent").unwrap();
    let err = BeanCodec::<Simple>::new(Arc::clone(&resolved)).err().unwrap();
    assert_eq!(
        err,
        CodecError::TypeMismatch {
            resolved: "Parent".to_string(),
            entity: "Simple".to_string(),
        }
    );
}

#[test]
fn test_unknown_model_type_is_resolution_error() {
    let resolver = PropertyResolver::new(TypeModel::new("empty"));
    let err = BeanCodec::<Simple>::from_resolver(&resolver).err().unwrap();
    assert!(matches!(err, CodecError::Resolution(_)));
}

#[test]
fn test_codecs_from_same_resolution_agree() {
    let resolver = common::resolver();
    let first: BeanCodec<Simple> = BeanCodec::from_resolver(&resolver).unwrap();
    let second: BeanCodec<Simple> = BeanCodec::from_resolver(&common::resolver()).unwrap();
    let entity = common::sample();
    assert_eq!(first.encode(&entity), second.encode(&entity));
    assert_eq!(first.resolved(), second.resolved());
}

// === properties ===

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::Long),
        any::<bool>().prop_map(Value::Bool),
        "[a-z0-9]{0,8}".prop_map(Value::String),
    ]
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("id".to_string()),
        Just("name".to_string()),
        Just("rules".to_string()),
        Just("valid".to_string()),
        Just("goods".to_string()),
        Just("createTime".to_string()),
        "[a-z]{1,6}",
    ]
}

fn map_strategy() -> impl Strategy<Value = ValueMap> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..12)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_filter_is_idempotent(input in map_strategy()) {
        let codec = simple_codec();
        let once = codec.filter(&input);
        prop_assert_eq!(codec.filter(&once), once);
    }

    #[test]
    fn prop_filter_adds_no_keys_and_no_nulls(input in map_strategy()) {
        let filtered = simple_codec().filter(&input);
        for (key, value) in &filtered {
            prop_assert!(input.contains_key(key));
            prop_assert_eq!(&input[key], value);
            prop_assert!(!value.is_null());
        }
    }

    #[test]
    fn prop_round_trip(
        id in proptest::option::of("[a-z0-9]{1,8}"),
        name in proptest::option::of("[a-z]{1,8}"),
        rules in proptest::option::of(prop::collection::vec("[a-z]{1,4}", 0..4)),
        valid in any::<bool>(),
        millis in proptest::option::of(0i64..4_102_444_800_000),
    ) {
        let codec = simple_codec();
        let entity = Simple {
            parent: Parent {
                id,
                create_time: millis.and_then(|m| Utc.timestamp_millis_opt(m).single()),
                ..Parent::default()
            },
            name,
            rules,
            valid,
        };
        let decoded = codec.decode(&codec.encode(&entity)).unwrap();
        prop_assert_eq!(&decoded, &entity);
        prop_assert_eq!(decoded.parent.create_time, entity.parent.create_time);
    }
}
