//! Shared fixtures: a `Parent` entity and a `Simple` subtype overriding `name`

#![allow(dead_code)]

use bean2map_codec::{Entity, WriteError};
use bean2map_model::{FieldDef, MethodDef, PropertyResolver, TypeDef, TypeModel};
use bean2map_types::{DateFormat, FromValue, Value, ValueMap};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct Parent {
    pub id: Option<String>,
    pub name: Option<i64>,
    pub goods: Option<ValueMap>,
    pub create_time: Option<DateTime<Utc>>,
}

// Equality compares id and goods only.
impl PartialEq for Parent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.goods == other.goods
    }
}

impl Entity for Parent {
    const TYPE_NAME: &'static str = "Parent";

    fn read(&self, accessor: &str) -> Option<Value> {
        Some(match accessor {
            "getId" => self.id.clone().into(),
            "getName" => self.name.into(),
            "getGoods" => self.goods.clone().into(),
            "getCreateTime" => self.create_time.into(),
            _ => return None,
        })
    }

    fn write(&mut self, accessor: &str, value: Value) -> Result<(), WriteError> {
        match accessor {
            "setId" => self.id = FromValue::from_value(value)?,
            "setName" => self.name = FromValue::from_value(value)?,
            "setGoods" => self.goods = FromValue::from_value(value)?,
            "setCreateTime" => self.create_time = FromValue::from_value(value)?,
            _ => return Err(WriteError::UnknownAccessor),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Simple {
    pub parent: Parent,
    pub name: Option<String>,
    pub rules: Option<Vec<String>>,
    pub valid: bool,
}

impl Entity for Simple {
    const TYPE_NAME: &'static str = "Simple";

    fn read(&self, accessor: &str) -> Option<Value> {
        match accessor {
            "getName" => Some(self.name.clone().into()),
            "getRules" => Some(self.rules.clone().into()),
            "isValid" => Some(self.valid.into()),
            _ => self.parent.read(accessor),
        }
    }

    fn write(&mut self, accessor: &str, value: Value) -> Result<(), WriteError> {
        match accessor {
            "setName" => self.name = FromValue::from_value(value)?,
            "setRules" => self.rules = FromValue::from_value(value)?,
            "setValid" => self.valid = FromValue::from_value(value)?,
            _ => return self.parent.write(accessor, value),
        }
        Ok(())
    }
}

/// Type model matching `Parent` and `Simple`
pub fn model() -> TypeModel {
    let created = DateFormat {
        as_epoch_millis: true,
        ..DateFormat::pattern(DateFormat::DATE).unwrap()
    };
    let parent = TypeDef::class("Parent")
        .extends("java.lang.Object")
        .property("id", "String")
        .property("name", "Long")
        .property("goods", "Map<String,Object>")
        .field(FieldDef::new("createTime", "Date").with_date_format(created))
        .method(MethodDef::getter("getCreateTime", "Date"))
        .method(MethodDef::setter("setCreateTime", "Date"))
        .method(MethodDef::new(
            "equals",
            vec!["Object".into()],
            Some("boolean".into()),
        ))
        .method(MethodDef::getter("hashCode", "int"))
        .method(MethodDef::getter("toString", "String"));
    let simple = TypeDef::class("Simple")
        .extends("Parent")
        .property("name", "String")
        .property("rules", "List<String>")
        .property("valid", "boolean");

    let mut model = TypeModel::new("example");
    model.add_type(parent).unwrap();
    model.add_type(simple).unwrap();
    model
}

pub fn resolver() -> PropertyResolver {
    PropertyResolver::new(model())
}

pub fn goods() -> ValueMap {
    let mut goods = ValueMap::new();
    goods.insert("bbb".to_string(), Value::Int(111));
    goods
}

/// `id="111"`, `goods={"bbb":111}`, `rules=["test"]`, `valid=false`
pub fn sample() -> Simple {
    Simple {
        parent: Parent {
            id: Some("111".to_string()),
            goods: Some(goods()),
            ..Parent::default()
        },
        rules: Some(vec!["test".to_string()]),
        valid: false,
        ..Simple::default()
    }
}
