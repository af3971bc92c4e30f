// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! Serde support for `Value`

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};

use super::Value;
use crate::yaml::from_yaml;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            // a plain sequence of octets keeps text formats readable
            Value::Bytes(b) => serializer.collect_seq(b.iter()),
            Value::List(items) => serializer.collect_seq(items.iter()),
            Value::Dict(d) => serializer.collect_map(d.iter()),
            Value::Object(o) => serializer.collect_map(o.attrs().iter()),
            Value::Function(f) => Err(S::Error::custom(format!(
                "cannot serialize function '{}'",
                f.name()
            ))),
        }
    }
}

/// Accepts anything a YAML document can hold
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_yaml::Value::deserialize(deserializer).map(|yaml| from_yaml(&yaml))
    }
}
