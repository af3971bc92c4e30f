// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! Dynamic value model
//!
//! `Value` is a small dynamically-typed host for the container: it has
//! members (object attributes), indexable elements (lists, strings,
//! bytes, dicts and objects that forward indexing) and callables
//! (native functions). It is what YAML documents load into.

mod capability;
pub mod dict;
pub mod object;
mod serialize;

use std::cmp::Ordering;
use std::fmt;

use crate::access::{Capability, Dynamic, Key, Lookup};
use crate::convert::{
    float_to_int, hash_float, hash_of, parse_float, parse_int, unconvertible, Coerce,
    Conversion, Converted,
};
use crate::errors::{CallError, ConversionFailure};
use crate::maybe::Maybe;

pub use dict::Dict;
pub use object::{expect_args, Function, Object};

/// A value that can be any of the supported types
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value; a legitimate value, distinct from EMPTY
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Dict(Dict),
    Object(Object),
    Function(Function),
}

impl Value {
    /// Wrap a native closure as a callable value
    pub fn function<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Value::Function(Function::new(name, body))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Name of the value's type, the class name for objects
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Object(o) => o.class(),
            Value::Function(_) => "function",
        }
    }
}

/// Map a possibly negative position onto `0..len`
fn resolve_position(position: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let idx = if position < 0 { position + len } else { position };
    if (0..len).contains(&idx) {
        Some(idx as usize)
    } else {
        None
    }
}

impl Dynamic for Value {
    fn member(&self, name: &str) -> Lookup<Value> {
        match self {
            Value::Object(obj) => obj.attr(name).cloned().into(),
            _ => Lookup::NotFound,
        }
    }

    fn item(&self, key: &Key) -> Lookup<Value> {
        match (self, key) {
            (Value::List(items), Key::Position(i)) => resolve_position(*i, items.len())
                .map(|idx| items[idx].clone())
                .into(),
            (Value::String(s), Key::Position(i)) => {
                let chars: Vec<char> = s.chars().collect();
                resolve_position(*i, chars.len())
                    .map(|idx| Value::String(chars[idx].to_string()))
                    .into()
            }
            (Value::Bytes(b), Key::Position(i)) => resolve_position(*i, b.len())
                .map(|idx| Value::Int(i64::from(b[idx])))
                .into(),
            (Value::Dict(d), Key::Name(name)) => d.get(name).cloned().into(),
            // mapping keys are strings, so numeric keys are looked up by text
            (Value::Dict(d), Key::Position(i)) => d.get(&i.to_string()).cloned().into(),
            (Value::Object(obj), key) => match obj.items() {
                Some(items) => items.item(key),
                None => Lookup::NotFound,
            },
            _ => Lookup::NotFound,
        }
    }

    fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        match self {
            Value::Function(f) => f.call(args),
            other => Err(CallError::not_callable(other.type_name())),
        }
    }

    fn bind(receiver: &Maybe<Value>, capability: Capability) -> Value {
        capability::bind(receiver, capability)
    }
}

impl Coerce for Value {
    fn coerce_string(&self) -> Result<String, ConversionFailure> {
        Ok(self.to_string())
    }

    fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure> {
        match self {
            Value::Bytes(b) => Ok(b.clone()),
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::Int(i) => u8::try_from(*i)
                        .map_err(|_| unconvertible(Conversion::Bytes, self)),
                    _ => Err(unconvertible(Conversion::Bytes, self)),
                })
                .collect(),
            other => Err(unconvertible(Conversion::Bytes, other)),
        }
    }

    fn coerce_int(&self) -> Result<i64, ConversionFailure> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Float(f) => float_to_int(*f),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::String(s) => parse_int(s),
            other => Err(unconvertible(Conversion::Int, other)),
        }
    }

    fn coerce_float(&self) -> Result<f64, ConversionFailure> {
        match self {
            Value::Int(i) => Ok(*i as f64),
            Value::Float(f) => Ok(*f),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => parse_float(s),
            other => Err(unconvertible(Conversion::Float, other)),
        }
    }

    /// Truthiness; never fails for a value
    fn coerce_bool(&self) -> Result<bool, ConversionFailure> {
        Ok(match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Dict(d) => !d.is_empty(),
            Value::Object(_) | Value::Function(_) => true,
        })
    }

    /// Consistent with equality: `Int(1)` and `Float(1.0)` hash alike.
    /// Containers and objects compare by content and are unhashable.
    fn coerce_hash(&self) -> Result<u64, ConversionFailure> {
        match self {
            Value::Null => Ok(hash_of(&())),
            Value::Bool(b) => Ok(hash_of(b)),
            Value::Int(i) => Ok(hash_of(i)),
            Value::Float(f) => Ok(hash_float(*f)),
            Value::String(s) => Ok(hash_of(s.as_str())),
            Value::Bytes(b) => Ok(hash_of(b.as_slice())),
            Value::Function(f) => Ok(hash_of(&f.id())),
            other => Err(ConversionFailure::new(format!(
                "unhashable type: '{}'",
                other.type_name()
            ))),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                compare_int_float(*a, *b) == Some(Ordering::Equal)
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

/// Only numbers, bools, strings, bytes and lists of those are ordered.
/// Null, dicts, objects and functions are unordered even against an equal
/// value.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).map(Ordering::reverse),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bytes(a), Value::Bytes(b)) => Some(a.cmp(b)),
            (Value::List(a), Value::List(b)) => compare_lists(a, b),
            _ => None,
        }
    }
}

/// Exact comparison of an integer against a float, without rounding the
/// integer through `f64`
fn compare_int_float(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    // 2^63; every float at or above it exceeds i64::MAX
    if f >= 9_223_372_036_854_775_808.0 {
        return Some(Ordering::Less);
    }
    if f < i64::MIN as f64 {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f),
        non_eq => Some(non_eq),
    }
}

/// Lexicographic; unordered as soon as one pair of elements is unordered
fn compare_lists(a: &[Value], b: &[Value]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b) {
        match x.partial_cmp(y)? {
            Ordering::Equal => continue,
            non_eq => return Some(non_eq),
        }
    }
    Some(a.len().cmp(&b.len()))
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Converted> for Value {
    fn from(c: Converted) -> Self {
        match c {
            Converted::String(s) => Value::String(s),
            Converted::Bytes(b) => Value::Bytes(b),
            Converted::Int(i) => Value::Int(i),
            Converted::Float(f) => Value::Float(f),
            Converted::Bool(b) => Value::Bool(b),
            // hashes are reinterpreted bit for bit
            Converted::Hash(h) => Value::Int(h as i64),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::String(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "b'{}'", b.escape_ascii()),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Dict(d) => {
                write!(f, "{{")?;
                for (i, (k, v)) in d.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Object(o) => write!(f, "{}", o),
            Value::Function(func) => write!(f, "{}", func),
        }
    }
}
