// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! Explicit conversions of the stored value
//!
//! Two families exist side by side:
//! - strict: [`Maybe::convert`] and the `try_*` helpers return the concrete
//!   type or a [`ConversionFailure`];
//! - lenient: [`Maybe::as_maybe`] keeps the result in a container and turns
//!   any failure into EMPTY.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::empty::EMPTY;
use crate::errors::{ConversionFailure, MaybeError};
use crate::maybe::{Maybe, Slot};

/// Hash a value with the process-wide deterministic hasher
pub fn hash_of<H: Hash + ?Sized>(value: &H) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Target of an explicit conversion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Conversion {
    String,
    Bytes,
    Int,
    Float,
    Bool,
    Hash,
}

impl Conversion {
    pub const ALL: [Conversion; 6] = [
        Conversion::String,
        Conversion::Bytes,
        Conversion::Int,
        Conversion::Float,
        Conversion::Bool,
        Conversion::Hash,
    ];

    /// Parse a conversion name, case-insensitively (`"int"`, `"STR"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "str" | "string" => Some(Conversion::String),
            "bytes" => Some(Conversion::Bytes),
            "int" | "integer" => Some(Conversion::Int),
            "float" => Some(Conversion::Float),
            "bool" | "boolean" => Some(Conversion::Bool),
            "hash" => Some(Conversion::Hash),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Conversion::String => "str",
            Conversion::Bytes => "bytes",
            Conversion::Int => "int",
            Conversion::Float => "float",
            Conversion::Bool => "bool",
            Conversion::Hash => "hash",
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of a conversion
#[derive(Clone, Debug, PartialEq)]
pub enum Converted {
    String(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Hash(u64),
}

impl Converted {
    pub fn conversion(&self) -> Conversion {
        match self {
            Converted::String(_) => Conversion::String,
            Converted::Bytes(_) => Conversion::Bytes,
            Converted::Int(_) => Conversion::Int,
            Converted::Float(_) => Conversion::Float,
            Converted::Bool(_) => Conversion::Bool,
            Converted::Hash(_) => Conversion::Hash,
        }
    }
}

impl fmt::Display for Converted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converted::String(s) => write!(f, "{}", s),
            Converted::Bytes(b) => write!(f, "{:?}", b),
            Converted::Int(i) => write!(f, "{}", i),
            Converted::Float(fl) => write!(f, "{:?}", fl),
            Converted::Bool(b) => write!(f, "{}", b),
            Converted::Hash(h) => write!(f, "{}", h),
        }
    }
}

/// Conversions a stored value knows how to perform
///
/// Every method is fallible; a type that cannot represent itself as the
/// target reports a [`ConversionFailure`].
pub trait Coerce {
    fn coerce_string(&self) -> Result<String, ConversionFailure>;
    fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure>;
    fn coerce_int(&self) -> Result<i64, ConversionFailure>;
    fn coerce_float(&self) -> Result<f64, ConversionFailure>;
    fn coerce_bool(&self) -> Result<bool, ConversionFailure>;
    fn coerce_hash(&self) -> Result<u64, ConversionFailure>;

    fn coerce(&self, conversion: Conversion) -> Result<Converted, ConversionFailure> {
        match conversion {
            Conversion::String => self.coerce_string().map(Converted::String),
            Conversion::Bytes => self.coerce_bytes().map(Converted::Bytes),
            Conversion::Int => self.coerce_int().map(Converted::Int),
            Conversion::Float => self.coerce_float().map(Converted::Float),
            Conversion::Bool => self.coerce_bool().map(Converted::Bool),
            Conversion::Hash => self.coerce_hash().map(Converted::Hash),
        }
    }
}

/// Shorthand for "`value` cannot become `target`"
pub fn unconvertible(target: Conversion, value: impl fmt::Debug) -> ConversionFailure {
    ConversionFailure::new("cannot convert $VALUE to $TARGET")
        .with_target(target.name())
        .with_value(format!("{:?}", value))
}

/// Parse an integer the way a user would type it: surrounding whitespace
/// is allowed, as are single `_` separators between digits.
pub fn parse_int(s: &str) -> Result<i64, ConversionFailure> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let separated = digits
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !separated {
        return Err(unconvertible(Conversion::Int, s));
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != '_').collect();
    cleaned
        .parse::<i64>()
        .map_err(|_| unconvertible(Conversion::Int, s))
}

pub fn parse_float(s: &str) -> Result<f64, ConversionFailure> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| unconvertible(Conversion::Float, s))
}

/// Truncate a float towards zero, refusing NaN, infinities and values
/// outside the `i64` range
pub fn float_to_int(f: f64) -> Result<i64, ConversionFailure> {
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(f.trunc() as i64)
    } else {
        Err(unconvertible(Conversion::Int, f))
    }
}

/// Hash a float so that integral floats collide with the equal integer
pub fn hash_float(f: f64) -> u64 {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        hash_of(&(f as i64))
    } else {
        hash_of(&f.to_bits())
    }
}

macro_rules! impl_coerce_for_int {
    ($($t:ty),*) => {
        $(
            impl Coerce for $t {
                fn coerce_string(&self) -> Result<String, ConversionFailure> {
                    Ok(self.to_string())
                }

                fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure> {
                    Err(unconvertible(Conversion::Bytes, self))
                }

                fn coerce_int(&self) -> Result<i64, ConversionFailure> {
                    Ok(i64::from(*self))
                }

                fn coerce_float(&self) -> Result<f64, ConversionFailure> {
                    Ok(f64::from(*self))
                }

                fn coerce_bool(&self) -> Result<bool, ConversionFailure> {
                    Ok(*self != 0)
                }

                fn coerce_hash(&self) -> Result<u64, ConversionFailure> {
                    Ok(hash_of(&i64::from(*self)))
                }
            }
        )*
    };
}

impl_coerce_for_int!(i32, u32);

impl Coerce for i64 {
    fn coerce_string(&self) -> Result<String, ConversionFailure> {
        Ok(self.to_string())
    }

    fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure> {
        Err(unconvertible(Conversion::Bytes, self))
    }

    fn coerce_int(&self) -> Result<i64, ConversionFailure> {
        Ok(*self)
    }

    fn coerce_float(&self) -> Result<f64, ConversionFailure> {
        Ok(*self as f64)
    }

    fn coerce_bool(&self) -> Result<bool, ConversionFailure> {
        Ok(*self != 0)
    }

    fn coerce_hash(&self) -> Result<u64, ConversionFailure> {
        Ok(hash_of(self))
    }
}

impl Coerce for f64 {
    fn coerce_string(&self) -> Result<String, ConversionFailure> {
        Ok(format!("{:?}", self))
    }

    fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure> {
        Err(unconvertible(Conversion::Bytes, self))
    }

    fn coerce_int(&self) -> Result<i64, ConversionFailure> {
        float_to_int(*self)
    }

    fn coerce_float(&self) -> Result<f64, ConversionFailure> {
        Ok(*self)
    }

    fn coerce_bool(&self) -> Result<bool, ConversionFailure> {
        Ok(*self != 0.0)
    }

    fn coerce_hash(&self) -> Result<u64, ConversionFailure> {
        Ok(hash_float(*self))
    }
}

impl Coerce for bool {
    fn coerce_string(&self) -> Result<String, ConversionFailure> {
        Ok(self.to_string())
    }

    fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure> {
        Err(unconvertible(Conversion::Bytes, self))
    }

    fn coerce_int(&self) -> Result<i64, ConversionFailure> {
        Ok(i64::from(*self))
    }

    fn coerce_float(&self) -> Result<f64, ConversionFailure> {
        Ok(if *self { 1.0 } else { 0.0 })
    }

    fn coerce_bool(&self) -> Result<bool, ConversionFailure> {
        Ok(*self)
    }

    fn coerce_hash(&self) -> Result<u64, ConversionFailure> {
        Ok(hash_of(self))
    }
}

impl Coerce for str {
    fn coerce_string(&self) -> Result<String, ConversionFailure> {
        Ok(self.to_string())
    }

    fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure> {
        Ok(self.as_bytes().to_vec())
    }

    fn coerce_int(&self) -> Result<i64, ConversionFailure> {
        parse_int(self)
    }

    fn coerce_float(&self) -> Result<f64, ConversionFailure> {
        parse_float(self)
    }

    fn coerce_bool(&self) -> Result<bool, ConversionFailure> {
        Ok(!self.is_empty())
    }

    fn coerce_hash(&self) -> Result<u64, ConversionFailure> {
        Ok(hash_of(self))
    }
}

impl Coerce for String {
    fn coerce_string(&self) -> Result<String, ConversionFailure> {
        self.as_str().coerce_string()
    }

    fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure> {
        self.as_str().coerce_bytes()
    }

    fn coerce_int(&self) -> Result<i64, ConversionFailure> {
        self.as_str().coerce_int()
    }

    fn coerce_float(&self) -> Result<f64, ConversionFailure> {
        self.as_str().coerce_float()
    }

    fn coerce_bool(&self) -> Result<bool, ConversionFailure> {
        self.as_str().coerce_bool()
    }

    fn coerce_hash(&self) -> Result<u64, ConversionFailure> {
        self.as_str().coerce_hash()
    }
}

impl<T: Coerce + ?Sized> Coerce for &T {
    fn coerce_string(&self) -> Result<String, ConversionFailure> {
        (**self).coerce_string()
    }

    fn coerce_bytes(&self) -> Result<Vec<u8>, ConversionFailure> {
        (**self).coerce_bytes()
    }

    fn coerce_int(&self) -> Result<i64, ConversionFailure> {
        (**self).coerce_int()
    }

    fn coerce_float(&self) -> Result<f64, ConversionFailure> {
        (**self).coerce_float()
    }

    fn coerce_bool(&self) -> Result<bool, ConversionFailure> {
        (**self).coerce_bool()
    }

    fn coerce_hash(&self) -> Result<u64, ConversionFailure> {
        (**self).coerce_hash()
    }
}

impl<T: Coerce> Maybe<T> {
    /// Strict conversion of the raw slot.
    ///
    /// EMPTY converts to its display form and its fixed hash; every other
    /// target fails for EMPTY.
    pub fn convert(&self, conversion: Conversion) -> Result<Converted, MaybeError> {
        match self.unwrap_or_sentinel() {
            Slot::Filled(v) => Ok(v.coerce(conversion)?),
            Slot::Empty(e) => match conversion {
                Conversion::String => Ok(Converted::String(e.to_string())),
                Conversion::Hash => Ok(Converted::Hash(hash_of(&EMPTY))),
                _ => Err(unconvertible(conversion, e).into()),
            },
        }
    }

    pub fn try_string(&self) -> Result<String, MaybeError> {
        match self.convert(Conversion::String)? {
            Converted::String(s) => Ok(s),
            other => Err(mismatch(Conversion::String, other)),
        }
    }

    pub fn try_bytes(&self) -> Result<Vec<u8>, MaybeError> {
        match self.convert(Conversion::Bytes)? {
            Converted::Bytes(b) => Ok(b),
            other => Err(mismatch(Conversion::Bytes, other)),
        }
    }

    pub fn try_int(&self) -> Result<i64, MaybeError> {
        match self.convert(Conversion::Int)? {
            Converted::Int(i) => Ok(i),
            other => Err(mismatch(Conversion::Int, other)),
        }
    }

    pub fn try_float(&self) -> Result<f64, MaybeError> {
        match self.convert(Conversion::Float)? {
            Converted::Float(f) => Ok(f),
            other => Err(mismatch(Conversion::Float, other)),
        }
    }

    pub fn try_bool(&self) -> Result<bool, MaybeError> {
        match self.convert(Conversion::Bool)? {
            Converted::Bool(b) => Ok(b),
            other => Err(mismatch(Conversion::Bool, other)),
        }
    }

    /// Hash of the stored value; fails for unhashable values
    pub fn try_hash(&self) -> Result<u64, MaybeError> {
        match self.convert(Conversion::Hash)? {
            Converted::Hash(h) => Ok(h),
            other => Err(mismatch(Conversion::Hash, other)),
        }
    }

    /// Lenient conversion: EMPTY stays EMPTY, failures become EMPTY
    pub fn as_maybe(&self, conversion: Conversion) -> Maybe<Converted> {
        self.try_map(|v| v.coerce(conversion))
    }
}

fn mismatch(expected: Conversion, got: Converted) -> MaybeError {
    ConversionFailure::new(format!(
        "conversion to {} produced a {} result",
        expected,
        got.conversion()
    ))
    .into()
}
