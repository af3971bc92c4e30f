// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! maybe - an optional-value container that keeps falsy values distinct
//! from absence
//!
//! [`Maybe`] holds either a value or the [`EMPTY`] sentinel. `0`, `""`,
//! `false` and null are all values. Member access, indexing and
//! invocation on a container return further containers and never fail,
//! so chains over partially missing data always end in a container.

pub mod access;
pub mod convert;
pub mod empty;
pub mod errors;
pub mod maybe;
pub mod value;
pub mod yaml;

pub use access::{Capability, Dynamic, Key, Lookup};
pub use convert::{hash_of, Coerce, Conversion, Converted};
pub use empty::{Empty, EMPTY};
pub use errors::{
    CallError, CallErrorKind, ConversionFailure, LoadError, MaybeError, UnsupportedOperation,
};
pub use maybe::{Maybe, Slot};
pub use value::{Dict, Function, Object, Value};
pub use yaml::{load_yaml_file, parse_yaml, to_yaml_string};
