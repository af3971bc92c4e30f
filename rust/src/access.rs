// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! Chained access into a stored value
//!
//! Hosts that support dynamic member lookup, indexing and invocation
//! implement [`Dynamic`]. Lookups report [`Lookup::NotFound`] instead of
//! failing, and the container turns a miss into EMPTY, which makes chains
//! like `m.member("a").index(0).member("b")` total.

use std::fmt;

use crate::errors::CallError;
use crate::maybe::{Maybe, Slot};

/// Outcome of a capability-checked lookup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

impl<T> From<Lookup<T>> for Maybe<T> {
    fn from(lookup: Lookup<T>) -> Self {
        match lookup {
            Lookup::Found(v) => Maybe::new(v),
            Lookup::NotFound => Maybe::nothing(),
        }
    }
}

/// An index key: a name for keyed lookups or a position for sequences
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    Position(i64),
}

impl Key {
    /// The member name to fall back to when indexing misses
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(s) => Some(s),
            Key::Position(_) => None,
        }
    }

    pub fn as_position(&self) -> Option<i64> {
        match self {
            Key::Position(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Parse one segment of a dotted path: digits become positions
    pub fn from_segment(segment: &str) -> Self {
        match segment.parse::<i64>() {
            Ok(i) => Key::Position(i),
            Err(_) => Key::Name(segment.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_string())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Position(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Position(i as i64)
    }
}

/// Positions past `i64::MAX` saturate, so they miss instead of wrapping
/// into negative positions.
impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Position(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(s) => write!(f, "{}", s),
            Key::Position(i) => write!(f, "{}", i),
        }
    }
}

/// The container's own operations, reachable by name through member access
///
/// When a requested member name is in this table, the container returns
/// the bound operation instead of the stored value's member of the same
/// name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    IsSomething,
    IsNothing,
    UnwrapOrSentinel,
    UnwrapOr,
    Member,
    Index,
    Select,
    Invoke,
    Convert,
    AsMaybe,
}

impl Capability {
    pub const ALL: [Capability; 10] = [
        Capability::IsSomething,
        Capability::IsNothing,
        Capability::UnwrapOrSentinel,
        Capability::UnwrapOr,
        Capability::Member,
        Capability::Index,
        Capability::Select,
        Capability::Invoke,
        Capability::Convert,
        Capability::AsMaybe,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Capability::IsSomething => "is_something",
            Capability::IsNothing => "is_nothing",
            Capability::UnwrapOrSentinel => "unwrap_or_sentinel",
            Capability::UnwrapOr => "unwrap_or",
            Capability::Member => "member",
            Capability::Index => "index",
            Capability::Select => "select",
            Capability::Invoke => "invoke",
            Capability::Convert => "convert",
            Capability::AsMaybe => "as_maybe",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A dynamically-typed host value
pub trait Dynamic: Sized {
    /// Read a named member
    fn member(&self, name: &str) -> Lookup<Self>;

    /// Read an element by position or key
    fn item(&self, key: &Key) -> Lookup<Self>;

    /// Invoke the value with positional arguments
    fn call(&self, args: &[Self]) -> Result<Self, CallError>;

    /// Represent one of the container's operations, bound to `receiver`,
    /// as a host value
    fn bind(receiver: &Maybe<Self>, capability: Capability) -> Self;
}

impl<T: Dynamic> Maybe<T> {
    /// Read a member of the stored value.
    ///
    /// Names in the [`Capability`] table resolve to the container's own
    /// operation, even when the stored value has a member of that name.
    pub fn member(&self, name: &str) -> Maybe<T> {
        if let Some(capability) = Capability::from_name(name) {
            return Maybe::new(T::bind(self, capability));
        }
        match self.unwrap_or_sentinel() {
            Slot::Filled(v) => match v.member(name) {
                Lookup::Found(found) => Maybe::new(found),
                Lookup::NotFound => {
                    log::trace!("member '{}' not found", name);
                    Maybe::nothing()
                }
            },
            Slot::Empty(_) => Maybe::nothing(),
        }
    }

    /// Index the stored value, falling back to [`Maybe::member`] when the
    /// lookup misses and the key is a name.
    pub fn index(&self, key: impl Into<Key>) -> Maybe<T> {
        let key = key.into();
        if let Slot::Filled(v) = self.unwrap_or_sentinel() {
            if let Lookup::Found(found) = v.item(&key) {
                return Maybe::new(found);
            }
        }
        match key.as_name() {
            Some(name) => {
                log::trace!("index '{}' missed, falling back to member lookup", name);
                self.member(name)
            }
            None => Maybe::nothing(),
        }
    }

    /// Walk a dotted path (`"servers.0.host"`), indexing one segment at a
    /// time. Numeric segments are positions.
    pub fn select(&self, path: &str) -> Maybe<T>
    where
        T: Clone,
    {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .fold(self.clone(), |current, segment| {
                current.index(Key::from_segment(segment))
            })
    }

    /// Call the stored value. Any failure, including a value that cannot be
    /// called, yields EMPTY.
    pub fn invoke(&self, args: &[T]) -> Maybe<T> {
        self.try_map(|v| v.call(args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_table() {
        for capability in Capability::ALL {
            assert_eq!(Capability::from_name(capability.name()), Some(capability));
        }
        assert_eq!(Capability::from_name("attr"), None);
        assert_eq!(Capability::from_name("IS_SOMETHING"), None);
    }

    #[test]
    fn test_key_conversions() {
        assert_eq!(Key::from("a"), Key::Name("a".to_string()));
        assert_eq!(Key::from(3usize), Key::Position(3));
        assert_eq!(Key::from(-1i32), Key::Position(-1));
        assert_eq!(Key::from_segment("0"), Key::Position(0));
        assert_eq!(Key::from_segment("-2"), Key::Position(-2));
        assert_eq!(Key::from_segment("host"), Key::Name("host".to_string()));
        assert_eq!(Key::Name("a".into()).as_name(), Some("a"));
        assert_eq!(Key::Position(1).as_name(), None);
        assert_eq!(Key::Position(1).to_string(), "1");
        assert_eq!(Key::from(usize::MAX), Key::Position(i64::MAX));
    }

    #[test]
    fn test_lookup_into_maybe() {
        let found: Maybe<i32> = Lookup::Found(1).into();
        assert_eq!(found, Maybe::new(1));
        let missing: Maybe<i32> = Lookup::NotFound.into();
        assert!(missing.is_nothing());
        assert_eq!(Lookup::from(Some(2)).map(|v| v + 1), Lookup::Found(3));
        assert!(!Lookup::<i32>::from(None).is_found());
    }
}
