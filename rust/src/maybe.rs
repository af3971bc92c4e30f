// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! The `Maybe` container
//!
//! A `Maybe<T>` holds exactly one slot: either a `T` or the [`EMPTY`]
//! sentinel. The slot is fixed at construction. Every operation either
//! inspects it or builds a new container, so there is no way to fill or
//! drain an existing one.
//!
//! Operations come in two tiers:
//! - the safe tier ([`Maybe::try_map`], member/index access, invocation,
//!   [`Maybe::as_maybe`]) never fails and always yields a container;
//! - the strict tier ([`Maybe::compare`], the `try_*` conversions) reports
//!   failures as [`MaybeError`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::empty::{Empty, EMPTY};
use crate::errors::{MaybeError, UnsupportedOperation};

/// Raw content of a container's slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot<T> {
    /// A stored value (which may itself be null-like or falsy)
    Filled(T),
    /// No value
    Empty(Empty),
}

impl<T> Slot<T> {
    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty(_))
    }

    pub fn as_ref(&self) -> Slot<&T> {
        match self {
            Slot::Filled(v) => Slot::Filled(v),
            Slot::Empty(e) => Slot::Empty(*e),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Slot::Filled(v) => Some(v),
            Slot::Empty(_) => None,
        }
    }
}

impl<T> From<Empty> for Slot<T> {
    fn from(e: Empty) -> Self {
        Slot::Empty(e)
    }
}

impl<T: fmt::Display> fmt::Display for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Filled(v) => write!(f, "{}", v),
            Slot::Empty(e) => write!(f, "{}", e),
        }
    }
}

/// A container that may or may not hold a value
///
/// ```
/// use maybe::{Maybe, EMPTY};
///
/// assert!(Maybe::new(false).is_something());
/// assert!(Maybe::<bool>::from(EMPTY).is_nothing());
/// assert_eq!(Maybe::<i64>::nothing().unwrap_or(0), 0);
/// ```
#[derive(Clone)]
pub struct Maybe<T> {
    slot: Slot<T>,
}

impl<T> Maybe<T> {
    /// Wrap a value. Always produces a filled container.
    ///
    /// `Maybe::new(EMPTY)` is a filled `Maybe<Empty>`; build an empty
    /// container with `Maybe::from(EMPTY)` or [`Maybe::nothing`].
    pub fn new(value: T) -> Self {
        Self {
            slot: Slot::Filled(value),
        }
    }

    /// The canonical empty container
    pub fn nothing() -> Self {
        Self {
            slot: Slot::Empty(EMPTY),
        }
    }

    pub fn from_slot(slot: Slot<T>) -> Self {
        Self { slot }
    }

    /// Is there a value (including falsy ones)?
    pub fn is_something(&self) -> bool {
        self.slot.is_filled()
    }

    pub fn is_nothing(&self) -> bool {
        self.slot.is_empty()
    }

    /// The raw slot, EMPTY included. Never fails.
    pub fn unwrap_or_sentinel(&self) -> Slot<&T> {
        self.slot.as_ref()
    }

    pub fn into_slot(self) -> Slot<T> {
        self.slot
    }

    /// The stored value, or `fallback` when empty
    pub fn unwrap_or(self, fallback: T) -> T {
        match self.slot {
            Slot::Filled(v) => v,
            Slot::Empty(_) => fallback,
        }
    }

    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self.slot {
            Slot::Filled(v) => v,
            Slot::Empty(_) => fallback(),
        }
    }

    /// The stored value, or the type's default (its null-like value) when empty
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(T::default)
    }

    pub fn as_option(&self) -> Option<&T> {
        match &self.slot {
            Slot::Filled(v) => Some(v),
            Slot::Empty(_) => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.slot.into_option()
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        Maybe::from_slot(self.slot.as_ref())
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self.slot {
            Slot::Filled(v) => Maybe::new(f(v)),
            Slot::Empty(_) => Maybe::nothing(),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
        match self.slot {
            Slot::Filled(v) => f(v),
            Slot::Empty(_) => Maybe::nothing(),
        }
    }

    /// Attempt a fallible operation on the stored value.
    ///
    /// This is the building block of the safe tier: an empty container
    /// stays empty, a failure becomes empty (and is logged at trace
    /// level), and a success is wrapped in a new container.
    pub fn try_map<U, E>(&self, f: impl FnOnce(&T) -> Result<U, E>) -> Maybe<U>
    where
        E: fmt::Display,
    {
        match &self.slot {
            Slot::Filled(v) => match f(v) {
                Ok(out) => Maybe::new(out),
                Err(e) => {
                    log::trace!("absorbed failure into EMPTY: {}", e);
                    Maybe::nothing()
                }
            },
            Slot::Empty(_) => Maybe::nothing(),
        }
    }

    /// Compare the stored value against a raw value
    pub fn equals_value(&self, other: &T) -> bool
    where
        T: PartialEq,
    {
        match &self.slot {
            Slot::Filled(v) => v == other,
            Slot::Empty(_) => false,
        }
    }

    /// Order two containers by their stored values.
    ///
    /// Fails when either side is EMPTY, or when the stored values have no
    /// ordering between them.
    pub fn compare(&self, other: &Maybe<T>) -> Result<Ordering, MaybeError>
    where
        T: PartialOrd,
    {
        match (&self.slot, &other.slot) {
            (Slot::Filled(a), Slot::Filled(b)) => order(a, b),
            _ => Err(empty_ordering()),
        }
    }

    /// Order the stored value against a raw value
    pub fn compare_value(&self, other: &T) -> Result<Ordering, MaybeError>
    where
        T: PartialOrd,
    {
        match &self.slot {
            Slot::Filled(v) => order(v, other),
            Slot::Empty(_) => Err(empty_ordering()),
        }
    }
}

impl<T> Maybe<Maybe<T>> {
    /// Remove one layer of nesting. Nesting is never removed implicitly.
    pub fn flatten(self) -> Maybe<T> {
        self.and_then(|inner| inner)
    }
}

fn order<T: PartialOrd>(a: &T, b: &T) -> Result<Ordering, MaybeError> {
    a.partial_cmp(b).ok_or_else(|| {
        UnsupportedOperation::new("stored values have no ordering between them")
            .with_operation("compare")
            .into()
    })
}

fn empty_ordering() -> MaybeError {
    UnsupportedOperation::new("ordering against EMPTY is not supported")
        .with_operation("compare")
        .into()
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::nothing()
    }
}

impl<T> From<Empty> for Maybe<T> {
    fn from(_: Empty) -> Self {
        Maybe::nothing()
    }
}

impl<T> From<Slot<T>> for Maybe<T> {
    fn from(slot: Slot<T>) -> Self {
        Maybe::from_slot(slot)
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Maybe::new(v),
            None => Maybe::nothing(),
        }
    }
}

impl<T: PartialEq> PartialEq for Maybe<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T: Eq> Eq for Maybe<T> {}

impl<T> PartialEq<Empty> for Maybe<T> {
    fn eq(&self, _: &Empty) -> bool {
        self.is_nothing()
    }
}

impl<T> PartialEq<Maybe<T>> for Empty {
    fn eq(&self, other: &Maybe<T>) -> bool {
        other.is_nothing()
    }
}

/// Hashes exactly like the stored value (or like EMPTY), so a container
/// and its content land in the same bucket.
impl<T: Hash> Hash for Maybe<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.slot {
            Slot::Filled(v) => v.hash(state),
            Slot::Empty(e) => e.hash(state),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slot)
    }
}

impl<T: fmt::Debug> fmt::Debug for Maybe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Slot::Filled(v) => write!(f, "Maybe({:?})", v),
            Slot::Empty(e) => write!(f, "Maybe({:?})", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::hash_of;
    use rand::distr::Alphanumeric;
    use rand::seq::SliceRandom;
    use rand::Rng;
    use std::collections::HashSet;

    #[test]
    fn test_falsy_values_are_something() {
        assert!(Maybe::new(0).is_something());
        assert!(Maybe::new(String::new()).is_something());
        assert!(Maybe::new(false).is_something());
        assert!(Maybe::new(None::<i32>).is_something());
        assert!(Maybe::new(()).is_something());
    }

    #[test]
    fn test_random_values_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let n: i64 = rng.random();
            let m = Maybe::new(n);
            assert!(m.is_something());
            assert_eq!(m.unwrap_or_sentinel(), Slot::Filled(&n));

            let len = rng.random_range(0..8);
            let s: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect();
            let m = Maybe::new(s.clone());
            assert!(m.is_something());
            assert_eq!(m.unwrap_or_sentinel(), Slot::Filled(&s));
        }
    }

    #[test]
    fn test_sentinel_is_nothing() {
        let m: Maybe<i64> = EMPTY.into();
        assert!(m.is_nothing());
        assert!(!m.is_something());
        assert_eq!(m.unwrap_or_sentinel(), Slot::Empty(EMPTY));
        assert_eq!(Maybe::<i64>::default(), m);
    }

    #[test]
    fn test_new_with_sentinel_is_filled() {
        // the sentinel as a value, not an empty container
        let filled = Maybe::new(EMPTY);
        assert!(filled.is_something());
        assert_eq!(filled.unwrap_or_sentinel(), Slot::Filled(&EMPTY));
        assert!(Maybe::<Empty>::from(EMPTY).is_nothing());
    }

    #[test]
    fn test_states_are_complementary() {
        let cases = [Maybe::new(1), Maybe::nothing(), Maybe::new(0)];
        for m in &cases {
            assert_ne!(m.is_something(), m.is_nothing());
        }
    }

    #[test]
    fn test_unwrap_or() {
        assert_eq!(Maybe::new(1).unwrap_or(0), 1);
        assert_eq!(Maybe::nothing().unwrap_or(0), 0);
        assert_eq!(Maybe::new(None).unwrap_or(Some(1)), None);
        assert_eq!(Maybe::<String>::nothing().unwrap_or_default(), "");
        assert_eq!(Maybe::<Option<i32>>::nothing().unwrap_or_default(), None);
    }

    #[test]
    fn test_nesting_is_kept() {
        let inner: Maybe<i32> = Maybe::nothing();
        let outer = Maybe::new(inner);
        assert!(outer.is_something());
        assert!(outer.as_option().map(Maybe::is_nothing).unwrap_or(false));
        assert!(outer.clone().flatten().is_nothing());

        let outer = Maybe::new(Maybe::new(3));
        assert_eq!(outer.flatten(), Maybe::new(3));
    }

    #[test]
    fn test_try_map_absorbs_failures() {
        let parsed = Maybe::new("12").try_map(|s| s.parse::<i32>());
        assert_eq!(parsed, Maybe::new(12));

        let parsed = Maybe::new("twelve").try_map(|s| s.parse::<i32>());
        assert!(parsed.is_nothing());

        let parsed = Maybe::<&str>::nothing().try_map(|s| s.parse::<i32>());
        assert!(parsed.is_nothing());
    }

    #[test]
    fn test_equality() {
        assert_eq!(Maybe::new(1), Maybe::new(1));
        assert_ne!(Maybe::new(1), Maybe::new(2));
        assert!(!Maybe::new(1).equals_value(&2));
        assert!(Maybe::new(1).equals_value(&1));
        assert_eq!(Maybe::<i32>::from(EMPTY), Maybe::<i32>::from(EMPTY));
        assert_ne!(Maybe::new(0), Maybe::nothing());
        assert_eq!(Maybe::<i32>::nothing(), EMPTY);
        assert_eq!(EMPTY, Maybe::<i32>::nothing());
        assert!(!Maybe::<i32>::nothing().equals_value(&0));
    }

    #[test]
    fn test_ordering() {
        assert_eq!(
            Maybe::new(2).compare(&Maybe::new(1)).unwrap(),
            Ordering::Greater
        );
        assert_eq!(Maybe::new(3).compare(&Maybe::new(5)).unwrap(), Ordering::Less);
        assert_eq!(Maybe::new(4).compare_value(&4).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_ordering_against_empty_fails() {
        let err = Maybe::new(1).compare(&Maybe::nothing()).unwrap_err();
        assert!(matches!(err, MaybeError::UnsupportedOperation(_)));

        let err = Maybe::nothing().compare(&Maybe::new(1)).unwrap_err();
        assert!(matches!(err, MaybeError::UnsupportedOperation(_)));

        let err = Maybe::<i32>::nothing()
            .compare(&Maybe::nothing())
            .unwrap_err();
        assert!(matches!(err, MaybeError::UnsupportedOperation(_)));

        assert!(Maybe::<i32>::nothing().compare_value(&1).is_err());
    }

    #[test]
    fn test_unordered_values_fail() {
        let err = Maybe::new(f64::NAN).compare(&Maybe::new(1.0)).unwrap_err();
        assert!(matches!(err, MaybeError::UnsupportedOperation(_)));
    }

    #[test]
    fn test_hash_matches_stored_value() {
        assert_eq!(hash_of(&Maybe::new(1i64)), hash_of(&1i64));
        assert_eq!(hash_of(&Maybe::<i64>::nothing()), hash_of(&EMPTY));
    }

    #[test]
    fn test_set_deduplication() {
        let mut items = vec![
            Maybe::new(1),
            Maybe::new(2),
            Maybe::new(1),
            Maybe::nothing(),
            Maybe::nothing(),
            Maybe::new(0),
        ];
        items.shuffle(&mut rand::rng());

        let set: HashSet<Maybe<i32>> = items.into_iter().collect();
        assert_eq!(set.len(), 4);
        assert!(set.contains(&Maybe::new(1)));
        assert!(set.contains(&Maybe::new(0)));
        assert!(set.contains(&Maybe::nothing()));
    }

    #[test]
    fn test_display_and_debug() {
        assert_eq!(format!("{}", Maybe::new(1)), "1");
        assert_eq!(format!("{}", Maybe::<i32>::nothing()), "EMPTY");
        assert_eq!(format!("{:?}", Maybe::new(1)), "Maybe(1)");
        assert_eq!(format!("{:?}", Maybe::new("a")), "Maybe(\"a\")");
        assert_eq!(format!("{:?}", Maybe::<i32>::nothing()), "Maybe(EMPTY)");
    }

    #[test]
    fn test_conversions_from_std() {
        assert_eq!(Maybe::from(Some(1)), Maybe::new(1));
        assert!(Maybe::<i32>::from(None).is_nothing());
        assert_eq!(Maybe::new(5).into_option(), Some(5));
        assert_eq!(Maybe::new(5).map(|v| v * 2), Maybe::new(10));
        assert!(Maybe::<i32>::nothing().map(|v| v * 2).is_nothing());
    }
}
