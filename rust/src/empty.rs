// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! The EMPTY sentinel
//!
//! `Empty` marks the absence of a value. It is a separate type rather than
//! a reserved value of the host so that null-like values (`None`,
//! `Value::Null`, `0`, `""`, `false`) can all be stored in a container.
//!
//! The sentinel has no ordering: `Empty` does not implement `PartialOrd`,
//! and ordering a container that holds it is reported as
//! [`UnsupportedOperation`](crate::errors::UnsupportedOperation).

use std::fmt;
use std::hash::{Hash, Hasher};

/// Token fed to the hasher for every `Empty`
const EMPTY_HASH_TOKEN: &str = "MAYBE EMPTY SENTINEL";

/// Marker for "no value present"
///
/// Every instance is equal to every other instance; identity is never
/// consulted.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Empty;

/// The shared sentinel instance
pub const EMPTY: Empty = Empty;

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EMPTY")
    }
}

impl fmt::Debug for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EMPTY")
    }
}

impl Hash for Empty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EMPTY_HASH_TOKEN.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::hash_of;

    #[test]
    fn test_equal_to_itself() {
        assert_eq!(EMPTY, Empty);
        assert_eq!(Empty::default(), EMPTY);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EMPTY), "EMPTY");
        assert_eq!(format!("{:?}", EMPTY), "EMPTY");
    }

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(hash_of(&EMPTY), hash_of(&Empty));
        assert_ne!(hash_of(&EMPTY), hash_of(&0i64));
        assert_ne!(hash_of(&EMPTY), hash_of(""));
        assert_ne!(hash_of(&EMPTY), hash_of("EMPTY"));
    }
}
