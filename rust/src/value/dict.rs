// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! Insertion-ordered string-keyed map of values

use std::collections::HashMap;

use super::Value;

/// A dictionary of values
#[derive(Clone, Debug, Default)]
pub struct Dict {
    /// The underlying storage - maintains insertion order
    entries: Vec<(String, Value)>,
    /// Fast lookup index
    index: HashMap<String, usize>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value at a key, replacing (in place) any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(&idx) = self.index.get(&key) {
            self.entries[idx].1 = value;
        } else {
            let idx = self.entries.len();
            self.entries.push((key.clone(), value));
            self.index.insert(key, idx);
        }
    }

    /// Builder form of [`Dict::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over key-value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.iter().map(|(_, v)| v)
    }
}

/// Order-insensitive, like mapping equality in dynamic languages
impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |o| o == v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dict::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dict_basic() {
        let mut dict = Dict::new();
        dict.insert("name", "test");
        dict.insert("count", 42);

        assert_eq!(dict.get("name"), Some(&Value::from("test")));
        assert_eq!(dict.get("count"), Some(&Value::Int(42)));
        assert!(dict.get("missing").is_none());
        assert!(dict.contains_key("count"));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_dict_replace_keeps_position() {
        let mut dict = Dict::new().with("a", 1).with("b", 2);
        dict.insert("a", 10);

        let keys: Vec<&str> = dict.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(dict.get("a"), Some(&Value::Int(10)));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_dict_equality_ignores_order() {
        let a = Dict::new().with("x", 1).with("y", 2);
        let b = Dict::new().with("y", 2).with("x", 1);
        let c = Dict::new().with("x", 1).with("y", 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Dict::new().with("x", 1));
    }

    #[test]
    fn test_dict_from_iter() {
        let dict: Dict = vec![("a", 1), ("b", 2)].into_iter().collect();
        let values: Vec<&Value> = dict.values().collect();
        assert_eq!(values, vec![&Value::Int(1), &Value::Int(2)]);
        assert!(Dict::new().is_empty());
    }
}
