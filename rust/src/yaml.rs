// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! YAML documents as dynamic values
//!
//! Loading a document and wrapping it in a `Maybe` gives total traversal
//! of heterogeneous nested data:
//!
//! ```
//! use maybe::{parse_yaml, Maybe, Value};
//!
//! let doc = parse_yaml("db: {hosts: [alpha, beta]}").unwrap();
//! let m = Maybe::new(doc);
//! assert_eq!(m.select("db.hosts.1"), Maybe::new(Value::from("beta")));
//! assert!(m.select("db.ports.0").is_nothing());
//! ```

use std::fs;
use std::path::Path;

use crate::errors::LoadError;
use crate::value::{Dict, Value};

/// Parse a YAML string into a Value
pub fn parse_yaml(content: &str) -> Result<Value, LoadError> {
    serde_yaml::from_str(content).map_err(|e| LoadError::new(format!("YAML parse error: {}", e)))
}

/// Load a YAML file and parse it
pub fn load_yaml_file(path: &Path) -> Result<Value, LoadError> {
    let path_str = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(LoadError::with_path("File not found", &path_str));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| LoadError::with_path(format!("Failed to read file: {}", e), &path_str))?;

    log::debug!("loading YAML document from {}", path_str);
    parse_yaml(&content).map_err(|mut e| {
        e.path = Some(path_str);
        e
    })
}

/// Render a Value as YAML. Functions cannot be rendered.
pub fn to_yaml_string(value: &Value) -> Result<String, LoadError> {
    serde_yaml::to_string(value).map_err(|e| LoadError::new(format!("YAML emit error: {}", e)))
}

/// Convert serde_yaml::Value to Value
pub fn from_yaml(yaml: &serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Null
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Value::List(seq.iter().map(from_yaml).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut dict = Dict::new();
            for (key, value) in map {
                match mapping_key(key) {
                    Some(k) => dict.insert(k, from_yaml(value)),
                    None => log::debug!("skipping non-scalar mapping key {:?}", key),
                }
            }
            Value::Dict(dict)
        }
    }
}

/// Scalar keys become strings; collections cannot be keys
fn mapping_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Conversion;
    use crate::maybe::Maybe;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_scalars() {
        let doc = parse_yaml("a: 1\nb: 2.5\nc: hello\nd: null\ne: false").unwrap();
        let m = Maybe::new(doc);
        assert_eq!(m.index("a"), Maybe::new(Value::Int(1)));
        assert_eq!(m.index("b"), Maybe::new(Value::Float(2.5)));
        assert_eq!(m.index("c"), Maybe::new(Value::from("hello")));
        // null and false are present values, not absence
        assert!(m.index("d").is_something());
        assert_eq!(m.index("e"), Maybe::new(Value::Bool(false)));
        assert!(m.index("f").is_nothing());
    }

    #[test]
    fn test_numeric_mapping_keys() {
        let doc = parse_yaml("ports:\n  80: http\n  443: https").unwrap();
        let m = Maybe::new(doc);
        assert_eq!(m.select("ports.443"), Maybe::new(Value::from("https")));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_yaml("a: [1, 2").unwrap_err();
        assert!(err.message.starts_with("YAML parse error"));
        assert!(err.path.is_none());
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "server:\n  port: \"8080\"\n  tags: [a, b]").unwrap();

        let m = Maybe::new(load_yaml_file(&path).unwrap());
        assert_eq!(m.select("server.port").try_int().unwrap(), 8080);
        assert_eq!(m.select("server.tags.-1"), Maybe::new(Value::from("b")));
        assert!(m
            .select("server.host")
            .as_maybe(Conversion::String)
            .is_nothing());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = load_yaml_file(&path).unwrap_err();
        assert_eq!(err.message, "File not found");
        assert_eq!(err.path, Some(path.to_string_lossy().to_string()));
    }

    #[test]
    fn test_load_file_with_bad_yaml_keeps_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "a: [1, 2").unwrap();
        let err = load_yaml_file(&path).unwrap_err();
        assert_eq!(err.path, Some(path.to_string_lossy().to_string()));
    }

    #[test]
    fn test_emit_and_reload() {
        let doc = Dict::new()
            .with("name", "svc")
            .with("replicas", 3)
            .with("enabled", true)
            .with("labels", Value::from(vec![Value::from("x"), Value::Null]));
        let value = Value::from(doc);
        let text = to_yaml_string(&value).unwrap();
        assert_eq!(parse_yaml(&text).unwrap(), value);
    }

    #[test]
    fn test_functions_cannot_be_emitted() {
        let value = Value::function("f", |_| Ok(Value::Null));
        let err = to_yaml_string(&value).unwrap_err();
        assert!(err.message.contains("cannot serialize function 'f'"));
    }
}
