// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! Objects with attributes, and native functions

use std::fmt;
use std::sync::Arc;

use super::dict::Dict;
use super::Value;
use crate::errors::CallError;

/// An instance of a named class with attributes
///
/// An object may delegate indexing to one of its values, the way a class
/// with a custom item accessor forwards `obj[key]` to an inner mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    class: String,
    attrs: Dict,
    items: Option<Box<Value>>,
}

impl Object {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attrs: Dict::new(),
            items: None,
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    /// Forward indexing to `items`
    pub fn with_items(mut self, items: impl Into<Value>) -> Self {
        self.items = Some(Box::new(items.into()));
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    pub fn attrs(&self) -> &Dict {
        &self.attrs
    }

    pub fn items(&self) -> Option<&Value> {
        self.items.as_deref()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} object>", self.class)
    }
}

type NativeFn = dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync;

/// A named native callable
///
/// Functions compare by identity: two handles are equal only if they
/// share the same body.
#[derive(Clone)]
pub struct Function {
    name: String,
    body: Arc<NativeFn>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        (self.body)(args).map_err(|e| match e.callee {
            Some(_) => e,
            None => e.with_callee(self.name.clone()),
        })
    }

    /// Address of the shared body, used for identity and hashing
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.body) as *const () as usize
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

/// Check the argument count of a native call
pub fn expect_args(args: &[Value], min: usize, max: usize) -> Result<(), CallError> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            format!("{}", min)
        } else {
            format!("{} to {}", min, max)
        };
        return Err(CallError::bad_arguments(format!(
            "expected {} argument(s), got {}",
            expected,
            args.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_attributes() {
        let obj = Object::new("Foo").with_attr("attr", 1);
        assert_eq!(obj.class(), "Foo");
        assert_eq!(obj.attr("attr"), Some(&Value::Int(1)));
        assert_eq!(obj.attr("other"), None);
        assert!(obj.items().is_none());
        assert_eq!(obj.to_string(), "<Foo object>");
    }

    #[test]
    fn test_function_call_names_callee() {
        let f = Function::new("fail", |_| Err(CallError::failed("boom")));
        let err = f.call(&[]).unwrap_err();
        assert_eq!(err.to_string(), "fail(): boom");
    }

    #[test]
    fn test_function_identity() {
        let f = Function::new("t", |_| Ok(Value::Bool(true)));
        let g = f.clone();
        let h = Function::new("t", |_| Ok(Value::Bool(true)));
        assert_eq!(f, g);
        assert_eq!(f.id(), g.id());
        assert_ne!(f, h);
    }

    #[test]
    fn test_expect_args() {
        assert!(expect_args(&[], 0, 0).is_ok());
        assert!(expect_args(&[Value::Null], 0, 1).is_ok());
        let err = expect_args(&[Value::Null, Value::Null], 1, 1).unwrap_err();
        assert_eq!(err.to_string(), "expected 1 argument(s), got 2");
        let err = expect_args(&[], 1, 2).unwrap_err();
        assert_eq!(err.to_string(), "expected 1 to 2 argument(s), got 0");
    }
}
