// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! Error types for the container's strict tier
//!
//! The safe tier (member/index access, invocation, lenient conversions)
//! never surfaces these; it turns every failure into an empty container.

use std::error::Error;
use std::fmt;

/// Base error type for strict container operations
#[derive(Debug, Clone, PartialEq)]
pub enum MaybeError {
    UnsupportedOperation(UnsupportedOperation),
    ConversionFailure(ConversionFailure),
    CallError(CallError),
    LoadError(LoadError),
}

impl fmt::Display for MaybeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaybeError::UnsupportedOperation(e) => write!(f, "{}", e),
            MaybeError::ConversionFailure(e) => write!(f, "{}", e),
            MaybeError::CallError(e) => write!(f, "{}", e),
            MaybeError::LoadError(e) => write!(f, "{}", e),
        }
    }
}

impl Error for MaybeError {}

/// An operation that has no meaning for the operands, such as ordering
/// a value against EMPTY
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedOperation {
    pub message: String,
    pub operation: Option<String>,
}

impl UnsupportedOperation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            operation: None,
        }
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }
}

impl fmt::Display for UnsupportedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Some(ref op) => write!(f, "{}: {}", op, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for UnsupportedOperation {}

impl From<UnsupportedOperation> for MaybeError {
    fn from(e: UnsupportedOperation) -> Self {
        MaybeError::UnsupportedOperation(e)
    }
}

/// A stored value could not be converted to the requested type
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionFailure {
    pub message: String,
    pub target: Option<String>,
    pub value: Option<String>,
}

impl ConversionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            target: None,
            value: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = self.message.clone();
        if let Some(ref target) = self.target {
            msg = msg.replace("$TARGET", target);
        }
        if let Some(ref value) = self.value {
            msg = msg.replace("$VALUE", value);
        }
        write!(f, "{}", msg)
    }
}

impl Error for ConversionFailure {}

impl From<ConversionFailure> for MaybeError {
    fn from(e: ConversionFailure) -> Self {
        MaybeError::ConversionFailure(e)
    }
}

/// What went wrong while invoking a stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallErrorKind {
    /// The stored value is not invocable
    NotCallable,
    /// Wrong number or type of arguments
    BadArguments,
    /// The call needed a value but the container was empty
    Absent,
    /// The callee itself failed
    Failed,
}

/// Failure raised while invoking a value
///
/// `Maybe::invoke` absorbs these; they only reach callers that call a
/// `Dynamic` host directly.
#[derive(Debug, Clone, PartialEq)]
pub struct CallError {
    pub kind: CallErrorKind,
    pub message: String,
    pub callee: Option<String>,
}

impl CallError {
    pub fn new(kind: CallErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            callee: None,
        }
    }

    pub fn not_callable(type_name: &str) -> Self {
        Self::new(
            CallErrorKind::NotCallable,
            format!("'{}' object is not callable", type_name),
        )
    }

    pub fn bad_arguments(message: impl Into<String>) -> Self {
        Self::new(CallErrorKind::BadArguments, message)
    }

    pub fn absent() -> Self {
        Self::new(CallErrorKind::Absent, "container is EMPTY")
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(CallErrorKind::Failed, message)
    }

    pub fn with_callee(mut self, callee: impl Into<String>) -> Self {
        self.callee = Some(callee.into());
        self
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.callee {
            Some(ref callee) => write!(f, "{}(): {}", callee, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for CallError {}

impl From<CallError> for MaybeError {
    fn from(e: CallError) -> Self {
        MaybeError::CallError(e)
    }
}

impl From<ConversionFailure> for CallError {
    fn from(e: ConversionFailure) -> Self {
        CallError::failed(e.to_string())
    }
}

/// Error raised while loading a YAML document
#[derive(Debug, Clone, PartialEq)]
pub struct LoadError {
    pub message: String,
    pub path: Option<String>,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl Error for LoadError {}

impl From<LoadError> for MaybeError {
    fn from(e: LoadError) -> Self {
        MaybeError::LoadError(e)
    }
}

pub type Result<T> = std::result::Result<T, MaybeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_failure_placeholders() {
        let err = ConversionFailure::new("cannot convert $VALUE to $TARGET")
            .with_target("int")
            .with_value("'foo'");
        assert_eq!(err.to_string(), "cannot convert 'foo' to int");
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = UnsupportedOperation::new("EMPTY is not ordered").with_operation("compare");
        assert_eq!(err.to_string(), "compare: EMPTY is not ordered");
        assert_eq!(
            UnsupportedOperation::new("plain").to_string(),
            "plain"
        );
    }

    #[test]
    fn test_call_error_kinds() {
        let err = CallError::not_callable("int").with_callee("invoke");
        assert_eq!(err.kind, CallErrorKind::NotCallable);
        assert_eq!(err.to_string(), "invoke(): 'int' object is not callable");
        assert_eq!(CallError::absent().kind, CallErrorKind::Absent);
    }

    #[test]
    fn test_load_error_with_path() {
        let err = LoadError::with_path("bad indentation", "conf/app.yaml");
        assert_eq!(err.to_string(), "conf/app.yaml: bad indentation");
    }

    #[test]
    fn test_into_maybe_error() {
        let err: MaybeError = ConversionFailure::new("nope").into();
        assert!(matches!(err, MaybeError::ConversionFailure(_)));
        let err: MaybeError = UnsupportedOperation::new("nope").into();
        assert!(matches!(err, MaybeError::UnsupportedOperation(_)));
    }
}
