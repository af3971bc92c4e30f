// Copyright (c) Facebook, Inc. and its affiliates. All Rights Reserved
//! Container operations exposed as callable values

use super::object::{expect_args, Function};
use super::Value;
use crate::access::{Capability, Key};
use crate::convert::Conversion;
use crate::errors::CallError;
use crate::maybe::Maybe;

/// Bind `capability` to a snapshot of `receiver`
pub(super) fn bind(receiver: &Maybe<Value>, capability: Capability) -> Value {
    let receiver = receiver.clone();
    Value::Function(Function::new(capability.name(), move |args| {
        apply(&receiver, capability, args)
    }))
}

fn apply(receiver: &Maybe<Value>, capability: Capability, args: &[Value]) -> Result<Value, CallError> {
    match capability {
        Capability::IsSomething => {
            expect_args(args, 0, 0)?;
            Ok(Value::Bool(receiver.is_something()))
        }
        Capability::IsNothing => {
            expect_args(args, 0, 0)?;
            Ok(Value::Bool(receiver.is_nothing()))
        }
        Capability::UnwrapOrSentinel => {
            expect_args(args, 0, 0)?;
            settle(receiver.clone())
        }
        Capability::UnwrapOr => {
            expect_args(args, 0, 1)?;
            let fallback = args.first().cloned().unwrap_or(Value::Null);
            Ok(receiver.clone().unwrap_or(fallback))
        }
        Capability::Member => {
            expect_args(args, 1, 1)?;
            settle(receiver.member(str_arg(&args[0])?))
        }
        Capability::Index => {
            expect_args(args, 1, 1)?;
            settle(receiver.index(key_arg(&args[0])?))
        }
        Capability::Select => {
            expect_args(args, 1, 1)?;
            settle(receiver.select(str_arg(&args[0])?))
        }
        Capability::Invoke => settle(receiver.invoke(args)),
        Capability::Convert => {
            expect_args(args, 1, 1)?;
            receiver
                .convert(conversion_arg(&args[0])?)
                .map(Value::from)
                .map_err(|e| CallError::failed(e.to_string()))
        }
        Capability::AsMaybe => {
            expect_args(args, 1, 1)?;
            settle(receiver.as_maybe(conversion_arg(&args[0])?).map(Value::from))
        }
    }
}

/// A host value has no way to represent EMPTY, so an empty result is a
/// failed call (which `invoke` turns back into EMPTY).
fn settle(result: Maybe<Value>) -> Result<Value, CallError> {
    result.into_option().ok_or_else(CallError::absent)
}

fn str_arg(arg: &Value) -> Result<&str, CallError> {
    arg.as_str().ok_or_else(|| {
        CallError::bad_arguments(format!("expected a str, got {}", arg.type_name()))
    })
}

fn key_arg(arg: &Value) -> Result<Key, CallError> {
    match arg {
        Value::String(s) => Ok(Key::Name(s.clone())),
        Value::Int(i) => Ok(Key::Position(*i)),
        other => Err(CallError::bad_arguments(format!(
            "expected a str or int key, got {}",
            other.type_name()
        ))),
    }
}

fn conversion_arg(arg: &Value) -> Result<Conversion, CallError> {
    let name = str_arg(arg)?;
    Conversion::from_name(name)
        .ok_or_else(|| CallError::bad_arguments(format!("unknown conversion '{}'", name)))
}
