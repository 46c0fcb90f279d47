// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Argument decoding: untyped bundle → `DecodedCall`.
//
// Pure validation. Nothing here touches the registry or the native SDK, so a
// malformed call is rejected before any native work starts.

use eposlink_core::{BridgeError, MissingArgsPolicy, Result, Value};

use crate::params::Params;

/// Key holding the instance id in every call.
pub const ID_KEY: &str = "id";
/// Key holding the per-operation parameter map.
pub const ARGS_KEY: &str = "args";

/// Which argument layout an operation expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    /// `{ id }`
    IdOnly,
    /// `{ id, args: { ... } }`
    IdWithArgs,
}

/// Validated form of a call's arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    pub handle_id: i32,
    /// `None` for id-only calls.
    pub params: Option<Params>,
}

/// Decode `arguments` according to `shape`.
pub fn decode(
    arguments: Option<&Value>,
    shape: ArgShape,
    policy: MissingArgsPolicy,
) -> Result<DecodedCall> {
    match shape {
        ArgShape::IdOnly => decode_id_only(arguments),
        ArgShape::IdWithArgs => decode_id_with_args(arguments, policy),
    }
}

/// `{ id: i32 }`. Extra keys are ignored.
pub fn decode_id_only(arguments: Option<&Value>) -> Result<DecodedCall> {
    let handle_id = handle_id(arguments)?;
    Ok(DecodedCall {
        handle_id,
        params: None,
    })
}

/// `{ id: i32, args: map }`. The `args` map may be empty; a missing or
/// `null` `args` is handled per `policy`.
pub fn decode_id_with_args(
    arguments: Option<&Value>,
    policy: MissingArgsPolicy,
) -> Result<DecodedCall> {
    let handle_id = handle_id(arguments)?;
    let args = arguments
        .and_then(Value::as_map)
        .and_then(|map| map.get(ARGS_KEY));

    let params = match (args, policy) {
        (Some(Value::Map(map)), _) => Params::new(map.clone()),
        (None | Some(Value::Null), MissingArgsPolicy::TreatAsEmpty) => Params::default(),
        _ => return Err(BridgeError::MalformedArguments),
    };

    Ok(DecodedCall {
        handle_id,
        params: Some(params),
    })
}

fn handle_id(arguments: Option<&Value>) -> Result<i32> {
    arguments
        .and_then(Value::as_map)
        .and_then(|map| map.get(ID_KEY))
        .and_then(Value::as_i32)
        .ok_or(BridgeError::MalformedArguments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REJECT: MissingArgsPolicy = MissingArgsPolicy::Reject;

    #[test]
    fn id_only_accepts_integer_id() {
        let args = Value::map([("id", 7)]);
        let call = decode_id_only(Some(&args)).expect("decode");
        assert_eq!(call.handle_id, 7);
        assert!(call.params.is_none());
    }

    #[test]
    fn malformed_bundles_are_rejected() {
        let cases = [
            None,
            Some(Value::Null),
            Some(Value::from("id")),
            Some(Value::from(vec![Value::from(7)])),
            Some(Value::map::<&str, Value>([])),
            Some(Value::map([("id", "7")])),
            Some(Value::map([("id", 7.0)])),
            Some(Value::map([("id", i64::from(i32::MAX) + 1)])),
        ];
        for args in &cases {
            for shape in [ArgShape::IdOnly, ArgShape::IdWithArgs] {
                assert_eq!(
                    decode(args.as_ref(), shape, REJECT),
                    Err(BridgeError::MalformedArguments),
                    "{args:?} as {shape:?}"
                );
            }
        }
    }

    #[test]
    fn id_with_args_passes_args_through() {
        let args = Value::map([
            ("id", Value::from(7)),
            ("args", Value::map([("power", "ON")])),
        ]);
        let call = decode_id_with_args(Some(&args), REJECT).expect("decode");
        assert_eq!(call.handle_id, 7);
        let params = call.params.expect("params");
        assert_eq!(params.get("power"), Some(&Value::from("ON")));
    }

    #[test]
    fn empty_args_map_is_accepted() {
        let args = Value::map([
            ("id", Value::from(1)),
            ("args", Value::map::<&str, Value>([])),
        ]);
        let call = decode_id_with_args(Some(&args), REJECT).expect("decode");
        assert!(call.params.expect("params").is_empty());
    }

    #[test]
    fn args_must_be_a_map() {
        let args = Value::map([("id", Value::from(1)), ("args", Value::from("ON"))]);
        for policy in [MissingArgsPolicy::Reject, MissingArgsPolicy::TreatAsEmpty] {
            assert_eq!(
                decode_id_with_args(Some(&args), policy),
                Err(BridgeError::MalformedArguments)
            );
        }
    }

    #[test]
    fn missing_args_follows_policy() {
        let args = Value::map([("id", 1)]);
        assert_eq!(
            decode_id_with_args(Some(&args), MissingArgsPolicy::Reject),
            Err(BridgeError::MalformedArguments)
        );
        let call = decode_id_with_args(Some(&args), MissingArgsPolicy::TreatAsEmpty)
            .expect("decode");
        assert_eq!(call.params, Some(Params::default()));
    }

    #[test]
    fn decoding_is_repeatable() {
        let args = Value::map([
            ("id", Value::from(3)),
            ("args", Value::map([("line", 2)])),
        ]);
        let first = decode(Some(&args), ArgShape::IdWithArgs, REJECT);
        let second = decode(Some(&args), ArgShape::IdWithArgs, REJECT);
        assert_eq!(first, second);
    }
}
