// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::env;
use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

/// Numeric literals accepted for NUMBER-typed (and, by inference, ANY-typed)
/// parameters: optional leading `-`, decimal integer, decimal float, binary
/// `0b…`, hexadecimal `0x…`. Anything else is a conversion error, never a
/// silent fallback to text.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[0-9]+|[0-9]*\.[0-9]+|0b[01]+|0x[0-9a-fA-F]+)$")
        .expect("hard-coded pattern")
});

/// The token spelled `:help` (also `:h`), recognized anywhere on the command
/// line as an explicit help request.
pub const HELP_TOKENS: &[&str] = &[":h", ":help"];

/// The token spelled `:helpx` (also `:hh`), requesting the extended help
/// view.
pub const HELPX_TOKENS: &[&str] = &[":hh", ":helpx"];

/// The token requesting the interactive re-invocation loop.
pub const LOOP_TOKEN: &str = ":loop";

/// The coercion category declared for a parameter.
///
/// `Flag` and `Bool` are distinct: a `Flag` parameter never consumes a value
/// token (presence, or a negation form, sets it), while a `Bool` parameter
/// expects an explicit boolean-looking token.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValueType {
    /// Infer a light type: number if the token matches the numeric grammar,
    /// text otherwise.
    Any,
    /// Plain text.
    Text,
    /// Integer or float per the numeric grammar.
    Number,
    /// Stand-alone boolean, set by presence or negation.
    Flag,
    /// Boolean with an explicit value token.
    Bool,
    /// A JSON-style array token.
    List,
    /// A JSON-style object token.
    Dict,
    /// Accepts only the none literal.
    None,
}

impl ValueType {
    /// The canonical upper-case name, as shown in error messages and help.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Any => "ANY",
            ValueType::Text => "TEXT",
            ValueType::Number => "NUMBER",
            ValueType::Flag => "FLAG",
            ValueType::Bool => "BOOL",
            ValueType::List => "LIST",
            ValueType::Dict => "DICT",
            ValueType::None => "NONE",
        }
    }
}

/// A decoded command-line value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The none/null value.
    None,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A text string.
    Text(String),
    /// An ordered list.
    List(Vec<Value>),
    /// An ordered string-keyed map.
    Dict(IndexMap<String, Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", encode(self))
    }
}

/// A token failed the grammar of its declared type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("token does not satisfy the {expected} grammar")]
pub struct DecodeError {
    /// Name of the type whose grammar was not met.
    pub expected: &'static str,
}

/// Look up a token in the fixed special-literal table.
///
/// These spellings decode to the same value regardless of the declared
/// parameter type; the control tokens (help, helpx, loop) are deliberately
/// not in this table, they never become values.
pub fn special_value(token: &str) -> Option<Value> {
    match token {
        ":true" | ":t" => Some(Value::Bool(true)),
        ":false" | ":f" => Some(Value::Bool(false)),
        ":none" => Some(Value::None),
        ":empty" => Some(Value::Text(String::new())),
        ":cwd" => Some(Value::Text(
            env::current_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| ".".to_string()),
        )),
        _ => None,
    }
}

/// Decode a command-line token against a declared type.
///
/// The special-literal table is consulted before any type-directed decoding;
/// a special value literal decodes identically whatever the declared type,
/// except that `Flag`/`Bool` restrict the accepted spellings to the boolean
/// subset.
pub fn decode(token: &str, ty: ValueType) -> Result<Value, DecodeError> {
    if let Some(value) = special_value(token) {
        return match ty {
            ValueType::Flag | ValueType::Bool => match value {
                Value::Bool(_) => Ok(value),
                _ => Err(DecodeError { expected: ty.name() }),
            },
            _ => Ok(value),
        };
    }

    match ty {
        ValueType::Text => Ok(Value::Text(token.to_string())),
        ValueType::Number => decode_number(token).ok_or(DecodeError {
            expected: ValueType::Number.name(),
        }),
        ValueType::Any => Ok(decode_number(token).unwrap_or_else(|| Value::Text(token.to_string()))),
        ValueType::Bool => match token {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(DecodeError {
                expected: ValueType::Bool.name(),
            }),
        },
        // A FLAG never takes a value token; only the boolean literals
        // handled above are acceptable.
        ValueType::Flag => Err(DecodeError {
            expected: ValueType::Flag.name(),
        }),
        ValueType::None => Err(DecodeError {
            expected: ValueType::None.name(),
        }),
        ValueType::List => match serde_json::from_str::<serde_json::Value>(token) {
            Ok(serde_json::Value::Array(items)) => {
                Ok(Value::List(items.into_iter().map(from_json).collect()))
            }
            _ => Err(DecodeError {
                expected: ValueType::List.name(),
            }),
        },
        ValueType::Dict => match serde_json::from_str::<serde_json::Value>(token) {
            Ok(serde_json::Value::Object(entries)) => Ok(Value::Dict(
                entries.into_iter().map(|(k, v)| (k, from_json(v))).collect(),
            )),
            _ => Err(DecodeError {
                expected: ValueType::Dict.name(),
            }),
        },
    }
}

/// Encode a value back to its command-line spelling.
///
/// This is the exact inverse used when re-serializing a resolved default for
/// help display or re-invocation: booleans, none and the empty string encode
/// to their canonical special-literal spellings.
pub fn encode(value: &Value) -> String {
    match value {
        Value::None => ":none".to_string(),
        Value::Bool(true) => ":true".to_string(),
        Value::Bool(false) => ":false".to_string(),
        Value::Int(n) => n.to_string(),
        // A whole-valued float must keep its decimal point, otherwise it
        // would re-decode as an integer.
        Value::Float(x) if x.fract() == 0.0 => format!("{:.1}", x),
        Value::Float(x) => x.to_string(),
        Value::Text(s) if s.is_empty() => ":empty".to_string(),
        Value::Text(s) => s.clone(),
        Value::List(_) | Value::Dict(_) => to_json(value).to_string(),
    }
}

fn decode_number(token: &str) -> Option<Value> {
    if !NUMBER_PATTERN.is_match(token) {
        return None;
    }

    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    if let Some(bits) = body.strip_prefix("0b") {
        let n = i64::from_str_radix(bits, 2).ok()?;
        return Some(Value::Int(if negative { -n } else { n }));
    }

    if let Some(digits) = body.strip_prefix("0x") {
        let n = i64::from_str_radix(digits, 16).ok()?;
        return Some(Value::Int(if negative { -n } else { n }));
    }

    if body.contains('.') {
        return token.parse::<f64>().ok().map(Value::Float);
    }

    token.parse::<i64>().ok().map(Value::Int)
}

fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(entries) => Value::Dict(
            entries.into_iter().map(|(k, v)| (k, from_json(v))).collect(),
        ),
    }
}

fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::None => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::from(*n),
        Value::Float(x) => serde_json::Value::from(*x),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Dict(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_grammar() {
        let accepted = [
            ("0", Value::Int(0)),
            ("42", Value::Int(42)),
            ("-17", Value::Int(-17)),
            ("3.5", Value::Float(3.5)),
            (".5", Value::Float(0.5)),
            ("-0.25", Value::Float(-0.25)),
            ("0b101", Value::Int(5)),
            ("0x1F", Value::Int(31)),
            ("-0x1f", Value::Int(-31)),
        ];

        for (i, (token, expected)) in accepted.iter().enumerate() {
            let got = decode(token, ValueType::Number);
            assert_eq!(got.as_ref(), Ok(expected), "test[{}]: {:?}", i, token);
        }

        let rejected = ["", "abc", "1.2.3", "0b", "0x", "1e5", "--3", "12px"];

        for (i, token) in rejected.iter().enumerate() {
            let got = decode(token, ValueType::Number);
            assert!(got.is_err(), "test[{}]: {:?} gave {:?}", i, token, got);
        }
    }

    #[test]
    fn test_any_inference() {
        assert_eq!(decode("42", ValueType::Any), Ok(Value::Int(42)));
        assert_eq!(decode("0x10", ValueType::Any), Ok(Value::Int(16)));
        assert_eq!(decode("2.5", ValueType::Any), Ok(Value::Float(2.5)));
        assert_eq!(
            decode("hello", ValueType::Any),
            Ok(Value::Text("hello".into()))
        );
        // A near-number stays text under ANY.
        assert_eq!(
            decode("1.2.3", ValueType::Any),
            Ok(Value::Text("1.2.3".into()))
        );
    }

    #[test]
    fn test_special_literals_ignore_declared_type() {
        for ty in [ValueType::Any, ValueType::Text, ValueType::Number] {
            assert_eq!(decode(":true", ty), Ok(Value::Bool(true)), "{:?}", ty);
            assert_eq!(decode(":f", ty), Ok(Value::Bool(false)), "{:?}", ty);
            assert_eq!(decode(":none", ty), Ok(Value::None), "{:?}", ty);
            assert_eq!(decode(":empty", ty), Ok(Value::Text(String::new())), "{:?}", ty);
        }
    }

    #[test]
    fn test_boolean_types_restrict_special_literals() {
        for ty in [ValueType::Flag, ValueType::Bool] {
            assert_eq!(decode(":t", ty), Ok(Value::Bool(true)), "{:?}", ty);
            assert_eq!(decode(":false", ty), Ok(Value::Bool(false)), "{:?}", ty);
            assert!(decode(":none", ty).is_err(), "{:?}", ty);
            assert!(decode(":cwd", ty).is_err(), "{:?}", ty);
        }

        // Bare spellings are only valid for BOOL.
        assert_eq!(decode("true", ValueType::Bool), Ok(Value::Bool(true)));
        assert!(decode("true", ValueType::Flag).is_err());
    }

    #[test]
    fn test_cwd_literal() {
        let got = decode(":cwd", ValueType::Text).unwrap();
        match got {
            Value::Text(path) => assert!(!path.is_empty()),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_none_type() {
        assert_eq!(decode(":none", ValueType::None), Ok(Value::None));
        assert!(decode("anything", ValueType::None).is_err());
    }

    #[test]
    fn test_list_and_dict() {
        assert_eq!(
            decode("[1, \"two\", 3.5]", ValueType::List),
            Ok(Value::List(vec![
                Value::Int(1),
                Value::Text("two".into()),
                Value::Float(3.5),
            ]))
        );
        assert!(decode("{\"a\": 1}", ValueType::List).is_err());

        let got = decode("{\"a\": 1, \"b\": [true]}", ValueType::Dict).unwrap();
        match got {
            Value::Dict(entries) => {
                assert_eq!(entries.get("a"), Some(&Value::Int(1)));
                assert_eq!(
                    entries.get("b"),
                    Some(&Value::List(vec![Value::Bool(true)]))
                );
            }
            other => panic!("expected dict, got {:?}", other),
        }
        assert!(decode("not-json", ValueType::Dict).is_err());
    }

    #[test]
    fn test_encode_canonical_spellings() {
        assert_eq!(encode(&Value::Bool(true)), ":true");
        assert_eq!(encode(&Value::Bool(false)), ":false");
        assert_eq!(encode(&Value::None), ":none");
        assert_eq!(encode(&Value::Text(String::new())), ":empty");
        assert_eq!(encode(&Value::Int(-7)), "-7");
        assert_eq!(encode(&Value::Float(1.0)), "1.0");
        assert_eq!(encode(&Value::Float(2.5)), "2.5");
        assert_eq!(encode(&Value::Text("alice".into())), "alice");
    }

    #[test]
    fn test_round_trip() {
        // decode(encode(v), ty) == v for every type except LIST/DICT.
        let cases = [
            (Value::Text("hello world".into()), ValueType::Text),
            (Value::Text(String::new()), ValueType::Text),
            (Value::Int(42), ValueType::Number),
            (Value::Int(-31), ValueType::Number),
            (Value::Float(2.5), ValueType::Number),
            (Value::Float(8.0), ValueType::Number),
            (Value::Bool(true), ValueType::Flag),
            (Value::Bool(false), ValueType::Bool),
            (Value::None, ValueType::Any),
            (Value::Int(9), ValueType::Any),
        ];

        for (i, (value, ty)) in cases.iter().enumerate() {
            let encoded = encode(value);
            let decoded = decode(&encoded, *ty);
            assert_eq!(
                decoded.as_ref(),
                Ok(value),
                "test[{}]: {:?} via {:?}",
                i,
                value,
                encoded
            );
        }
    }
}
