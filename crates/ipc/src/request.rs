// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request decoding and typed parameter access.

use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

/// Why an input line could not be turned into a [`Request`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("request is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("request must be a JSON object")]
    NotAnObject,

    #[error("request is missing the 'method' field")]
    MissingMethod,

    #[error("'method' must be a string")]
    MethodNotString,

    #[error("'params' must be an object")]
    ParamsNotObject,

    #[error("request line too long: {len} bytes (max {max})")]
    TooLong { len: usize, max: usize },
}

/// A parameter that is missing or has the wrong shape.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("missing required parameter '{0}'")]
    Missing(String),

    #[error("parameter '{name}' must be {expected}")]
    WrongType { name: String, expected: &'static str },

    #[error("invalid value for parameter '{name}': {reason}")]
    Invalid { name: String, reason: String },
}

/// One decoded request line.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: String,
    pub params: Params,
}

impl Request {
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Request {
            method: method.into(),
            params,
        }
    }
}

/// Decode one input line (without its terminator).
pub fn decode_request(line: &[u8]) -> Result<Request, DecodeError> {
    let text = std::str::from_utf8(line).map_err(|_| DecodeError::InvalidUtf8)?;
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(mut object) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let method = match object.remove("method") {
        Some(Value::String(method)) => method,
        Some(_) => return Err(DecodeError::MethodNotString),
        None => return Err(DecodeError::MissingMethod),
    };

    let params = match object.remove("params") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(params)) => params,
        Some(_) => return Err(DecodeError::ParamsNotObject),
    };

    Ok(Request::new(method, Params(params)))
}

/// Named request parameters with typed accessors.
///
/// A `null` value is treated the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    /// Builder used by tests and clients.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, ParamError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(wrong_type(name, "a string")),
        }
    }

    pub fn required_str(&self, name: &str) -> Result<&str, ParamError> {
        self.optional_str(name)?
            .ok_or_else(|| ParamError::Missing(name.to_string()))
    }

    /// Integer parameter; floats with no fractional part are not accepted.
    pub fn optional_i64(&self, name: &str) -> Result<Option<i64>, ParamError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| wrong_type(name, "an integer")),
            Some(_) => Err(wrong_type(name, "an integer")),
        }
    }

    pub fn required_i64(&self, name: &str) -> Result<i64, ParamError> {
        self.optional_i64(name)?
            .ok_or_else(|| ParamError::Missing(name.to_string()))
    }

    /// Non-negative integer parameter that fits in `usize`.
    pub fn optional_usize(&self, name: &str) -> Result<Option<usize>, ParamError> {
        match self.optional_i64(name)? {
            None => Ok(None),
            Some(n) => usize::try_from(n).map(Some).map_err(|_| ParamError::Invalid {
                name: name.to_string(),
                reason: format!("{n} is negative"),
            }),
        }
    }

    /// String parameter parsed with [`FromStr`].
    pub fn optional_parse<T>(&self, name: &str) -> Result<Option<T>, ParamError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional_str(name)? {
            None => Ok(None),
            Some(s) => s.parse().map(Some).map_err(|e: T::Err| ParamError::Invalid {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params(map)
    }
}

fn wrong_type(name: &str, expected: &'static str) -> ParamError {
    ParamError::WrongType {
        name: name.to_string(),
        expected,
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
