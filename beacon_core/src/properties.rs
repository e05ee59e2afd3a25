use std::collections::HashMap;

use derive_more::From;
use serde::{Deserialize, Serialize};

/// Type alias for a HashMap representing key-value pairs of event properties.
///
/// Keys are strings representing property names.
///
/// # Examples
/// ```
/// # use beacon_core::{Properties, PropertyValue};
/// let properties = [
///     ("plan".to_owned(), "pro".into()),
///     ("seats".to_owned(), 12.0.into()),
///     ("trial".to_owned(), false.into()),
/// ].into_iter().collect::<Properties>();
/// ```
pub type Properties = HashMap<String, PropertyValue>;

/// Enum representing possible values of an event property.
///
/// Conveniently implements `From` conversions for `String`, `&str`, `f64`, and `bool` types.
///
/// Examples:
/// ```
/// # use beacon_core::PropertyValue;
/// let string_prop: PropertyValue = "example".into();
/// let number_prop: PropertyValue = 42.0.into();
/// let bool_prop: PropertyValue = true.into();
/// ```
#[derive(Debug, Serialize, Deserialize, PartialEq, PartialOrd, From, Clone)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A string value.
    String(String),
    /// A numerical value.
    Number(f64),
    /// A boolean value.
    Boolean(bool),
    /// A null value or absence of value.
    Null,
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        if let PropertyValue::String(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<PropertyValue> for serde_json::Value {
    fn from(value: PropertyValue) -> serde_json::Value {
        match value {
            PropertyValue::String(s) => serde_json::Value::String(s),
            PropertyValue::Number(n) => serde_json::json!(n),
            PropertyValue::Boolean(b) => serde_json::Value::Bool(b),
            PropertyValue::Null => serde_json::Value::Null,
        }
    }
}
