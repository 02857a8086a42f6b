//! Feature attributes.
//!
//! Features coming from a WFS server do not share a fixed schema, so attributes are stored as an ordered list of
//! name-value pairs. The order is the order the attributes were inserted in (for GeoJSON input it is the order of
//! the keys in the `properties` object).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Key of the attribute used as a feature title.
pub const NAME_KEY: &str = "name";

/// Scalar attribute value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Missing value.
    Null,
}

impl PropertyValue {
    /// String representation of the value for display. `None` for null values.
    pub fn display_value(&self) -> Option<String> {
        match self {
            PropertyValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::String(v) => f.write_str(v),
            PropertyValue::Number(v) => write!(f, "{v}"),
            PropertyValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PropertyValue::Null)
    }
}

impl From<serde_json::Value> for PropertyValue {
    /// Non-scalar JSON values (booleans, arrays and objects) are stored as their JSON text.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::String(v) => PropertyValue::String(v),
            serde_json::Value::Number(v) => match v.as_f64() {
                Some(number) => PropertyValue::Number(number),
                None => PropertyValue::String(v.to_string()),
            },
            other => PropertyValue::String(other.to_string()),
        }
    }
}

/// Ordered set of named attributes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PropertyMap {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of the attribute. An existing attribute keeps its position, a new one is appended to the end.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value of the attribute with the given name.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Display value of the `name` attribute, if it is set.
    pub fn name(&self) -> Option<String> {
        self.get(NAME_KEY).and_then(PropertyValue::display_value)
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = PropertyMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }

        map
    }
}
