// ── Runtime state codec ──
//
// The orchestration runtime exchanges configuration, plans, and state as a
// JSON object of attribute values. Each value is known, null, or unknown;
// unknown travels as a fixed sentinel string on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use leaseweb_core::Field;

/// Wire marker for a value the runtime has not computed yet.
pub const UNKNOWN_VALUE: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state is not a valid attribute object: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("attribute `{attribute}` must be a {expected}")]
    Type {
        attribute: String,
        expected: &'static str,
    },
}

// ── Attribute values ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AttrValue {
    Known(Value),
    #[default]
    Null,
    Unknown,
}

impl AttrValue {
    /// `null` maps to [`AttrValue::Null`], never to `Known(Value::Null)`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) if s == UNKNOWN_VALUE => Self::Unknown,
            other => Self::Known(other),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn as_known(&self) -> Option<&Value> {
        match self {
            Self::Known(v) => Some(v),
            Self::Null | Self::Unknown => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_known().and_then(Value::as_str)
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(v) => v.serialize(serializer),
            Self::Null => serializer.serialize_none(),
            Self::Unknown => serializer.serialize_str(UNKNOWN_VALUE),
        }
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Known(Value::String(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Known(Value::String(value.to_owned()))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Known(Value::Bool(value))
    }
}

// ── State blob ───────────────────────────────────────────────────────

/// One resource's attributes. Missing attributes read as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateBlob(BTreeMap<String, AttrValue>);

static NULL: AttrValue = AttrValue::Null;

impl StateBlob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, StateError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Compact JSON with attributes in name order.
    pub fn encode(&self) -> Result<Vec<u8>, StateError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn get(&self, name: &str) -> &AttrValue {
        self.0.get(name).unwrap_or(&NULL)
    }

    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) {
        self.0.insert(name.to_owned(), value.into());
    }

    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Three-state view of a string attribute.
    pub fn string(&self, name: &str) -> Result<Field<String>, StateError> {
        match self.get(name) {
            AttrValue::Known(Value::String(s)) => Ok(Field::Known(s.clone())),
            AttrValue::Known(_) => Err(type_error(name, "string")),
            AttrValue::Null => Ok(Field::Null),
            AttrValue::Unknown => Ok(Field::Unknown),
        }
    }

    /// Three-state view of a bool attribute.
    pub fn bool(&self, name: &str) -> Result<Field<bool>, StateError> {
        match self.get(name) {
            AttrValue::Known(Value::Bool(b)) => Ok(Field::Known(*b)),
            AttrValue::Known(_) => Err(type_error(name, "bool")),
            AttrValue::Null => Ok(Field::Null),
            AttrValue::Unknown => Ok(Field::Unknown),
        }
    }

    /// Known string or empty; null and unknown both read as unset.
    pub fn string_or_empty(&self, name: &str) -> Result<String, StateError> {
        Ok(self.string(name)?.known().cloned().unwrap_or_default())
    }

    pub fn bool_or_false(&self, name: &str) -> Result<bool, StateError> {
        Ok(self.bool(name)?.known().copied().unwrap_or(false))
    }
}

fn type_error(attribute: &str, expected: &'static str) -> StateError {
    StateError::Type {
        attribute: attribute.to_owned(),
        expected,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sentinel_decodes_as_unknown() {
        let raw = format!(r#"{{"id":"42","reference":"{UNKNOWN_VALUE}","dhcp_lease":null}}"#);
        let blob = StateBlob::decode(raw.as_bytes()).unwrap();
        assert_eq!(blob.string("id").unwrap(), Field::Known("42".into()));
        assert_eq!(blob.string("reference").unwrap(), Field::Unknown);
        assert_eq!(blob.string("dhcp_lease").unwrap(), Field::Null);
        assert_eq!(blob.string("missing").unwrap(), Field::Null);
    }

    #[test]
    fn unknown_and_null_encode_distinctly() {
        let blob = StateBlob::new()
            .with("a", AttrValue::Unknown)
            .with("b", AttrValue::Null)
            .with("c", true);
        let encoded: Value = serde_json::from_slice(&blob.encode().unwrap()).unwrap();
        assert_eq!(encoded, json!({ "a": UNKNOWN_VALUE, "b": null, "c": true }));
    }

    #[test]
    fn wrong_type_is_reported() {
        let blob = StateBlob::new().with("powered_on", "yes");
        let err = blob.bool("powered_on").unwrap_err();
        assert_eq!(err.to_string(), "attribute `powered_on` must be a bool");
    }

    #[test]
    fn unset_reads_as_defaults() {
        let blob = StateBlob::new()
            .with("reference", AttrValue::Unknown)
            .with("powered_on", AttrValue::Null);
        assert_eq!(blob.string_or_empty("reference").unwrap(), "");
        assert!(!blob.bool_or_false("powered_on").unwrap());
    }

    #[test]
    fn not_an_object_fails_to_decode() {
        assert!(matches!(
            StateBlob::decode(b"[1,2]"),
            Err(StateError::Decode(_))
        ));
    }
}
