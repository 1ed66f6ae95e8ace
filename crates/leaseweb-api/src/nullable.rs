// Three-state wire values.
//
// The Leaseweb API distinguishes a field that is missing from the body from
// one explicitly set to `null`. Every optional field of the wire types is a
// `Nullable<T>` with `#[serde(default)]`, so a missing key decodes to
// `Absent` and a `null` literal decodes to `Null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nullable<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Self::Absent => Nullable::Absent,
            Self::Null => Nullable::Null,
            Self::Present(v) => Nullable::Present(v),
        }
    }

    /// Collapse to two states: absent and null both become `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        self.as_ref().into_option()
    }
}

impl<T: Default> Nullable<T> {
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

impl Nullable<String> {
    /// The value as `&str`, empty when absent or null.
    pub fn as_str_or_empty(&self) -> &str {
        self.as_option().map_or("", String::as_str)
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Present)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(v) => v.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default)]
        value: Nullable<String>,
    }

    #[test]
    fn missing_key_is_absent() {
        let wrapper: Wrapper = serde_json::from_str("{}").unwrap();
        assert!(wrapper.value.is_absent());
        assert_eq!(wrapper.value.as_str_or_empty(), "");
    }

    #[test]
    fn null_literal_is_null() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert!(wrapper.value.is_null());
        assert_eq!(wrapper.value.into_option(), None);
    }

    #[test]
    fn value_is_present() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"value": "rack-7"}"#).unwrap();
        assert_eq!(wrapper.value, Nullable::Present("rack-7".to_owned()));
        assert_eq!(wrapper.value.as_str_or_empty(), "rack-7");
    }
}
