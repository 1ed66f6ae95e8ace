// ── Three-state desired values ──
//
// The orchestration runtime reports each declared attribute as a known value,
// an explicit null, or a value it has not materialised yet. Triggers only
// ever act on `Known`; `Null` and `Unknown` both mean "leave it alone".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field<T> {
    Known(T),
    #[default]
    Null,
    Unknown,
}

impl<T> Field<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Null | Self::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// `true` only when known and different from `current`.
    ///
    /// Null and unknown never compare unequal to anything.
    pub fn differs_from(&self, current: &T) -> bool
    where
        T: PartialEq,
    {
        self.known().is_some_and(|v| v != current)
    }

}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}
