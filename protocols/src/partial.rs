//! Three-state field values for partial update payloads.
//!
//! A plain `Option<T>` cannot tell a field the client left out apart from a
//! field the client explicitly set to `null`. Update payloads need both, so
//! every updatable field is a [`Partial<T>`]:
//!
//! | JSON                  | Value                  |
//! |-----------------------|------------------------|
//! | key absent            | `Partial::Omitted`     |
//! | `"key": null`         | `Partial::Null`        |
//! | `"key": <value>`      | `Partial::Value(v)`    |
//!
//! Fields must be declared with
//! `#[serde(default, skip_serializing_if = "Partial::is_omitted")]` so that
//! absence deserializes to `Omitted` and `Omitted` never reaches the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Partial<T> {
    /// The field was not mentioned.
    Omitted,
    /// The field was explicitly cleared with `null`.
    Null,
    /// The field carries a value.
    Value(T),
}

impl<T> Default for Partial<T> {
    fn default() -> Self {
        Self::Omitted
    }
}

impl<T> Partial<T> {
    pub const fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for Partial<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Only reachable when the field is missing `skip_serializing_if`
            Self::Omitted | Self::Null => serializer.serialize_none(),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Partial<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Absent keys never reach here; `#[serde(default)]` yields `Omitted`.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}
