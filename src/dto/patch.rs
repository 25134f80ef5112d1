//! Per-field update marker
//!
//! `Patch<T>` tells apart a field that was left out of an update payload,
//! a field sent as JSON `null`, and a field sent with a value. Fields must
//! be annotated with `#[serde(default)]` so that a missing key becomes
//! `Patch::Absent`.

use serde::{Deserialize, Deserializer};

use crate::utils::errors::{validation_error, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present in the payload
    Absent,
    /// Key present with a `null` value
    Null,
    /// Key present with a value
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    /// Resolves a patch for a field that cannot be cleared.
    ///
    /// Returns `Ok(None)` when the field should be left alone and an error
    /// when the payload tries to null it.
    pub fn required(self, field: &'static str) -> AppResult<Option<T>> {
        match self {
            Patch::Absent => Ok(None),
            Patch::Null => Err(validation_error(field, "field cannot be null")),
            Patch::Value(v) => Ok(Some(v)),
        }
    }

    /// Applies a patch to a nullable field. `Null` clears it.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Value(v) => *target = Some(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}
