// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed reads over the untyped `args` map of a call.
//
// Each operation pulls the fields it needs through these accessors. A field
// that is missing or of the wrong shape is `MalformedArguments`; a string
// that is not one of an enumeration's wire names is `InvalidEnumValue`.

use eposlink_core::{BridgeError, Result, Value, ValueMap};

/// An enumeration the runtime sends by name (e.g. `"CUT_FEED"`).
pub trait WireEnum: Sized + Copy + PartialEq + 'static {
    /// Every accepted wire name with the variant it decodes to.
    const VARIANTS: &'static [(&'static str, Self)];

    fn from_wire(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(wire, _)| *wire == name)
            .map(|(_, variant)| *variant)
    }

    fn wire_name(self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, variant)| *variant == self)
            .map(|(wire, _)| *wire)
            .unwrap_or("?")
    }
}

/// The `args` sub-map of an id+args call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(ValueMap);

impl Params {
    pub fn new(map: ValueMap) -> Self {
        Self(map)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn required(&self, field: &str) -> Result<&Value> {
        match self.0.get(field) {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(BridgeError::MalformedArguments),
        }
    }

    pub fn str(&self, field: &str) -> Result<&str> {
        self.required(field)?
            .as_str()
            .ok_or(BridgeError::MalformedArguments)
    }

    pub fn i32(&self, field: &str) -> Result<i32> {
        self.required(field)?
            .as_i32()
            .ok_or(BridgeError::MalformedArguments)
    }

    /// Absent and `null` both read as `None`; anything else must be an i32.
    pub fn opt_i32(&self, field: &str) -> Result<Option<i32>> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_i32()
                .map(Some)
                .ok_or(BridgeError::MalformedArguments),
        }
    }

    pub fn bool(&self, field: &str) -> Result<bool> {
        self.required(field)?
            .as_bool()
            .ok_or(BridgeError::MalformedArguments)
    }

    /// Decode a field by wire name. A present value that matches no
    /// variant, including a non-string, is reported as `field = value`.
    pub fn enumeration<E: WireEnum>(&self, field: &str) -> Result<E> {
        let value = self.required(field)?;
        value
            .as_str()
            .and_then(E::from_wire)
            .ok_or_else(|| BridgeError::invalid_enum(field, value))
    }
}

impl From<ValueMap> for Params {
    fn from(map: ValueMap) -> Self {
        Self(map)
    }
}
