//! Partial updates of a student document.
//!
//! The update payload arrives as a loosely typed field map. It is checked against
//! [`MUTABLE_FIELDS`] and type-checked field by field before anything is written.

use super::{Address, Student};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use thiserror::Error;

/// Top-level fields a PATCH may overwrite. `address` is replaced as a whole.
pub const MUTABLE_FIELDS: &[&str] = &["name", "age", "address"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("Field '{field}' cannot be updated (allowed: {})", MUTABLE_FIELDS.join(", "))]
    UnknownField { field: String },

    #[error("Field '{field}' has an invalid value (expected: {expected})")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub address: Option<Address>,
}

impl StudentPatch {
    /// Validates a raw field map. Fails on the first unknown or mistyped field,
    /// checking fields in name order so the reported error is stable.
    pub fn from_fields(fields: HashMap<String, JsonValue>) -> Result<Self, PatchError> {
        let mut keys: Vec<&String> = fields.keys().collect();
        keys.sort();

        let mut patch = StudentPatch::default();
        for key in keys {
            let value = &fields[key];
            match key.as_str() {
                "name" => {
                    let name = value.as_str().ok_or_else(|| invalid(key, "string"))?;
                    patch.name = Some(name.to_string());
                }
                "age" => {
                    let age = value.as_i64().ok_or_else(|| invalid(key, "integer"))?;
                    patch.age = Some(age);
                }
                "address" => {
                    let address: Address = serde_json::from_value(value.clone())
                        .map_err(|_| invalid(key, "object with string 'city' and 'country'"))?;
                    patch.address = Some(address);
                }
                _ => {
                    return Err(PatchError::UnknownField {
                        field: key.clone(),
                    })
                }
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.address.is_none()
    }

    /// Overwrites the supplied fields. Returns `true` if the document changed.
    pub fn apply(&self, student: &mut Student) -> bool {
        let before = student.clone();
        if let Some(name) = &self.name {
            student.name = name.clone();
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(address) = &self.address {
            student.address = address.clone();
        }
        *student != before
    }

    /// The supplied fields as a JSON object, suitable for a shallow merge into a
    /// stored document.
    pub fn to_document_fields(&self) -> Map<String, JsonValue> {
        let mut out = Map::new();
        if let Some(name) = &self.name {
            out.insert("name".to_string(), JsonValue::from(name.clone()));
        }
        if let Some(age) = self.age {
            out.insert("age".to_string(), JsonValue::from(age));
        }
        if let Some(address) = &self.address {
            out.insert(
                "address".to_string(),
                serde_json::json!({ "city": address.city, "country": address.country }),
            );
        }
        out
    }
}

fn invalid(field: &str, expected: &'static str) -> PatchError {
    PatchError::InvalidValue {
        field: field.to_string(),
        expected,
    }
}
