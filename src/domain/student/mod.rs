//! Student record types.
//!
//! A student is stored as a small document (`name`, `age`, `address`) keyed by an
//! integer roll number. The roll number lives next to the document, not inside it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod filter;
pub mod patch;

pub use filter::StudentFilter;
pub use patch::{PatchError, StudentPatch, MUTABLE_FIELDS};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Address {
    pub city: String,
    pub country: String,
}

/// The student document. All fields are required when creating a student.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Student {
    pub name: String,
    pub age: i64,
    pub address: Address,
}

/// A student document together with the roll number it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredStudent {
    pub roll_number: i64,
    pub student: Student,
}

impl StoredStudent {
    pub fn new(roll_number: i64, student: Student) -> Self {
        Self {
            roll_number,
            student,
        }
    }
}
