//! The student records service.
//!
//! Each operation is a single pass-through to the [`StudentStore`] with light field
//! shaping. Roll numbers are assigned as `count + 1`, which is not safe under
//! concurrent creators: two simultaneous creates can receive the same roll number.

use crate::domain::student::{Student, StudentFilter, StudentPatch};
use crate::storage::students::StudentStore;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Exactly one document was modified.
    Modified,
    /// No document matched, or the patch left it unchanged.
    Unchanged,
}

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn StudentStore> {
        &self.store
    }

    /// Stores a new student and returns its roll number.
    pub async fn create(&self, student: Student) -> anyhow::Result<i64> {
        let total = self.store.count().await?;
        let roll_number = total as i64 + 1;
        self.store.insert(roll_number, &student).await?;
        info!(roll_number, name = %student.name, "Student created");
        Ok(roll_number)
    }

    pub async fn list(&self, filter: &StudentFilter) -> anyhow::Result<Vec<Student>> {
        let students = self.store.find(filter).await?;
        debug!(
            country = ?filter.country,
            min_age = ?filter.min_age,
            matched = students.len(),
            "Listed students"
        );
        Ok(students)
    }

    pub async fn fetch(&self, roll_number: i64) -> anyhow::Result<Option<Student>> {
        let student = self.store.find_one(roll_number).await?;
        debug!(roll_number, found = student.is_some(), "Fetched student");
        Ok(student)
    }

    pub async fn update(
        &self,
        roll_number: i64,
        patch: &StudentPatch,
    ) -> anyhow::Result<UpdateOutcome> {
        let modified = self.store.update_one(roll_number, patch).await?;
        let outcome = if modified == 1 {
            UpdateOutcome::Modified
        } else {
            UpdateOutcome::Unchanged
        };
        info!(roll_number, ?outcome, "Student update applied");
        Ok(outcome)
    }

    /// Removes the student if present. Missing students are not an error.
    pub async fn delete(&self, roll_number: i64) -> anyhow::Result<()> {
        let removed = self.store.delete_one(roll_number).await?;
        info!(roll_number, removed, "Student delete applied");
        Ok(())
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }
}
