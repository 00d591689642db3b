//! The student collection contract.

use crate::domain::student::{Student, StudentFilter, StudentPatch};
use async_trait::async_trait;

/// A collection of student documents keyed by roll number.
///
/// Roll numbers are not unique. Single-record operations act on the first stored
/// document with the given roll number (insertion order).
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Round-trips to the backing store.
    async fn ping(&self) -> anyhow::Result<()>;

    /// Total number of stored documents.
    async fn count(&self) -> anyhow::Result<u64>;

    async fn insert(&self, roll_number: i64, student: &Student) -> anyhow::Result<()>;

    /// All documents matching `filter`, in insertion order.
    async fn find(&self, filter: &StudentFilter) -> anyhow::Result<Vec<Student>>;

    async fn find_one(&self, roll_number: i64) -> anyhow::Result<Option<Student>>;

    /// Applies `patch` to the first matching document. Returns the number of
    /// documents actually modified (0 when nothing matched or nothing changed).
    async fn update_one(&self, roll_number: i64, patch: &StudentPatch) -> anyhow::Result<u64>;

    /// Removes the first matching document. Returns the number removed.
    async fn delete_one(&self, roll_number: i64) -> anyhow::Result<u64>;
}
