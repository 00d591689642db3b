//! In-process student collection, used by tests and `STORE_BACKEND=memory`.

use super::store::StudentStore;
use crate::domain::student::{StoredStudent, Student, StudentFilter, StudentPatch};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStudentStore {
    records: RwLock<Vec<StoredStudent>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn count(&self) -> anyhow::Result<u64> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn insert(&self, roll_number: i64, student: &Student) -> anyhow::Result<()> {
        self.records
            .write()
            .await
            .push(StoredStudent::new(roll_number, student.clone()));
        Ok(())
    }

    async fn find(&self, filter: &StudentFilter) -> anyhow::Result<Vec<Student>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.matches(&r.student))
            .map(|r| r.student.clone())
            .collect())
    }

    async fn find_one(&self, roll_number: i64) -> anyhow::Result<Option<Student>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.roll_number == roll_number)
            .map(|r| r.student.clone()))
    }

    async fn update_one(&self, roll_number: i64, patch: &StudentPatch) -> anyhow::Result<u64> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.roll_number == roll_number) else {
            return Ok(0);
        };
        Ok(u64::from(patch.apply(&mut record.student)))
    }

    async fn delete_one(&self, roll_number: i64) -> anyhow::Result<u64> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.roll_number == roll_number) {
            Some(idx) => {
                records.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
