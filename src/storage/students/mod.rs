pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryStudentStore;
pub use postgres::PostgresStudentStore;
pub use store::StudentStore;

use crate::infra::config::{Config, StoreBackend};
use std::sync::Arc;

/// Opens the store selected by `config.store_backend`.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn StudentStore>> {
    let store: Arc<dyn StudentStore> = match config.store_backend {
        StoreBackend::Postgres => Arc::new(PostgresStudentStore::connect(config).await?),
        StoreBackend::Memory => Arc::new(MemoryStudentStore::new()),
    };
    Ok(store)
}
