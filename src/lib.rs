pub mod app {
    pub mod student_service;
}
pub mod domain {
    pub mod student;
}
pub mod errors;
pub mod infra {
    pub mod config;
}
pub mod storage;
pub mod transport {
    pub mod http;
}

// Convenience re-exports (keeps call-sites clean)
pub use app::student_service::{StudentService, UpdateOutcome};
pub use domain::student::{Address, Student, StudentFilter, StudentPatch};
pub use errors::ApiError;
pub use infra::config::Config;
pub use storage::students::{open_store, MemoryStudentStore, PostgresStudentStore, StudentStore};
