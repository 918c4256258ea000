//! Core record management: grading, the record store, persistence and reports

pub mod error;
pub mod grading;
pub mod models;
pub mod persistence;
pub mod report;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::Student;
pub use store::StudentStore;
