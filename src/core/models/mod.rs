//! Data models for `gradebook`

pub mod student;

pub use student::{Marks, RawText, Student};
