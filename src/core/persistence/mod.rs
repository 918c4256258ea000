//! Loading and saving the student data file
//!
//! Files are opened, used and closed within each call; nothing stays open
//! between user actions.

pub mod codec;

pub use codec::{decode, encode};

use crate::core::error::{StoreError, StoreResult};
use crate::core::store::StudentStore;
use crate::{info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Default data file name
pub const DATA_FILENAME: &str = "students.txt";

/// Outcome of reading the data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file was read; holds the number of records decoded
    Loaded(usize),
    /// There was no file to read; the store starts empty
    FileAbsent,
}

/// Read the data file into a new store bounded by `capacity`
///
/// A missing file is not an error: it yields an empty store and
/// [`LoadStatus::FileAbsent`]. ID and name fields that are not valid UTF-8
/// are shown lossily but their original bytes are kept for saving.
///
/// # Errors
/// [`StoreError::Io`] when the file exists but cannot be read
pub fn load_store<P: AsRef<Path>>(
    path: P,
    capacity: usize,
) -> StoreResult<(StudentStore, LoadStatus)> {
    let path = path.as_ref();
    let raw = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Data file {} not found; starting empty", path.display());
            return Ok((
                StudentStore::with_capacity(capacity),
                LoadStatus::FileAbsent,
            ));
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let students = decode(&raw, capacity);
    let count = students.len();
    let undecodable = students.iter().filter(|s| !s.raw.is_empty()).count();
    if undecodable > 0 {
        warn!(
            "{undecodable} records in {} are not valid UTF-8; their bytes are kept as read",
            path.display()
        );
    }
    info!("Loaded {count} student records from {}", path.display());
    Ok((
        StudentStore::from_records(students, capacity),
        LoadStatus::Loaded(count),
    ))
}

/// Write every record in `store` (deleted ones included) to `path`
///
/// The file is replaced, not appended to. The store is never modified. Text
/// that was not valid UTF-8 when loaded is written back byte for byte.
///
/// # Errors
/// [`StoreError::Io`] when the file cannot be created or written
pub fn save_store<P: AsRef<Path>>(path: P, store: &StudentStore) -> StoreResult<()> {
    let path = path.as_ref();
    fs::write(path, encode(store.records())).map_err(|e| StoreError::io(path, e))?;
    info!(
        "Saved {} student records to {}",
        store.len(),
        path.display()
    );
    Ok(())
}
