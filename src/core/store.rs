//! In-memory record store
//!
//! Records are kept in insertion order and never reordered or physically
//! removed. Deleting a record only clears its `active` flag; the tombstone
//! stays in storage and is written back on save. Every lookup is a linear scan
//! over active records.

use crate::core::error::{StoreError, StoreResult};
use crate::core::models::student::{is_valid_mark, truncate_to, Marks, Student, MAX_ID_LENGTH};
use crate::debug;

/// Default maximum number of records (active and deleted)
pub const MAX_STUDENTS: usize = 200;

/// Ordered, bounded collection of student records
#[derive(Debug, Clone, PartialEq)]
pub struct StudentStore {
    records: Vec<Student>,
    capacity: usize,
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentStore {
    /// Create an empty store holding at most [`MAX_STUDENTS`] records
    #[must_use]
    pub const fn new() -> Self {
        Self::with_capacity(MAX_STUDENTS)
    }

    /// Create an empty store with a custom capacity
    #[must_use]
    pub const fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    /// Build a store from already-decoded records
    ///
    /// Records past `capacity` are dropped. Derived fields are kept exactly as
    /// given, they are not recomputed.
    #[must_use]
    pub fn from_records(mut records: Vec<Student>, capacity: usize) -> Self {
        records.truncate(capacity);
        Self { records, capacity }
    }

    /// Maximum number of records
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored records, including deleted ones
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are stored at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether another record would exceed capacity
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Every stored record in insertion order, deleted ones included
    #[must_use]
    pub fn records(&self) -> &[Student] {
        &self.records
    }

    /// Index of the first active record with `id`
    ///
    /// Deleted records never match, even when their ID is equal.
    #[must_use]
    pub fn find_active_index_by_id(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|s| s.active && s.id == id)
    }

    /// Append a new active record
    ///
    /// The duplicate check only looks at active records, so an ID freed by
    /// [`delete`](Self::delete) can be reused; both records stay in storage.
    ///
    /// # Errors
    /// - [`StoreError::CapacityExceeded`] when the store is full
    /// - [`StoreError::InvalidId`] when `id` is empty or contains whitespace or `|`
    /// - [`StoreError::DuplicateId`] when an active record already uses `id`
    /// - [`StoreError::MarkOutOfRange`] when a mark is outside 0..=100
    pub fn add(&mut self, id: &str, name: &str, marks: Marks) -> StoreResult<&Student> {
        if self.is_full() {
            return Err(StoreError::CapacityExceeded(self.capacity));
        }
        let id = validate_id(id)?;
        if self.find_active_index_by_id(id).is_some() {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
        validate_marks(&marks)?;

        let student = Student::new(id, name, marks);
        debug!(
            "Added student {} (average {:.2}, grade {})",
            student.id, student.average, student.grade
        );
        self.records.push(student);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Update the name and/or marks of an active record
    ///
    /// A `new_name` that is `None` or empty keeps the current name. Average and
    /// grade are recomputed only when `new_marks` is given.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] when no active record has `id`
    /// - [`StoreError::MarkOutOfRange`] when a new mark is outside 0..=100
    pub fn update(
        &mut self,
        id: &str,
        new_name: Option<&str>,
        new_marks: Option<Marks>,
    ) -> StoreResult<&Student> {
        let index = self
            .find_active_index_by_id(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(marks) = &new_marks {
            validate_marks(marks)?;
        }

        let student = &mut self.records[index];
        if let Some(name) = new_name.filter(|n| !n.is_empty()) {
            student.set_name(name);
        }
        if let Some(marks) = new_marks {
            student.set_marks(marks);
        }
        debug!(
            "Updated student {} (average {:.2}, grade {})",
            student.id, student.average, student.grade
        );
        Ok(&self.records[index])
    }

    /// Logically delete an active record
    ///
    /// Returns the now-inactive record.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when no active record has `id`
    pub fn delete(&mut self, id: &str) -> StoreResult<&Student> {
        let index = self
            .find_active_index_by_id(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.records[index].active = false;
        debug!("Marked student {id} inactive (slot {index})");
        Ok(&self.records[index])
    }

    /// Active records in insertion order
    pub fn list_active(&self) -> impl Iterator<Item = &Student> + '_ {
        self.records.iter().filter(|s| s.active)
    }

    /// Number of active records
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.list_active().count()
    }

    /// The active record with `id`
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when no active record has `id`
    pub fn search(&self, id: &str) -> StoreResult<&Student> {
        self.find_active_index_by_id(id)
            .map(|index| &self.records[index])
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// Check an incoming ID and cut it to [`MAX_ID_LENGTH`] bytes
fn validate_id(id: &str) -> StoreResult<&str> {
    if id.is_empty() || id.chars().any(|c| c.is_whitespace() || c == '|') {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(truncate_to(id, MAX_ID_LENGTH))
}

fn validate_marks(marks: &Marks) -> StoreResult<()> {
    match marks.iter().find(|m| !is_valid_mark(**m)) {
        Some(&bad) => Err(StoreError::MarkOutOfRange(bad)),
        None => Ok(()),
    }
}
