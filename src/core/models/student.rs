//! Student record model

use crate::core::grading::{compute_average, compute_grade};

/// Number of marks recorded per student
pub const MARK_COUNT: usize = 3;

/// Longest student ID kept, in bytes
pub const MAX_ID_LENGTH: usize = 19;

/// Longest student name kept, in bytes
pub const MAX_NAME_LENGTH: usize = 49;

/// Lowest accepted mark
pub const MIN_MARK: i32 = 0;

/// Highest accepted mark
pub const MAX_MARK: i32 = 100;

/// Fixed-size set of marks, one per subject
pub type Marks = [i32; MARK_COUNT];

/// Original bytes of text fields that were not valid UTF-8 when read
///
/// The matching `String` field holds a lossy copy for display and lookup;
/// these bytes are what gets written back until the field is edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawText {
    /// Undecodable ID bytes
    pub id: Option<Vec<u8>>,
    /// Undecodable name bytes
    pub name: Option<Vec<u8>>,
}

impl RawText {
    /// Whether both fields decoded cleanly
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}

/// A student's academic record
///
/// `average` and `grade` are derived from `marks` whenever the record is built
/// or its marks change. Records read back from a data file keep the stored
/// values verbatim instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// Student ID (unique among active records)
    pub id: String,

    /// Display name, possibly empty
    pub name: String,

    /// Subject marks
    pub marks: Marks,

    /// Mean of `marks`
    pub average: f32,

    /// Letter grade for `average`
    pub grade: char,

    /// `false` once the record has been logically deleted
    pub active: bool,

    /// Bytes kept verbatim from the data file
    pub raw: RawText,
}

impl Student {
    /// Create a new active student with derived average and grade
    ///
    /// The ID is truncated to [`MAX_ID_LENGTH`] bytes and the name is cleaned by
    /// [`sanitize_name`].
    #[must_use]
    pub fn new(id: &str, name: &str, marks: Marks) -> Self {
        let average = compute_average(&marks);
        Self {
            id: truncate_to(id, MAX_ID_LENGTH).to_string(),
            name: sanitize_name(name),
            marks,
            average,
            grade: compute_grade(average),
            active: true,
            raw: RawText::default(),
        }
    }

    /// Replace marks and recompute average and grade
    pub fn set_marks(&mut self, marks: Marks) {
        self.marks = marks;
        self.average = compute_average(&self.marks);
        self.grade = compute_grade(self.average);
    }

    /// Replace the name (cleaned by [`sanitize_name`])
    pub fn set_name(&mut self, name: &str) {
        self.name = sanitize_name(name);
        self.raw.name = None;
    }

    /// ID as written to the data file
    #[must_use]
    pub fn id_bytes(&self) -> &[u8] {
        self.raw.id.as_deref().unwrap_or(self.id.as_bytes())
    }

    /// Name as written to the data file
    #[must_use]
    pub fn name_bytes(&self) -> &[u8] {
        self.raw.name.as_deref().unwrap_or(self.name.as_bytes())
    }

    /// Marks joined as `"90, 80, 70"` for display
    #[must_use]
    pub fn marks_display(&self) -> String {
        self.marks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Cut `value` to at most `max_bytes` bytes without splitting a character
#[must_use]
pub fn truncate_to(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Clean a name for storage
///
/// Field and line separators would corrupt the data file, so `|`, `\r` and
/// `\n` become spaces. The result is cut to [`MAX_NAME_LENGTH`] bytes.
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let cleaned = name.replace(['|', '\r', '\n'], " ");
    truncate_to(&cleaned, MAX_NAME_LENGTH).to_string()
}

/// Whether `mark` is inside the accepted range
#[must_use]
pub const fn is_valid_mark(mark: i32) -> bool {
    mark >= MIN_MARK && mark <= MAX_MARK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_creation_derives_average_and_grade() {
        let student = Student::new("S1", "Ada Lovelace", [90, 80, 70]);

        assert_eq!(student.id, "S1");
        assert_eq!(student.name, "Ada Lovelace");
        assert_eq!(student.marks, [90, 80, 70]);
        assert!((student.average - 80.0).abs() < f32::EPSILON);
        assert_eq!(student.grade, 'B');
        assert!(student.active);
    }

    #[test]
    fn test_set_marks_recomputes() {
        let mut student = Student::new("S1", "Ada", [10, 20, 30]);
        assert_eq!(student.grade, 'F');

        student.set_marks([85, 85, 85]);
        assert!((student.average - 85.0).abs() < f32::EPSILON);
        assert_eq!(student.grade, 'A');
    }

    #[test]
    fn test_long_fields_are_truncated() {
        let long_id = "X".repeat(40);
        let long_name = "n".repeat(80);
        let student = Student::new(&long_id, &long_name, [0, 0, 0]);

        assert_eq!(student.id.len(), MAX_ID_LENGTH);
        assert_eq!(student.name.len(), MAX_NAME_LENGTH);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // 'é' is two bytes; cutting at 3 would split the second one
        assert_eq!(truncate_to("éé", 3), "é");
        assert_eq!(truncate_to("abc", 10), "abc");
    }

    #[test]
    fn test_name_separators_are_replaced() {
        assert_eq!(sanitize_name("a|b\nc\r"), "a b c ");
    }

    #[test]
    fn test_set_name_drops_raw_bytes() {
        let mut student = Student::new("S1", "Jos", [0, 0, 0]);
        student.raw.name = Some(b"Jos\xe9".to_vec());
        assert_eq!(student.name_bytes(), b"Jos\xe9");

        student.set_name("Jose");
        assert!(student.raw.is_empty());
        assert_eq!(student.name_bytes(), b"Jose");
    }

    #[test]
    fn test_marks_display() {
        let student = Student::new("S1", "Ada", [1, 22, 100]);
        assert_eq!(student.marks_display(), "1, 22, 100");
    }

    #[test]
    fn test_mark_range() {
        assert!(is_valid_mark(0));
        assert!(is_valid_mark(100));
        assert!(!is_valid_mark(-1));
        assert!(!is_valid_mark(101));
    }
}
