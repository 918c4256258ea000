//! Grade calculation
//!
//! Maps a set of marks to an average and the average to a letter grade.

/// Letter grades in report order, highest first
pub const GRADE_LETTERS: [char; 5] = ['A', 'B', 'C', 'D', 'F'];

/// Lower bound (inclusive) for each passing letter, evaluated highest first
const GRADE_THRESHOLDS: [(f32, char); 4] = [(85.0, 'A'), (70.0, 'B'), (55.0, 'C'), (40.0, 'D')];

/// Arithmetic mean of `marks`, or 0 when there are none
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_average(marks: &[i32]) -> f32 {
    if marks.is_empty() {
        return 0.0;
    }
    let sum: i64 = marks.iter().map(|&m| i64::from(m)).sum();
    sum as f32 / marks.len() as f32
}

/// Letter grade for an average
///
/// Bounds are closed below, so a value sitting exactly on a boundary gets the
/// higher grade (85.00 is an 'A').
#[must_use]
pub fn compute_grade(average: f32) -> char {
    GRADE_THRESHOLDS
        .iter()
        .find(|(floor, _)| average >= *floor)
        .map_or('F', |(_, letter)| *letter)
}
