//! Class-wide statistics over active records

use crate::core::grading::GRADE_LETTERS;
use crate::core::models::Student;
use crate::core::store::StudentStore;

/// Starting value for the running maximum average
const HIGHEST_SEED: f32 = 0.0;

/// Starting value for the running minimum average (the highest possible average)
const LOWEST_SEED: f32 = 100.0;

/// Best or worst average in the class and who holds it
///
/// The running comparison is strict and starts from a seed value, so `id`
/// stays `None` when no record ever beats the seed: a class where every
/// average is 0 has no highest holder, and one where every average is 100 has
/// no lowest holder.
#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    /// Average value (the seed when `id` is `None`)
    pub average: f32,
    /// ID of the first record holding `average`
    pub id: Option<String>,
}

impl Extreme {
    const fn seeded(average: f32) -> Self {
        Self { average, id: None }
    }

    fn offer(&mut self, student: &Student, beats: impl Fn(f32, f32) -> bool) {
        if beats(student.average, self.average) {
            self.average = student.average;
            self.id = Some(student.id.clone());
        }
    }

    /// Holder ID, or an empty string when unset
    #[must_use]
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

/// Aggregate statistics for the class report
///
/// Computed once and shared by every rendering so screen and file output
/// cannot diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassReport {
    /// Number of active records
    pub active_count: usize,
    /// Mean of per-record averages (0 with no active records)
    pub class_average: f32,
    /// Highest average; ties keep the earliest record
    pub highest: Extreme,
    /// Lowest average; ties keep the earliest record
    pub lowest: Extreme,
    /// Records per grade, in [`GRADE_LETTERS`] order
    pub grade_counts: [usize; GRADE_LETTERS.len()],
}

impl ClassReport {
    /// Compute statistics over the active records of `store`
    #[must_use]
    pub fn from_store(store: &StudentStore) -> Self {
        Self::from_students(store.list_active())
    }

    /// Compute statistics over `students`, in order
    ///
    /// Inactive records are skipped. Grades outside A-F are not counted in the
    /// histogram but still contribute to the averages.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_students<'a, I>(students: I) -> Self
    where
        I: IntoIterator<Item = &'a Student>,
    {
        let mut active_count = 0;
        let mut total_average = 0.0_f32;
        let mut highest = Extreme::seeded(HIGHEST_SEED);
        let mut lowest = Extreme::seeded(LOWEST_SEED);
        let mut grade_counts = [0; GRADE_LETTERS.len()];

        for student in students.into_iter().filter(|s| s.active) {
            active_count += 1;
            total_average += student.average;
            highest.offer(student, |candidate, current| candidate > current);
            lowest.offer(student, |candidate, current| candidate < current);
            if let Some(slot) = GRADE_LETTERS.iter().position(|g| *g == student.grade) {
                grade_counts[slot] += 1;
            }
        }

        let class_average = if active_count > 0 {
            total_average / active_count as f32
        } else {
            0.0
        };

        Self {
            active_count,
            class_average,
            highest,
            lowest,
            grade_counts,
        }
    }

    /// Whether there are no active records to report on
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.active_count == 0
    }

    /// Number of records with `grade`
    #[must_use]
    pub fn grade_count(&self, grade: char) -> usize {
        GRADE_LETTERS
            .iter()
            .position(|g| *g == grade)
            .map_or(0, |slot| self.grade_counts[slot])
    }

    /// Share of active records with `grade`, in percent
    ///
    /// `None` when there are no active records.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn grade_percentage(&self, grade: char) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        Some(self.grade_count(grade) as f32 / self.active_count as f32 * 100.0)
    }

    /// `(grade, count)` pairs in report order
    pub fn grade_distribution(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        GRADE_LETTERS
            .iter()
            .copied()
            .zip(self.grade_counts.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, average: f32, grade: char) -> Student {
        Student {
            average,
            grade,
            ..Student::new(id, "", [0, 0, 0])
        }
    }

    #[test]
    fn test_empty_class() {
        let none: [Student; 0] = [];
        let report = ClassReport::from_students(&none);

        assert!(report.is_empty());
        assert!(report.class_average.abs() < f32::EPSILON);
        assert!(report.highest.id.is_none());
        assert!(report.lowest.id.is_none());
        assert_eq!(report.grade_percentage('A'), None);
    }

    #[test]
    fn test_ties_keep_first_record() {
        let students = [
            student("first", 80.0, 'B'),
            student("second", 80.0, 'B'),
            student("third", 60.0, 'C'),
            student("fourth", 60.0, 'C'),
        ];
        let report = ClassReport::from_students(&students);

        assert_eq!(report.highest.id.as_deref(), Some("first"));
        assert_eq!(report.lowest.id.as_deref(), Some("third"));
    }

    #[test]
    fn test_all_zero_has_no_highest() {
        let students = [student("a", 0.0, 'F'), student("b", 0.0, 'F')];
        let report = ClassReport::from_students(&students);

        assert_eq!(report.active_count, 2);
        assert!(report.highest.id.is_none());
        assert_eq!(report.highest.id_or_empty(), "");
        assert_eq!(report.lowest.id.as_deref(), Some("a"));
    }

    #[test]
    fn test_all_hundred_has_no_lowest() {
        let students = [student("a", 100.0, 'A')];
        let report = ClassReport::from_students(&students);

        assert_eq!(report.highest.id.as_deref(), Some("a"));
        assert!(report.lowest.id.is_none());
        assert!((report.lowest.average - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_inactive_records_excluded() {
        let mut gone = student("gone", 99.0, 'A');
        gone.active = false;
        let students = [gone, student("kept", 50.0, 'D')];
        let report = ClassReport::from_students(&students);

        assert_eq!(report.active_count, 1);
        assert_eq!(report.grade_count('A'), 0);
        assert_eq!(report.highest.id.as_deref(), Some("kept"));
    }

    #[test]
    fn test_histogram_and_percentages() {
        let students = [
            student("a", 90.0, 'A'),
            student("b", 75.0, 'B'),
            student("c", 72.0, 'B'),
            student("d", 10.0, 'F'),
        ];
        let report = ClassReport::from_students(&students);

        assert_eq!(report.grade_counts, [1, 2, 0, 0, 1]);
        assert!((report.grade_percentage('B').unwrap() - 50.0).abs() < f32::EPSILON);
        assert!(report.grade_percentage('C').unwrap().abs() < f32::EPSILON);
        assert!((report.class_average - 61.75).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_grade_not_counted() {
        let students = [student("a", 50.0, 'X')];
        let report = ClassReport::from_students(&students);

        assert_eq!(report.active_count, 1);
        assert_eq!(report.grade_counts.iter().sum::<usize>(), 0);
        assert_eq!(report.grade_count('X'), 0);
    }
}
