//! Plain-text class report

use crate::core::report::{ClassReport, ReportGenerator};
use std::fmt::Write;

/// Embedded text report template
const TEXT_TEMPLATE: &str = include_str!("templates/report.txt");

/// Line printed in place of statistics when nobody is active
pub const NO_ACTIVE_STUDENTS: &str = "No active students to generate report.";

/// Plain-text report generator
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Averages, extremes and grade distribution, or the empty-class notice
    fn statistics_section(report: &ClassReport) -> String {
        if report.is_empty() {
            return format!("{NO_ACTIVE_STUDENTS}\n");
        }

        let mut section = String::new();
        let _ = writeln!(section, "Class Average: {:.2}\n", report.class_average);
        let _ = writeln!(
            section,
            "Highest Average: {:.2} (Student ID: {})",
            report.highest.average,
            report.highest.id_or_empty()
        );
        let _ = writeln!(
            section,
            "Lowest Average: {:.2} (Student ID: {})\n",
            report.lowest.average,
            report.lowest.id_or_empty()
        );

        section.push_str("Grade Distribution:\n");
        for (grade, count) in report.grade_distribution() {
            let percent = report.grade_percentage(grade).unwrap_or(0.0);
            let _ = writeln!(section, "{grade}: {count} students ({percent:.1}%)");
        }
        section
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, report: &ClassReport) -> String {
        TEXT_TEMPLATE
            .replace("{{active_count}}", &report.active_count.to_string())
            .replace("{{statistics}}", &Self::statistics_section(report))
    }
}
