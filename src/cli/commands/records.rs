//! Record views and the non-interactive `list`, `search` and `report` commands

use gradebook::config::Config;
use gradebook::core::persistence::{load_store, LoadStatus};
use gradebook::core::report::{write_report, ClassReport, ReportGenerator, TextReporter};
use gradebook::core::{Student, StudentStore};
use gradebook::{error, info};
use std::fmt::Write;
use std::path::Path;

const TABLE_RULE: &str = "--------------------------------------------------------";

/// Table of students with ID, name, average and grade columns
pub fn student_table<'a>(students: impl IntoIterator<Item = &'a Student>) -> String {
    let mut table = String::new();
    let _ = writeln!(
        table,
        "{:<15} {:<25} {:<10} {:<6}",
        "ID", "Name", "Average", "Grade"
    );
    let _ = writeln!(table, "{TABLE_RULE}");

    let mut count = 0;
    for s in students {
        let _ = writeln!(
            table,
            "{:<15} {:<25} {:<10.2} {:<6}",
            s.id, s.name, s.average, s.grade
        );
        count += 1;
    }

    if count == 0 {
        table.push_str("No active students found.\n");
    } else {
        let _ = writeln!(table, "{TABLE_RULE}");
        let _ = writeln!(table, "Total: {count} active students");
    }
    table
}

/// Full details of one student, marks included
pub fn student_details(student: &Student) -> String {
    format!(
        "ID: {}\nName: {}\nMarks: {}\nAverage: {:.2}\nGrade: {}\n",
        student.id,
        student.name,
        student.marks_display(),
        student.average,
        student.grade
    )
}

/// Load the configured data file, reporting problems on stderr
///
/// A missing or unreadable file yields an empty store so read-only commands
/// still produce output.
pub fn open_store(config: &Config) -> StudentStore {
    let path = Path::new(&config.paths.data_file);
    match load_store(path, config.store.capacity) {
        Ok((store, LoadStatus::Loaded(_))) => store,
        Ok((store, LoadStatus::FileAbsent)) => {
            eprintln!(
                "ℹ No data file at {}; no students recorded yet",
                path.display()
            );
            store
        }
        Err(e) => {
            error!("Failed to load {}: {e}", path.display());
            eprintln!("✗ {e}");
            StudentStore::with_capacity(config.store.capacity)
        }
    }
}

/// Print all active students
pub fn run_list(config: &Config) {
    let store = open_store(config);
    print!("{}", student_table(store.list_active()));
}

/// Print one student; exits with status 1 when the ID has no active record
pub fn run_search(config: &Config, id: &str) {
    let store = open_store(config);
    match store.search(id) {
        Ok(student) => print!("{}", student_details(student)),
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Print the class report and optionally save it to the configured report file
pub fn run_report(config: &Config, save: bool) {
    let store = open_store(config);
    let report = ClassReport::from_store(&store);
    let text = TextReporter::new().render(&report);
    print!("{text}");

    if save {
        let path = Path::new(&config.paths.report_file);
        match write_report(&text, path) {
            Ok(()) => {
                println!("✓ Report saved: {}", path.display());
                info!("Report exported to: {}", path.display());
            }
            Err(e) => {
                error!("Report export failed: {e}");
                eprintln!("✗ {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_rows_and_total() {
        let mut store = StudentStore::new();
        store.add("S1", "Ada", [90, 80, 70]).unwrap();
        store.add("S2", "Bob", [40, 40, 40]).unwrap();
        store.delete("S2").unwrap();

        let table = student_table(store.list_active());
        assert!(table.contains("S1              Ada                       80.00      B"));
        assert!(!table.contains("Bob"));
        assert!(table.ends_with("Total: 1 active students\n"));
    }

    #[test]
    fn test_table_without_students() {
        let table = student_table(StudentStore::new().list_active());
        assert!(table.ends_with("No active students found.\n"));
    }

    #[test]
    fn test_details() {
        let student = Student::new("S9", "Cy", [55, 65, 75]);
        assert_eq!(
            student_details(&student),
            "ID: S9\nName: Cy\nMarks: 55, 65, 75\nAverage: 65.00\nGrade: C\n"
        );
    }
}
