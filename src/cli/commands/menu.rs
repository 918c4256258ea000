//! Interactive menu session
//!
//! Loads the data file, then loops over the eight-item menu until the user
//! exits or input runs out. Either way the store is saved before returning.

use crate::commands::records::{student_details, student_table};
use crate::prompt::Console;
use gradebook::config::Config;
use gradebook::core::models::student::{
    truncate_to, Marks, MARK_COUNT, MAX_ID_LENGTH, MAX_MARK, MIN_MARK,
};
use gradebook::core::persistence::{load_store, save_store, LoadStatus};
use gradebook::core::report::{write_report, ClassReport, ReportGenerator, TextReporter};
use gradebook::core::StudentStore;
use gradebook::{debug, error, info, verbose};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const BANNER_RULE: &str = "===============================================";

/// Menu entries in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Add a student
    Add,
    /// List active students
    List,
    /// Show one student
    Search,
    /// Change name and/or marks
    Update,
    /// Logically delete a student
    Delete,
    /// Class report
    Report,
    /// Write the data file
    Save,
    /// Save and quit
    Exit,
}

impl MenuChoice {
    /// All entries, numbered from 1
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::List,
        Self::Search,
        Self::Update,
        Self::Delete,
        Self::Report,
        Self::Save,
        Self::Exit,
    ];

    /// Entry for a 1-based menu number
    pub fn from_number(number: i32) -> Option<Self> {
        usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Menu label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add Student",
            Self::List => "List Students",
            Self::Search => "Search Student",
            Self::Update => "Update Student",
            Self::Delete => "Delete Student",
            Self::Report => "Generate Class Report",
            Self::Save => "Save Data",
            Self::Exit => "Exit",
        }
    }
}

/// Files a session reads and writes
#[derive(Debug, Clone)]
pub struct SessionPaths {
    /// Student data file
    pub data_file: PathBuf,
    /// Class report file
    pub report_file: PathBuf,
}

impl SessionPaths {
    /// Paths taken from the configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            data_file: PathBuf::from(&config.paths.data_file),
            report_file: PathBuf::from(&config.paths.report_file),
        }
    }
}

/// One interactive run of the menu over a store
pub struct Session<R, W> {
    console: Console<R, W>,
    store: StudentStore,
    paths: SessionPaths,
    pause: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session over an already-loaded store
    pub const fn new(console: Console<R, W>, store: StudentStore, paths: SessionPaths) -> Self {
        Self {
            console,
            store,
            paths,
            pause: true,
        }
    }

    /// Skip the "Press Enter to continue" pause after each action
    #[must_use]
    pub fn without_pauses(mut self) -> Self {
        self.pause = false;
        self
    }

    /// Load the data file and announce the outcome
    ///
    /// A missing file is only an advisory; an unreadable one is reported and the
    /// session starts empty.
    pub fn load(mut console: Console<R, W>, paths: SessionPaths, capacity: usize) -> Self {
        let shown = paths.data_file.display().to_string();
        let store = match load_store(&paths.data_file, capacity) {
            Ok((store, LoadStatus::Loaded(count))) => {
                console.println(&format!(
                    "Successfully loaded {count} student records from {shown}"
                ));
                store
            }
            Ok((store, LoadStatus::FileAbsent)) => {
                console.println(&format!(
                    "Warning: Could not open file {shown} for reading."
                ));
                console.println("Starting with empty data set.");
                store
            }
            Err(e) => {
                error!("Failed to load {shown}: {e}");
                console.println(&format!("✗ {e}"));
                console.println("Starting with empty data set.");
                StudentStore::with_capacity(capacity)
            }
        };
        Self::new(console, store, paths)
    }

    /// Run the menu loop until Exit or end of input
    pub fn run(&mut self) {
        loop {
            self.show_menu();
            let Some(number) = self.console.read_int_in_range(1, 8) else {
                debug!("Input closed; saving and exiting");
                self.exit();
                return;
            };
            let Some(choice) = MenuChoice::from_number(number) else {
                continue;
            };
            verbose!("Menu choice: {}", choice.label());
            if choice == MenuChoice::Exit {
                self.exit();
                return;
            }
            if self.dispatch(choice).is_none() {
                debug!("Input closed during {}; saving and exiting", choice.label());
                self.exit();
                return;
            }
        }
    }

    /// Hand back the store and the console writer
    pub fn into_parts(self) -> (StudentStore, W) {
        (self.store, self.console.into_output())
    }

    fn show_menu(&mut self) {
        self.console.println("");
        self.console.println(BANNER_RULE);
        self.console.println("          STUDENT GRADING SYSTEM");
        self.console.println(BANNER_RULE);
        self.console.println("");
        for (number, choice) in (1..).zip(MenuChoice::ALL) {
            self.console
                .println(&format!("{number}. {}", choice.label()));
        }
        self.console.println("");
        self.console.print("Enter your choice: ");
    }

    /// Run one action; `None` means input ran out part way
    fn dispatch(&mut self, choice: MenuChoice) -> Option<()> {
        match choice {
            MenuChoice::Add => self.add()?,
            MenuChoice::List => self.list(),
            MenuChoice::Search => self.search()?,
            MenuChoice::Update => self.update()?,
            MenuChoice::Delete => self.delete()?,
            MenuChoice::Report => self.report()?,
            MenuChoice::Save => self.save(),
            MenuChoice::Exit => return Some(()),
        }
        self.pause()
    }

    fn pause(&mut self) -> Option<()> {
        if self.pause {
            self.console.wait_for_enter()
        } else {
            Some(())
        }
    }

    fn heading(&mut self, title: &str) {
        self.console.println(&format!("\n=== {title} ===\n"));
    }

    fn read_marks(&mut self, prompt: &str) -> Option<Marks> {
        let mut marks = [0; MARK_COUNT];
        for (subject, mark) in (1..).zip(marks.iter_mut()) {
            self.console.print(&format!(
                "{prompt} for Subject {subject} ({MIN_MARK}-{MAX_MARK}): "
            ));
            *mark = self.console.read_int_in_range(MIN_MARK, MAX_MARK)?;
        }
        Some(marks)
    }

    /// Prompt for an ID until a usable, unused one is entered
    fn read_new_id(&mut self) -> Option<String> {
        loop {
            self.console.print("Enter Student ID: ");
            let word = self.console.read_word()?;
            let id = truncate_to(&word, MAX_ID_LENGTH);
            if id.is_empty() {
                self.console.println("Error: Student ID cannot be empty.");
            } else if id.contains('|') {
                self.console
                    .println("Error: Student ID cannot contain '|'.");
            } else if self.store.find_active_index_by_id(id).is_some() {
                self.console
                    .println("Error: A student with this ID already exists.");
            } else {
                return Some(id.to_string());
            }
        }
    }

    /// Prompt for the ID of an existing record; `Some(None)` when there is none
    fn read_existing_id(&mut self, action: &str) -> Option<Option<String>> {
        if self.store.is_empty() {
            self.console.println("No students in the system.");
            return Some(None);
        }
        self.console
            .print(&format!("Enter Student ID to {action}: "));
        let word = self.console.read_word()?;
        let id = truncate_to(&word, MAX_ID_LENGTH).to_string();
        if self.store.find_active_index_by_id(&id).is_none() {
            self.console
                .println(&format!("Student with ID '{id}' not found or inactive."));
            return Some(None);
        }
        Some(Some(id))
    }

    fn add(&mut self) -> Option<()> {
        if self.store.is_full() {
            self.console.println(&format!(
                "\nError: Maximum number of students ({}) reached.",
                self.store.capacity()
            ));
            return Some(());
        }

        self.heading("Add New Student");
        let id = self.read_new_id()?;
        self.console.print("Enter Student Name: ");
        let name = self.console.read_line()?;
        self.console
            .println(&format!("\nEnter marks for {MARK_COUNT} subjects:"));
        let marks = self.read_marks("Enter mark")?;

        match self.store.add(&id, &name, marks) {
            Ok(student) => {
                let summary = format!(
                    "\nStudent added successfully.\nAverage: {:.2}, Grade: {}",
                    student.average, student.grade
                );
                info!("Added student {id}");
                self.console.println(&summary);
            }
            Err(e) => self.console.println(&format!("✗ {e}")),
        }
        Some(())
    }

    fn list(&mut self) {
        self.heading("Student List");
        let table = student_table(self.store.list_active());
        self.console.print(&table);
    }

    fn search(&mut self) -> Option<()> {
        self.heading("Search Student");
        let Some(id) = self.read_existing_id("search")? else {
            return Some(());
        };
        if let Ok(student) = self.store.search(&id) {
            let details = student_details(student);
            self.console.println("\nStudent Details:");
            self.console.print(&details);
        }
        Some(())
    }

    fn update(&mut self) -> Option<()> {
        self.heading("Update Student");
        let Some(id) = self.read_existing_id("update")? else {
            return Some(());
        };
        if let Ok(student) = self.store.search(&id) {
            let details = student_details(student);
            self.console.println("\nCurrent Information:");
            self.console.print(&details);
        }

        self.console
            .print("\nEnter new name (press Enter to keep current): ");
        let name = self.console.read_line()?;
        let marks = if self.console.confirm("\nUpdate marks?")? {
            Some(self.read_marks("Enter new mark")?)
        } else {
            None
        };

        match self.store.update(&id, Some(&name), marks) {
            Ok(student) => {
                let summary = format!(
                    "\nStudent updated successfully.\nNew Average: {:.2}, New Grade: {}",
                    student.average, student.grade
                );
                info!("Updated student {id}");
                self.console.println(&summary);
            }
            Err(e) => self.console.println(&format!("✗ {e}")),
        }
        Some(())
    }

    fn delete(&mut self) -> Option<()> {
        self.heading("Delete Student");
        let Some(id) = self.read_existing_id("delete")? else {
            return Some(());
        };
        if let Ok(student) = self.store.search(&id) {
            let summary = format!(
                "\nStudent Information:\nID: {}\nName: {}\nAverage: {:.2}\nGrade: {}",
                student.id, student.name, student.average, student.grade
            );
            self.console.println(&summary);
        }

        if !self
            .console
            .confirm("\nAre you sure you want to delete this student?")?
        {
            self.console.println("\nDeletion cancelled.");
            return Some(());
        }
        match self.store.delete(&id) {
            Ok(_) => {
                info!("Deleted student {id}");
                self.console
                    .println("\nStudent has been marked as inactive.");
            }
            Err(e) => self.console.println(&format!("✗ {e}")),
        }
        Some(())
    }

    fn report(&mut self) -> Option<()> {
        self.heading("Class Report");
        let report = ClassReport::from_store(&self.store);
        let text = TextReporter::new().render(&report);
        self.console.print(&text);

        if self.console.confirm("\nSave report to file?")? {
            let shown = self.paths.report_file.display().to_string();
            match write_report(&text, &self.paths.report_file) {
                Ok(()) => {
                    info!("Report exported to: {shown}");
                    self.console
                        .println(&format!("Report saved to {shown} successfully."));
                }
                Err(e) => {
                    error!("Report export failed: {e}");
                    self.console
                        .println(&format!("Error: Could not create report file {shown}."));
                }
            }
        }
        Some(())
    }

    /// Write the data file; `true` on success
    fn write_data(&mut self) -> bool {
        match save_store(&self.paths.data_file, &self.store) {
            Ok(()) => true,
            Err(e) => {
                error!("Save failed: {e}");
                self.console.println(&format!("\n✗ {e}"));
                false
            }
        }
    }

    fn save(&mut self) {
        if self.write_data() {
            let shown = self.paths.data_file.display().to_string();
            self.console
                .println(&format!("\nData saved successfully to {shown}"));
        }
    }

    fn exit(&mut self) {
        let shown = self.paths.data_file.display().to_string();
        if self.write_data() {
            self.console
                .println(&format!("\nData saved to {shown}. Exiting program..."));
        } else {
            self.console.println("\nExiting program without saving...");
        }
    }
}

/// Run an interactive session on stdin/stdout
pub fn run(config: &Config) {
    let stdin = std::io::stdin();
    let console = Console::new(stdin.lock(), std::io::stdout());
    let mut session = Session::load(
        console,
        SessionPaths::from_config(config),
        config.store.capacity,
    );
    session.run();
}
