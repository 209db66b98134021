use std::{
    error::Error,
    io::{self, BufRead, Write},
};

use crate::{
    dto::DeleteOutcome,
    service::{NoteService, NoteServiceError, ValidationError},
};

const BANNER: &str = "\
╔════════════════════════════════╗
║      NOTES MANAGER             ║
╚════════════════════════════════╝";

const MENU: &str = "
┌─ MENU ─────────────────────────┐
│ 1. Add a new note              │
│ 2. View all notes              │
│ 3. Search for a note           │
│ 4. Delete a note               │
│ 5. Exit                        │
└────────────────────────────────┘";

const LIST_HEADER: &str = "
╔════════════════════════════════╗
║        ALL NOTES               ║
╚════════════════════════════════╝
";

/// Menu-driven front end over a [`NoteService`].
///
/// Every operation outcome, failures included, is written to `output`
/// exactly once.
pub struct Console<R, W> {
    service: NoteService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(service: NoteService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs until the user picks exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{BANNER}")?;

        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("\nEnter your choice (1-5): ")? else {
                writeln!(self.output)?;
                break;
            };

            match choice.as_str() {
                "1" => self.add_note()?,
                "2" => self.view_notes()?,
                "3" => self.search_notes()?,
                "4" => self.delete_note()?,
                "5" => break,
                _ => writeln!(self.output, "Invalid choice. Please enter 1-5.")?,
            }
        }

        writeln!(self.output, "Thank you for using Notes Manager. Goodbye!")?;
        self.output.flush()
    }

    fn add_note(&mut self) -> io::Result<()> {
        let Some(title) = self.prompt("\nEnter note title: ")? else {
            return Ok(());
        };
        if title.is_empty() {
            return writeln!(self.output, "{}", ValidationError::EmptyTitle);
        }

        let Some(content) = self.prompt("Enter note content: ")? else {
            return Ok(());
        };

        match self.service.add_note(&title, &content) {
            Ok(_) => writeln!(self.output, "Note added successfully!"),
            Err(e) => self.report("Failed to add note", &e),
        }
    }

    fn view_notes(&mut self) -> io::Result<()> {
        match self.service.list_notes() {
            Ok(None) => writeln!(self.output, "No notes found. Create one to get started!"),
            Ok(Some(mut listing)) => {
                writeln!(self.output, "{LIST_HEADER}")?;
                for record in listing.by_ref() {
                    let record = match record {
                        Ok(record) => record,
                        Err(e) => return self.report("Failed to read notes", &e),
                    };
                    for line in record.lines() {
                        writeln!(self.output, "{line}")?;
                    }
                }
                writeln!(self.output, "\nTotal notes: {}", listing.note_count())
            }
            Err(e) => self.report("Failed to read notes", &e),
        }
    }

    fn search_notes(&mut self) -> io::Result<()> {
        let Some(keyword) = self.prompt("\nEnter search keyword: ")? else {
            return Ok(());
        };

        match self.service.search_notes(&keyword) {
            Ok(None) => writeln!(self.output, "No notes found."),
            Ok(Some(results)) => {
                writeln!(self.output, "\nSearch results for: '{}'\n", results.keyword)?;
                if results.is_empty() {
                    return writeln!(self.output, "No notes matching '{}' found.", results.keyword);
                }
                for record in &results.records {
                    for line in record.lines() {
                        writeln!(self.output, "{line}")?;
                    }
                    writeln!(self.output)?;
                }
                Ok(())
            }
            Err(e) => self.report("Failed to search notes", &e),
        }
    }

    fn delete_note(&mut self) -> io::Result<()> {
        let Some(title) = self.prompt("\nEnter note title to delete: ")? else {
            return Ok(());
        };

        match self.service.delete_note(&title) {
            Ok(DeleteOutcome::Deleted) => writeln!(self.output, "Note deleted successfully!"),
            Ok(DeleteOutcome::TitleNotFound) => {
                writeln!(self.output, "Note with title '{title}' not found.")
            }
            Ok(DeleteOutcome::NoNotes) => writeln!(self.output, "No notes found."),
            Err(e) => self.report("Failed to delete note", &e),
        }
    }

    fn report(&mut self, action: &str, err: &NoteServiceError) -> io::Result<()> {
        if let NoteServiceError::Validation(e) = err {
            return writeln!(self.output, "{e}");
        }

        tracing::error!(error = ?err, "{action}");

        writeln!(self.output, "{action}")?;
        writeln!(self.output, "Error: {err}")?;
        let mut source = err.source();
        while let Some(cause) = source {
            writeln!(self.output, "Caused by: {cause}")?;
            source = cause.source();
        }
        Ok(())
    }

    /// Writes `label` and reads one trimmed line, `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
