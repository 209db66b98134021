use crate::{
    config::Config,
    dto::{DeleteOutcome, NoteListing, SearchResults},
    models::{DELIMITER, Note, Record},
    repository::NoteRepository,
};

use std::io;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title cannot be empty.")]
    EmptyTitle,

    #[error("Content cannot be empty.")]
    EmptyContent,

    #[error("Keyword cannot be empty.")]
    EmptyKeyword,

    #[error("{0} must fit on a single line.")]
    MultiLine(&'static str),

    #[error("Title cannot contain the record delimiter '---'.")]
    DelimiterInTitle,
}

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to read notes file")]
    Read(#[source] io::Error),

    #[error("Failed to write notes file")]
    Write(#[source] io::Error),
}

pub struct NoteService {
    repo: NoteRepository,
    timestamp_format: String,
}

impl NoteService {
    pub const fn new(repo: NoteRepository, timestamp_format: String) -> Self {
        Self {
            repo,
            timestamp_format,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            NoteRepository::new(config.notes_file.clone()),
            config.timestamp_format.clone(),
        )
    }

    pub fn add_note(&self, title: &str, content: &str) -> Result<Note, NoteServiceError> {
        let title = title.trim();
        let content = content.trim();

        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if content.is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }
        if title.contains(['\n', '\r']) {
            return Err(ValidationError::MultiLine("Title").into());
        }
        if content.contains(['\n', '\r']) {
            return Err(ValidationError::MultiLine("Content").into());
        }
        if title.contains(DELIMITER) {
            return Err(ValidationError::DelimiterInTitle.into());
        }

        let note = Note {
            timestamp: chrono::Local::now()
                .format(&self.timestamp_format)
                .to_string(),
            title: title.to_string(),
            content: content.to_string(),
        };

        self.repo
            .append(&note.to_record_text())
            .map_err(NoteServiceError::Write)?;

        tracing::info!("Added note '{}' to {}", note.title, self.repo.path().display());

        Ok(note)
    }

    /// `None` when the notes file does not exist yet.
    pub fn list_notes(&self) -> Result<Option<NoteListing>, NoteServiceError> {
        let records = self.repo.records().map_err(NoteServiceError::Read)?;

        tracing::debug!("Listing notes from {}", self.repo.path().display());

        Ok(records.map(NoteListing::new))
    }

    /// `None` when the notes file does not exist yet.
    pub fn search_notes(&self, keyword: &str) -> Result<Option<SearchResults>, NoteServiceError> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(ValidationError::EmptyKeyword.into());
        }

        let Some(records) = self.repo.records().map_err(NoteServiceError::Read)? else {
            return Ok(None);
        };

        let mut results = SearchResults {
            keyword,
            records: Vec::new(),
        };

        for record in records {
            let record = record.map_err(NoteServiceError::Read)?;
            if record.is_complete() && record.contains_lowercase(&results.keyword) {
                results.records.push(record);
            }
        }

        tracing::debug!(
            "Search for '{}' matched {} notes",
            results.keyword,
            results.records.len()
        );

        Ok(Some(results))
    }

    /// Removes the first record titled exactly `title`.
    /// The file is left untouched unless a record was removed.
    pub fn delete_note(&self, title: &str) -> Result<DeleteOutcome, NoteServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }

        let Some(records) = self.repo.records().map_err(NoteServiceError::Read)? else {
            return Ok(DeleteOutcome::NoNotes);
        };
        let mut records = records
            .collect::<io::Result<Vec<Record>>>()
            .map_err(NoteServiceError::Read)?;

        let Some(index) = records
            .iter()
            .position(|record| record.is_complete() && record.has_title(title))
        else {
            return Ok(DeleteOutcome::TitleNotFound);
        };

        let removed = records.remove(index);
        self.repo
            .rewrite(&records)
            .map_err(NoteServiceError::Write)?;

        tracing::info!(
            "Deleted note '{}' ({}) from {}",
            title,
            removed.timestamp().unwrap_or("no timestamp"),
            self.repo.path().display()
        );

        Ok(DeleteOutcome::Deleted)
    }
}
