use crate::{models::Record, repository::FileRecords, service::NoteServiceError};

/// Lazy walk over the notes file, one record at a time.
///
/// The note count is the number of delimiter lines seen so far, so it is
/// final once the iterator is exhausted.
pub struct NoteListing {
    records: FileRecords,
    note_count: usize,
}

impl NoteListing {
    pub const fn new(records: FileRecords) -> Self {
        Self {
            records,
            note_count: 0,
        }
    }

    pub const fn note_count(&self) -> usize {
        self.note_count
    }
}

impl Iterator for NoteListing {
    type Item = Result<Record, NoteServiceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.next()? {
            Ok(record) => {
                if record.is_complete() {
                    self.note_count += 1;
                }
                Some(Ok(record))
            }
            Err(e) => Some(Err(NoteServiceError::Read(e))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Normalized keyword the records were matched against
    pub keyword: String,
    pub records: Vec<Record>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    TitleNotFound,
    /// The notes file does not exist yet
    NoNotes,
}
