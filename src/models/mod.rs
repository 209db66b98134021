/// Line that terminates every complete record.
pub const DELIMITER: &str = "---";

const TITLE_PREFIX: &str = "Title: ";
const CONTENT_PREFIX: &str = "Content: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub timestamp: String,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Four-line serialized form, delimiter line included.
    pub fn to_record_text(&self) -> String {
        format!(
            "[{}]\n{TITLE_PREFIX}{}\n{CONTENT_PREFIX}{}\n{DELIMITER}\n",
            self.timestamp, self.title, self.content
        )
    }
}

/// A record as read back from the notes file.
///
/// `text` holds the raw bytes of every line belonging to the record,
/// line terminators included, so a record can be written back verbatim.
/// Lines after the last delimiter form an incomplete record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    text: String,
    complete: bool,
}

impl Record {
    pub const fn new(text: String, complete: bool) -> Self {
        Self { text, complete }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.lines()
            .next()
            .and_then(|line| line.strip_prefix('[')?.strip_suffix(']'))
    }

    pub fn title(&self) -> Option<&str> {
        self.lines().find_map(|line| line.strip_prefix(TITLE_PREFIX))
    }

    /// True when the title line is exactly `Title: <title>`.
    pub fn has_title(&self, title: &str) -> bool {
        self.title() == Some(title)
    }

    /// `needle` must already be lower-cased.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
    }
}

pub fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == DELIMITER
}
