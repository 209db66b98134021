use std::io::{self, BufRead};

use crate::models::{Record, is_delimiter};

/// Lazily splits a line stream into records at delimiter lines.
///
/// Lines are kept with their original terminators. Whatever follows the
/// last delimiter is yielded once more as an incomplete record. The
/// iterator stops after the first read error.
pub struct RecordReader<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut text = String::new();
        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return (!text.is_empty()).then(|| Ok(Record::new(text, false)));
                }
                Ok(_) => {
                    text.push_str(&line);
                    if is_delimiter(&line) {
                        return Some(Ok(Record::new(text, true)));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn read_all(input: &[u8]) -> Vec<Record> {
        RecordReader::new(Cursor::new(input.to_vec()))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(read_all(b"").is_empty());
    }

    #[test]
    fn test_splits_on_delimiter_lines() {
        let records = read_all(
            b"[2024-01-01 10:00:00]\nTitle: A\nContent: one\n---\n\
              [2024-01-01 11:00:00]\nTitle: B\nContent: two\n---\n",
        );

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(Record::is_complete));
        assert_eq!(records[0].title(), Some("A"));
        assert_eq!(records[1].title(), Some("B"));
        assert_eq!(
            records[1].text(),
            "[2024-01-01 11:00:00]\nTitle: B\nContent: two\n---\n"
        );
    }

    #[test]
    fn test_trailing_lines_form_incomplete_record() {
        let records = read_all(b"[t]\nTitle: A\nContent: one\n---\n[t]\nTitle: half");

        assert_eq!(records.len(), 2);
        assert!(records[0].is_complete());
        assert!(!records[1].is_complete());
        assert_eq!(records[1].text(), "[t]\nTitle: half");
    }

    #[test]
    fn test_preserves_crlf_terminators() {
        let records = read_all(b"[t]\r\nTitle: A\r\nContent: one\r\n---\r\n");

        assert_eq!(records.len(), 1);
        assert!(records[0].is_complete());
        assert_eq!(records[0].text(), "[t]\r\nTitle: A\r\nContent: one\r\n---\r\n");
    }

    #[test]
    fn test_dashes_inside_a_line_do_not_split() {
        let records = read_all(b"[t]\nTitle: A\nContent: a --- b\n---\n");

        assert_eq!(records.len(), 1);
        assert!(records[0].lines().any(|line| line == "Content: a --- b"));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let mut reader = RecordReader::new(Cursor::new(vec![0xff, 0xfe, b'\n']));

        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(reader.next().is_none());
    }
}
