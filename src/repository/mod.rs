mod reader;

pub use reader::RecordReader;

use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::models::Record;

pub type FileRecords = RecordReader<BufReader<File>>;

/// Owns every read and write against the notes file.
pub struct NoteRepository {
    path: PathBuf,
}

impl NoteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `text` with a single write, creating the file if needed.
    pub fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())
    }

    /// Opens a fresh reader over the file, `None` when it does not exist.
    pub fn records(&self) -> io::Result<Option<FileRecords>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(RecordReader::new(BufReader::new(file)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replaces the file contents with `records`, written to a sibling
    /// temporary file first and renamed into place.
    pub fn rewrite<'a, I>(&self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let tmp = self.tmp_path();

        let result = Self::write_records(&tmp, records).and_then(|()| fs::rename(&tmp, &self.path));
        if result.is_err() {
            if let Err(e) = fs::remove_file(&tmp) {
                tracing::debug!("could not remove {}: {e}", tmp.display());
            }
        }

        result
    }

    fn write_records<'a, I>(path: &Path, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writer.write_all(record.text().as_bytes())?;
        }
        writer.flush()?;
        writer.get_ref().sync_all()
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn setup() -> (TempDir, NoteRepository) {
        let tmp = TempDir::new().unwrap();
        let repo = NoteRepository::new(tmp.path().join("notes.txt"));
        (tmp, repo)
    }

    fn collect(repo: &NoteRepository) -> Vec<Record> {
        repo.records()
            .unwrap()
            .unwrap()
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_records_of_missing_file_is_none() {
        let (_tmp, repo) = setup();

        assert!(repo.records().unwrap().is_none());
    }

    #[test]
    fn test_append_creates_and_grows_file() {
        let (_tmp, repo) = setup();

        repo.append("[t]\nTitle: A\nContent: one\n---\n").unwrap();
        repo.append("[t]\nTitle: B\nContent: two\n---\n").unwrap();

        let records = collect(&repo);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), Some("A"));
        assert_eq!(records[1].title(), Some("B"));
    }

    #[test]
    fn test_records_is_restartable() {
        let (_tmp, repo) = setup();
        repo.append("[t]\nTitle: A\nContent: one\n---\n").unwrap();

        assert_eq!(collect(&repo), collect(&repo));
    }

    #[test]
    fn test_rewrite_replaces_contents_and_cleans_up() {
        let (tmp, repo) = setup();
        repo.append("[t]\nTitle: A\nContent: one\n---\n").unwrap();
        repo.append("[t]\nTitle: B\nContent: two\n---\n").unwrap();

        let records = collect(&repo);
        repo.rewrite(records.iter().skip(1)).unwrap();

        assert_eq!(
            fs::read_to_string(repo.path()).unwrap(),
            "[t]\nTitle: B\nContent: two\n---\n"
        );
        assert!(!tmp.path().join("notes.txt.tmp").exists());
    }

    #[test]
    fn test_rewrite_with_nothing_leaves_empty_file() {
        let (_tmp, repo) = setup();
        repo.append("[t]\nTitle: A\nContent: one\n---\n").unwrap();

        repo.rewrite(std::iter::empty()).unwrap();

        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "");
    }

    #[test]
    fn test_failed_rename_removes_tmp_and_keeps_target() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("notes.txt");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "untouched").unwrap();
        let repo = NoteRepository::new(&target);
        let record = Record::new("[t]\nTitle: A\nContent: one\n---\n".to_string(), true);

        assert!(repo.rewrite([&record]).is_err());

        assert!(!tmp.path().join("notes.txt.tmp").exists());
        assert!(target.is_dir());
        assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "untouched");
    }

    #[test]
    fn test_rewrite_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let repo = NoteRepository::new(tmp.path().join("missing").join("notes.txt"));

        let err = repo.rewrite(std::iter::empty()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
