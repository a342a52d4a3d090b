//! A small file API: a registry of numbered text files with word, line,
//! character and typed-value reading.
//!
//! Handle numbers are handed out sequentially starting from 1 and are never
//! reused by the same table, so a closed handle stays invalid.

pub mod reader;
pub mod value;
pub mod writer;

use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

pub use reader::TextReader;
pub use value::{ParseValueError, Value, ValueKind};
pub use writer::TextWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileHandle(u32);

impl FileHandle {
    pub fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Read => f.write_str("reading"),
            Mode::Write => f.write_str("writing"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FileApiError {
    #[error("could not open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("file handle {0} is not open")]
    InvalidHandle(FileHandle),
    #[error("file handle {0} is not open for {1}")]
    WrongMode(FileHandle, Mode),
    #[error("end of file reached")]
    EndOfInput,
    #[error(transparent)]
    Parse(#[from] ParseValueError),
}

pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

enum Stream {
    Input(TextReader),
    Output(TextWriter),
}

/// Owns every file opened through it. Dropping the table closes the files.
#[derive(Default)]
pub struct FileTable {
    files: HashMap<FileHandle, Stream>,
    n_opened: u32,
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, path: &Path, stream: Stream) -> FileHandle {
        self.n_opened += 1;
        let handle = FileHandle(self.n_opened);
        debug!("file {} opened: {}", handle, path.display());
        self.files.insert(handle, stream);
        handle
    }

    fn open_error(path: &Path, source: io::Error) -> FileApiError {
        FileApiError::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Opens an existing file for reading.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<FileHandle, FileApiError> {
        let path = path.as_ref();
        let reader = TextReader::from_file(path).map_err(|e| Self::open_error(path, e))?;
        Ok(self.register(path, Stream::Input(reader)))
    }

    /// Creates a file for writing, clearing it if it exists.
    pub fn create<P: AsRef<Path>>(&mut self, path: P) -> Result<FileHandle, FileApiError> {
        let path = path.as_ref();
        let writer = TextWriter::create(path).map_err(|e| Self::open_error(path, e))?;
        Ok(self.register(path, Stream::Output(writer)))
    }

    /// Opens a file for writing at its end, creating it if necessary.
    pub fn append<P: AsRef<Path>>(&mut self, path: P) -> Result<FileHandle, FileApiError> {
        let path = path.as_ref();
        let writer = TextWriter::append(path).map_err(|e| Self::open_error(path, e))?;
        Ok(self.register(path, Stream::Output(writer)))
    }

    pub fn close(&mut self, handle: FileHandle) -> Result<(), FileApiError> {
        let stream = self
            .files
            .remove(&handle)
            .ok_or(FileApiError::InvalidHandle(handle))?;
        debug!("file {} closed", handle);
        if let Stream::Output(writer) = stream {
            writer.finish()?;
        }
        Ok(())
    }

    pub fn is_open(&self, handle: FileHandle) -> bool {
        self.files.contains_key(&handle)
    }

    pub fn n_open(&self) -> usize {
        self.files.len()
    }

    fn reader(&mut self, handle: FileHandle) -> Result<&mut TextReader, FileApiError> {
        match self.files.get_mut(&handle) {
            Some(Stream::Input(reader)) => Ok(reader),
            Some(Stream::Output(_)) => Err(FileApiError::WrongMode(handle, Mode::Read)),
            None => Err(FileApiError::InvalidHandle(handle)),
        }
    }

    fn writer(&mut self, handle: FileHandle) -> Result<&mut TextWriter, FileApiError> {
        match self.files.get_mut(&handle) {
            Some(Stream::Output(writer)) => Ok(writer),
            Some(Stream::Input(_)) => Err(FileApiError::WrongMode(handle, Mode::Write)),
            None => Err(FileApiError::InvalidHandle(handle)),
        }
    }

    pub fn is_eof(&mut self, handle: FileHandle) -> Result<bool, FileApiError> {
        Ok(self.reader(handle)?.is_eof()?)
    }

    pub fn write<V: Display + ?Sized>(&mut self, handle: FileHandle, value: &V) -> Result<(), FileApiError> {
        Ok(self.writer(handle)?.write(value)?)
    }

    pub fn write_line<V: Display + ?Sized>(&mut self, handle: FileHandle, value: &V) -> Result<(), FileApiError> {
        Ok(self.writer(handle)?.write_line(value)?)
    }

    pub fn read(&mut self, handle: FileHandle) -> Result<Value, FileApiError> {
        self.reader(handle)?.read()
    }

    pub fn read_line(&mut self, handle: FileHandle) -> Result<String, FileApiError> {
        self.reader(handle)?.read_line()
    }

    pub fn read_char(&mut self, handle: FileHandle) -> Result<Option<char>, FileApiError> {
        Ok(self.reader(handle)?.read_char()?)
    }

    pub fn read_int(&mut self, handle: FileHandle) -> Result<i64, FileApiError> {
        self.reader(handle)?.read_int()
    }

    pub fn read_double(&mut self, handle: FileHandle) -> Result<f64, FileApiError> {
        self.reader(handle)?.read_double()
    }

    pub fn read_string(&mut self, handle: FileHandle) -> Result<String, FileApiError> {
        self.reader(handle)?.read_string()
    }

    pub fn read_list(&mut self, handle: FileHandle) -> Result<Vec<Value>, FileApiError> {
        self.reader(handle)?.read_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("numbers.txt.gz")));
        assert!(!is_gzipped(Path::new("numbers.txt")));
        assert!(!is_gzipped(Path::new("gz")));
    }

    #[test]
    fn test_open_missing_file() {
        let mut table = FileTable::new();
        let err = table.open("/nonexistent/dir/numbers.txt").unwrap_err();
        assert!(matches!(err, FileApiError::Open { .. }));
        assert_eq!(table.n_open(), 0);
    }

    #[test]
    fn test_unknown_handle() {
        let mut table = FileTable::new();
        assert!(matches!(table.read_int(FileHandle(3)), Err(FileApiError::InvalidHandle(_))));
        assert!(matches!(table.close(FileHandle(1)), Err(FileApiError::InvalidHandle(_))));
    }
}
