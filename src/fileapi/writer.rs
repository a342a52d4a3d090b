use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use super::is_gzipped;

enum Output {
    Plain(BufWriter<File>),
    Gz(GzEncoder<BufWriter<File>>),
}

/// A buffered text output stream, gzip-compressed when the path ends in `.gz`.
/// Call [`TextWriter::finish`] to see errors from the final write.
pub struct TextWriter {
    output: Output,
}

impl TextWriter {
    fn from_file(file: File, path: &Path) -> Self {
        let file = BufWriter::new(file);
        let output = if is_gzipped(path) {
            Output::Gz(GzEncoder::new(file, Compression::fast()))
        } else {
            Output::Plain(file)
        };
        TextWriter { output }
    }

    // Truncates an existing file
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_file(file, path))
    }

    // Appending to a .gz file adds a new gzip member, which the reader
    // decodes as a continuation of the previous ones.
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_file(file, path))
    }

    fn stream(&mut self) -> &mut dyn Write {
        match &mut self.output {
            Output::Plain(w) => w,
            Output::Gz(w) => w,
        }
    }

    pub fn write<V: Display + ?Sized>(&mut self, value: &V) -> io::Result<()> {
        write!(self.stream(), "{}", value)
    }

    pub fn write_line<V: Display + ?Sized>(&mut self, value: &V) -> io::Result<()> {
        writeln!(self.stream(), "{}", value)
    }

    /// Writes out everything buffered, including the gzip trailer, and
    /// closes the file.
    pub fn finish(self) -> io::Result<()> {
        let mut file = match self.output {
            Output::Plain(w) => w,
            Output::Gz(w) => w.finish()?,
        };
        file.flush()
    }
}
