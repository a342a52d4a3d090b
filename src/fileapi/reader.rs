use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use super::value::{self, Value, ValueKind};
use super::{is_gzipped, FileApiError};

/// A character stream over a text file with one character of lookahead.
/// Words are separated by whitespace; a word starting with a quote extends
/// to the matching quote and a word starting with `{` to the matching `}`.
pub struct TextReader {
    input: Box<dyn BufRead>,
    peeked: Option<char>,
}

// Number of bytes in the UTF-8 sequence starting with this byte.
fn utf8_width(first: u8) -> usize {
    if first < 0x80 {
        1
    } else if first >> 5 == 0b110 {
        2
    } else if first >> 4 == 0b1110 {
        3
    } else if first >> 3 == 0b11110 {
        4
    } else {
        1 // Invalid lead byte, rejected by the decoder below
    }
}

impl TextReader {
    pub fn new<R: BufRead + 'static>(input: R) -> Self {
        TextReader {
            input: Box::new(input),
            peeked: None,
        }
    }

    // Gzipped input is detected from the .gz suffix.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        if is_gzipped(path) {
            Ok(Self::new(BufReader::new(MultiGzDecoder::new(file))))
        } else {
            Ok(Self::new(BufReader::new(file)))
        }
    }

    fn decode_char(&mut self) -> io::Result<Option<char>> {
        let first = match self.input.fill_buf()?.first() {
            None => return Ok(None),
            Some(&b) => b,
        };
        self.input.consume(1);

        let width = utf8_width(first);
        let mut bytes = [first, 0, 0, 0];
        if width > 1 {
            self.input.read_exact(&mut bytes[1..width])?;
        }
        match std::str::from_utf8(&bytes[..width]) {
            Ok(s) => Ok(s.chars().next()),
            Err(e) => Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        }
    }

    pub fn peek_char(&mut self) -> io::Result<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.decode_char()?;
        }
        Ok(self.peeked)
    }

    /// Returns the next character, or `None` at the end of the stream.
    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        match self.peeked.take() {
            Some(c) => Ok(Some(c)),
            None => self.decode_char(),
        }
    }

    /// True iff no character is left, not even whitespace.
    pub fn is_eof(&mut self) -> io::Result<bool> {
        Ok(self.peek_char()?.is_none())
    }

    // Skips whitespace. Returns false if the stream ended.
    fn skip_whitespace(&mut self) -> io::Result<bool> {
        while let Some(c) = self.peek_char()? {
            if !c.is_whitespace() {
                return Ok(true);
            }
            self.peeked = None;
        }
        Ok(false)
    }

    // Appends characters up to (not including) the next whitespace.
    fn read_rest_of_word(&mut self, word: &mut String) -> io::Result<()> {
        while let Some(c) = self.peek_char()? {
            if c.is_whitespace() {
                break;
            }
            word.push(c);
            self.peeked = None;
        }
        Ok(())
    }

    /// Reads the next whitespace-delimited word. The whitespace after the word
    /// is left in the stream.
    pub fn read_word(&mut self) -> Result<String, FileApiError> {
        if !self.skip_whitespace()? {
            return Err(FileApiError::EndOfInput);
        }
        let mut word = String::new();
        self.read_rest_of_word(&mut word)?;
        Ok(word)
    }

    /// Reads the next token: a word, a quoted string (which may contain
    /// whitespace) or a brace list (which may contain whitespace and nested
    /// braces). An unterminated quote or list extends to the end of the stream.
    pub fn read_token(&mut self) -> Result<String, FileApiError> {
        if !self.skip_whitespace()? {
            return Err(FileApiError::EndOfInput);
        }
        let mut token = String::new();
        match self.peek_char()? {
            Some(q @ ('"' | '\'')) => {
                token.push(q);
                self.peeked = None;
                while let Some(c) = self.read_char()? {
                    token.push(c);
                    if c == q {
                        break;
                    }
                }
                // Glue trailing characters, as in "abc"def
                self.read_rest_of_word(&mut token)?;
            }
            Some('{') => {
                let mut depth = 0_usize;
                while let Some(c) = self.read_char()? {
                    token.push(c);
                    match c {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    if depth == 0 {
                        break;
                    }
                }
            }
            _ => self.read_rest_of_word(&mut token)?,
        }
        Ok(token)
    }

    /// Reads the next token and interprets it with `value::parse_value`.
    pub fn read(&mut self) -> Result<Value, FileApiError> {
        let token = self.read_token()?;
        Ok(value::parse_value(&token))
    }

    /// Reads the rest of the current line. The newline is consumed but not returned.
    pub fn read_line(&mut self) -> Result<String, FileApiError> {
        if self.is_eof()? {
            return Err(FileApiError::EndOfInput);
        }
        let mut line = String::new();
        while let Some(c) = self.read_char()? {
            if c == '\n' {
                break;
            }
            line.push(c);
        }
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    pub fn read_int(&mut self) -> Result<i64, FileApiError> {
        let word = self.read_word()?;
        Ok(value::parse_int(&word)?)
    }

    pub fn read_double(&mut self) -> Result<f64, FileApiError> {
        let word = self.read_word()?;
        Ok(value::parse_float(&word)?)
    }

    // Quoted tokens are unquoted, anything else is returned as is.
    pub fn read_string(&mut self) -> Result<String, FileApiError> {
        let token = self.read_token()?;
        match value::unquote(&token) {
            Some(s) => Ok(s.to_owned()),
            None => Ok(token),
        }
    }

    pub fn read_list(&mut self) -> Result<Vec<Value>, FileApiError> {
        let token = self.read_token()?;
        if !token.starts_with('{') {
            return Err(value::ParseValueError {
                token,
                expected: ValueKind::List,
            }
            .into());
        }
        Ok(value::parse_list(&token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(text: &str) -> TextReader {
        TextReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_read_words() {
        let mut r = reader("  12 -3\n\tfoo  ");
        assert_eq!(r.read_word().unwrap(), "12");
        assert_eq!(r.read_word().unwrap(), "-3");
        assert_eq!(r.read_word().unwrap(), "foo");
        assert!(!r.is_eof().unwrap()); // Trailing whitespace is still there
        assert!(matches!(r.read_word(), Err(FileApiError::EndOfInput)));
        assert!(r.is_eof().unwrap());
    }

    #[test]
    fn test_read_values() {
        let mut r = reader("7 2.25 word \"two words\" {1, 2,  3} 'a'");
        assert_eq!(r.read().unwrap(), Value::Int(7));
        assert_eq!(r.read().unwrap(), Value::Float(2.25));
        assert_eq!(r.read().unwrap(), Value::Str("word".to_owned()));
        assert_eq!(r.read().unwrap(), Value::Quoted("two words".to_owned()));
        assert_eq!(
            r.read().unwrap(),
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(r.read().unwrap(), Value::Quoted("a".to_owned()));
        assert!(matches!(r.read(), Err(FileApiError::EndOfInput)));
    }

    #[test]
    fn test_nested_list_token() {
        let mut r = reader("{ {1} {2, 3} } rest");
        assert_eq!(r.read_token().unwrap(), "{ {1} {2, 3} }");
        assert_eq!(r.read_token().unwrap(), "rest");
    }

    #[test]
    fn test_read_lines_and_chars() {
        let mut r = reader("first line\r\nsecond\n\nä");
        assert_eq!(r.read_char().unwrap(), Some('f'));
        assert_eq!(r.read_line().unwrap(), "irst line");
        assert_eq!(r.read_line().unwrap(), "second");
        assert_eq!(r.read_line().unwrap(), "");
        assert_eq!(r.read_char().unwrap(), Some('ä'));
        assert_eq!(r.read_char().unwrap(), None);
        assert!(matches!(r.read_line(), Err(FileApiError::EndOfInput)));
    }

    #[test]
    fn test_typed_reads() {
        let mut r = reader("5 -1.5 x {1} \"q s\" plain");
        assert_eq!(r.read_int().unwrap(), 5);
        assert_eq!(r.read_double().unwrap(), -1.5);
        assert!(matches!(r.read_int(), Err(FileApiError::Parse(_))));
        assert_eq!(r.read_list().unwrap(), vec![Value::Int(1)]);
        assert_eq!(r.read_string().unwrap(), "q s");
        assert!(matches!(r.read_list(), Err(FileApiError::Parse(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut r = TextReader::new(Cursor::new(vec![b'a', 0xff, b'b']));
        assert_eq!(r.read_char().unwrap(), Some('a'));
        assert!(r.read_char().is_err());
    }
}
