use std::io::{self, BufRead, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input ended before a valid answer was given")]
    Closed,
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Asks questions on `output` and reads the answers line by line from `input`.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Returns the answer without surrounding whitespace.
    pub fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_owned())
    }

    // Repeats the question until `accept` maps the answer to a value.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        mut accept: impl FnMut(&str) -> Option<T>,
    ) -> Result<T, PromptError> {
        loop {
            let answer = self.ask(question)?;
            if let Some(value) = accept(&answer) {
                return Ok(value);
            }
        }
    }

    pub fn ask_int_at_least(&mut self, question: &str, min: i64) -> Result<i64, PromptError> {
        self.ask_until(question, |answer| answer.parse::<i64>().ok().filter(|x| *x >= min))
    }

    pub fn ask_choice(&mut self, question: &str, choices: &[&str]) -> Result<String, PromptError> {
        self.ask_until(question, |answer| {
            choices.iter().find(|c| **c == answer).map(|c| c.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_reprompts_until_valid() {
        let mut p = prompter("abc\n0\n  5 \n");
        assert_eq!(p.ask_int_at_least("elementCount", 1).unwrap(), 5);
        let asked = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(asked.matches("elementCount").count(), 3);
    }

    #[test]
    fn test_choice() {
        let mut p = prompter("maybe\nno\n");
        assert_eq!(p.ask_choice("Show arrays (yes/no)?", &["yes", "no"]).unwrap(), "no");
    }

    #[test]
    fn test_closed_input() {
        let mut p = prompter("x\n");
        assert!(matches!(p.ask_int_at_least("n", 1), Err(PromptError::Closed)));
    }
}
