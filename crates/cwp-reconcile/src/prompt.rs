//! Operator confirmation.

use std::io::{self, BufRead, Write};

/// The literal answers that approve deletion. Case-sensitive; no trimming.
pub const AFFIRMATIVE_TOKENS: &[&str] = &["yes", "y", "YES", "Y"];

pub fn is_affirmative(input: &str) -> bool {
    AFFIRMATIVE_TOKENS.contains(&input)
}

/// Blocking, single-line confirmation source.
pub trait ConfirmationPrompt {
    /// Show `prompt` and block until one line of input is available.
    fn read_confirmation(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompt over any line reader / writer pair.
///
/// Only the line terminator (`\n` or `\r\n`) is removed from the answer.
/// End of input reads as an empty answer.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmationPrompt for LinePrompt<R, W> {
    fn read_confirmation(&mut self, prompt: &str) -> io::Result<String> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(raw: &str) -> String {
        let mut out = Vec::new();
        let mut p = LinePrompt::new(Cursor::new(raw.as_bytes().to_vec()), &mut out);
        p.read_confirmation("continue? ").unwrap()
    }

    #[test]
    fn affirmative_tokens_are_exact() {
        for t in ["yes", "y", "YES", "Y"] {
            assert!(is_affirmative(t), "{t}");
        }
        for t in ["", "Yes", "yEs", "no", " yes", "yes ", "yes\n", "ok"] {
            assert!(!is_affirmative(t), "{t:?}");
        }
    }

    #[test]
    fn line_terminator_is_stripped_but_spaces_are_kept() {
        assert_eq!(answer("yes\n"), "yes");
        assert_eq!(answer("yes\r\n"), "yes");
        assert_eq!(answer(" yes \n"), " yes ");
        assert_eq!(answer("y"), "y");
    }

    #[test]
    fn only_first_line_is_consumed() {
        assert_eq!(answer("no\nyes\n"), "no");
    }

    #[test]
    fn eof_reads_as_empty() {
        assert_eq!(answer(""), "");
    }

    #[test]
    fn prompt_text_is_written() {
        let mut out = Vec::new();
        let mut p = LinePrompt::new(Cursor::new(b"y\n".to_vec()), &mut out);
        p.read_confirmation("About to delete 2 alarm(s). ").unwrap();
        drop(p);
        assert_eq!(String::from_utf8(out).unwrap(), "About to delete 2 alarm(s). ");
    }
}
