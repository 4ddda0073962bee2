//! Line-based prompt reading.
//!
//! The core takes single-token responses from an abstract `BufRead` so
//! sessions are drivable from a terminal, a pipe, or a test buffer alike.
//! Tokens are trimmed and lowercased; end-of-input maps to the documented
//! default where one exists.

use std::io::BufRead;

/// Reads one lowercase token per line.
pub struct Prompter<R> {
    reader: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next token, or `None` on end-of-input. Read failures other than a
    /// clean EOF also yield `None`; an interactive session treats both as
    /// the user walking away.
    pub fn read_token(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
            Err(_) => None,
        }
    }

    /// Next token, with blank lines and end-of-input standing in for
    /// `default`.
    pub fn read_token_or(&mut self, default: &str) -> String {
        match self.read_token() {
            Some(token) if !token.is_empty() => token,
            _ => default.to_lowercase(),
        }
    }

    /// A y/N question; only an explicit `y` is a yes.
    pub fn confirm(&mut self) -> bool {
        self.read_token_or("n") == "y"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn tokens_are_trimmed_and_lowercased() {
        let mut p = prompter("  K \nS\n");
        assert_eq!(p.read_token(), Some("k".to_string()));
        assert_eq!(p.read_token(), Some("s".to_string()));
        assert_eq!(p.read_token(), None);
    }

    #[test]
    fn blank_line_takes_the_default() {
        let mut p = prompter("\n");
        assert_eq!(p.read_token_or("k"), "k");
    }

    #[test]
    fn eof_takes_the_default() {
        let mut p = prompter("");
        assert_eq!(p.read_token_or("K"), "k");
    }

    #[test]
    fn explicit_token_beats_the_default() {
        let mut p = prompter("q\n");
        assert_eq!(p.read_token_or("k"), "q");
    }

    #[test]
    fn last_line_without_newline_still_counts() {
        let mut p = prompter("s");
        assert_eq!(p.read_token(), Some("s".to_string()));
    }

    #[test]
    fn confirm_defaults_to_no() {
        assert!(prompter("y\n").confirm());
        assert!(!prompter("n\n").confirm());
        assert!(!prompter("\n").confirm());
        assert!(!prompter("").confirm());
        assert!(!prompter("yes\n").confirm());
    }
}
