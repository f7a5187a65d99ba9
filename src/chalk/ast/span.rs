//! Position tracking for source code locations
//!
//! Lines and columns are 1-based. Columns count characters, so a multi-byte
//! UTF-8 sequence inside a string literal advances the column by one.

use serde::Serialize;
use std::fmt;

/// Represents a position in source code (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position of the first character of a buffer
    pub fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Advance over consumed bytes, scanning for newlines.
    pub fn advance(&mut self, consumed: &[u8]) {
        for &byte in consumed {
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if byte & 0xC0 != 0x80 {
                // continuation bytes belong to the previous character
                self.column += 1;
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_single_line() {
        let mut pos = Position::start();
        pos.advance(b"while");
        assert_eq!(pos, Position::new(1, 6));
    }

    #[test]
    fn test_advance_across_newlines() {
        let mut pos = Position::start();
        pos.advance(b"a\n\n  b");
        assert_eq!(pos, Position::new(3, 4));
    }

    #[test]
    fn test_advance_counts_characters() {
        let mut pos = Position::start();
        pos.advance("\"héllo\"".as_bytes());
        assert_eq!(pos, Position::new(1, 8));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(12, 3).to_string(), "12:3");
    }
}
