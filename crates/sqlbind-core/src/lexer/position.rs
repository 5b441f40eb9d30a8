//! Source location tracking for tokens.

/// A 1-based line/column location in the source text.
///
/// Columns count characters, not bytes, so a caret rendered under
/// `column` lines up with the character the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number, starting at 1.
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the position after consuming `c`.
    #[must_use]
    pub const fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_default() {
        assert_eq!(Position::default(), Position::new(1, 1));
    }

    #[test]
    fn test_position_advance_column() {
        let pos = Position::default().advance('a').advance('b');
        assert_eq!(pos, Position::new(1, 3));
    }

    #[test]
    fn test_position_advance_newline() {
        let pos = Position::new(3, 17).advance('\n');
        assert_eq!(pos, Position::new(4, 1));
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(2, 1) < Position::new(2, 2));
    }
}
