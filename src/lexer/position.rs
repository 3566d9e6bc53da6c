//! Line and column bookkeeping for the scanner.
//!
//! The line counter is advanced incrementally as newline runs are consumed,
//! while columns are recomputed per token from the absolute offset so that a
//! token's position never depends on anything but where it starts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Where a lexeme (or a diagnostic) begins in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn null() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTracker {
    line: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        LineTracker { line: 1 }
    }
}

impl LineTracker {
    pub fn line(&self) -> usize {
        self.line
    }

    /// Bumps the counter by the number of newlines in `consumed`.
    pub fn advance(&mut self, consumed: &str) {
        self.line += consumed.matches('\n').count();
    }

    pub fn position(&self, source: &str, offset: usize) -> Position {
        Position {
            offset,
            line: self.line,
            column: column_at(source, offset),
        }
    }
}

/// 1-based column of the character at byte `offset`.
///
/// Counts characters since the nearest preceding newline; with no newline
/// before `offset` the start of the buffer acts as one sitting at index -1.
pub fn column_at(source: &str, offset: usize) -> usize {
    let line_start = match source[..offset].rfind('\n') {
        Some(newline) => newline + 1,
        None => 0,
    };

    source[line_start..offset].chars().count() + 1
}

/// Returns the 1-based line number, the full text of the line and the
/// character index within that line for byte `offset`.
///
/// An offset at the very end of the buffer maps onto the last line.
pub fn line_at_offset(source: &str, offset: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            let line_pos = source[start..offset].chars().count();
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    // Past the last newline (or an empty buffer): an empty trailing line.
    let last_start = source.rfind('\n').map_or(0, |newline| newline + 1);
    let line_number = source.matches('\n').count() + 1;
    let line_pos = source[last_start..offset.min(source.len())].chars().count();
    (line_number, source[last_start..].to_string(), line_pos)
}
