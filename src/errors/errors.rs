use std::fmt::Display;

use thiserror::Error;

use crate::lexer::position::{line_at_offset, Position};

/// Unterminated lexemes can swallow the rest of the buffer; tips only quote
/// this many characters of them.
const TIP_EXCERPT_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The offending character or lexeme.
    pub fn lexeme(&self) -> String {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { character } => character.to_string(),
            ErrorImpl::InvalidIdentifier { lexeme }
            | ErrorImpl::InvalidNumber { lexeme, .. }
            | ErrorImpl::UnterminatedString { lexeme }
            | ErrorImpl::UnterminatedComment { lexeme } => lexeme.clone(),
        }
    }

    pub fn severity(&self) -> Severity {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. }
            | ErrorImpl::InvalidIdentifier { .. }
            | ErrorImpl::InvalidNumber { .. } => Severity::Recoverable,
            ErrorImpl::UnterminatedString { .. } | ErrorImpl::UnterminatedComment { .. } => {
                Severity::Fatal
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognizedCharacter",
            ErrorImpl::InvalidIdentifier { .. } => "InvalidIdentifier",
            ErrorImpl::InvalidNumber { .. } => "InvalidNumber",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedComment { .. } => "UnterminatedComment",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::InvalidIdentifier { lexeme } => ErrorTip::Suggestion(format!(
                "Invalid identifier: `{}`, identifiers cannot start with a digit",
                lexeme
            )),
            ErrorImpl::InvalidNumber { lexeme, fault } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`, {}", lexeme, fault.hint()))
            }
            ErrorImpl::UnterminatedString { lexeme } => ErrorTip::Suggestion(format!(
                "String `{}` is missing its closing `\"`",
                excerpt(lexeme)
            )),
            ErrorImpl::UnterminatedComment { lexeme } => ErrorTip::Suggestion(format!(
                "Comment `{}` is missing its closing `*/`",
                excerpt(lexeme)
            )),
        }
    }

    /// Renders the diagnostic with the offending source line and a caret:
    ///
    /// ```text
    /// Error: InvalidNumber (Invalid number: `000123`, remove the extra leading zeros)
    /// -> main.cl
    ///   |
    /// 1 | x 000123
    ///   | ---^
    /// ```
    pub fn render(&self, source: &str, file: &str) -> String {
        let (line, line_text, line_pos) = line_at_offset(source, self.position.offset);

        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        let mut out = String::new();
        if let ErrorTip::None = self.get_tip() {
            out.push_str(&format!("Error: {}\n", self.get_error_name()));
        } else {
            out.push_str(&format!(
                "Error: {} ({})\n",
                self.get_error_name(),
                self.get_tip()
            ));
        }
        out.push_str(&format!("-> {}\n", file));
        out.push_str(&format!("{:>padding$}\n", "|"));

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

        let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
        out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
        out
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.internal_error, self.position.line, self.position.column
        )
    }
}

impl std::error::Error for Error {}

fn excerpt(lexeme: &str) -> String {
    let first_line = lexeme.lines().next().unwrap_or("");
    if first_line.chars().count() > TIP_EXCERPT_LEN || first_line.len() < lexeme.len() {
        format!("{}...", first_line.chars().take(TIP_EXCERPT_LEN).collect::<String>())
    } else {
        first_line.to_string()
    }
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reported, the scan carries on.
    Recoverable,
    /// Reported as the last event of the scan.
    Fatal,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Which malformed numeric shape a rejected lexeme matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFault {
    LeadingZeros,
    RepeatedMinus,
    RepeatedPoint,
    MinusBeforeExponent,
    Overflow,
}

impl NumberFault {
    fn hint(&self) -> &'static str {
        match self {
            NumberFault::LeadingZeros => "remove the extra leading zeros",
            NumberFault::RepeatedMinus => "a number takes at most one minus sign",
            NumberFault::RepeatedPoint => "a number takes at most one decimal point",
            NumberFault::MinusBeforeExponent => "the exponent marker `E` must follow the mantissa",
            NumberFault::Overflow => "the value does not fit in 64 bits",
        }
    }
}

impl Display for NumberFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NumberFault::LeadingZeros => "multiple leading zeros",
            NumberFault::RepeatedMinus => "multiple minus signs",
            NumberFault::RepeatedPoint => "multiple decimal points",
            NumberFault::MinusBeforeExponent => "minus sign before exponent",
            NumberFault::Overflow => "out of range",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("invalid identifier: {lexeme:?}")]
    InvalidIdentifier { lexeme: String },
    #[error("invalid number ({fault}): {lexeme:?}")]
    InvalidNumber { lexeme: String, fault: NumberFault },
    #[error("unterminated string: {lexeme:?}")]
    UnterminatedString { lexeme: String },
    #[error("unterminated comment: {lexeme:?}")]
    UnterminatedComment { lexeme: String },
}
