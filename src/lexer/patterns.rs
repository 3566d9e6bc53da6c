//! The ordered pattern table.
//!
//! Every entry pairs an anchored regex with the handler that turns its match
//! into a [`Step`]. At each cursor position the scanner runs all of them and
//! keeps the longest match; on equal lengths the entry listed first wins, so
//! the order of [`PATTERNS`] is part of the lexical grammar.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl, NumberFault},
    MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::{
    lexer::{Lexer, RegexHandler, Step},
    position::Span,
    tokens::{Literal, Token, TokenKind, MAX_IDENTIFIER_LEN, RESERVED_LOOKUP},
};

/// Names the entries of the pattern table, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `##` to end of line, consumed without producing anything.
    Suppressed,
    HexNumber,
    LeadingZeros,
    RepeatedMinus,
    RepeatedPoint,
    MinusBeforeExponent,
    Number,
    InvalidIdentifier,
    Identifier,
    String,
    UnterminatedString,
    LineComment,
    BlockComment,
    UnterminatedComment,
    Plus,
    Minus,
    Times,
    Divide,
    Module,
    LParen,
    RParen,
    Newline,
}

pub struct RegexPattern {
    pub rule: Rule,
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(rule: Rule, pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            rule,
            regex: Regex::new(pattern)
                .unwrap_or_else(|err| panic!("bad pattern for {:?}: {}", rule, err)),
            handler,
        }
    }

    /// Length in bytes of the match at the start of `input`, if any.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex
            .find(input)
            .filter(|found| found.start() == 0 && found.end() > 0)
            .map(|found| found.end())
    }

    pub fn handle(&self, lexer: &Lexer, lexeme: &str) -> Step {
        (self.handler)(lexer, lexeme)
    }
}

lazy_static! {
    pub static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(Rule::Suppressed, r"^##[^\n]*", skip_handler),
        RegexPattern::new(Rule::HexNumber, r"^0[xX][0-9a-fA-F]+", hex_handler),
        RegexPattern::new(
            Rule::LeadingZeros,
            r"^[+-]?00+[0-9]*(?:\.[0-9]+)?(?:E[+-]?[0-9]+)?",
            leading_zeros_handler
        ),
        RegexPattern::new(
            Rule::RepeatedMinus,
            r"^[+-]?[0-9]*(?:\.[0-9]+)?-{2,}[0-9]+(?:\.[0-9]+)?",
            repeated_minus_handler
        ),
        RegexPattern::new(
            Rule::RepeatedPoint,
            r"^[+-]?[0-9]*\.[0-9]*\.[0-9.]*",
            repeated_point_handler
        ),
        RegexPattern::new(
            Rule::MinusBeforeExponent,
            r"^[+-]?[0-9]+(?:\.[0-9]+)?-+E[+-]?[0-9]*",
            minus_before_exponent_handler
        ),
        // Integers starting with 1-9 need a second digit: `7` on its own is
        // not a NUMBER.
        RegexPattern::new(
            Rule::Number,
            r"^[+-]?(?:[0-9]+\.[0-9]+|\.[0-9]+|0|[1-9][0-9]+)(?:E[+-]?[0-9]+)?",
            number_handler
        ),
        RegexPattern::new(
            Rule::InvalidIdentifier,
            r"^[0-9]+[a-zA-Z_][a-zA-Z0-9_-]*",
            invalid_identifier_handler
        ),
        RegexPattern::new(Rule::Identifier, r"^[a-zA-Z_][a-zA-Z0-9_-]*", identifier_handler),
        RegexPattern::new(Rule::String, r#"(?s)^"(?:[^"\\]|\\.)*""#, string_handler),
        RegexPattern::new(
            Rule::UnterminatedString,
            r#"(?s)^"(?:[^"\\]|\\.)*\\?\z"#,
            unterminated_string_handler
        ),
        RegexPattern::new(Rule::LineComment, r"^//[^\n]*", MK_DEFAULT_HANDLER!(TokenKind::LComment)),
        RegexPattern::new(Rule::BlockComment, r"(?s)^/\*.*?\*/", MK_DEFAULT_HANDLER!(TokenKind::BComment)),
        RegexPattern::new(
            Rule::UnterminatedComment,
            r"^/\*[^*]*(?:\*+[^*/][^*]*)*\**\z",
            unterminated_comment_handler
        ),
        RegexPattern::new(Rule::Plus, r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus)),
        RegexPattern::new(Rule::Minus, r"^-", MK_DEFAULT_HANDLER!(TokenKind::Minus)),
        RegexPattern::new(Rule::Times, r"^\*", MK_DEFAULT_HANDLER!(TokenKind::Times)),
        RegexPattern::new(Rule::Divide, r"^/", MK_DEFAULT_HANDLER!(TokenKind::Divide)),
        RegexPattern::new(Rule::Module, r"^%", MK_DEFAULT_HANDLER!(TokenKind::Module)),
        RegexPattern::new(Rule::LParen, r"^\(", MK_DEFAULT_HANDLER!(TokenKind::LParen)),
        RegexPattern::new(Rule::RParen, r"^\)", MK_DEFAULT_HANDLER!(TokenKind::RParen)),
        RegexPattern::new(Rule::Newline, r"^\n+", skip_handler),
    ];
}

/// Rules in precedence order, highest first.
pub fn precedence() -> Vec<Rule> {
    PATTERNS.iter().map(|pattern| pattern.rule).collect()
}

/// Longest match at the start of `input` as `(pattern, length)`.
/// Ties go to the pattern declared first.
pub fn longest_match(input: &str) -> Option<(&'static RegexPattern, usize)> {
    let mut best: Option<(&'static RegexPattern, usize)> = None;

    for pattern in PATTERNS.iter() {
        if let Some(len) = pattern.match_len(input) {
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((pattern, len));
            }
        }
    }

    best
}

fn skip_handler(_lexer: &Lexer, _lexeme: &str) -> Step {
    Step::Skip
}

fn identifier_handler(lexer: &Lexer, lexeme: &str) -> Step {
    let kind = RESERVED_LOOKUP
        .get(lexeme)
        .copied()
        .unwrap_or(TokenKind::Id);
    let value = lexeme.chars().take(MAX_IDENTIFIER_LEN).collect::<String>();

    Step::Emit(MK_TOKEN!(kind, value, None, lexer.cursor_position(), lexeme.len()))
}

fn invalid_identifier_handler(lexer: &Lexer, lexeme: &str) -> Step {
    Step::Recover(Error::new(
        ErrorImpl::InvalidIdentifier {
            lexeme: lexeme.to_string(),
        },
        lexer.cursor_position(),
    ))
}

fn number_handler(lexer: &Lexer, lexeme: &str) -> Step {
    let literal = if lexeme.contains(['.', 'E']) {
        match lexeme.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(Literal::Float(value)),
            _ => None,
        }
    } else {
        lexeme.parse::<i64>().ok().map(Literal::Integer)
    };

    match literal {
        Some(literal) => Step::Emit(MK_TOKEN!(
            TokenKind::Number,
            lexeme.to_string(),
            Some(literal),
            lexer.cursor_position(),
            lexeme.len()
        )),
        None => invalid_number(lexer, lexeme, NumberFault::Overflow),
    }
}

fn hex_handler(lexer: &Lexer, lexeme: &str) -> Step {
    match i64::from_str_radix(&lexeme[2..], 16) {
        Ok(value) => Step::Emit(MK_TOKEN!(
            TokenKind::NumberEx,
            lexeme.to_string(),
            Some(Literal::Integer(value)),
            lexer.cursor_position(),
            lexeme.len()
        )),
        Err(_) => invalid_number(lexer, lexeme, NumberFault::Overflow),
    }
}

fn invalid_number(lexer: &Lexer, lexeme: &str, fault: NumberFault) -> Step {
    Step::Recover(Error::new(
        ErrorImpl::InvalidNumber {
            lexeme: lexeme.to_string(),
            fault,
        },
        lexer.cursor_position(),
    ))
}

fn leading_zeros_handler(lexer: &Lexer, lexeme: &str) -> Step {
    invalid_number(lexer, lexeme, NumberFault::LeadingZeros)
}

fn repeated_minus_handler(lexer: &Lexer, lexeme: &str) -> Step {
    invalid_number(lexer, lexeme, NumberFault::RepeatedMinus)
}

fn repeated_point_handler(lexer: &Lexer, lexeme: &str) -> Step {
    invalid_number(lexer, lexeme, NumberFault::RepeatedPoint)
}

fn minus_before_exponent_handler(lexer: &Lexer, lexeme: &str) -> Step {
    invalid_number(lexer, lexeme, NumberFault::MinusBeforeExponent)
}

fn string_handler(lexer: &Lexer, lexeme: &str) -> Step {
    let body = &lexeme[1..lexeme.len() - 1];

    Step::Emit(MK_TOKEN!(
        TokenKind::CString,
        lexeme.to_string(),
        Some(Literal::Str(unescape(body))),
        lexer.cursor_position(),
        lexeme.len()
    ))
}

/// Resolves backslash escapes. Unknown escapes, an escaped newline included,
/// stand for the escaped character itself.
pub fn unescape(body: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push(ch), // Keep the lone backslash
        }
    }

    result
}

fn unterminated_string_handler(lexer: &Lexer, lexeme: &str) -> Step {
    Step::Halt(Error::new(
        ErrorImpl::UnterminatedString {
            lexeme: lexeme.to_string(),
        },
        lexer.cursor_position(),
    ))
}

fn unterminated_comment_handler(lexer: &Lexer, lexeme: &str) -> Step {
    Step::Halt(Error::new(
        ErrorImpl::UnterminatedComment {
            lexeme: lexeme.to_string(),
        },
        lexer.cursor_position(),
    ))
}
