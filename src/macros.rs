//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance at a source position
//! - `MK_DEFAULT_HANDLER!` - Creates a pattern-table handler that emits the
//!   matched text unchanged as a token of one kind
//!
//! These macros reduce boilerplate in the pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The reported value
/// * `$literal` - `Option<Literal>` derived from the lexeme
/// * `$position` - The `Position` where the lexeme starts
/// * `$len` - Consumed length in bytes
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), Some(Literal::Integer(42)), position, 2);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $literal:expr, $position:expr, $len:expr) => {{
        let position = $position;
        Token {
            kind: $kind,
            lexeme: $value,
            literal: $literal,
            line: position.line,
            column: position.column,
            span: Span::new(position.offset, position.offset + $len),
        }
    }};
}

/// Creates a default handler for patterns whose lexeme is the token value.
///
/// # Example
///
/// ```ignore
/// RegexPattern::new(Rule::Plus, r"^\+", MK_DEFAULT_HANDLER!(TokenKind::Plus))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &Lexer, lexeme: &str| {
            Step::Emit(MK_TOKEN!(
                $kind,
                String::from(lexeme),
                None,
                lexer.cursor_position(),
                lexeme.len()
            ))
        }
    };
}
