//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers, including truncation of long identifiers
//! - Numeric literals (decimal, signed, floating, exponential, hexadecimal)
//! - Malformed numbers and identifiers
//! - String literals and comments, terminated or not
//! - Line and column tracking

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::errors::errors::{ErrorImpl, NumberFault};

use super::{
    lexer::{scan, tokenize},
    position::Span,
    tokens::{Literal, TokenKind, RESERVED_LOOKUP},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).tokens.iter().map(|token| token.kind).collect()
}

fn error_names(source: &str) -> Vec<String> {
    tokenize(source)
        .diagnostics
        .iter()
        .map(|error| error.get_error_name().to_string())
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "class extends void int boolean string return if else while break continue this new length true false null";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Class,
            TokenKind::Extends,
            TokenKind::Void,
            TokenKind::Int,
            TokenKind::Boolean,
            TokenKind::String,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Break,
            TokenKind::Continue,
            TokenKind::This,
            TokenKind::New,
            TokenKind::Length,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
        ]
    );
}

#[test]
fn test_keywords_are_case_sensitive() {
    let tokens = tokenize("Class IF classy").tokens;

    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[1].kind, TokenKind::Id);
    assert_eq!(tokens[2].kind, TokenKind::Id);
    assert_eq!(tokens[2].lexeme, "classy");
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase kebab-case").tokens;

    assert_eq!(tokens.len(), 6);
    assert!(tokens.iter().all(|token| token.kind == TokenKind::Id));
    assert_eq!(tokens[2].lexeme, "baz_123");
    assert_eq!(tokens[3].lexeme, "_underscore");
    assert_eq!(tokens[5].lexeme, "kebab-case");
}

#[test]
fn test_long_identifier_is_truncated() {
    let source = "abcdefghijklmnopqrstuvwxyz + x";
    let tokens = tokenize(source).tokens;

    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[0].lexeme, "abcdefghijklmnopqrst");
    assert_eq!(tokens[0].span, Span::new(0, 26));
    assert_eq!(tokens[1].kind, TokenKind::Plus);
    assert_eq!(tokens[1].column, 28);
    assert_eq!(tokens[2].lexeme, "x");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 2.75 0 100.5 .25 -7.5 +12 12E3 1.5E-2 0E+1").tokens;

    assert!(tokens.iter().all(|token| token.kind == TokenKind::Number));
    assert_eq!(tokens[0].literal, Some(Literal::Integer(42)));
    assert_eq!(tokens[1].literal, Some(Literal::Float(2.75)));
    assert_eq!(tokens[2].literal, Some(Literal::Integer(0)));
    assert_eq!(tokens[3].literal, Some(Literal::Float(100.5)));
    assert_eq!(tokens[4].literal, Some(Literal::Float(0.25)));
    assert_eq!(tokens[5].literal, Some(Literal::Float(-7.5)));
    assert_eq!(tokens[6].literal, Some(Literal::Integer(12)));
    assert_eq!(tokens[7].literal, Some(Literal::Float(12000.0)));
    assert_eq!(tokens[8].literal, Some(Literal::Float(0.015)));
    assert_eq!(tokens[9].literal, Some(Literal::Float(0.0)));
    assert_eq!(tokens[6].lexeme, "+12");
}

#[test]
fn test_tokenize_hex_numbers() {
    let tokens = tokenize("0x1A 0XfF 0x0").tokens;

    assert!(tokens.iter().all(|token| token.kind == TokenKind::NumberEx));
    assert_eq!(tokens[0].literal, Some(Literal::Integer(26)));
    assert_eq!(tokens[1].literal, Some(Literal::Integer(255)));
    assert_eq!(tokens[2].literal, Some(Literal::Integer(0)));
}

#[test]
fn test_expression_sequence() {
    let tokens = tokenize("12 + -34 * (0x1A)").tokens;
    let pairs = tokens
        .iter()
        .map(|token| (token.kind, token.lexeme.as_str()))
        .collect::<Vec<_>>();

    assert_eq!(
        pairs,
        vec![
            (TokenKind::Number, "12"),
            (TokenKind::Plus, "+"),
            (TokenKind::Number, "-34"),
            (TokenKind::Times, "*"),
            (TokenKind::LParen, "("),
            (TokenKind::NumberEx, "0x1A"),
            (TokenKind::RParen, ")"),
        ]
    );
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % ( )"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Times,
            TokenKind::Divide,
            TokenKind::Module,
            TokenKind::LParen,
            TokenKind::RParen,
        ]
    );
}

#[test]
fn test_single_nonzero_digit_is_unrecognised() {
    let outcome = tokenize("7");

    assert!(outcome.tokens.is_empty());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(
        outcome.diagnostics[0].kind(),
        &ErrorImpl::UnrecognisedCharacter { character: '7' }
    );
}

#[test]
fn test_signed_single_digit_splits() {
    let outcome = tokenize("x-3 - 3");

    assert_eq!(outcome.tokens[0].kind, TokenKind::Id);
    assert_eq!(outcome.tokens[0].lexeme, "x-3");
    assert_eq!(outcome.tokens[1].kind, TokenKind::Minus);
    assert_eq!(outcome.tokens.len(), 2);
    assert_eq!(error_names("x-3 - 3"), vec!["UnrecognizedCharacter"]);
}

#[test]
fn test_leading_zeros_are_invalid() {
    let outcome = tokenize("000123");

    assert!(outcome.tokens.is_empty());
    assert_eq!(
        outcome.diagnostics[0].kind(),
        &ErrorImpl::InvalidNumber {
            lexeme: "000123".to_string(),
            fault: NumberFault::LeadingZeros,
        }
    );
    assert_eq!(outcome.diagnostics[0].line(), 1);
    assert_eq!(outcome.diagnostics[0].column(), 1);
}

#[test]
fn test_malformed_numbers_are_recoverable() {
    let outcome = tokenize("--5 1.2.3 12--E5 x");

    let faults = outcome
        .diagnostics
        .iter()
        .map(|error| match error.kind() {
            ErrorImpl::InvalidNumber { fault, .. } => *fault,
            other => panic!("unexpected diagnostic {:?}", other),
        })
        .collect::<Vec<_>>();
    assert_eq!(
        faults,
        vec![
            NumberFault::RepeatedMinus,
            NumberFault::RepeatedPoint,
            NumberFault::MinusBeforeExponent,
        ]
    );

    // Scanning resumes right after each malformed run.
    assert_eq!(outcome.tokens.len(), 1);
    assert_eq!(outcome.tokens[0].lexeme, "x");
    assert_eq!(outcome.tokens[0].column, 18);
    assert!(outcome.fatal().is_none());
}

#[test]
fn test_signed_and_fractional_malformed_runs() {
    let outcome = tokenize("-12-E5 1.5--3 -5--3 y");

    let rejected = outcome
        .diagnostics
        .iter()
        .map(|error| match error.kind() {
            ErrorImpl::InvalidNumber { lexeme, fault } => (lexeme.as_str(), *fault),
            other => panic!("unexpected diagnostic {:?}", other),
        })
        .collect::<Vec<_>>();
    assert_eq!(
        rejected,
        vec![
            ("-12-E5", NumberFault::MinusBeforeExponent),
            ("1.5--3", NumberFault::RepeatedMinus),
            ("-5--3", NumberFault::RepeatedMinus),
        ]
    );

    // No part of a malformed run leaks out as a token.
    assert_eq!(outcome.tokens.len(), 1);
    assert_eq!(outcome.tokens[0].lexeme, "y");
    assert_eq!(outcome.tokens[0].column, 21);
}

#[test]
fn test_single_leading_zero_splits() {
    let outcome = tokenize("0123");
    let pairs = outcome
        .tokens
        .iter()
        .map(|token| (token.kind, token.lexeme.as_str(), token.column))
        .collect::<Vec<_>>();

    assert_eq!(
        pairs,
        vec![(TokenKind::Number, "0", 1), (TokenKind::Number, "123", 2)]
    );
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_number_overflow_is_invalid() {
    let outcome = tokenize("0x8000000000000000 99999999999999999999 ok");

    assert_eq!(outcome.tokens.len(), 1);
    assert_eq!(outcome.diagnostics.len(), 2);
    assert!(outcome.diagnostics.iter().all(|error| matches!(
        error.kind(),
        ErrorImpl::InvalidNumber {
            fault: NumberFault::Overflow,
            ..
        }
    )));
}

#[test]
fn test_invalid_identifier() {
    let outcome = tokenize("12abc foo 0xZZ");

    assert_eq!(outcome.tokens.len(), 1);
    assert_eq!(outcome.tokens[0].lexeme, "foo");
    assert_eq!(
        outcome.diagnostics[0].kind(),
        &ErrorImpl::InvalidIdentifier {
            lexeme: "12abc".to_string()
        }
    );
    assert_eq!(
        outcome.diagnostics[1].kind(),
        &ErrorImpl::InvalidIdentifier {
            lexeme: "0xZZ".to_string()
        }
    );
    assert_eq!(outcome.diagnostics[1].column(), 11);
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "" "esc\"aped\n""#).tokens;

    assert_eq!(tokens[0].kind, TokenKind::CString);
    assert_eq!(tokens[0].lexeme, "\"hello\"");
    assert_eq!(tokens[0].literal, Some(Literal::Str("hello".to_string())));
    assert_eq!(tokens[1].literal, Some(Literal::Str(String::new())));
    assert_eq!(
        tokens[2].literal,
        Some(Literal::Str("esc\"aped\n".to_string()))
    );
}

#[test]
fn test_multiline_string_advances_lines() {
    let tokens = tokenize("\"one\\\ntwo\" x").tokens;

    assert_eq!(tokens[0].kind, TokenKind::CString);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[0].literal, Some(Literal::Str("one\ntwo".to_string())));
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[1].column, 6);
}

#[test]
fn test_unterminated_string_is_fatal() {
    let outcome = tokenize("a \"abc");

    assert_eq!(outcome.tokens.len(), 1);
    let fatal = outcome.fatal().expect("fatal diagnostic");
    assert_eq!(fatal.get_error_name(), "UnterminatedString");
    assert_eq!(fatal.column(), 3);
}

#[test]
fn test_nothing_follows_a_fatal_error() {
    let mut lexer = scan("x \"abc\n12 + 34 class");

    assert_eq!(lexer.next().unwrap().unwrap().lexeme, "x");
    let fatal = lexer.next().unwrap().unwrap_err();
    assert!(fatal.is_fatal());
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
    assert!(lexer.halted());
    assert_eq!(lexer.diagnostics().last(), Some(&fatal));
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("x // line comment\n/* block */ y").tokens;

    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Id,
            TokenKind::LComment,
            TokenKind::BComment,
            TokenKind::Id,
        ]
    );
    assert_eq!(tokens[1].lexeme, "// line comment");
    assert_eq!(tokens[2].lexeme, "/* block */");
    assert!(tokens[1].is_comment() && tokens[2].is_comment());
    assert!(!tokens[3].is_comment());
    assert_eq!(tokens[3].line, 2);
}

#[test]
fn test_block_comment_is_non_greedy() {
    let tokens = tokenize("/* a */ b /* c */").tokens;

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].lexeme, "/* a */");
    assert_eq!(tokens[1].lexeme, "b");
}

#[test]
fn test_multiline_block_comment_advances_lines() {
    let tokens = tokenize("/* line1\nline2\nline3 */ x").tokens;

    assert_eq!(tokens[0].kind, TokenKind::BComment);
    assert_eq!(tokens[1].kind, TokenKind::Id);
    assert_eq!(tokens[1].line, 3);
    assert_eq!(tokens[1].column, 10);
}

#[test]
fn test_unterminated_comment_is_fatal() {
    let outcome = tokenize("x /* never closed\n y");

    assert_eq!(outcome.tokens.len(), 1);
    assert_eq!(
        outcome.fatal().map(|error| error.get_error_name()),
        Some("UnterminatedComment")
    );
}

#[test]
fn test_double_hash_line_is_suppressed() {
    let outcome = tokenize("## nothing here\nx");

    assert_eq!(outcome.tokens.len(), 1);
    assert_eq!(outcome.tokens[0].lexeme, "x");
    assert_eq!(outcome.tokens[0].line, 2);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_unrecognised_character_is_recoverable() {
    let outcome = tokenize("x @ # y");

    assert_eq!(kinds("x @ # y"), vec![TokenKind::Id, TokenKind::Id]);
    assert_eq!(outcome.diagnostics.len(), 2);
    assert_eq!(outcome.diagnostics[0].lexeme(), "@");
    assert_eq!(outcome.diagnostics[0].column(), 3);
    assert_eq!(outcome.diagnostics[1].lexeme(), "#");
    assert_eq!(outcome.diagnostics[1].column(), 5);
}

#[test]
fn test_unrecognised_character_reported_at_cursor() {
    let mut lexer = scan("ab\n  $ cd");

    assert_eq!(lexer.next().unwrap().unwrap().lexeme, "ab");
    assert!(lexer.diagnostics().is_empty());

    let next = lexer.next().unwrap().unwrap();
    assert_eq!(next.lexeme, "cd");
    let diagnostic = &lexer.diagnostics()[0];
    assert_eq!(diagnostic.lexeme(), "$");
    assert_eq!(diagnostic.get_position().offset, 5);
    assert_eq!((diagnostic.line(), diagnostic.column()), (2, 3));
}

#[test]
fn test_unrecognised_multibyte_character_advances_one_char() {
    let outcome = tokenize("é x");

    assert_eq!(outcome.tokens.len(), 1);
    assert_eq!(outcome.tokens[0].column, 3);
    assert_eq!(outcome.diagnostics[0].lexeme(), "é");
}

#[test]
fn test_line_and_column_tracking() {
    let tokens = tokenize("class\n\n  foo\tbar\n(").tokens;

    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (3, 3));
    assert_eq!((tokens[2].line, tokens[2].column), (3, 7));
    assert_eq!((tokens[3].line, tokens[3].column), (4, 1));
}

#[test]
fn test_carriage_return_is_not_whitespace() {
    assert_eq!(error_names("x\r\ny"), vec!["UnrecognizedCharacter"]);
}

#[test]
fn test_empty_input() {
    let outcome = tokenize("");

    assert!(outcome.tokens.is_empty());
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.lines, 1);
}

proptest! {
    #[test]
    fn whitespace_only_input_yields_nothing(
        chars in proptest::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n')], 0..64)
    ) {
        let source = chars.iter().collect::<String>();
        let outcome = tokenize(source.as_str());

        prop_assert!(outcome.tokens.is_empty());
        prop_assert!(outcome.diagnostics.is_empty());
        prop_assert_eq!(outcome.lines, 1 + source.matches('\n').count());
    }

    #[test]
    fn reserved_words_never_scan_as_identifiers(
        word in proptest::sample::select(RESERVED_LOOKUP.keys().copied().collect::<Vec<_>>())
    ) {
        let tokens = tokenize(word).tokens;

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(Some(&tokens[0].kind), RESERVED_LOOKUP.get(word));
        prop_assert!(tokens[0].kind.is_reserved());
    }

    #[test]
    fn long_identifiers_report_twenty_chars(ident in "[a-zA-Z_][a-zA-Z0-9_]{20,40}") {
        let source = format!("{} )", ident);
        let tokens = tokenize(source.as_str()).tokens;

        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(&tokens[0].lexeme, &ident[..20]);
        prop_assert_eq!(tokens[0].span.len(), ident.len());
        prop_assert_eq!(tokens[1].kind, TokenKind::RParen);
        prop_assert_eq!(tokens[1].column, ident.len() + 2);
    }

    #[test]
    fn rescanning_is_idempotent(source in "[a-z0-9 +*/%()\"\n#.-]{0,64}") {
        prop_assert_eq!(tokenize(source.as_str()), tokenize(source.as_str()));
    }
}
