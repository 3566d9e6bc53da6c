#![allow(clippy::module_inception)]

pub mod errors;
pub mod lexer;
pub mod macros;

extern crate regex;

pub use errors::errors::{Error, ErrorImpl, ErrorTip, NumberFault, Severity};
pub use lexer::{
    lexer::{scan, tokenize, Lexer, ScanOutcome},
    position::{Position, Span},
    tokens::{Literal, Token, TokenKind},
};
