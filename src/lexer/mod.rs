//! Lexical analysis for the class language.
//!
//! This module turns source text into a stream of classified tokens:
//!
//! - An ordered table of anchored regex patterns, applied with maximal munch
//! - Recognition of keywords, identifiers, numeric, string and comment literals
//! - Line and column tracking for every token and diagnostic
//! - Classification of malformed lexemes into recoverable and fatal errors

pub mod lexer;
pub mod patterns;
pub mod position;
pub mod tokens;

#[cfg(test)]
mod tests;
