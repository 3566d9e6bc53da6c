use std::{iter::FusedIterator, rc::Rc};

use log::{debug, error, trace, warn};

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    patterns::longest_match,
    position::{LineTracker, Position},
    tokens::Token,
};

pub type RegexHandler = fn(&Lexer, &str) -> Step;

/// What a pattern handler decided to do with its match.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Emit(Token),
    /// Consume the lexeme without producing anything.
    Skip,
    /// Report a recoverable diagnostic and drop the lexeme.
    Recover(Error),
    /// Report a fatal diagnostic and end the scan.
    Halt(Error),
}

/// A single scan over one source buffer.
///
/// Yields `Ok(token)` in input order. A fatal diagnostic is yielded once as
/// `Err` and nothing follows it. Recoverable diagnostics never interrupt the
/// stream; they are collected in [`Lexer::diagnostics`].
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    tracker: LineTracker,
    file: Rc<String>,
    diagnostics: Vec<Error>,
    emitted: usize,
    halted: bool,
    finished: bool,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            source: source.into(),
            pos: 0,
            tracker: LineTracker::default(),
            file: Rc::new(String::from("shell")),
            diagnostics: vec![],
            emitted: 0,
            halted: false,
            finished: false,
        }
    }

    pub fn with_file(source: impl Into<String>, file: impl Into<String>) -> Lexer {
        Lexer {
            file: Rc::new(file.into()),
            ..Lexer::new(source)
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> usize {
        self.tracker.line()
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Diagnostics reported so far, in order. A fatal one is always last.
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Position of the cursor.
    pub fn cursor_position(&self) -> Position {
        self.tracker.position(&self.source, self.pos)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn advance_n(&mut self, n: usize) {
        let end = self.pos + n;
        self.tracker.advance(&self.source[self.pos..end]);
        self.pos = end;
    }

    fn skip_ignored(&mut self) {
        let skipped = self
            .remainder()
            .bytes()
            .take_while(|byte| *byte == b' ' || *byte == b'\t')
            .count();
        self.pos += skipped;
    }

    fn report(&mut self, error: Error) {
        warn!("{}", error);
        self.diagnostics.push(error);
    }

    fn halt(&mut self, error: Error) -> Error {
        error!("{}; scan halted", error);
        self.halted = true;
        self.diagnostics.push(error.clone());
        error
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            debug!(
                "scanned {}: {} tokens, {} diagnostics, {} lines",
                self.file,
                self.emitted,
                self.diagnostics.len(),
                self.line()
            );
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted || self.finished {
            return None;
        }

        loop {
            self.skip_ignored();

            if self.at_eof() {
                self.finish();
                return None;
            }

            let Some((pattern, len)) = longest_match(self.remainder()) else {
                let character = self.at()?;
                let error = Error::new(
                    ErrorImpl::UnrecognisedCharacter { character },
                    self.cursor_position(),
                );
                self.report(error);
                self.advance_n(character.len_utf8());
                continue;
            };

            let lexeme = &self.source[self.pos..self.pos + len];
            trace!("{:?} matched {:?} at offset {}", pattern.rule, lexeme, self.pos);
            let step = pattern.handle(self, lexeme);
            self.advance_n(len);

            match step {
                Step::Emit(token) => {
                    self.emitted += 1;
                    return Some(Ok(token));
                }
                Step::Skip => continue,
                Step::Recover(error) => self.report(error),
                Step::Halt(error) => return Some(Err(self.halt(error))),
            }
        }
    }
}

impl FusedIterator for Lexer {}

/// Starts a fresh scan over `source`.
pub fn scan(source: impl Into<String>) -> Lexer {
    Lexer::new(source)
}

/// Everything a drained scan produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Error>,
    /// Line counter at the point the scan stopped.
    pub lines: usize,
}

impl ScanOutcome {
    pub fn fatal(&self) -> Option<&Error> {
        self.diagnostics.last().filter(|error| error.is_fatal())
    }
}

pub fn tokenize(source: impl Into<String>) -> ScanOutcome {
    let mut lex = scan(source);
    let tokens = lex.by_ref().filter_map(Result::ok).collect();

    ScanOutcome {
        tokens,
        diagnostics: lex.diagnostics,
        lines: lex.tracker.line(),
    }
}
