//! Source text to token sequence.
//!
//! Scanning is done by a [`logos`] state machine; this module adds line and
//! column tracking and the trailing [`TokenKind::End`] marker the parser relies
//! on.

mod error;
mod token;

#[cfg(test)]
mod lexer_test;

pub use error::{LexError, LexErrorKind};
pub use token::{Operator, Token, TokenKind};

use logos::{Filter, Logos};

use crate::syntax::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+|//[^\n]*")]
enum RawToken {
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Identifier,

    #[token("if")]
    If,

    #[token("else")]
    Else,

    #[token("true")]
    #[token("false")]
    Boolean,

    #[token("=")]
    Assign,

    #[token(";")]
    Semicolon,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    // Closed comments are skipped by the callback; only an unclosed one
    // becomes a token.
    #[token("/*", block_comment)]
    UnterminatedComment,
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> Filter<()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Filter::Skip
        }
        None => Filter::Emit(()),
    }
}

impl RawToken {
    fn kind(self) -> Option<TokenKind> {
        let op = |op| Some(TokenKind::Operator(op));
        match self {
            RawToken::Number => Some(TokenKind::Number),
            RawToken::Identifier => Some(TokenKind::Identifier),
            RawToken::If => Some(TokenKind::If),
            RawToken::Else => Some(TokenKind::Else),
            RawToken::Boolean => Some(TokenKind::Boolean),
            RawToken::Assign => Some(TokenKind::Assign),
            RawToken::Semicolon => Some(TokenKind::Semicolon),
            RawToken::LParen => Some(TokenKind::LParen),
            RawToken::RParen => Some(TokenKind::RParen),
            RawToken::LBrace => Some(TokenKind::LBrace),
            RawToken::RBrace => Some(TokenKind::RBrace),
            RawToken::Plus => op(Operator::Plus),
            RawToken::Minus => op(Operator::Minus),
            RawToken::Star => op(Operator::Star),
            RawToken::StarStar => op(Operator::StarStar),
            RawToken::Slash => op(Operator::Slash),
            RawToken::Percent => op(Operator::Percent),
            RawToken::Caret => op(Operator::Caret),
            RawToken::EqEq => op(Operator::EqEq),
            RawToken::BangEq => op(Operator::BangEq),
            RawToken::Lt => op(Operator::Lt),
            RawToken::LtEq => op(Operator::LtEq),
            RawToken::Gt => op(Operator::Gt),
            RawToken::GtEq => op(Operator::GtEq),
            RawToken::AndAnd => op(Operator::AndAnd),
            RawToken::OrOr => op(Operator::OrOr),
            RawToken::Bang => op(Operator::Bang),
            RawToken::UnterminatedComment => None,
        }
    }
}

/// Maps byte offsets to 1-based line and column numbers.
struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    fn new(source: &'src str) -> Self {
        let line_starts = core::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        let column = self.source[line_start..offset].chars().count() + 1;
        (line, column)
    }
}

/// Streaming lexer. Yields tokens in source order, then a single
/// [`TokenKind::End`] token, then `None`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
    lines: LineIndex<'src>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: RawToken::lexer(source),
            lines: LineIndex::new(source),
            finished: false,
        }
    }

    fn error(&mut self, kind: LexErrorKind, span: Span) -> LexError {
        // Stop after the first error.
        self.finished = true;
        let (line, column) = self.lines.position(span.0.start);
        LexError {
            kind,
            span,
            line,
            column,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(raw) = self.inner.next() else {
            self.finished = true;
            let offset = self.lines.source.len();
            let (line, column) = self.lines.position(offset);
            return Some(Ok(Token::end(offset, line, column)));
        };

        let span = Span(self.inner.span());
        let slice = self.inner.slice();

        let kind = match raw {
            Ok(raw) => raw.kind(),
            Err(()) => {
                let c = slice.chars().next().unwrap_or('\0');
                return Some(Err(self.error(LexErrorKind::UnexpectedCharacter(c), span)));
            }
        };

        match kind {
            Some(kind) => {
                let (line, column) = self.lines.position(span.0.start);
                Some(Ok(Token::new(kind, slice, span, line, column)))
            }
            None => Some(Err(self.error(LexErrorKind::UnterminatedComment, span))),
        }
    }
}

/// Tokenize a whole source text. The result always ends with an
/// [`TokenKind::End`] token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
