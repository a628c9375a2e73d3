use core::fmt;

use crate::syntax::Span;

/// Operator tokens. Each one prints as its source text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    StarStar,
    EqEq,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,
    Bang,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Caret => "^",
            Operator::StarStar => "**",
            Operator::EqEq => "==",
            Operator::BangEq => "!=",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::AndAnd => "&&",
            Operator::OrOr => "||",
            Operator::Bang => "!",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Identifier,
    Assign,
    Operator(Operator),
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    If,
    Else,
    Boolean,
    /// End of input. Always the last token of a sequence.
    End,
}

impl TokenKind {
    /// True for tokens that may begin a statement.
    pub fn starts_statement(self) -> bool {
        matches!(self, TokenKind::If | TokenKind::Identifier)
    }
}

// Used in "expected X, found Y" messages.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number => f.write_str("number"),
            TokenKind::Identifier => f.write_str("identifier"),
            TokenKind::Assign => f.write_str("'='"),
            TokenKind::Operator(op) => write!(f, "'{}'", op),
            TokenKind::Semicolon => f.write_str("';'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::If => f.write_str("'if'"),
            TokenKind::Else => f.write_str("'else'"),
            TokenKind::Boolean => f.write_str("boolean"),
            TokenKind::End => f.write_str("end of input"),
        }
    }
}

/// A lexical token with its source location.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        span: Span,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            line,
            column,
        }
    }

    /// An end-of-input marker at `offset`.
    pub fn end(offset: usize, line: usize, column: usize) -> Self {
        Self::new(TokenKind::End, "", Span::new(offset, offset), line, column)
    }

    /// Byte offset of the first character.
    pub fn offset(&self) -> usize {
        self.span.0.start
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Operator(_) => "OPERATOR",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::End => "END",
        };
        write!(
            f,
            "{}({}) at {} [line:{},col:{}]",
            name,
            self.lexeme,
            self.offset(),
            self.line,
            self.column
        )
    }
}
