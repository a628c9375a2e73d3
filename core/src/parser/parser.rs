use crate::ast::{BinaryOp, Node, UnaryOp};
use crate::lexer::{Operator, Token, TokenKind};
use crate::parser::{SyntaxError, SyntaxErrorKind};

/// Default limit for nested parentheses, unary chains, exponent chains and
/// `if` statements.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Maximum nesting depth before parsing fails with
    /// [`SyntaxErrorKind::MaxDepthExceeded`].
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Statements that parsed, plus one error per statement that did not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutcome {
    pub statements: Vec<Node>,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Wrap the statements in a [`Node::Program`].
    pub fn into_program(self) -> Node {
        Node::Program(self.statements)
    }
}

/// Parse a whole token sequence with default options.
pub fn parse(tokens: Vec<Token>) -> ParseOutcome {
    Parser::new(tokens).parse_statements()
}

pub fn parse_with_max_depth(tokens: Vec<Token>, max_depth: usize) -> ParseOutcome {
    Parser::with_options(tokens, ParserOptions { max_depth }).parse_statements()
}

type ParseResult<T> = Result<T, SyntaxError>;

const LOGICAL_OR: &[(Operator, BinaryOp)] = &[(Operator::OrOr, BinaryOp::Or)];
const LOGICAL_AND: &[(Operator, BinaryOp)] = &[(Operator::AndAnd, BinaryOp::And)];
const COMPARISON: &[(Operator, BinaryOp)] = &[
    (Operator::EqEq, BinaryOp::Eq),
    (Operator::BangEq, BinaryOp::Neq),
    (Operator::Lt, BinaryOp::Lt),
    (Operator::LtEq, BinaryOp::Lte),
    (Operator::Gt, BinaryOp::Gt),
    (Operator::GtEq, BinaryOp::Gte),
];
const ADDITIVE: &[(Operator, BinaryOp)] = &[
    (Operator::Plus, BinaryOp::Add),
    (Operator::Minus, BinaryOp::Sub),
];
const MULTIPLICATIVE: &[(Operator, BinaryOp)] = &[
    (Operator::Star, BinaryOp::Mul),
    (Operator::Slash, BinaryOp::Div),
    (Operator::Percent, BinaryOp::Mod),
];

/// Recursive-descent parser over a token sequence.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// statement      := ifStatement | assignment
/// ifStatement    := 'if' '(' expression ')' statement ('else' statement)?
/// assignment     := IDENTIFIER '=' expression ';'?
/// expression     := logicalOr
/// logicalOr      := logicalAnd ('||' logicalAnd)*
/// logicalAnd     := comparison ('&&' comparison)*
/// comparison     := additive (('=='|'!='|'<'|'<='|'>'|'>=') additive)*
/// additive       := multiplicative (('+'|'-') multiplicative)*
/// multiplicative := unary (('*'|'/'|'%') unary)*
/// unary          := ('-'|'!') unary | exponent
/// exponent       := primary (('^'|'**') exponent)?
/// primary        := NUMBER | IDENTIFIER | BOOLEAN | '(' expression ')'
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    options: ParserOptions,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    /// A missing trailing [`TokenKind::End`] is supplied.
    pub fn with_options(mut tokens: Vec<Token>, options: ParserOptions) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::End)) {
            let end = match tokens.last() {
                Some(last) => {
                    let width = last.lexeme.chars().count();
                    Token::end(last.span.0.end, last.line, last.column + width)
                }
                None => Token::end(0, 1, 1),
            };
            tokens.push(end);
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Parse statements until end of input, recovering after each malformed
    /// statement.
    pub fn parse_statements(&mut self) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        while !self.at_end() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }

            let start = self.pos;
            match self.parse_statement() {
                Ok(statement) => outcome.statements.push(statement),
                Err(err) => {
                    tracing::debug!(
                        line = err.line,
                        column = err.column,
                        "recovered from syntax error: {}",
                        err.kind
                    );
                    outcome.errors.push(err);
                    self.synchronize(start);
                }
            }
        }

        tracing::debug!(
            statements = outcome.statements.len(),
            errors = outcome.errors.len(),
            "parsed program"
        );
        outcome
    }

    /// Parse a single statement at the current position.
    pub fn parse_statement(&mut self) -> ParseResult<Node> {
        if self.check(TokenKind::If) {
            return self.nested(Self::if_statement);
        }
        self.assignment()
    }

    /// Parse a single expression at the current position.
    pub fn parse_expression(&mut self) -> ParseResult<Node> {
        self.logical_or()
    }

    // Skips to the next statement boundary. If the failed statement consumed
    // nothing, the offending token goes first so the loop always advances.
    fn synchronize(&mut self, start: usize) {
        if self.pos == start {
            self.advance();
        }
        while !self.at_end() {
            if self.previous().is_some_and(|t| t.is(TokenKind::Semicolon)) {
                return;
            }
            if self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    fn if_statement(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::If, "'if'")?;
        self.expect(TokenKind::LParen, "'(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')' after condition")?;
        let then_branch = self.parse_statement()?;
        let else_branch = if self.eat(TokenKind::Else) {
            Some(self.parse_statement()?)
        } else {
            None
        };
        Ok(Node::if_else(condition, then_branch, else_branch))
    }

    fn assignment(&mut self) -> ParseResult<Node> {
        let name = self.expect(TokenKind::Identifier, "statement")?;
        let variable = name.lexeme.clone();
        self.expect(TokenKind::Assign, "'='")?;
        let value = self.parse_expression()?;
        self.eat(TokenKind::Semicolon);
        Ok(Node::assign(variable, value))
    }

    fn logical_or(&mut self) -> ParseResult<Node> {
        self.binary_level(LOGICAL_OR, Self::logical_and)
    }

    fn logical_and(&mut self) -> ParseResult<Node> {
        self.binary_level(LOGICAL_AND, Self::comparison)
    }

    fn comparison(&mut self) -> ParseResult<Node> {
        self.binary_level(COMPARISON, Self::additive)
    }

    fn additive(&mut self) -> ParseResult<Node> {
        self.binary_level(ADDITIVE, Self::multiplicative)
    }

    fn multiplicative(&mut self) -> ParseResult<Node> {
        self.binary_level(MULTIPLICATIVE, Self::unary)
    }

    // One left-associative precedence level.
    fn binary_level(
        &mut self,
        operators: &[(Operator, BinaryOp)],
        mut operand: impl FnMut(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<Node> {
        let mut node = operand(self)?;
        while let Some(op) = self.eat_binary(operators) {
            let right = operand(self)?;
            node = Node::binary(op, node, right);
        }
        Ok(node)
    }

    fn unary(&mut self) -> ParseResult<Node> {
        let op = match self.eat_operator(&[Operator::Minus, Operator::Bang]) {
            Some(Operator::Minus) => UnaryOp::Neg,
            Some(_) => UnaryOp::Not,
            None => return self.exponent(),
        };
        let operand = self.nested(Self::unary)?;
        Ok(Node::unary(op, operand))
    }

    // Right-associative through recursion on the exponent.
    fn exponent(&mut self) -> ParseResult<Node> {
        let base = self.primary()?;
        if self
            .eat_operator(&[Operator::Caret, Operator::StarStar])
            .is_some()
        {
            let exponent = self.nested(Self::exponent)?;
            return Ok(Node::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> ParseResult<Node> {
        let token = self.peek();
        match token.kind {
            TokenKind::Number => {
                let text = token.lexeme.clone();
                let value = match text.parse::<f64>() {
                    Ok(value) if value.is_finite() => value,
                    _ => {
                        return Err(self.error(SyntaxErrorKind::InvalidNumber { text }));
                    }
                };
                self.advance();
                Ok(Node::Number(value))
            }
            TokenKind::Identifier => {
                let name = token.lexeme.clone();
                self.advance();
                Ok(Node::Identifier(name))
            }
            TokenKind::Boolean => {
                let value = token.lexeme == "true";
                self.advance();
                Ok(Node::Boolean(value))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.nested(Self::parse_expression)?;
                self.expect(TokenKind::RParen, "')' after expression")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(SyntaxErrorKind::MaxDepthExceeded {
                max_depth: self.options.max_depth,
            }));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> &Token {
        // `with_options` guarantees a trailing End, and `advance` never moves
        // past it.
        &self.tokens[self.pos]
    }

    fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|i| &self.tokens[i])
    }

    fn at_end(&self) -> bool {
        self.peek().is(TokenKind::End)
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_binary(&mut self, operators: &[(Operator, BinaryOp)]) -> Option<BinaryOp> {
        let (_, op) = operators
            .iter()
            .copied()
            .find(|&(token, _)| self.peek().is_operator(token))?;
        self.advance();
        Some(op)
    }

    fn eat_operator(&mut self, operators: &[Operator]) -> Option<Operator> {
        let op = operators
            .iter()
            .copied()
            .find(|&op| self.peek().is_operator(op))?;
        self.advance();
        Some(op)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<&Token> {
        if !self.check(kind) {
            return Err(self.unexpected(expected));
        }
        let index = self.pos;
        self.advance();
        Ok(&self.tokens[index])
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        self.error(SyntaxErrorKind::UnexpectedToken {
            expected: expected.to_string(),
            found: describe(self.peek()),
        })
    }

    fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        let token = self.peek();
        SyntaxError {
            kind,
            span: token.span.clone(),
            line: token.line,
            column: token.column,
        }
    }
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Number => format!("number {}", token.lexeme),
        TokenKind::Identifier => format!("identifier '{}'", token.lexeme),
        TokenKind::Boolean => format!("'{}'", token.lexeme),
        kind => kind.to_string(),
    }
}
