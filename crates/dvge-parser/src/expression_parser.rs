//! Expression parser
//!
//! Parses author expressions into Expression AST nodes. The grammar is
//! deliberately small: literals, function calls into the catalog, and
//! operators. There is no attribute access, indexing, assignment or import.
//!
//! Supported syntax (loosest binding first):
//! - Logical: `or` / `||`, `and` / `&&`, `not` / `!`
//! - Comparison: `==`, `!=`, `<`, `<=`, `>`, `>=`, `in`, `not in` (chainable: `0 < x < 10`)
//! - Additive: `+`, `-`
//! - Multiplicative: `*`, `/`, `%`
//! - Unary: `-`, `+`
//! - Power: `**` (right associative)
//! - Primary: `42`, `3.14`, `"text"`, `'text'`, `true`/`True`, `false`/`False`,
//!   `null`/`None`, `name(args)`, `(expr)`, `[a, b]`, `{"key": value}`

use crate::error::{ParseError, Result};
use crate::lexer::{tokenize, Token, TokenKind};
use dvge_core::ast::{Expression, Operator, UnaryOperator};
use dvge_core::Value;

/// Default maximum nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Expression parser
#[derive(Debug, Clone)]
pub struct ExpressionParser {
    max_depth: usize,
}

impl Default for ExpressionParser {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ExpressionParser {
    /// Create a parser with the default depth limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse an expression with the default settings
    pub fn parse(input: &str) -> Result<Expression> {
        Self::default().parse_str(input)
    }

    /// Parse an expression from a string
    pub fn parse_str(&self, input: &str) -> Result<Expression> {
        if input.trim().is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let tokens = tokenize(input)?;
        let mut cursor = Cursor {
            tokens: &tokens,
            pos: 0,
            depth: 0,
            max_depth: self.max_depth,
        };

        let expr = cursor.expression()?;
        if let Some(token) = cursor.peek_token() {
            log::debug!("Trailing input after expression: {:?}", token);
            return Err(ParseError::UnexpectedToken {
                found: token.kind.to_string(),
                expected: "end of expression".to_string(),
                position: token.position,
            });
        }
        Ok(expr)
    }
}

struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'t> Cursor<'t> {
    fn peek_token(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Option<&'t TokenKind> {
        self.peek_token().map(|t| &t.kind)
    }

    fn peek_second(&self) -> Option<&'t TokenKind> {
        self.tokens.get(self.pos + 1).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        match self.advance() {
            Some(token) if &token.kind == kind => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                found: token.kind.to_string(),
                expected: format!("'{}'", kind),
                position: token.position,
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: format!("'{}'", kind),
            }),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::TooDeep {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Release the levels charged by a left-associative loop
    fn release(&mut self, links: usize) {
        self.depth -= links;
    }

    fn expression(&mut self) -> Result<Expression> {
        self.enter()?;
        let expr = self.or_expr();
        self.leave();
        expr
    }

    fn or_expr(&mut self) -> Result<Expression> {
        let mut left = self.and_expr()?;
        let mut links = 0;
        while matches!(self.peek(), Some(TokenKind::Or | TokenKind::OrOr)) {
            self.pos += 1;
            self.enter()?;
            links += 1;
            let right = self.and_expr()?;
            left = Expression::binary(left, Operator::Or, right);
        }
        self.release(links);
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expression> {
        let mut left = self.not_expr()?;
        let mut links = 0;
        while matches!(self.peek(), Some(TokenKind::And | TokenKind::AndAnd)) {
            self.pos += 1;
            self.enter()?;
            links += 1;
            let right = self.not_expr()?;
            left = Expression::binary(left, Operator::And, right);
        }
        self.release(links);
        Ok(left)
    }

    fn not_expr(&mut self) -> Result<Expression> {
        if matches!(self.peek(), Some(TokenKind::Not | TokenKind::Bang)) {
            self.pos += 1;
            self.enter()?;
            let operand = self.not_expr();
            self.leave();
            return Ok(Expression::unary(UnaryOperator::Not, operand?));
        }
        self.comparison()
    }

    fn comparison_operator(&mut self) -> Option<Operator> {
        let op = match self.peek()? {
            TokenKind::EqEq => Operator::Eq,
            TokenKind::NotEq => Operator::Ne,
            TokenKind::Lt => Operator::Lt,
            TokenKind::Le => Operator::Le,
            TokenKind::Gt => Operator::Gt,
            TokenKind::Ge => Operator::Ge,
            TokenKind::In => Operator::In,
            TokenKind::Not if self.peek_second() == Some(&TokenKind::In) => {
                self.pos += 1;
                Operator::NotIn
            }
            _ => return None,
        };
        self.pos += 1;
        Some(op)
    }

    /// A single comparison stays binary; `a < b < c` becomes one chain node
    fn comparison(&mut self) -> Result<Expression> {
        let first = self.additive()?;

        let mut rest: Vec<(Operator, Expression)> = Vec::new();
        while let Some(op) = self.comparison_operator() {
            rest.push((op, self.additive()?));
        }

        match rest.len() {
            0 => Ok(first),
            1 => {
                let (op, right) = rest.remove(0);
                Ok(Expression::binary(first, op, right))
            }
            _ => Ok(Expression::compare(first, rest)),
        }
    }

    fn additive(&mut self) -> Result<Expression> {
        let mut left = self.multiplicative()?;
        let mut links = 0;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => Operator::Add,
                Some(TokenKind::Minus) => Operator::Sub,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            links += 1;
            let right = self.multiplicative()?;
            left = Expression::binary(left, op, right);
        }
        self.release(links);
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Expression> {
        let mut left = self.unary()?;
        let mut links = 0;
        loop {
            let op = match self.peek() {
                Some(TokenKind::Star) => Operator::Mul,
                Some(TokenKind::Slash) => Operator::Div,
                Some(TokenKind::Percent) => Operator::Mod,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            links += 1;
            let right = self.unary()?;
            left = Expression::binary(left, op, right);
        }
        self.release(links);
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expression> {
        let op = match self.peek() {
            Some(TokenKind::Minus) => UnaryOperator::Negate,
            Some(TokenKind::Plus) => UnaryOperator::Plus,
            _ => return self.power(),
        };
        self.pos += 1;
        self.enter()?;
        let operand = self.unary();
        self.leave();
        Ok(Expression::unary(op, operand?))
    }

    /// `-2 ** 2` is `-(2 ** 2)`; the exponent may itself be unary
    fn power(&mut self) -> Result<Expression> {
        let base = self.primary()?;
        if self.eat(&TokenKind::StarStar) {
            self.enter()?;
            let exponent = self.unary();
            self.leave();
            return Ok(Expression::binary(base, Operator::Pow, exponent?));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expression> {
        let token = match self.advance() {
            Some(token) => token,
            None => {
                return Err(ParseError::UnexpectedEnd {
                    expected: "a value".to_string(),
                })
            }
        };

        match &token.kind {
            TokenKind::Integer(n) => Ok(Expression::Literal(Value::Integer(*n))),
            TokenKind::Float(x) => Ok(Expression::Literal(Value::Float(*x))),
            TokenKind::Str(s) => Ok(Expression::Literal(Value::String(s.clone()))),
            TokenKind::True => Ok(Expression::Literal(Value::Bool(true))),
            TokenKind::False => Ok(Expression::Literal(Value::Bool(false))),
            TokenKind::Null => Ok(Expression::Literal(Value::Null)),
            TokenKind::Ident(name) => {
                if self.eat(&TokenKind::LParen) {
                    let args = self.sequence(&TokenKind::RParen)?;
                    Ok(Expression::function_call(name.clone(), args))
                } else {
                    Ok(Expression::identifier(name.clone()))
                }
            }
            // `in(item, list)` names the catalog function, not the operator
            TokenKind::In if self.eat(&TokenKind::LParen) => {
                let args = self.sequence(&TokenKind::RParen)?;
                Ok(Expression::function_call("in", args))
            }
            TokenKind::LParen => {
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => {
                let items = self.sequence(&TokenKind::RBracket)?;
                Ok(Expression::List(items))
            }
            TokenKind::LBrace => self.map_literal(),
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                expected: "a value".to_string(),
                position: token.position,
            }),
        }
    }

    /// Comma-separated expressions up to `close`; a trailing comma is allowed
    fn sequence(&mut self, close: &TokenKind) -> Result<Vec<Expression>> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.expression()?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }

    fn map_literal(&mut self) -> Result<Expression> {
        let mut entries = Vec::new();
        loop {
            if self.eat(&TokenKind::RBrace) {
                return Ok(Expression::Map(entries));
            }

            let key = match self.advance() {
                Some(Token {
                    kind: TokenKind::Str(key),
                    ..
                }) => key.clone(),
                Some(token) => {
                    return Err(ParseError::UnexpectedToken {
                        found: token.kind.to_string(),
                        expected: "a string key".to_string(),
                        position: token.position,
                    })
                }
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "a string key".to_string(),
                    })
                }
            };
            self.expect(&TokenKind::Colon)?;
            entries.push((key, self.expression()?));

            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RBrace)?;
                return Ok(Expression::Map(entries));
            }
        }
    }
}
