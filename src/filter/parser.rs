//! Filter query parser
//!
//! Grammar, with `and` / `or` matched case-insensitively and only when bare:
//!
//! ```text
//! expression := and_group ( "or" and_group )*
//! and_group  := term ( "and" term )*
//! term       := "(" expression ")" | field operator value
//! operator   := "=" | "~"
//! ```
//!
//! `and` binds tighter than `or`. The conjunction is mandatory: two terms
//! side by side are an error rather than an implicit AND. Groups nest at most
//! [`MAX_DEPTH`] levels deep.

use std::mem;

use tracing::{debug, trace};

use crate::error::{ParseError, Result};
use crate::filter::ast::{Expression, Operator};
use crate::filter::lexer::{tokenize, Token};

/// Deepest paren nesting accepted by the parser
pub const MAX_DEPTH: usize = 64;

/// Parser behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept a `(` that is never closed, parsing whatever follows it as the
    /// group body. Off by default.
    pub allow_unclosed_paren: bool,
}

/// Parse a filter string with default options
pub fn parse(input: &str) -> Result<Expression> {
    parse_with(input, &ParseOptions::default())
}

/// Parse a filter string
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Expression> {
    let tokens = tokenize(input)?;

    debug!(count = tokens.len(), "tokenized filter");
    for token in &tokens {
        trace!(text = %token.text, quoted = token.is_quoted(), offset = token.offset, "token");
    }

    Ok(parse_tokens(&tokens, options)?)
}

/// Build an expression tree from a token sequence
pub fn parse_tokens(
    tokens: &[Token],
    options: &ParseOptions,
) -> std::result::Result<Expression, ParseError> {
    Parser::new(tokens, options, 0).parse_expression()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: &'a ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], options: &'a ParseOptions, depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
            depth,
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn parse_expression(&mut self) -> std::result::Result<Expression, ParseError> {
        let mut or_group = Vec::new();
        let mut and_group = Vec::new();

        while let Some(token) = self.next() {
            if token.is_symbol(")") {
                return Err(ParseError::UnexpectedCloseParen {
                    offset: token.offset,
                });
            }

            if token.is_keyword("or") {
                if !and_group.is_empty() {
                    or_group.push(collapse(mem::take(&mut and_group), Expression::and));
                }
                continue;
            }

            let term = if token.is_keyword("and") {
                self.next().ok_or(ParseError::MissingTerm {
                    offset: token.offset,
                })?
            } else if !and_group.is_empty() {
                return Err(ParseError::MissingAnd {
                    token: token.to_string(),
                    offset: token.offset,
                });
            } else {
                token
            };

            let child = if term.is_symbol("(") {
                self.parse_group(term)?
            } else {
                self.parse_condition(term)?
            };
            and_group.push(child);
        }

        if !and_group.is_empty() {
            or_group.push(collapse(and_group, Expression::and));
        }

        Ok(collapse(or_group, Expression::or))
    }

    /// Parse the body of a parenthesized group; `open` is already consumed
    fn parse_group(&mut self, open: &Token) -> std::result::Result<Expression, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                offset: open.offset,
            });
        }

        let start = self.pos;
        let mut depth = 1usize;

        let body = loop {
            let Some(token) = self.next() else {
                if !self.options.allow_unclosed_paren {
                    return Err(ParseError::UnclosedParen {
                        offset: open.offset,
                    });
                }
                break &self.tokens[start..];
            };

            if token.is_symbol("(") {
                depth += 1;
            } else if token.is_symbol(")") {
                depth -= 1;
                if depth == 0 {
                    break &self.tokens[start..self.pos - 1];
                }
            }
        };

        let expr = Parser::new(body, self.options, self.depth + 1).parse_expression()?;
        if expr.is_vacuous() {
            return Err(ParseError::EmptyGroup {
                offset: open.offset,
            });
        }
        Ok(expr)
    }

    /// Parse `field operator value`; `field` is already consumed
    fn parse_condition(&mut self, field: &Token) -> std::result::Result<Expression, ParseError> {
        let op_token = self.next().ok_or(ParseError::MissingOperation {
            offset: field.offset,
        })?;

        let operator = if op_token.is_quoted() {
            None
        } else {
            Operator::from_symbol(&op_token.text)
        };
        let operator = operator.ok_or_else(|| ParseError::InvalidOperation {
            token: op_token.to_string(),
            offset: op_token.offset,
        })?;

        let value = self.next().ok_or(ParseError::MissingValue {
            offset: op_token.offset,
        })?;

        Ok(Expression::condition(
            field.text.clone(),
            operator,
            value.text.clone(),
        ))
    }
}

/// Build a group, unwrapping it when it holds exactly one child
fn collapse(mut children: Vec<Expression>, group: fn(Vec<Expression>) -> Expression) -> Expression {
    if children.len() == 1 {
        if let Some(only) = children.pop() {
            return only;
        }
    }
    group(children)
}
