//! Expression parsing implementation
//!
//! One parsing function per grammar level, lowest precedence first:
//!
//! ```text
//! expression ::= equality
//! equality   ::= relational (("==" | "!=") relational)*
//! relational ::= additive (("<" | ">" | "<=" | ">=") additive)*
//! additive   ::= term (("+" | "-") term)*
//! term       ::= factor (("*" | "/") factor)*
//! factor     ::= "-" factor | IDENT | INT | FLOAT | CHAR | STRING
//!              | call_expr | "(" expression ")"
//! ```
//!
//! Binary operators associate to the left. An identifier followed by `(` is
//! a function-call expression.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_equality()
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::EqEq(loc)) {
                BinOp::Eq
            } else if self.match_token(&Token::NotEq(loc)) {
                BinOp::Ne
            } else {
                break;
            };

            let right = Box::new(self.parse_relational()?);
            left = AstNode::BinaryExpr {
                op,
                left: Box::new(left),
                right,
                location: loc,
                inferred_type: None,
            };
        }

        Ok(left)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Lt(loc)) {
                BinOp::Lt
            } else if self.match_token(&Token::Le(loc)) {
                BinOp::Le
            } else if self.match_token(&Token::Gt(loc)) {
                BinOp::Gt
            } else if self.match_token(&Token::Ge(loc)) {
                BinOp::Ge
            } else {
                break;
            };

            let right = Box::new(self.parse_additive()?);
            left = AstNode::BinaryExpr {
                op,
                left: Box::new(left),
                right,
                location: loc,
                inferred_type: None,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Plus(loc)) {
                BinOp::Add
            } else if self.match_token(&Token::Minus(loc)) {
                BinOp::Sub
            } else {
                break;
            };

            let right = Box::new(self.parse_term()?);
            left = AstNode::BinaryExpr {
                op,
                left: Box::new(left),
                right,
                location: loc,
                inferred_type: None,
            };
        }

        Ok(left)
    }

    /// Parse term (* /)
    fn parse_term(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let loc = self.current_location();
            let op = if self.match_token(&Token::Star(loc)) {
                BinOp::Mul
            } else if self.match_token(&Token::Slash(loc)) {
                BinOp::Div
            } else {
                break;
            };

            let right = Box::new(self.parse_factor()?);
            left = AstNode::BinaryExpr {
                op,
                left: Box::new(left),
                right,
                location: loc,
                inferred_type: None,
            };
        }

        Ok(left)
    }

    /// Parse factor (literals, identifiers, calls, parenthesized
    /// expressions, unary minus)
    fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Minus(loc)) {
            let operand = Box::new(self.parse_factor()?);
            return Ok(AstNode::UnaryExpr {
                op: UnOp::Neg,
                operand,
                location: loc,
                inferred_type: None,
            });
        }

        if let Token::IntLiteral(value, loc) = self.peek_token() {
            self.advance();
            return Ok(AstNode::IntLiteral {
                value,
                location: loc,
                inferred_type: None,
            });
        }

        if let Token::FloatLiteral(value, loc) = self.peek_token() {
            self.advance();
            return Ok(AstNode::FloatLiteral {
                value,
                location: loc,
                inferred_type: None,
            });
        }

        if let Token::CharLiteral(value, loc) = self.peek_token() {
            self.advance();
            return Ok(AstNode::CharLiteral {
                value,
                location: loc,
                inferred_type: None,
            });
        }

        if let Token::StringLiteral(value, loc) = self.peek_token() {
            self.advance();
            return Ok(AstNode::StringLiteral {
                value,
                location: loc,
                inferred_type: None,
            });
        }

        if let Token::Ident(_, _) = self.peek_token() {
            // Identifier followed by '(' is a call expression
            if self
                .peek_ahead(1)
                .map(|t| matches!(t, Token::LParen(_)))
                .unwrap_or(false)
            {
                return self.parse_call_expression();
            }

            let name = self.expect_identifier()?;
            return Ok(AstNode::Identifier {
                name,
                location: loc,
                inferred_type: None,
            });
        }

        if self.match_token(&Token::LParen(loc)) {
            let expr = self.parse_expression()?;
            self.expect_rparen("after expression")?;
            return Ok(expr);
        }

        Err(ParseError {
            message: format!("Unexpected token in expression: {}", self.peek()),
            location: loc,
        })
    }

    /// Parse call expression: name(args)
    pub(crate) fn parse_call_expression(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        let name = self.expect_identifier()?;
        self.expect_lparen("after function name")?;
        let args = self.parse_argument_list()?;
        self.expect_rparen("after function arguments")?;

        Ok(AstNode::FunctionCall {
            name,
            args,
            location: loc,
            inferred_type: None,
        })
    }

    /// Parse argument list: expr, expr, ...
    fn parse_argument_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(args)
    }
}
