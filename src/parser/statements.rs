//! Statement parsing implementation
//!
//! This module handles parsing of all statement forms:
//!
//! - Local variable declarations: `int x;`
//! - Assignments: `x = expr;`
//! - Function-call statements: `f(args);`
//! - Control flow: `if`/`else`, `while` (bodies are always blocks)
//! - `return` with an optional expression
//!
//! # Grammar
//!
//! ```text
//! block     ::= "{" statement* "}"
//! statement ::= var_decl | assignment | call_stmt | return_stmt
//!             | if_stmt | while_stmt
//! ```
//!
//! When a statement begins with an identifier, one extra token of lookahead
//! selects the production: `=` is an assignment and `(` a call statement;
//! anything else follows the call path and fails on the missing `(`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a brace-delimited block
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect_lbrace("to open block")?;
        let location = self.previous_location();

        let mut statements = Vec::new();
        while !self.check(&Token::RBrace(self.current_location())) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_rbrace("to close block")?;

        Ok(Block {
            statements,
            location,
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        if self.match_token(&Token::Return(loc)) {
            return self.parse_return_statement();
        }

        if self.match_token(&Token::If(loc)) {
            return self.parse_if_statement();
        }

        if self.match_token(&Token::While(loc)) {
            return self.parse_while_statement();
        }

        // Local declaration: type keyword starts it
        if self.is_type_keyword() {
            return self.parse_local_declaration();
        }

        // Identifier: '=' selects assignment, otherwise a call statement
        if matches!(self.peek_token(), Token::Ident(_, _)) {
            if self
                .peek_ahead(1)
                .map(|t| matches!(t, Token::Eq(_)))
                .unwrap_or(false)
            {
                return self.parse_assignment();
            }
            return self.parse_call_statement();
        }

        Err(ParseError {
            message: format!("Expected statement, found {}", self.peek()),
            location: loc,
        })
    }

    /// Parse local variable declaration: type name;
    fn parse_local_declaration(&mut self) -> Result<AstNode, ParseError> {
        let declared_type = self.parse_type()?;
        let loc = self.previous_location();
        let name = self.expect_identifier()?;
        self.expect_semicolon("after variable declaration")?;

        Ok(AstNode::VarDeclLocal {
            name,
            declared_type,
            location: loc,
        })
    }

    /// Parse assignment: name = expr;
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        let name = self.expect_identifier()?;
        self.expect_token(&Token::Eq(self.current_location()), "Expected '='")?;
        let value = Box::new(self.parse_expression()?);
        self.expect_semicolon("after assignment")?;

        Ok(AstNode::Assignment {
            name,
            value,
            location: loc,
        })
    }

    /// Parse function-call statement: name(args);
    fn parse_call_statement(&mut self) -> Result<AstNode, ParseError> {
        let call = self.parse_call_expression()?;
        self.expect_semicolon("after function call")?;
        Ok(call)
    }

    /// Parse return statement: return expr? ;
    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.previous_location();

        let value = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        self.expect_semicolon("after return")?;

        Ok(AstNode::Return {
            value,
            location: loc,
        })
    }

    /// Parse if statement: if (expr) block (else block)?
    ///
    /// Bodies are always blocks, so `else` can only attach to the nearest
    /// preceding `if`.
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'if'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_rparen("after if condition")?;

        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(&Token::Else(self.current_location())) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(AstNode::IfStmt {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement: while (expr) block
    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'while'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_rparen("after while condition")?;

        let body = self.parse_block()?;

        Ok(AstNode::WhileStmt {
            condition,
            body,
            location: loc,
        })
    }
}
