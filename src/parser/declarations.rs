//! Declaration parsing implementation
//!
//! This module handles parsing of top-level definitions:
//!
//! - Global variable declarations: `type name;`
//! - Function definitions: `type name(params) { ... }`
//! - The program entry point: `type main(params) { ... }`
//!
//! # Grammar
//!
//! ```text
//! definition ::= var_decl | func_decl | main_decl
//! var_decl   ::= type identifier ";"
//! func_decl  ::= type identifier "(" params? ")" block
//! main_decl  ::= type "main" "(" params? ")" block
//! params     ::= type identifier ("," type identifier)*
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a top-level definition. Every definition starts with a type
    /// keyword; one token of lookahead past the name distinguishes a
    /// variable from a function.
    pub(crate) fn parse_definition(&mut self) -> Result<AstNode, ParseError> {
        let declared_type = self.parse_type()?;
        let loc = self.previous_location();

        // main is a reserved word, not an identifier
        if self.match_token(&Token::Main(self.current_location())) {
            self.expect_lparen("after 'main'")?;
            let params = self.parse_parameter_list()?;
            self.expect_rparen("after parameters")?;
            let body = self.parse_block()?;

            return Ok(AstNode::MainDecl {
                return_type: declared_type,
                params,
                body,
                location: loc,
            });
        }

        let name = self.expect_identifier()?;

        if self.match_token(&Token::LParen(self.current_location())) {
            let params = self.parse_parameter_list()?;
            self.expect_rparen("after parameters")?;
            let body = self.parse_block()?;

            Ok(AstNode::FuncDecl {
                name,
                return_type: declared_type,
                params,
                body,
                location: loc,
            })
        } else {
            self.expect_semicolon("after variable declaration")?;

            Ok(AstNode::VarDecl {
                name,
                declared_type,
                location: loc,
            })
        }
    }

    /// Parse parameter list: type name, type name, ...
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(params);
        }

        loop {
            let declared_type = self.parse_type()?;
            let location = self.current_location();
            let name = self.expect_identifier()?;
            params.push(Param {
                name,
                declared_type,
                location,
            });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse one of the four declarable type keywords
    pub(crate) fn parse_type(&mut self) -> Result<TypeTag, ParseError> {
        if self.match_token(&Token::Int(self.current_location())) {
            Ok(TypeTag::Int)
        } else if self.match_token(&Token::Float(self.current_location())) {
            Ok(TypeTag::Float)
        } else if self.match_token(&Token::Char(self.current_location())) {
            Ok(TypeTag::Char)
        } else if self.match_token(&Token::Void(self.current_location())) {
            Ok(TypeTag::Void)
        } else {
            Err(ParseError {
                message: format!("Expected type, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}
