//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure, including the error type, helper methods, and the main
//! parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses predictive recursive descent with one token of lookahead
//! (two where an identifier statement must be disambiguated):
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: top-level variable, function, and main declarations
//! - `statements`: statements (assignment, call, return, if, while)
//! - `expressions`: expressions, one parsing function per grammar level
//!
//! Parsing is fail-fast: the first expected-token mismatch produces a
//! [`ParseError`] naming the expected and found tokens with line/column, and
//! no recovery is attempted.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for the mini-C grammar
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the entire program (a sequence of top-level definitions)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            let decl = self.parse_definition()?;
            program.declarations.push(decl);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek_token(),
            Token::Int(_) | Token::Float(_) | Token::Char(_) | Token::Void(_)
        )
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if std::mem::discriminant(&self.peek_token()) == std::mem::discriminant(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.peek_token()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek_token(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("Expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("Expected '{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("Expected '}}' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("Expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_main() {
        let source = "int main() { return 0; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.declarations.len(), 1);
        match &program.declarations[0] {
            AstNode::MainDecl {
                return_type,
                params,
                body,
                ..
            } => {
                assert_eq!(*return_type, TypeTag::Int);
                assert!(params.is_empty());
                assert_eq!(body.statements.len(), 1);
            }
            _ => panic!("Expected main declaration"),
        }
    }

    #[test]
    fn test_parse_function_with_params() {
        let source = "int suma(int a, int b) { return a + b; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        match &program.declarations[0] {
            AstNode::FuncDecl {
                name,
                return_type,
                params,
                body,
                ..
            } => {
                assert_eq!(name, "suma");
                assert_eq!(*return_type, TypeTag::Int);
                assert_eq!(params.len(), 2);
                assert_eq!(params[0].name, "a");
                assert_eq!(params[1].declared_type, TypeTag::Int);
                assert_eq!(body.statements.len(), 1);
            }
            _ => panic!("Expected function declaration"),
        }
    }

    #[test]
    fn test_parse_global_variable() {
        let source = "float pi;";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        match &program.declarations[0] {
            AstNode::VarDecl {
                name,
                declared_type,
                ..
            } => {
                assert_eq!(name, "pi");
                assert_eq!(*declared_type, TypeTag::Float);
            }
            _ => panic!("Expected variable declaration"),
        }
    }

    #[test]
    fn test_precedence() {
        // 1 + 2 * 3 must parse as 1 + (2 * 3)
        let source = "int main() { int x; x = 1 + 2 * 3; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let body = match &program.declarations[0] {
            AstNode::MainDecl { body, .. } => body,
            _ => panic!("Expected main declaration"),
        };
        let value = match &body.statements[1] {
            AstNode::Assignment { value, .. } => value,
            _ => panic!("Expected assignment"),
        };
        match value.as_ref() {
            AstNode::BinaryExpr {
                op: BinOp::Add,
                right,
                ..
            } => {
                assert!(matches!(
                    right.as_ref(),
                    AstNode::BinaryExpr { op: BinOp::Mul, .. }
                ));
            }
            _ => panic!("Expected addition at the root"),
        }
    }

    #[test]
    fn test_parse_if_else() {
        let source = "int main() { if (x < 1) { x = 1; } else { x = 2; } }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let body = match &program.declarations[0] {
            AstNode::MainDecl { body, .. } => body,
            _ => panic!("Expected main declaration"),
        };
        match &body.statements[0] {
            AstNode::IfStmt {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                assert!(matches!(
                    condition.as_ref(),
                    AstNode::BinaryExpr { op: BinOp::Lt, .. }
                ));
                assert_eq!(then_branch.statements.len(), 1);
                assert!(else_branch.is_some());
            }
            _ => panic!("Expected if statement"),
        }
    }

    #[test]
    fn test_parse_while() {
        let source = "int main() { while (i < 10) { i = i + 1; } }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let body = match &program.declarations[0] {
            AstNode::MainDecl { body, .. } => body,
            _ => panic!("Expected main declaration"),
        };
        assert!(matches!(&body.statements[0], AstNode::WhileStmt { .. }));
    }

    #[test]
    fn test_parse_call_statement_and_expression() {
        let source = "int main() { imprime(x); x = suma(1, 2); }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let body = match &program.declarations[0] {
            AstNode::MainDecl { body, .. } => body,
            _ => panic!("Expected main declaration"),
        };
        match &body.statements[0] {
            AstNode::FunctionCall { name, args, .. } => {
                assert_eq!(name, "imprime");
                assert_eq!(args.len(), 1);
            }
            _ => panic!("Expected call statement"),
        }
        match &body.statements[1] {
            AstNode::Assignment { value, .. } => {
                assert!(matches!(value.as_ref(), AstNode::FunctionCall { .. }));
            }
            _ => panic!("Expected assignment"),
        }
    }

    #[test]
    fn test_unary_minus() {
        let source = "int main() { x = -y * 2; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let body = match &program.declarations[0] {
            AstNode::MainDecl { body, .. } => body,
            _ => panic!("Expected main declaration"),
        };
        let value = match &body.statements[0] {
            AstNode::Assignment { value, .. } => value,
            _ => panic!("Expected assignment"),
        };
        match value.as_ref() {
            AstNode::BinaryExpr {
                op: BinOp::Mul,
                left,
                ..
            } => {
                assert!(matches!(
                    left.as_ref(),
                    AstNode::UnaryExpr { op: UnOp::Neg, .. }
                ));
            }
            _ => panic!("Expected multiplication at the root"),
        }
    }

    #[test]
    fn test_missing_semicolon() {
        // "int x int y;" aborts at 'int' with the expected token named
        let source = "int x int y;";
        let mut parser = Parser::new(source).unwrap();
        let err = parser.parse_program().unwrap_err();

        assert!(err.message.contains("';'"), "message: {}", err.message);
        assert!(err.message.contains("'int'"), "message: {}", err.message);
        assert_eq!(err.location.line, 1);
        assert_eq!(err.location.column, 7);
    }

    #[test]
    fn test_else_binds_to_nearest_if() {
        let source = "int main() { if (a) { if (b) { x = 1; } else { x = 2; } } }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let body = match &program.declarations[0] {
            AstNode::MainDecl { body, .. } => body,
            _ => panic!("Expected main declaration"),
        };
        match &body.statements[0] {
            AstNode::IfStmt {
                then_branch,
                else_branch,
                ..
            } => {
                // outer if has no else; inner one does
                assert!(else_branch.is_none());
                match &then_branch.statements[0] {
                    AstNode::IfStmt { else_branch, .. } => assert!(else_branch.is_some()),
                    _ => panic!("Expected nested if"),
                }
            }
            _ => panic!("Expected if statement"),
        }
    }
}
