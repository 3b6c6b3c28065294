//! # Introduction
//!
//! minic is the front end for a small imperative C-like language: it
//! tokenizes and parses source text into an AST, then runs a semantic pass
//! that resolves names through a scope stack and checks types with int→float
//! widening. The pipeline stops at semantic validation; there is no code
//! generation or execution.
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic Analyzer → verdict
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST. Lexical and
//!    syntax errors are fatal: the first one aborts the pipeline.
//! 2. [`semantics`] — walks the AST once, attaches inferred types, and
//!    collects every semantic problem into an ordered diagnostics list.
//!
//! The [`compile`] entry point ties the phases together: it succeeds only
//! when lexing and parsing succeed and the diagnostics list comes back
//! empty.
//!
//! ```
//! use minic::compile;
//!
//! let program = compile("int main() { int x; x = 1 + 2; }").unwrap();
//! assert_eq!(program.declarations.len(), 1);
//! ```

pub mod parser;
pub mod semantics;

use crate::parser::ast::Program;
use crate::parser::parse::{ParseError, Parser};
use crate::semantics::analyzer::SemanticAnalyzer;
use crate::semantics::errors::Diagnostic;
use log::debug;
use std::fmt;

/// Failure of any compilation phase.
///
/// Lexical errors surface through the parser, so `Parse` covers both fatal
/// phases; `Semantic` carries every diagnostic found during the AST walk.
#[derive(Debug)]
pub enum CompileError {
    Parse(ParseError),
    Semantic(Vec<Diagnostic>),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Parse(err) => write!(f, "{}", err),
            CompileError::Semantic(diagnostics) => {
                for (i, diag) in diagnostics.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", diag)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CompileError {}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

/// Run the full front end over one in-memory source buffer.
///
/// Returns the typed AST on success. A lexical or syntax problem aborts
/// immediately with the single fatal error; otherwise the whole program is
/// analyzed and all semantic diagnostics are returned together.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    debug!("compiling {} byte(s) of source", source.len());

    let mut parser = Parser::new(source)?;
    let mut program = parser.parse_program()?;

    let diagnostics = SemanticAnalyzer::new().analyze(&mut program);
    if diagnostics.is_empty() {
        Ok(program)
    } else {
        Err(CompileError::Semantic(diagnostics))
    }
}
