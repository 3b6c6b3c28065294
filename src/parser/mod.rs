//! Mini-C source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser struct, helpers, and the program entry point
//! - [`declarations`], [`statements`], [`expressions`]: one `impl Parser`
//!   block per grammar tier
//! - [`ast`]: AST node definitions
//!
//! # Supported language
//!
//! A small imperative C-like language:
//! - Types: `int`, `float`, `char`, `void` (plus string literals)
//! - Top level: global variables, functions, a single `main`
//! - Statements: declarations, assignments, calls, `if`/`else`, `while`,
//!   `return`
//! - Expressions: arithmetic, comparisons, unary minus, function calls
//! - No pointers, arrays, structs, or preprocessor
//!
//! # Parser Implementation
//!
//! Hand-written predictive recursive descent with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
