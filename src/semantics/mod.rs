//! Semantic analysis: name resolution and type checking
//!
//! The parser guarantees structure; this module checks meaning:
//! - [`symbol_table`]: stack of lexical scopes mapping names to symbols
//! - [`types`]: the promotion/compatibility table and widening rule
//! - [`analyzer`]: one pre-order AST walk attaching inferred types and
//!   collecting diagnostics
//! - [`errors`]: the [`errors::Diagnostic`] record
//!
//! Unlike the parser, the analyzer never fails fast: every problem it finds
//! becomes a diagnostic and the walk continues, so a single run reports
//! everything wrong with the program.

pub mod analyzer;
pub mod errors;
pub mod symbol_table;
pub mod types;
