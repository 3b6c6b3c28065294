//! Semantic diagnostic records
//!
//! Unlike lexical and syntax errors, semantic problems are not fatal: the
//! analyzer appends a [`Diagnostic`] and keeps walking the tree. The
//! accumulated list is in discovery order.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// One semantic problem found during analysis
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Semantic error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}
