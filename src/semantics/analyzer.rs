//! Semantic analysis pass
//!
//! The [`SemanticAnalyzer`] walks the AST exactly once in pre-order,
//! resolving names against a [`ScopeStack`], attaching an inferred type to
//! every expression node, and accumulating [`Diagnostic`]s. Semantic
//! problems never abort the walk: an expression with an unresolvable type
//! gets `None` and further checks involving it are suppressed, so one
//! mistake produces one diagnostic instead of a cascade.
//!
//! Scope discipline: the global scope holds top-level variables and
//! function names; each function body opens a scope holding its parameters
//! and locals; each `if` branch and `while` body opens its own nested
//! scope.

use crate::parser::ast::*;
use crate::semantics::errors::Diagnostic;
use crate::semantics::symbol_table::{ScopeStack, SymbolCategory};
use crate::semantics::types;
use log::debug;
use rustc_hash::FxHashMap;

/// Tree-walking semantic analyzer
pub struct SemanticAnalyzer {
    scopes: ScopeStack,
    diagnostics: Vec<Diagnostic>,
    /// Parameter types per function, for arity and argument checking
    signatures: FxHashMap<String, Vec<TypeTag>>,
    /// Declared return type of the function currently being analyzed
    current_return: Option<TypeTag>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
            diagnostics: Vec::new(),
            signatures: FxHashMap::default(),
            current_return: None,
        }
    }

    /// Analyze a whole program, attaching inferred types to its expression
    /// nodes. Returns all diagnostics in discovery order; an empty list
    /// means the program is semantically valid.
    pub fn analyze(mut self, program: &mut Program) -> Vec<Diagnostic> {
        debug!(
            "analyzing {} top-level declaration(s)",
            program.declarations.len()
        );

        for decl in &mut program.declarations {
            self.check_declaration(decl);
        }

        debug!("analysis done, {} diagnostic(s)", self.diagnostics.len());
        self.diagnostics
    }

    fn report(&mut self, message: String, location: SourceLocation) {
        self.diagnostics.push(Diagnostic::new(message, location));
    }

    fn check_declaration(&mut self, decl: &mut AstNode) {
        match decl {
            AstNode::VarDecl {
                name,
                declared_type,
                location,
            } => {
                if !self
                    .scopes
                    .declare(name, *declared_type, SymbolCategory::Variable)
                {
                    let msg = format!("Redeclaration of '{}' in the same scope", name);
                    self.report(msg, *location);
                }
            }
            AstNode::FuncDecl {
                name,
                return_type,
                params,
                body,
                location,
            } => {
                let name = name.clone();
                self.check_function(&name, *return_type, params, body, *location);
            }
            AstNode::MainDecl {
                return_type,
                params,
                body,
                location,
            } => {
                self.check_function("main", *return_type, params, body, *location);
            }
            other => self.check_statement(other),
        }
    }

    /// Register a function and analyze its body. The duplicate check runs
    /// before registration; on a duplicate the original symbol and signature
    /// stay authoritative, but the duplicate's body is still analyzed so its
    /// own problems get reported.
    fn check_function(
        &mut self,
        name: &str,
        return_type: TypeTag,
        params: &mut [Param],
        body: &mut Block,
        location: SourceLocation,
    ) {
        debug!("analyzing function '{}'", name);

        if self
            .scopes
            .declare(name, return_type, SymbolCategory::Function)
        {
            self.signatures.insert(
                name.to_string(),
                params.iter().map(|p| p.declared_type).collect(),
            );
        } else {
            let msg = format!("Redeclaration of '{}' in the same scope", name);
            self.report(msg, location);
        }

        // Parameters live in the same scope as the body's locals
        self.scopes.enter_scope();
        for param in params.iter() {
            if !self
                .scopes
                .declare(&param.name, param.declared_type, SymbolCategory::Parameter)
            {
                let msg = format!("Duplicate parameter '{}'", param.name);
                self.report(msg, param.location);
            }
        }

        let saved_return = self.current_return.replace(return_type);
        self.check_block(body);
        self.current_return = saved_return;

        self.scopes.exit_scope();
    }

    fn check_block(&mut self, block: &mut Block) {
        for stmt in &mut block.statements {
            self.check_statement(stmt);
        }
    }

    fn check_statement(&mut self, stmt: &mut AstNode) {
        match stmt {
            AstNode::VarDeclLocal {
                name,
                declared_type,
                location,
            } => {
                if !self
                    .scopes
                    .declare(name, *declared_type, SymbolCategory::Variable)
                {
                    let msg = format!("Redeclaration of '{}' in the same scope", name);
                    self.report(msg, *location);
                }
            }
            AstNode::Assignment {
                name,
                value,
                location,
            } => {
                let name = name.clone();
                let location = *location;
                let target = self.scopes.resolve(&name).cloned();

                match target {
                    None => {
                        let msg = format!("Undeclared identifier '{}'", name);
                        self.report(msg, location);
                        // still analyze the value for its own diagnostics
                        self.check_expression(value);
                    }
                    Some(sym) if sym.category == SymbolCategory::Function => {
                        let msg = format!("Cannot assign to function '{}'", name);
                        self.report(msg, location);
                        self.check_expression(value);
                    }
                    Some(sym) => {
                        if let Some(value_ty) = self.check_expression(value) {
                            if !types::widens_into(value_ty, sym.declared_type) {
                                let msg = format!(
                                    "Cannot assign {} to '{}' of type {}",
                                    value_ty, name, sym.declared_type
                                );
                                self.report(msg, location);
                            }
                        }
                    }
                }
            }
            AstNode::Return { value, location } => {
                let location = *location;
                let value_ty = match value {
                    Some(expr) => self.check_expression(expr),
                    None => Some(TypeTag::Void),
                };

                match self.current_return {
                    None => {
                        self.report("'return' outside of a function".to_string(), location);
                    }
                    Some(expected) => {
                        if let Some(value_ty) = value_ty {
                            if !types::widens_into(value_ty, expected) {
                                let msg = format!(
                                    "Return value of type {} does not match declared return type {}",
                                    value_ty, expected
                                );
                                self.report(msg, location);
                            }
                        }
                    }
                }
            }
            AstNode::IfStmt {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.check_condition(condition);

                self.scopes.enter_scope();
                self.check_block(then_branch);
                self.scopes.exit_scope();

                if let Some(else_block) = else_branch {
                    self.scopes.enter_scope();
                    self.check_block(else_block);
                    self.scopes.exit_scope();
                }
            }
            AstNode::WhileStmt {
                condition, body, ..
            } => {
                self.check_condition(condition);

                self.scopes.enter_scope();
                self.check_block(body);
                self.scopes.exit_scope();
            }
            // call statements and synthetic expression statements
            other => {
                self.check_expression(other);
            }
        }
    }

    fn check_condition(&mut self, condition: &mut AstNode) {
        let location = *condition.location();
        if let Some(ty) = self.check_expression(condition) {
            if !types::is_condition_type(ty) {
                let msg = format!("Condition has non-numeric type {}", ty);
                self.report(msg, location);
            }
        }
    }

    /// Infer and attach the type of an expression. `None` means the type is
    /// unknown because something inside already produced a diagnostic;
    /// callers must not pile further mismatch diagnostics on top.
    fn check_expression(&mut self, expr: &mut AstNode) -> Option<TypeTag> {
        match expr {
            AstNode::IntLiteral { inferred_type, .. } => {
                *inferred_type = Some(TypeTag::Int);
                *inferred_type
            }
            AstNode::FloatLiteral { inferred_type, .. } => {
                *inferred_type = Some(TypeTag::Float);
                *inferred_type
            }
            AstNode::CharLiteral { inferred_type, .. } => {
                *inferred_type = Some(TypeTag::Char);
                *inferred_type
            }
            AstNode::StringLiteral { inferred_type, .. } => {
                *inferred_type = Some(TypeTag::String);
                *inferred_type
            }
            AstNode::Identifier {
                name,
                location,
                inferred_type,
            } => match self.scopes.resolve(name) {
                Some(sym) => {
                    *inferred_type = Some(sym.declared_type);
                    *inferred_type
                }
                None => {
                    let msg = format!("Undeclared identifier '{}'", name);
                    let location = *location;
                    self.report(msg, location);
                    None
                }
            },
            AstNode::UnaryExpr {
                op,
                operand,
                location,
                inferred_type,
            } => {
                let op = *op;
                let location = *location;
                let operand_ty = self.check_expression(operand)?;

                if types::is_numeric(operand_ty) {
                    *inferred_type = Some(operand_ty);
                    Some(operand_ty)
                } else {
                    let msg = format!("Cannot apply unary '{}' to {}", op, operand_ty);
                    self.report(msg, location);
                    None
                }
            }
            AstNode::BinaryExpr {
                op,
                left,
                right,
                location,
                inferred_type,
            } => {
                let op = *op;
                let location = *location;
                let left_ty = self.check_expression(left);
                let right_ty = self.check_expression(right);

                // unknown operand: already diagnosed, stay silent
                let (left_ty, right_ty) = (left_ty?, right_ty?);

                let result = if op.is_arithmetic() {
                    types::arithmetic_result(left_ty, right_ty)
                } else {
                    types::comparison_result(left_ty, right_ty)
                };

                match result {
                    Some(ty) => {
                        *inferred_type = Some(ty);
                        Some(ty)
                    }
                    None => {
                        let msg = format!(
                            "Incompatible operands {} and {} for '{}'",
                            left_ty, right_ty, op
                        );
                        self.report(msg, location);
                        None
                    }
                }
            }
            AstNode::FunctionCall {
                name,
                args,
                location,
                inferred_type,
            } => {
                let name = name.clone();
                let location = *location;
                let callee = self.scopes.resolve(&name).cloned();

                match &callee {
                    None => {
                        let msg = format!("Undeclared identifier '{}'", name);
                        self.report(msg, location);
                    }
                    Some(sym) if sym.category != SymbolCategory::Function => {
                        let msg = format!("'{}' is not a function", name);
                        self.report(msg, location);
                    }
                    Some(_) => {}
                }

                let arg_info: Vec<(Option<TypeTag>, SourceLocation)> = args
                    .iter_mut()
                    .map(|arg| {
                        let loc = *arg.location();
                        (self.check_expression(arg), loc)
                    })
                    .collect();

                let callee = callee.filter(|s| s.category == SymbolCategory::Function)?;

                if let Some(sig) = self.signatures.get(&name).cloned() {
                    if sig.len() != arg_info.len() {
                        let msg = format!(
                            "Function '{}' expects {} argument(s), got {}",
                            name,
                            sig.len(),
                            arg_info.len()
                        );
                        self.report(msg, location);
                    } else {
                        for (i, (param_ty, (arg_ty, arg_loc))) in
                            sig.iter().zip(arg_info).enumerate()
                        {
                            if let Some(arg_ty) = arg_ty {
                                if !types::widens_into(arg_ty, *param_ty) {
                                    let msg = format!(
                                        "Argument {} of '{}' has type {}, expected {}",
                                        i + 1,
                                        name,
                                        arg_ty,
                                        param_ty
                                    );
                                    self.report(msg, arg_loc);
                                }
                            }
                        }
                    }
                }

                *inferred_type = Some(callee.declared_type);
                Some(callee.declared_type)
            }
            // declarations and statements have no type
            _ => None,
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
