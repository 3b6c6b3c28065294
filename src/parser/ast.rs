//! AST (Abstract Syntax Tree) definitions for the mini-C front end
//!
//! One closed [`AstNode`] sum type covers every node kind; the semantic
//! analyzer matches it exhaustively. Expression variants carry an
//! `inferred_type` slot that is `None` until semantic analysis attaches a
//! [`TypeTag`]. Nodes own their children exclusively (a tree, no sharing).

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The closed set of types in the language.
///
/// `String` exists only for string literals; it cannot be declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Float,
    Char,
    Void,
    String,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Int => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::Char => write!(f, "char"),
            TypeTag::Void => write!(f, "void"),
            TypeTag::String => write!(f, "string"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    /// Arithmetic operators produce a value of the promoted operand type;
    /// comparison operators always produce Int.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
            BinOp::Eq => write!(f, "=="),
            BinOp::Ne => write!(f, "!="),
            BinOp::Lt => write!(f, "<"),
            BinOp::Le => write!(f, "<="),
            BinOp::Gt => write!(f, ">"),
            BinOp::Ge => write!(f, ">="),
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
        }
    }
}

/// Function parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub declared_type: TypeTag,
    pub location: SourceLocation,
}

/// A brace-delimited statement list. Function bodies, `if` branches, and
/// `while` bodies are blocks; each block opens its own scope during
/// semantic analysis.
#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<AstNode>,
    pub location: SourceLocation,
}

/// AST nodes representing declarations, statements, and expressions
#[derive(Debug, Clone)]
pub enum AstNode {
    // Top-level declarations
    VarDecl {
        name: String,
        declared_type: TypeTag,
        location: SourceLocation,
    },
    FuncDecl {
        name: String,
        return_type: TypeTag,
        params: Vec<Param>,
        body: Block,
        location: SourceLocation,
    },
    MainDecl {
        return_type: TypeTag,
        params: Vec<Param>,
        body: Block,
        location: SourceLocation,
    },

    // Statements
    VarDeclLocal {
        name: String,
        declared_type: TypeTag,
        location: SourceLocation,
    },
    Assignment {
        name: String,
        value: Box<AstNode>,
        location: SourceLocation,
    },
    Return {
        value: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    IfStmt {
        condition: Box<AstNode>,
        then_branch: Block,
        else_branch: Option<Block>,
        location: SourceLocation,
    },
    WhileStmt {
        condition: Box<AstNode>,
        body: Block,
        location: SourceLocation,
    },

    // Expressions (also a statement, in call-statement position)
    FunctionCall {
        name: String,
        args: Vec<AstNode>,
        location: SourceLocation,
        inferred_type: Option<TypeTag>,
    },
    BinaryExpr {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
        inferred_type: Option<TypeTag>,
    },
    UnaryExpr {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
        inferred_type: Option<TypeTag>,
    },
    Identifier {
        name: String,
        location: SourceLocation,
        inferred_type: Option<TypeTag>,
    },
    IntLiteral {
        value: i64,
        location: SourceLocation,
        inferred_type: Option<TypeTag>,
    },
    FloatLiteral {
        value: f64,
        location: SourceLocation,
        inferred_type: Option<TypeTag>,
    },
    CharLiteral {
        value: char,
        location: SourceLocation,
        inferred_type: Option<TypeTag>,
    },
    StringLiteral {
        value: String,
        location: SourceLocation,
        inferred_type: Option<TypeTag>,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            AstNode::VarDecl { location, .. } => location,
            AstNode::FuncDecl { location, .. } => location,
            AstNode::MainDecl { location, .. } => location,
            AstNode::VarDeclLocal { location, .. } => location,
            AstNode::Assignment { location, .. } => location,
            AstNode::Return { location, .. } => location,
            AstNode::IfStmt { location, .. } => location,
            AstNode::WhileStmt { location, .. } => location,
            AstNode::FunctionCall { location, .. } => location,
            AstNode::BinaryExpr { location, .. } => location,
            AstNode::UnaryExpr { location, .. } => location,
            AstNode::Identifier { location, .. } => location,
            AstNode::IntLiteral { location, .. } => location,
            AstNode::FloatLiteral { location, .. } => location,
            AstNode::CharLiteral { location, .. } => location,
            AstNode::StringLiteral { location, .. } => location,
        }
    }

    /// The type attached by semantic analysis, if this is an expression node
    /// and analysis has run and succeeded for it.
    pub fn inferred_type(&self) -> Option<TypeTag> {
        match self {
            AstNode::FunctionCall { inferred_type, .. }
            | AstNode::BinaryExpr { inferred_type, .. }
            | AstNode::UnaryExpr { inferred_type, .. }
            | AstNode::Identifier { inferred_type, .. }
            | AstNode::IntLiteral { inferred_type, .. }
            | AstNode::FloatLiteral { inferred_type, .. }
            | AstNode::CharLiteral { inferred_type, .. }
            | AstNode::StringLiteral { inferred_type, .. } => *inferred_type,
            _ => None,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub declarations: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

/// Floats render in plain decimal: the grammar has no exponent notation,
/// so `{:?}` output like `1e-7` would not re-lex. When the shortest form
/// carries an exponent, fall back to fixed-point with enough digits to
/// pick out the same value on reparse.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let repr = format!("{:?}", value);
    if !repr.contains('e') && !repr.contains('E') {
        return write!(f, "{}", repr);
    }

    let fixed = format!("{:.350}", value);
    let fixed = fixed.trim_end_matches('0');
    if fixed.ends_with('.') {
        write!(f, "{}0", fixed)
    } else {
        write!(f, "{}", fixed)
    }
}

/// Char literals escape only the sequences the lexer decodes; anything
/// else (including non-ASCII) is emitted raw.
fn write_char(f: &mut fmt::Formatter<'_>, value: char) -> fmt::Result {
    match value {
        '\n' => write!(f, "'\\n'"),
        '\t' => write!(f, "'\\t'"),
        '\r' => write!(f, "'\\r'"),
        '\\' => write!(f, "'\\\\'"),
        '\'' => write!(f, "'\\''"),
        '\0' => write!(f, "'\\0'"),
        _ => write!(f, "'{}'", value),
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[Param]) -> fmt::Result {
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} {}", p.declared_type, p.name)?;
    }
    Ok(())
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.statements {
            // Call statements carry no trailing semicolon of their own
            if matches!(stmt, AstNode::FunctionCall { .. }) {
                write!(f, " {};", stmt)?;
            } else {
                write!(f, " {}", stmt)?;
            }
        }
        write!(f, " }}")
    }
}

/// Canonical source form. Expressions are fully parenthesized so that the
/// output reparses to the same tree.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::VarDecl {
                name,
                declared_type,
                ..
            }
            | AstNode::VarDeclLocal {
                name,
                declared_type,
                ..
            } => write!(f, "{} {};", declared_type, name),
            AstNode::FuncDecl {
                name,
                return_type,
                params,
                body,
                ..
            } => {
                write!(f, "{} {}(", return_type, name)?;
                write_params(f, params)?;
                write!(f, ") {}", body)
            }
            AstNode::MainDecl {
                return_type,
                params,
                body,
                ..
            } => {
                write!(f, "{} main(", return_type)?;
                write_params(f, params)?;
                write!(f, ") {}", body)
            }
            AstNode::Assignment { name, value, .. } => write!(f, "{} = {};", name, value),
            AstNode::Return { value, .. } => match value {
                Some(expr) => write!(f, "return {};", expr),
                None => write!(f, "return;"),
            },
            AstNode::IfStmt {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                write!(f, "if ({}) {}", condition, then_branch)?;
                if let Some(else_block) = else_branch {
                    write!(f, " else {}", else_block)?;
                }
                Ok(())
            }
            AstNode::WhileStmt {
                condition, body, ..
            } => write!(f, "while ({}) {}", condition, body),
            AstNode::FunctionCall { name, args, .. } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            AstNode::BinaryExpr {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op, right),
            AstNode::UnaryExpr { op, operand, .. } => write!(f, "({}{})", op, operand),
            AstNode::Identifier { name, .. } => write!(f, "{}", name),
            AstNode::IntLiteral { value, .. } => write!(f, "{}", value),
            AstNode::FloatLiteral { value, .. } => write_float(f, *value),
            AstNode::CharLiteral { value, .. } => write_char(f, *value),
            AstNode::StringLiteral { value, .. } => {
                write!(f, "\"")?;
                for c in value.chars() {
                    match c {
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\r' => write!(f, "\\r")?,
                        '\\' => write!(f, "\\\\")?,
                        '"' => write!(f, "\\\"")?,
                        '\0' => write!(f, "\\0")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, decl) in self.declarations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", decl)?;
        }
        Ok(())
    }
}
