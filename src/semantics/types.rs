//! Type promotion and compatibility rules
//!
//! The language has five types: `int`, `float`, `char`, `void`, and `string`
//! (string exists only for literals). The rules here are the single source of
//! truth for every type decision the analyzer makes:
//!
//! - Arithmetic promotes: `int op int` is `int`, any `float` operand makes
//!   the result `float`, everything else is incompatible.
//! - Comparisons accept mixed numeric operands and always produce `int`
//!   (booleans are integers 0/1).
//! - `int` widens into `float` in assignment, return, and argument position.
//! - Conditions follow the C truthiness convention: `int`, `float`, and
//!   `char` are all acceptable.

use crate::parser::ast::TypeTag;

/// Whether a type participates in arithmetic and comparisons
pub fn is_numeric(ty: TypeTag) -> bool {
    matches!(ty, TypeTag::Int | TypeTag::Float)
}

/// Whether a type is acceptable as an `if`/`while` condition
pub fn is_condition_type(ty: TypeTag) -> bool {
    matches!(ty, TypeTag::Int | TypeTag::Float | TypeTag::Char)
}

/// Result type of a binary arithmetic operation, or `None` if the operand
/// types are incompatible.
pub fn arithmetic_result(left: TypeTag, right: TypeTag) -> Option<TypeTag> {
    if !is_numeric(left) || !is_numeric(right) {
        return None;
    }
    if left == TypeTag::Float || right == TypeTag::Float {
        Some(TypeTag::Float)
    } else {
        Some(TypeTag::Int)
    }
}

/// Result type of a relational/equality operation, or `None` if the operand
/// types are incompatible. Mixed int/float comparisons are legal.
pub fn comparison_result(left: TypeTag, right: TypeTag) -> Option<TypeTag> {
    if is_numeric(left) && is_numeric(right) {
        Some(TypeTag::Int)
    } else {
        None
    }
}

/// Whether a value of type `from` may flow into a slot of type `to` without
/// a diagnostic. Covers assignment, return values, and call arguments.
pub fn widens_into(from: TypeTag, to: TypeTag) -> bool {
    from == to || (from == TypeTag::Int && to == TypeTag::Float)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_promotion() {
        assert_eq!(
            arithmetic_result(TypeTag::Int, TypeTag::Int),
            Some(TypeTag::Int)
        );
        assert_eq!(
            arithmetic_result(TypeTag::Int, TypeTag::Float),
            Some(TypeTag::Float)
        );
        assert_eq!(
            arithmetic_result(TypeTag::Float, TypeTag::Int),
            Some(TypeTag::Float)
        );
        assert_eq!(
            arithmetic_result(TypeTag::Float, TypeTag::Float),
            Some(TypeTag::Float)
        );
    }

    #[test]
    fn test_arithmetic_rejects_non_numeric() {
        assert_eq!(arithmetic_result(TypeTag::Char, TypeTag::Int), None);
        assert_eq!(arithmetic_result(TypeTag::String, TypeTag::Int), None);
        assert_eq!(arithmetic_result(TypeTag::Void, TypeTag::Void), None);
    }

    #[test]
    fn test_comparison_always_int() {
        assert_eq!(
            comparison_result(TypeTag::Int, TypeTag::Float),
            Some(TypeTag::Int)
        );
        assert_eq!(
            comparison_result(TypeTag::Float, TypeTag::Float),
            Some(TypeTag::Int)
        );
        assert_eq!(comparison_result(TypeTag::Char, TypeTag::Char), None);
    }

    #[test]
    fn test_widening() {
        assert!(widens_into(TypeTag::Int, TypeTag::Float));
        assert!(widens_into(TypeTag::Int, TypeTag::Int));
        assert!(!widens_into(TypeTag::Float, TypeTag::Int));
        assert!(!widens_into(TypeTag::Char, TypeTag::Int));
    }

    #[test]
    fn test_condition_types() {
        assert!(is_condition_type(TypeTag::Int));
        assert!(is_condition_type(TypeTag::Float));
        assert!(is_condition_type(TypeTag::Char));
        assert!(!is_condition_type(TypeTag::Void));
        assert!(!is_condition_type(TypeTag::String));
    }
}
