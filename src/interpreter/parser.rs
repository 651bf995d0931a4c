/// Core parsing machinery.
///
/// Holds the parser state (control-id counter, nesting tracking), the
/// statement-list loop shared by every block construct, and the entry point
/// producing a [`crate::ast::Program`].
pub mod core;

/// Statement-level productions.
///
/// One parsing function per statement form; each fails fast with the
/// specific syntax error code of the malformation it detects.
pub mod statement;

/// Expression parsing.
///
/// Precedence climbing over the operator tiers, from logical `||` at the
/// loosest down to unary operators and primaries.
pub mod expression;
