/// The ambiguity module rejects operator sequences before parsing.
///
/// It scans the token sequence for operator patterns judged unsafe to parse
/// deterministically and fails fast, so no tree is ever built from them.
///
/// # Responsibilities
/// - Flags same-class operators that are adjacent or one token apart.
/// - Flags same-class operators chained around a parenthesized group.
pub mod ambiguity;
/// The codegen module linearizes the parse tree into three-address code.
///
/// Code generation works from the leaf order and the operator log collected
/// by the parser; it never walks the tree again.
///
/// # Responsibilities
/// - Assigns one register per leaf and one per combining operation.
/// - Replays the operator log as a stack reduction over available registers.
/// - Appends the final result copy.
pub mod codegen;
/// The evaluator module executes generated programs.
///
/// # Responsibilities
/// - Converts literals into register values, tracking float promotion.
/// - Applies the arithmetic of each instruction and reports division by zero.
/// - Produces the substitution trace and the typed final result.
pub mod evaluator;
/// The lexer module tokenizes the source text.
///
/// # Responsibilities
/// - Validates the character set of the input.
/// - Splits the input into operator, parenthesis and `num` tokens.
/// - Sidelines literal texts into an ordered value list.
pub mod lexer;
/// The parser module builds the ternary parse tree.
///
/// The tree builder grows the tree top-down from a single cursor, consuming
/// tokens front to back, and records the leaf order and the operator log as a
/// side effect.
///
/// # Responsibilities
/// - Encodes precedence and associativity into tree shape.
/// - Binds literal values to `num` leaves in source order.
/// - Reports tokens the grammar cannot place.
pub mod parser;
/// The value module defines the typed result of an evaluation.
pub mod value;
