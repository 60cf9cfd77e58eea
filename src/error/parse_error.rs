#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing, gating or parsing.
///
/// Positions are zero-based. For `InvalidCharacter` the position is a
/// character offset into the source text; every other variant reports an
/// index into the token sequence.
pub enum ParseError {
    /// A character outside of digits, `.`, `+ - * / ( )` and space.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character offset in the source.
        position:  usize,
    },
    /// The operator sequence was rejected by the ambiguity gate.
    AmbiguousExpression {
        /// Token index of the operator that triggered the rejection.
        position: usize,
    },
    /// A token appeared where the grammar does not allow it.
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Token index of the offending token.
        position: usize,
    },
    /// An operator or group has nothing to operate on.
    MissingOperand {
        /// Token index where the operand was expected.
        position: usize,
    },
    /// An opening parenthesis `(` was never closed.
    ExpectedClosingParen {
        /// Token index of the unmatched `(`.
        position: usize,
    },
    /// The input contained no tokens at all.
    EmptyExpression,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { character, position } => {
                write!(f, "Error 1: Invalid character '{character}' at column {}.", position + 1)
            },

            Self::AmbiguousExpression { position } => write!(f,
                                                             "Error 2: Possible ambiguity in the expression near token {}.",
                                                             position + 1),

            Self::UnexpectedToken { token, position } => {
                write!(f, "Syntax error: Unexpected token '{token}' at token {}.", position + 1)
            },

            Self::MissingOperand { position } => {
                write!(f, "Syntax error: Missing operand at token {}.", position + 1)
            },

            Self::ExpectedClosingParen { position } => write!(f,
                                                              "Syntax error: Parenthesis opened at token {} is never closed.",
                                                              position + 1),

            Self::EmptyExpression => write!(f, "Syntax error: The expression is empty."),
        }
    }
}

impl std::error::Error for ParseError {}
