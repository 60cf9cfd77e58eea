#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating a program.
pub enum RuntimeError {
    /// A numeric literal with more than one decimal point, or one that cannot
    /// be read as a number at all (such as a lone `.`).
    MalformedNumber {
        /// The literal text as written in the source.
        literal: String,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The register holding the zero divisor.
        register: usize,
    },
    /// An integer literal too large to be represented exactly.
    LiteralTooLarge {
        /// The literal text as written in the source.
        literal: String,
    },
    /// The integer-typed result does not fit in a 64 bit integer.
    Overflow,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedNumber { literal } => {
                write!(f, "Error 3: Incorrect data type, '{literal}' is not a valid number.")
            },
            Self::DivisionByZero { register } => {
                write!(f, "Error 4: Attempted to divide by zero (t[{register}] is 0).")
            },
            Self::LiteralTooLarge { literal } => {
                write!(f, "Error 3: Literal '{literal}' is too large.")
            },
            Self::Overflow => write!(f, "Error 4: Integer overflow while trying to report result."),
        }
    }
}

impl std::error::Error for RuntimeError {}
