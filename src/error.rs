/// Parsing errors.
///
/// Defines all error types that can occur before any instruction is
/// generated: invalid characters found by the tokenizer, operator sequences
/// rejected by the ambiguity gate, and malformed token streams found while
/// building the parse tree.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while the three-address
/// program is evaluated, such as malformed numeric literals or division by
/// zero.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure of the compilation pipeline.
///
/// Every stage stops at its first error, so a run produces either a complete
/// result or exactly one `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Tokenizing, the ambiguity gate or tree construction failed.
    Parse(ParseError),
    /// Evaluation of the generated program failed.
    Runtime(RuntimeError),
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
