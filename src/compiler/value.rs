/// The final result of an evaluated expression.
///
/// The type is a property of the whole expression: a single fractional
/// literal anywhere makes the result `Real`, otherwise it is `Integer`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// An integer-typed result.
    Integer(i64),
    /// A float-typed result.
    Real(f64),
}

/// How a literal or the result was converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// `to_int`
    Integer,
    /// `to_float`
    Float,
}

impl NumberKind {
    /// The name of the conversion shown in the substitution trace.
    #[must_use]
    pub const fn conversion(self) -> &'static str {
        match self {
            Self::Integer => "to_int",
            Self::Float => "to_float",
        }
    }
}

impl Value {
    /// Returns the conversion that produced this value.
    #[must_use]
    pub const fn kind(self) -> NumberKind {
        match self {
            Self::Integer(_) => NumberKind::Integer,
            Self::Real(_) => NumberKind::Float,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            // Whole reals keep one fractional digit so `14.0` reads as a float.
            Self::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{r:.1}"),
            Self::Real(r) => write!(f, "{r}"),
        }
    }
}
