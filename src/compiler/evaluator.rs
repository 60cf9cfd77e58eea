use ordered_float::OrderedFloat;

use crate::{
    ast::BinaryOperator,
    compiler::{
        codegen::{Instruction, Program},
        value::{NumberKind, Value},
    },
    error::RuntimeError,
    util::num::{f64_to_i64_truncated, i64_to_f64_checked},
};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// One step of the substitution trace.
///
/// Register values are stored as [`OrderedFloat`] so whole traces can be
/// compared and hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TraceStep {
    /// A literal was converted and stored in a leaf register.
    Promotion {
        /// Leaf register.
        target:  usize,
        /// Literal text.
        literal: String,
        /// Conversion applied to the literal.
        kind:    NumberKind,
    },
    /// Two registers were combined.
    Reduction {
        /// Register receiving the result.
        target: usize,
        /// Value of the left operand.
        left:   OrderedFloat<f64>,
        /// The operator.
        op:     BinaryOperator,
        /// Value of the right operand.
        right:  OrderedFloat<f64>,
        /// The computed value.
        result: OrderedFloat<f64>,
    },
    /// A register was negated.
    Negation {
        /// Register receiving the result.
        target:  usize,
        /// Value of the operand.
        operand: OrderedFloat<f64>,
    },
    /// The result register was filled.
    Result {
        /// The result register.
        target: usize,
        /// Register value before the final conversion.
        value:  OrderedFloat<f64>,
        /// Conversion applied to the whole expression.
        kind:   NumberKind,
    },
}

impl std::fmt::Display for TraceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Promotion { target,
                              literal,
                              kind, } => {
                write!(f, "t[{target}] = {}( {literal} )", kind.conversion())
            },
            Self::Reduction { target,
                              left,
                              op,
                              right,
                              .. } => write!(f, "t[{target}] = {left} {op} {right}"),
            Self::Negation { target, operand } => write!(f, "t[{target}] = -( {operand} )"),
            Self::Result { target, value, kind } => {
                write!(f, "t[{target}] = {}( {value} )", kind.conversion())
            },
        }
    }
}

/// Outcome of evaluating a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The final, typed result.
    pub value: Value,
    /// Every promotion and reduction, in execution order.
    pub trace: Vec<TraceStep>,
}

/// Converts a literal's text into a register value.
///
/// A literal without a decimal point is an integer, one with exactly one
/// decimal point is a float.
///
/// # Errors
/// - [`RuntimeError::MalformedNumber`] for two or more decimal points, or a
///   float literal without digits (`.`).
/// - [`RuntimeError::LiteralTooLarge`] for integers that are not exactly
///   representable in the register file.
fn promote(literal: &str) -> EvalResult<(f64, NumberKind)> {
    match literal.matches('.').count() {
        0 => {
            let too_large = || RuntimeError::LiteralTooLarge { literal: literal.to_string() };
            let integer = literal.parse::<i64>().map_err(|_| too_large())?;
            Ok((i64_to_f64_checked(integer, too_large())?, NumberKind::Integer))
        },
        1 => {
            let real = literal.parse::<f64>()
                              .map_err(|_| RuntimeError::MalformedNumber { literal:
                                                                               literal.to_string() })?;
            Ok((real, NumberKind::Float))
        },
        _ => Err(RuntimeError::MalformedNumber { literal: literal.to_string() }),
    }
}

fn apply(op: BinaryOperator, left: f64, right: f64, right_register: usize) -> EvalResult<f64> {
    match op {
        BinaryOperator::Add => Ok(left + right),
        BinaryOperator::Sub => Ok(left - right),
        BinaryOperator::Mul => Ok(left * right),
        BinaryOperator::Div => {
            if right == 0.0 {
                return Err(RuntimeError::DivisionByZero { register: right_register });
            }
            Ok(left / right)
        },
    }
}

/// Executes a three-address program by substituting values into registers.
///
/// Instructions run in order over a register file sized to the program.
/// Literals are converted as they are loaded; any float literal marks the
/// whole expression as float-typed. The final instruction reports the result
/// register, truncated to an integer unless a float literal was seen.
///
/// # Errors
/// - [`RuntimeError::MalformedNumber`] for a literal with two decimal points.
/// - [`RuntimeError::LiteralTooLarge`] for an oversized integer literal.
/// - [`RuntimeError::DivisionByZero`] when a divisor register holds zero.
/// - [`RuntimeError::Overflow`] if an integer-typed result does not fit `i64`.
///
/// Evaluation stops at the first error; no partial result is returned.
///
/// # Example
/// ```
/// use ternac::compiler::{
///     codegen::generate, evaluator::evaluate, lexer::tokenize, parser::build_tree,
///     value::Value,
/// };
///
/// let program = generate(&build_tree(tokenize("2.0+3*4").unwrap()).unwrap());
/// let evaluation = evaluate(&program).unwrap();
///
/// assert_eq!(evaluation.value, Value::Real(14.0));
/// assert_eq!(evaluation.trace.last().unwrap().to_string(), "t[5] = to_float( 14 )");
/// ```
pub fn evaluate(program: &Program) -> EvalResult<Evaluation> {
    let mut registers = vec![0.0_f64; program.register_count()];
    let mut trace = Vec::with_capacity(program.register_count());
    let mut float_seen = false;
    let mut result = None;

    for instruction in program.instructions() {
        let step = match instruction {
            Instruction::Load { target, literal } => {
                let (value, kind) = promote(literal)?;
                float_seen |= kind == NumberKind::Float;
                registers[*target] = value;
                TraceStep::Promotion { target: *target,
                                       literal: literal.clone(),
                                       kind }
            },
            Instruction::Binary { target,
                                  left,
                                  op,
                                  right, } => {
                let (lhs, rhs) = (registers[*left], registers[*right]);
                let value = apply(*op, lhs, rhs, *right)?;
                registers[*target] = value;
                TraceStep::Reduction { target: *target,
                                       left:   OrderedFloat(lhs),
                                       op:     *op,
                                       right:  OrderedFloat(rhs),
                                       result: OrderedFloat(value), }
            },
            Instruction::Negate { target, operand } => {
                let value = registers[*operand];
                registers[*target] = -value;
                TraceStep::Negation { target:  *target,
                                      operand: OrderedFloat(value), }
            },
            Instruction::Result { target, source } => {
                let value = registers[*source];
                registers[*target] = value;
                let typed = if float_seen {
                    Value::Real(value)
                } else {
                    Value::Integer(f64_to_i64_truncated(value)?)
                };
                result = Some(typed);
                TraceStep::Result { target: *target,
                                    value:  OrderedFloat(value),
                                    kind:   typed.kind(), }
            },
        };

        log::trace!("{step}");
        trace.push(step);
    }

    let Some(value) = result else {
        unreachable!("program without a result instruction");
    };

    log::debug!("evaluated {} instructions to {value}", trace.len());

    Ok(Evaluation { value, trace })
}
