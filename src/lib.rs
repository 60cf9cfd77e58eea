//! # ternac
//!
//! ternac compiles a single infix arithmetic expression into three-address
//! code and evaluates it. Numeric literals, `+ - * /`, unary minus and
//! parentheses are supported. The pipeline is strictly sequential:
//! tokenizer, ambiguity gate, tree builder, code generator, evaluator. The
//! first error stops it.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::ParseTree,
    compiler::{
        ambiguity::check_ambiguity,
        codegen::{Program, generate},
        evaluator::{EvalResult, Evaluation, evaluate},
        lexer::{Tokenized, tokenize},
        parser::{Parsed, build_tree},
        value::Value,
    },
    error::Error,
};

/// Defines the ternary parse tree.
///
/// This module declares the grammar symbols, the arena of nodes and the
/// read-only view of the finished tree that renderers consume.
///
/// # Responsibilities
/// - Defines the closed set of grammar symbols and terminals.
/// - Stores nodes with three ordered child slots and a parent link.
/// - Renders the tree as indented text.
pub mod ast;
/// Runs the compilation stages.
///
/// This module ties together tokenizing, the ambiguity gate, tree
/// construction, code generation and evaluation. Each stage is a function
/// over the previous stage's output.
pub mod compiler;
/// Provides unified error types for compilation and evaluation.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexing, gating, parsing,
///   evaluating).
/// - Carries positions and offending text for user feedback.
pub mod error;
/// General utilities for safe numeric conversion.
pub mod util;

/// Every artifact of a successful compilation.
///
/// A `Compilation` owns all of its state; compiling the same source twice
/// yields two independent, equal compilations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    tokenized: Tokenized,
    parsed:    Parsed,
    program:   Program,
}

impl Compilation {
    /// The tokenized form of the source (literals replaced by `num`).
    #[must_use]
    pub const fn tokenized(&self) -> &Tokenized {
        &self.tokenized
    }

    /// The parser output: tree, leaf order and operator log.
    #[must_use]
    pub const fn parsed(&self) -> &Parsed {
        &self.parsed
    }

    /// The finished parse tree.
    #[must_use]
    pub const fn tree(&self) -> &ParseTree {
        self.parsed.tree()
    }

    /// The generated three-address program.
    #[must_use]
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Evaluates the generated program.
    pub fn evaluate(&self) -> EvalResult<Evaluation> {
        evaluate(&self.program)
    }
}

/// Everything a successful run reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The compilation artifacts.
    pub compilation: Compilation,
    /// The substitution trace and final value.
    pub evaluation:  Evaluation,
}

impl Report {
    /// The final, typed result.
    #[must_use]
    pub const fn value(&self) -> Value {
        self.evaluation.value
    }
}

/// Compiles an expression into three-address code.
///
/// Runs the tokenizer, the ambiguity gate, the tree builder and the code
/// generator. Nothing is evaluated.
///
/// # Errors
/// Returns the first [`error::ParseError`] raised by any stage.
///
/// # Examples
/// ```
/// use ternac::compile;
///
/// let compilation = compile("(2+3)*4").unwrap();
/// assert_eq!(compilation.tokenized().to_string(), "( num + num ) * num");
/// assert_eq!(compilation.program().instructions().len(), 6);
///
/// assert!(compile("1++2").is_err());
/// ```
pub fn compile(source: &str) -> Result<Compilation, Error> {
    let tokenized = tokenize(source)?;
    check_ambiguity(&tokenized.tokens)?;
    let parsed = build_tree(tokenized.clone())?;
    let program = generate(&parsed);

    Ok(Compilation { tokenized,
                     parsed,
                     program })
}

/// Compiles and evaluates an expression.
///
/// Each call allocates its own state, so runs never influence each other.
///
/// # Errors
/// Returns the first error raised by any stage; there is no partial result.
///
/// # Examples
/// ```
/// use ternac::{compiler::value::Value, error::{Error, RuntimeError}, run};
///
/// assert_eq!(run("2+3*4").unwrap().value(), Value::Integer(14));
/// assert_eq!(run("2.0+3*4").unwrap().value(), Value::Real(14.0));
///
/// let err = run("5/0").unwrap_err();
/// assert!(matches!(err, Error::Runtime(RuntimeError::DivisionByZero { .. })));
/// ```
pub fn run(source: &str) -> Result<Report, Error> {
    let compilation = compile(source)?;
    let evaluation = compilation.evaluate()?;

    Ok(Report { compilation,
                evaluation })
}
