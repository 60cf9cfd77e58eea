use crate::{
    ast::BinaryOperator,
    compiler::parser::{Operation, Parsed},
};

/// A three-address instruction.
///
/// Registers are indices into a flat numeric register file. Each instruction
/// writes a fresh register; targets increase strictly from zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `t[target] = literal`, one per leaf.
    Load {
        /// Register receiving the literal.
        target:  usize,
        /// Literal text as written in the source.
        literal: String,
    },
    /// `t[target] = t[left] op t[right]`
    Binary {
        /// Register receiving the result.
        target: usize,
        /// Left operand register.
        left:   usize,
        /// The operator.
        op:     BinaryOperator,
        /// Right operand register.
        right:  usize,
    },
    /// `t[target] = -t[operand]`
    Negate {
        /// Register receiving the result.
        target:  usize,
        /// Operand register.
        operand: usize,
    },
    /// `t[target] = t[source]`, the final copy marking the result register.
    Result {
        /// Register receiving the result.
        target: usize,
        /// Last produced register.
        source: usize,
    },
}

impl Instruction {
    /// The register written by this instruction.
    #[must_use]
    pub const fn target(&self) -> usize {
        match self {
            Self::Load { target, .. }
            | Self::Binary { target, .. }
            | Self::Negate { target, .. }
            | Self::Result { target, .. } => *target,
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load { target, literal } => write!(f, "t[{target}] = {literal}"),
            Self::Binary { target,
                           left,
                           op,
                           right, } => write!(f, "t[{target}] = t[{left}] {op} t[{right}]"),
            Self::Negate { target, operand } => write!(f, "t[{target}] = -t[{operand}]"),
            Self::Result { target, source } => write!(f, "t[{target}] = t[{source}]"),
        }
    }
}

/// A generated three-address program.
///
/// The first `leaf_count` instructions load the literals in source order, the
/// last instruction is always [`Instruction::Result`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Program {
    instructions: Vec<Instruction>,
    leaf_count:   usize,
}

impl Program {
    /// The instructions in execution order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of leaf registers (`t[0]` up to `t[leaf_count - 1]`).
    #[must_use]
    pub const fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of registers the program writes.
    #[must_use]
    pub fn register_count(&self) -> usize {
        self.instructions.len()
    }

    /// The register holding the final result.
    #[must_use]
    pub fn result_register(&self) -> Option<usize> {
        self.instructions.last().map(Instruction::target)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

/// Linearizes a parsed expression into three-address code.
///
/// Leaves get registers `0..L` in bind order. The operator log is then
/// replayed in order: before each entry the leaf registers it covers are
/// pushed onto the list of available registers, then the last two available
/// registers are popped (right operand first, then left) and combined, or the
/// last one is negated. The new register is pushed back. A final instruction
/// copies the last produced register.
///
/// # Example
/// ```
/// use ternac::compiler::{codegen::generate, lexer::tokenize, parser::build_tree};
///
/// let parsed = build_tree(tokenize("2+3*4").unwrap()).unwrap();
/// let listing: Vec<String> = generate(&parsed).instructions()
///                                             .iter()
///                                             .map(ToString::to_string)
///                                             .collect();
///
/// assert_eq!(listing,
///            ["t[0] = 2", "t[1] = 3", "t[2] = 4", "t[3] = t[1] * t[2]", "t[4] = t[0] + t[3]",
///             "t[5] = t[4]"]);
/// ```
#[must_use]
pub fn generate(parsed: &Parsed) -> Program {
    let leaf_count = parsed.leaves().len();
    let mut instructions: Vec<Instruction> =
        (0..leaf_count).map(|target| Instruction::Load { target,
                                                         literal:
                                                             parsed.leaf_text(target)
                                                                   .unwrap_or_default()
                                                                   .to_string() })
                       .collect();

    let mut available = Vec::with_capacity(leaf_count);
    let mut pushed = 0;
    let mut next = leaf_count;

    for entry in parsed.operations() {
        while pushed < entry.leaves_bound.min(leaf_count) {
            available.push(pushed);
            pushed += 1;
        }

        let instruction = match entry.operation {
            Operation::Binary(op) => {
                let (Some(right), Some(left)) = (available.pop(), available.pop()) else {
                    unreachable!("operator '{op}' logged without two operands");
                };
                Instruction::Binary { target: next,
                                      left,
                                      op,
                                      right }
            },
            Operation::Negate => {
                let Some(operand) = available.pop() else {
                    unreachable!("negation logged without an operand");
                };
                Instruction::Negate { target: next,
                                      operand }
            },
        };

        log::trace!("{instruction}");
        instructions.push(instruction);
        available.push(next);
        next += 1;
    }

    available.extend(pushed..leaf_count);

    let source = available.last().copied().unwrap_or(next.saturating_sub(1));
    instructions.push(Instruction::Result { target: next,
                                            source });

    log::debug!("generated {} instructions", instructions.len());

    Program { instructions,
              leaf_count }
}
