use std::collections::VecDeque;

use crate::{
    ast::{BinaryOperator, NodeId, ParseTree, Slot, Symbol},
    compiler::lexer::{Token, Tokenized, is_binary_minus},
    error::ParseError,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// An operation recorded in the operator log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A binary operator from an `<E>` or `<T>` expansion.
    Binary(BinaryOperator),
    /// A unary minus from `<U> ::= '-' <U>`.
    Negate,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary(op) => write!(f, "{op}"),
            Self::Negate => write!(f, "neg"),
        }
    }
}

/// An entry of the operator log.
///
/// Entries are appended when the operation's last operand has been parsed, so
/// the log is a post-order listing of the tree's operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoggedOperation {
    /// The logged operation.
    pub operation:    Operation,
    /// How many literals had been bound when the entry was appended. Every
    /// operand of this operation lies within those literals.
    pub leaves_bound: usize,
}

/// Output of the tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    tree:       ParseTree,
    leaves:     Vec<NodeId>,
    operations: Vec<LoggedOperation>,
}

impl Parsed {
    /// The finished parse tree.
    #[must_use]
    pub const fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// Literal nodes in the order they were bound (left to right in the
    /// source).
    #[must_use]
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// The operator log.
    #[must_use]
    pub fn operations(&self) -> &[LoggedOperation] {
        &self.operations
    }

    /// Returns the literal text of the `index`-th bound leaf.
    #[must_use]
    pub fn leaf_text(&self, index: usize) -> Option<&str> {
        match self.tree.symbol(*self.leaves.get(index)?) {
            Symbol::Literal(text) => Some(text),
            _ => None,
        }
    }
}

/// Per-run state of the tree builder.
///
/// Tokens are consumed front to back exactly once; `pos` is the first
/// unconsumed token. Every `<E>`, `<T>` and `<U>` node covers the tokens from
/// `pos` (at the time the cursor reaches it) up to its recorded end.
struct TreeBuilder {
    tokens:     Vec<Token>,
    pos:        usize,
    values:     VecDeque<String>,
    tree:       ParseTree,
    ends:       Vec<usize>,
    leaves:     Vec<NodeId>,
    operations: Vec<LoggedOperation>,
    cursor:     Option<NodeId>,
}

impl TreeBuilder {
    fn new(tokenized: Tokenized) -> Self {
        let tree = ParseTree::new();
        let cursor = Some(tree.root());

        Self { ends: vec![tokenized.tokens.len()],
               tokens: tokenized.tokens,
               pos: 0,
               values: tokenized.values.into(),
               tree,
               leaves: Vec::new(),
               operations: Vec::new(),
               cursor }
    }

    fn attach(&mut self, parent: NodeId, slot: Slot, symbol: Symbol, end: usize) -> NodeId {
        let id = self.tree.attach(parent, slot, symbol);
        debug_assert_eq!(self.ends.len(), id.index());
        self.ends.push(end);
        id
    }

    /// Fills the three slots of `node` and returns the new children.
    fn expand(&mut self, node: NodeId, symbols: [Symbol; 3], ends: [usize; 3]) -> [NodeId; 3] {
        let [left, middle, right] = symbols;
        [self.attach(node, Slot::Left, left, ends[0]),
         self.attach(node, Slot::Middle, middle, ends[1]),
         self.attach(node, Slot::Right, right, ends[2])]
    }

    fn consume(&mut self, expected: Token) -> ParseResult<()> {
        match self.tokens.get(self.pos) {
            Some(token) if *token == expected => {
                self.pos += 1;
                Ok(())
            },
            Some(token) => Err(ParseError::UnexpectedToken { token:    token.to_string(),
                                                             position: self.pos, }),
            None => Err(ParseError::MissingOperand { position: self.pos }),
        }
    }

    fn unexpected(&self, position: usize) -> ParseError {
        match self.tokens.get(position) {
            Some(token) => ParseError::UnexpectedToken { token: token.to_string(),
                                                         position },
            None => ParseError::MissingOperand { position },
        }
    }

    /// Finds the last operator at parenthesis depth zero in `pos..end` that
    /// `accepts` selects.
    fn last_top_level_operator(&self,
                               end: usize,
                               accepts: impl Fn(usize) -> Option<BinaryOperator>)
                               -> Option<(usize, BinaryOperator)> {
        let mut depth = 0usize;
        let mut found = None;

        for index in self.pos..end {
            match self.tokens[index] {
                Token::LParen => depth += 1,
                Token::RParen => depth = depth.saturating_sub(1),
                _ if depth == 0 => {
                    if let Some(op) = accepts(index) {
                        found = Some((index, op));
                    }
                },
                _ => {},
            }
        }

        found
    }

    /// Finds the `)` closing the `(` at `open`, searching up to `end`.
    fn matching_paren(&self, open: usize, end: usize) -> Option<usize> {
        let mut depth = 0usize;

        for index in open..end {
            match self.tokens[index] {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index);
                    }
                },
                _ => {},
            }
        }

        None
    }

    fn step(&mut self, node: NodeId) -> ParseResult<()> {
        match self.tree.symbol(node).clone() {
            Symbol::Expr => {
                self.expand_expr(node);
                Ok(())
            },
            Symbol::Term => {
                self.expand_term(node);
                Ok(())
            },
            Symbol::Unary => self.expand_unary(node),
            symbol => unreachable!("cursor rests on terminal '{symbol}'"),
        }
    }

    /// `<E> ::= <E> '+' <T> | <E> '-' <T> | <T>`
    fn expand_expr(&mut self, node: NodeId) {
        let end = self.ends[node.index()];
        let tokens = &self.tokens;
        let split = self.last_top_level_operator(end, |index| match tokens[index] {
                            Token::Plus => Some(BinaryOperator::Add),
                            Token::Minus if is_binary_minus(tokens, index) => {
                                Some(BinaryOperator::Sub)
                            },
                            _ => None,
                        });

        self.cursor = Some(self.expand_binary(node, split, Symbol::Expr, Symbol::Term, end));
    }

    /// `<T> ::= <T> '*' <U> | <T> '/' <U> | <U>`
    fn expand_term(&mut self, node: NodeId) {
        let end = self.ends[node.index()];
        let tokens = &self.tokens;
        let split = self.last_top_level_operator(end, |index| {
                            tokens[index].operator().filter(|op| op.is_multiplicative())
                        });

        self.cursor = Some(self.expand_binary(node, split, Symbol::Term, Symbol::Unary, end));
    }

    /// Expands a left-recursive rule at `split`, or falls back to the unit
    /// production. Returns the node the cursor moves to.
    fn expand_binary(&mut self,
                     node: NodeId,
                     split: Option<(usize, BinaryOperator)>,
                     recursive: Symbol,
                     lower: Symbol,
                     end: usize)
                     -> NodeId {
        if let Some((index, op)) = split {
            log::trace!("{} -> {recursive} '{op}' {lower} at token {index}",
                        self.tree.symbol(node));
            let [left, ..] = self.expand(node,
                                         [recursive, Symbol::Operator(op), lower],
                                         [index, index + 1, end]);
            left
        } else {
            log::trace!("{} -> {lower}", self.tree.symbol(node));
            let [_, middle, _] = self.expand(node, [Symbol::Empty, lower, Symbol::Empty], [end; 3]);
            middle
        }
    }

    /// `<U> ::= '(' <E> ')' | '-' <U> | num`
    fn expand_unary(&mut self, node: NodeId) -> ParseResult<()> {
        let end = self.ends[node.index()];
        let start = self.pos;

        if start >= end {
            return Err(ParseError::MissingOperand { position: start });
        }

        let token = self.tokens[start];
        match token {
            Token::LParen => {
                let close = self.matching_paren(start, end)
                                .ok_or(ParseError::ExpectedClosingParen { position: start })?;
                if close + 1 != end {
                    return Err(self.unexpected(close + 1));
                }

                log::trace!("<U> -> ( <E> ) over tokens {start}..={close}");
                let [_, middle, _] = self.expand(node,
                                                 [Symbol::OpenParen, Symbol::Expr, Symbol::CloseParen],
                                                 [start + 1, close, end]);
                self.consume(Token::LParen)?;
                self.cursor = Some(middle);
                Ok(())
            },
            Token::Minus => {
                log::trace!("<U> -> - <U> at token {start}");
                let [_, middle, _] =
                    self.expand(node, [Symbol::Negation, Symbol::Unary, Symbol::Empty], [end; 3]);
                self.consume(Token::Minus)?;
                self.cursor = Some(middle);
                Ok(())
            },
            Token::Num => {
                if start + 1 != end {
                    return Err(self.unexpected(start + 1));
                }

                let [_, num, _] =
                    self.expand(node, [Symbol::Empty, Symbol::Num, Symbol::Empty], [end; 3]);
                self.consume(Token::Num)?;
                let text = self.values
                               .pop_front()
                               .ok_or(ParseError::MissingOperand { position: start })?;
                log::trace!("<U> -> num bound to '{text}'");
                let [_, literal, _] =
                    self.expand(num, [Symbol::Empty, Symbol::Literal(text), Symbol::Empty], [end; 3]);
                self.leaves.push(literal);
                self.climb(node)
            },
            _ => Err(self.unexpected(start)),
        }
    }

    /// Walks upward from a completed `<U>` and places the cursor.
    ///
    /// Every completed right operand on the way logs its operator, every
    /// completed unary minus logs a negation and every completed group
    /// consumes its `)`. The walk stops at the first binary expansion whose
    /// right operand has not been started: the operator token between the two
    /// operands is consumed and the cursor moves to the right operand. If the
    /// walk reaches past the root, the tree is complete.
    fn climb(&mut self, completed: NodeId) -> ParseResult<()> {
        let mut child = completed;
        let mut current = self.tree.node(completed).parent();

        while let Some(node) = current {
            match self.tree.symbol(node).clone() {
                Symbol::Expr | Symbol::Term => {
                    if let Some(middle) = self.tree.child(node, Slot::Middle)
                       && let Symbol::Operator(op) = *self.tree.symbol(middle)
                       && let Some(right) = self.tree.child(node, Slot::Right)
                    {
                        if right == child {
                            self.log_operation(Operation::Binary(op));
                        } else if self.tree.child(right, Slot::Middle).is_none() {
                            self.consume(Token::from(op))?;
                            log::trace!("cursor moves to the right operand of '{op}'");
                            self.cursor = Some(right);
                            return Ok(());
                        }
                    }
                },
                Symbol::Unary => match self.tree
                                           .child(node, Slot::Left)
                                           .map(|left| self.tree.symbol(left).clone())
                {
                    Some(Symbol::Negation) => self.log_operation(Operation::Negate),
                    Some(Symbol::OpenParen) => self.consume(Token::RParen)?,
                    _ => {},
                },
                _ => {},
            }

            child = node;
            current = self.tree.node(node).parent();
        }

        self.cursor = None;
        Ok(())
    }

    fn log_operation(&mut self, operation: Operation) {
        log::trace!("operator log += '{operation}' after {} leaves", self.leaves.len());
        self.operations.push(LoggedOperation { operation,
                                               leaves_bound: self.leaves.len() });
    }
}

/// Builds the ternary parse tree for a token sequence.
///
/// Grammar, lowest precedence first, left associative:
/// ```text
///     <E> ::= <E> '+' <T> | <E> '-' <T> | <T>
///     <T> ::= <T> '*' <U> | <T> '/' <U> | <U>
///     <U> ::= '(' <E> ')' | '-' <U> | num
/// ```
///
/// A single cursor starts at the `<E>` root and grows the tree top-down.
/// Binary rules fill all three slots (recursive symbol, operator, lower
/// symbol) and descend left; unit rules fill only the middle slot, leaving
/// `NULL` placeholders left and right. Each `num` binds the next literal
/// value below it, is appended to the leaf order, and triggers an upward walk
/// that logs finished operations and moves the cursor to the next pending
/// right operand.
///
/// # Errors
/// - [`ParseError::EmptyExpression`] if there are no tokens.
/// - [`ParseError::MissingOperand`] if an operator or group has no operand.
/// - [`ParseError::ExpectedClosingParen`] for an unmatched `(`.
/// - [`ParseError::UnexpectedToken`] for any token the grammar cannot place.
///
/// # Example
/// ```
/// use ternac::compiler::{
///     lexer::tokenize,
///     parser::{Operation, build_tree},
/// };
/// use ternac::ast::BinaryOperator;
///
/// let parsed = build_tree(tokenize("2+3*4").unwrap()).unwrap();
/// assert_eq!(parsed.leaves().len(), 3);
///
/// let log: Vec<_> = parsed.operations().iter().map(|entry| entry.operation).collect();
/// assert_eq!(log,
///            vec![Operation::Binary(BinaryOperator::Mul),
///                 Operation::Binary(BinaryOperator::Add)]);
/// ```
pub fn build_tree(tokenized: Tokenized) -> ParseResult<Parsed> {
    if tokenized.tokens.is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut builder = TreeBuilder::new(tokenized);

    while let Some(node) = builder.cursor {
        builder.step(node)?;
    }

    if builder.pos < builder.tokens.len() {
        return Err(builder.unexpected(builder.pos));
    }

    log::debug!("parse tree has {} nodes, {} leaves, {} logged operations",
                builder.tree.len(),
                builder.leaves.len(),
                builder.operations.len());

    Ok(Parsed { tree:       builder.tree,
                leaves:     builder.leaves,
                operations: builder.operations, })
}
