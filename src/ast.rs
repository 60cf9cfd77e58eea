/// Binary arithmetic operators of the grammar.
///
/// `Add` and `Sub` form the low precedence class, `Mul` and `Div` the high
/// one. Operators of the same class are left associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinaryOperator {
    /// Returns the glyph used for the operator in source text and in
    /// generated instructions.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Returns `true` for the operators bound by `<T>` (`*` and `/`).
    #[must_use]
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A grammar symbol or terminal stored in a parse tree node.
///
/// The variants are closed: every node the tree builder creates is one of
/// these, and consumers match on them exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// The expression nonterminal `<E>`.
    Expr,
    /// The term nonterminal `<T>`.
    Term,
    /// The unary nonterminal `<U>`.
    Unary,
    /// The operator in the middle slot of a binary expansion.
    Operator(BinaryOperator),
    /// The `-` in the left slot of `<U> ::= '-' <U>`.
    Negation,
    /// The `(` in the left slot of `<U> ::= '(' <E> ')'`.
    OpenParen,
    /// The `)` in the right slot of `<U> ::= '(' <E> ')'`.
    CloseParen,
    /// The `num` terminal. Its middle child holds the bound literal.
    Num,
    /// The literal text bound below a `num` terminal.
    Literal(String),
    /// An explicit `NULL` placeholder for an unused slot.
    Empty,
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expr => write!(f, "<E>"),
            Self::Term => write!(f, "<T>"),
            Self::Unary => write!(f, "<U>"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Negation => write!(f, "-"),
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
            Self::Num => write!(f, "num"),
            Self::Literal(text) => write!(f, "{text}"),
            Self::Empty => write!(f, "NULL"),
        }
    }
}

/// Index of a node inside a [`ParseTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the tree's arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One of the three ordered child slots of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// First child.
    Left = 0,
    /// Second child.
    Middle = 1,
    /// Third child.
    Right = 2,
}

/// A node of the ternary parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The grammar symbol or terminal this node stands for.
    pub symbol: Symbol,
    children:   [Option<NodeId>; 3],
    parent:     Option<NodeId>,
}

impl Node {
    /// Returns the child in the given slot, if one was attached.
    #[must_use]
    pub const fn child(&self, slot: Slot) -> Option<NodeId> {
        self.children[slot as usize]
    }

    /// Returns the three child slots in order (left, middle, right).
    #[must_use]
    pub const fn children(&self) -> [Option<NodeId>; 3] {
        self.children
    }

    /// Returns the parent node, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// The ternary parse tree built by the tree builder.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]. Children are
/// owned by the arena and never re-parented; the parent index is only a
/// navigational link used to walk upward after a leaf is bound. The tree is
/// read-only outside of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<Node>,
}

impl ParseTree {
    /// Creates a tree holding a single `<E>` root.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![Node { symbol:   Symbol::Expr,
                                  children: [None; 3],
                                  parent:   None, }], }
    }

    /// The root node, always an `<E>`.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the symbol of the node behind `id`.
    #[must_use]
    pub fn symbol(&self, id: NodeId) -> &Symbol {
        &self.node(id).symbol
    }

    /// Returns the child of `id` in `slot`.
    #[must_use]
    pub fn child(&self, id: NodeId, slot: Slot) -> Option<NodeId> {
        self.node(id).child(slot)
    }

    /// Number of nodes in the tree, placeholders included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is never `true`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels from the root to the deepest node.
    #[must_use]
    pub fn height(&self) -> usize {
        fn height_of(tree: &ParseTree, id: NodeId) -> usize {
            1 + tree.node(id)
                    .children
                    .iter()
                    .flatten()
                    .map(|child| height_of(tree, *child))
                    .max()
                    .unwrap_or(0)
        }

        height_of(self, self.root())
    }

    /// Attaches a new node under `parent` in `slot` and returns its id.
    ///
    /// Every slot is filled at most once; nodes are never re-parented.
    pub(crate) fn attach(&mut self, parent: NodeId, slot: Slot, symbol: Symbol) -> NodeId {
        debug_assert!(self.nodes[parent.0].children[slot as usize].is_none(),
                      "slot {slot:?} of node {} is already occupied",
                      parent.0);

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { symbol,
                               children: [None; 3],
                               parent: Some(parent) });
        self.nodes[parent.0].children[slot as usize] = Some(id);
        id
    }
}

impl Default for ParseTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn render(tree: &ParseTree,
                  id: NodeId,
                  depth: usize,
                  f: &mut std::fmt::Formatter<'_>)
                  -> std::fmt::Result {
            let node = tree.node(id);
            writeln!(f, "{}{}", "  ".repeat(depth), node.symbol)?;
            for child in node.children.iter().flatten() {
                render(tree, *child, depth + 1, f)?;
            }
            Ok(())
        }

        render(self, self.root(), 0, f)
    }
}
