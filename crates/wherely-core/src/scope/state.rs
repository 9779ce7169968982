use crate::{
    predicate::CombinatorKind,
    scope::{
        ScopeId, SyntaxError,
        node::{self, Node},
    },
};
use derive_more::Deref;

///
/// EnableStack
///
/// Conditional-inclusion levels for one scope. The base level is always
/// `true` and can never be popped; a disabled level disables every level
/// pushed above it.
///

#[derive(Clone, Debug, Deref, Eq, PartialEq)]
pub(crate) struct EnableStack(Vec<bool>);

impl EnableStack {
    pub(crate) fn new() -> Self {
        Self(vec![true])
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.0.last().copied().unwrap_or(true)
    }

    pub(crate) fn push(&mut self, condition: bool) {
        let enabled = self.is_enabled() && condition;
        self.0.push(enabled);
    }

    /// Pop one level; `false` when only the base level is left.
    pub(crate) fn pop(&mut self) -> bool {
        if self.0.len() <= 1 {
            return false;
        }
        self.0.pop();

        true
    }

    /// Number of open `if_begin` levels above the base.
    pub(crate) fn open_levels(&self) -> usize {
        self.0.len() - 1
    }
}

///
/// Scope
///
/// One level of block nesting. The parent link is an arena index, only used
/// to hand the cursor back on `block_end`.
///

#[derive(Clone, Debug)]
pub(crate) struct Scope {
    pub(crate) parent: Option<ScopeId>,
    pub(crate) root: Option<Node>,
    pub(crate) enabled: EnableStack,
    pub(crate) ended: bool,

    // Set while the AND nested at the tail of an OR root is collecting operands.
    open_and: bool,
}

impl Scope {
    pub(crate) fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            root: None,
            enabled: EnableStack::new(),
            ended: false,
            open_and: false,
        }
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn attach(&mut self, node: Node) -> Result<(), SyntaxError> {
        node::attach(&mut self.root, node, self.open_and)
    }

    /// Apply an operator to a non-empty root. Callers check the left operand.
    pub(crate) fn wrap(&mut self, kind: CombinatorKind) {
        if let Some(root) = self.root.take() {
            let (root, open_and) = node::wrap(root, kind, self.open_and);
            self.root = Some(root);
            self.open_and = open_and;
        }
    }
}
