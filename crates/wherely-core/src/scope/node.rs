use crate::{
    predicate::{Combinator, CombinatorKind, Predicate},
    scope::{ScopeId, SyntaxError},
};

///
/// Node
///
/// In-progress tree node. Unlike `Predicate` it can hold a negation still
/// waiting for its operand and a reference to a nested scope that is
/// resolved only at compile time.
///

#[derive(Clone, Debug)]
pub(crate) enum Node {
    Predicate(Predicate),
    Not(Option<Box<Self>>),
    Combinator(Combinator<Self>),
    Group(ScopeId),
}

///
/// Trailing
///
/// What sits at the right edge of a tree, i.e. what an operator called now
/// would take as its left operand.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Trailing {
    Operand,
    PendingNegation,
    Group(ScopeId),
}

impl Node {
    pub(crate) fn trailing(&self) -> Trailing {
        match self {
            Self::Predicate(_) => Trailing::Operand,
            Self::Not(None) => Trailing::PendingNegation,
            Self::Not(Some(target)) => target.trailing(),
            Self::Combinator(combinator) => combinator
                .last_child()
                .map_or(Trailing::Operand, Self::trailing),
            Self::Group(id) => Trailing::Group(*id),
        }
    }

    const fn as_combinator(&self) -> Option<&Combinator<Self>> {
        match self {
            Self::Combinator(combinator) => Some(combinator),
            _ => None,
        }
    }
}

/// Attach `node` to a scope tree.
///
/// `open_and` routes the operand into the AND nested at the tail of an OR
/// root, which is where `and()` after an OR run placed the right operand.
pub(crate) fn attach(
    root: &mut Option<Node>,
    node: Node,
    open_and: bool,
) -> Result<(), SyntaxError> {
    match root {
        None => {
            *root = Some(node);
            Ok(())
        }
        Some(Node::Combinator(combinator)) => {
            if open_and && let Some(Node::Combinator(inner)) = combinator.last_child_mut() {
                attach_to_combinator(inner, node);
                return Ok(());
            }
            attach_to_combinator(combinator, node);
            Ok(())
        }
        Some(current) => match pending_negation(current) {
            Some(slot) => {
                *slot = Some(Box::new(node));
                Ok(())
            }
            None => Err(SyntaxError::MissingConnective),
        },
    }
}

// A trailing negation still waiting for its target takes the node; anything
// else becomes the next child.
fn attach_to_combinator(combinator: &mut Combinator<Node>, node: Node) {
    match combinator.last_child_mut().and_then(pending_negation) {
        Some(slot) => *slot = Some(Box::new(node)),
        None => combinator.append(node),
    }
}

/// Innermost unfilled negation along a chain of `Not` nodes.
fn pending_negation(node: &mut Node) -> Option<&mut Option<Box<Node>>> {
    match node {
        Node::Not(target) => {
            if target.is_none() {
                return Some(target);
            }
            target.as_deref_mut().and_then(pending_negation)
        }
        _ => None,
    }
}

/// Rewrite `root` for an `and()`/`or()` call. Returns the new `open_and`.
///
/// AND binds tighter than OR: `and()` on a settled OR root wraps only the
/// OR's last child, an unsettled OR is wrapped whole like any other root, and
/// a call matching the root's kind leaves the tree alone.
pub(crate) fn wrap(root: Node, kind: CombinatorKind, open_and: bool) -> (Node, bool) {
    let root_kind = root.as_combinator().map(Combinator::kind);

    match (kind, root_kind, root) {
        (CombinatorKind::And, Some(CombinatorKind::Or), Node::Combinator(mut or))
            if or.is_complete() =>
        {
            if !open_and {
                or.map_last(|last| Node::Combinator(Combinator::new(CombinatorKind::And, last)));
            }
            (Node::Combinator(or), true)
        }
        (kind, Some(existing), root) if existing == kind => (root, false),
        (kind, _, root) => (Node::Combinator(Combinator::new(kind, root)), false),
    }
}
