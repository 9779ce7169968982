use crate::predicate::model::Predicate;
use derive_more::Deref;
use std::fmt;

///
/// CombinatorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CombinatorKind {
    And,
    Or,
}

impl fmt::Display for CombinatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
        }
    }
}

///
/// Combinator
///
/// N-ary AND/OR accumulator shared by the builder's in-progress nodes and the
/// compile step. Always created from one existing operand, so it is never
/// empty. Children keep insertion order; nothing is flattened.
///

#[derive(Clone, Debug, Deref, PartialEq)]
pub struct Combinator<T> {
    kind: CombinatorKind,
    #[deref]
    children: Vec<T>,
}

impl<T> Combinator<T> {
    pub fn new(kind: CombinatorKind, first: T) -> Self {
        Self {
            kind,
            children: vec![first],
        }
    }

    #[must_use]
    pub const fn kind(&self) -> CombinatorKind {
        self.kind
    }

    pub fn append(&mut self, child: T) {
        self.children.push(child);
    }

    /// A combinator is settled once it has a right-hand operand.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.children.len() > 1
    }

    #[must_use]
    pub fn children(&self) -> &[T] {
        &self.children
    }

    #[must_use]
    pub fn last_child(&self) -> Option<&T> {
        self.children.last()
    }

    pub fn last_child_mut(&mut self) -> Option<&mut T> {
        self.children.last_mut()
    }

    /// Replace the most recent child with `map(child)`.
    pub fn map_last(&mut self, map: impl FnOnce(T) -> T) {
        if let Some(last) = self.children.pop() {
            self.children.push(map(last));
        }
    }

    pub fn try_map<U, E>(self, map: impl FnMut(T) -> Result<U, E>) -> Result<Combinator<U>, E> {
        Ok(Combinator {
            kind: self.kind,
            children: self.children.into_iter().map(map).collect::<Result<_, _>>()?,
        })
    }

    #[must_use]
    pub fn into_children(self) -> Vec<T> {
        self.children
    }
}

impl Combinator<Predicate> {
    /// Fold into the matching conjunction/disjunction node.
    #[must_use]
    pub fn into_predicate(self) -> Predicate {
        match self.kind {
            CombinatorKind::And => Predicate::And(self.children),
            CombinatorKind::Or => Predicate::Or(self.children),
        }
    }
}
