//! Module: predicate
//! Responsibility: finished filter-tree model, leaf constructors, and the
//! shared AND/OR combinator shape.
//! Does not own: fluent construction state or structural checks (see `scope`).
//! Boundary: the `Predicate` returned here is what downstream layers consume.

mod combinator;
mod model;
mod subquery;

#[cfg(test)]
mod tests;

pub use combinator::{Combinator, CombinatorKind};
pub use model::{CompareOp, Leaf, MatchMode, Predicate};
pub use subquery::{
    ArgumentPolicy, ConstructionError, Subquery, SubqueryLeaf, SubqueryOperand, SubqueryOperator,
};
