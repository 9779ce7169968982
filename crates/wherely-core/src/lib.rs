//! Core of wherely: a fluent builder that turns AND/OR/NOT phrasing into a
//! filter tree for a downstream query-composition layer.
//!
//! - `predicate`: the finished tree, its leaves and the AND/OR combinator.
//! - `scope`: the `Where` builder, block nesting and conditional inclusion.
//! - `value`: literal operands.
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod predicate;
pub mod scope;
pub mod value;

pub use error::{ErrorClass, WhereError};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// Errors and configuration are imported from their modules.
///

pub mod prelude {
    pub use crate::{
        predicate::{
            CompareOp, Leaf, MatchMode, Predicate, Subquery, SubqueryLeaf, SubqueryOperator,
        },
        scope::{ScopeId, Where},
        value::{FieldValue, Value},
    };
}
