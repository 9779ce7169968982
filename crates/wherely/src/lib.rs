//! ## Crate layout
//! - `core`: predicate model, the `Where` builder, values and errors.
//!
//! The `prelude` module mirrors the vocabulary used when assembling filters;
//! errors and configuration stay under `core`.

pub use wherely_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use self::core::{ErrorClass, WhereError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::WhereConfig,
        predicate::{
            ArgumentPolicy, CombinatorKind, CompareOp, Leaf, MatchMode, Predicate, Subquery,
            SubqueryLeaf, SubqueryOperator,
        },
        scope::{ScopeId, Where},
        value::{FieldValue, TextMode, Value},
    };
}
