use crate::{
    predicate::ConstructionError,
    scope::{SyntaxError, UsageError},
};
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Coarse classification for callers that only need to know who is at fault.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// A leaf was given arguments its operator cannot take.
    Construction,

    /// The call sequence does not describe a tree.
    Syntax,

    /// Conditional levels or scope handles were misused.
    Usage,
}

///
/// WhereError
///
/// Every builder failure. None are recoverable: the in-progress chain is
/// dropped and must be rebuilt.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum WhereError {
    #[error("{0}")]
    Construction(#[from] ConstructionError),

    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    #[error("{0}")]
    Usage(#[from] UsageError),
}

impl WhereError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Construction(_) => ErrorClass::Construction,
            Self::Syntax(_) => ErrorClass::Syntax,
            Self::Usage(_) => ErrorClass::Usage,
        }
    }
}
