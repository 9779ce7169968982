use crate::{
    predicate::{ArgumentPolicy, MatchMode},
    value::TextMode,
};

///
/// WhereConfig
///
/// Builder-wide defaults. Chosen once per `Where`; nothing here changes the
/// structural rules of the builder.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WhereConfig {
    /// Anchoring used by `Where::like`.
    pub like_mode: MatchMode,

    /// Case handling for every pattern leaf.
    pub like_text: TextMode,

    /// Treatment of stray arguments on `Exists`/`NotExists` subquery leaves.
    pub subquery_arguments: ArgumentPolicy,
}

impl WhereConfig {
    /// Case-insensitive anywhere matching with strict subquery arguments.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            like_mode: MatchMode::Anywhere,
            like_text: TextMode::Ci,
            subquery_arguments: ArgumentPolicy::Strict,
        }
    }

    #[must_use]
    pub const fn with_like_mode(mut self, mode: MatchMode) -> Self {
        self.like_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_like_text(mut self, text: TextMode) -> Self {
        self.like_text = text;
        self
    }

    #[must_use]
    pub const fn with_subquery_arguments(mut self, policy: ArgumentPolicy) -> Self {
        self.subquery_arguments = policy;
        self
    }
}
