use crate::{
    predicate::subquery::SubqueryLeaf,
    value::{FieldValue, TextMode, Value},
};
use std::fmt;

///
/// Predicate Model
///
/// Finished, immutable filter tree handed to the query-composition layer.
/// Nothing here knows how the tree is rendered or evaluated; node order is
/// exactly the order the builder attached them in.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }

    /// True for the operators that compare against a list of values.
    #[must_use]
    pub const fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// MatchMode
///
/// Where a `Like` pattern is anchored inside the matched text.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MatchMode {
    Exact,
    Start,
    End,
    #[default]
    Anywhere,
}

impl MatchMode {
    /// Expand a raw pattern into its wildcard form.
    #[must_use]
    pub fn apply(self, pattern: &str) -> String {
        match self {
            Self::Exact => pattern.to_string(),
            Self::Start => format!("{pattern}%"),
            Self::End => format!("%{pattern}"),
            Self::Anywhere => format!("%{pattern}%"),
        }
    }
}

///
/// Leaf
///
/// Terminal comparison. Leaves are built already valid; the only shape that
/// can be rejected is a pattern match without a pattern, which is omitted
/// rather than reported.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Leaf {
    /// `field op value`
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },

    /// `left op right`, both sides naming properties.
    CompareFields {
        left: String,
        op: CompareOp,
        right: String,
    },

    Like {
        field: String,
        pattern: String,
        mode: MatchMode,
        text: TextMode,
    },

    /// Engine-native expression passed through untouched, with positional
    /// parameters bound in order.
    Raw { sql: String, params: Vec<Value> },
}

impl Leaf {
    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl FieldValue) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value: value.to_value(),
        }
    }

    // --- Field vs literal ---

    pub fn eq(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl FieldValue) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    // --- Membership ---

    pub fn in_list<I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        Self::Compare {
            field: field.into(),
            op: CompareOp::In,
            value: Value::list(values),
        }
    }

    pub fn not_in_list<I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        Self::Compare {
            field: field.into(),
            op: CompareOp::NotIn,
            value: Value::list(values),
        }
    }

    // --- Field vs field ---

    pub fn compare_fields(left: impl Into<String>, op: CompareOp, right: impl Into<String>) -> Self {
        Self::CompareFields {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    // --- Text ---

    /// Pattern match; `None` yields no leaf at all.
    #[must_use]
    pub fn like(
        field: impl Into<String>,
        pattern: Option<&str>,
        mode: MatchMode,
        text: TextMode,
    ) -> Option<Self> {
        pattern.map(|pattern| Self::Like {
            field: field.into(),
            pattern: pattern.to_string(),
            mode,
            text,
        })
    }

    // --- Escape hatch ---

    pub fn raw(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self::Raw {
            sql: sql.into(),
            params,
        }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Leaf(Leaf),
    Subquery(SubqueryLeaf),
    Not(Box<Self>),
    And(Vec<Self>),
    Or(Vec<Self>),

    /// Output of a closed nested block.
    Group(Box<Self>),
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub fn group(pred: Self) -> Self {
        Self::Group(Box::new(pred))
    }

    /// Immediate children in attachment order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::And(children) | Self::Or(children) => children,
            Self::Not(inner) | Self::Group(inner) => std::slice::from_ref(inner.as_ref()),
            Self::Leaf(_) | Self::Subquery(_) => &[],
        }
    }

    /// Number of edges on the longest path to a terminal node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl From<Leaf> for Predicate {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<SubqueryLeaf> for Predicate {
    fn from(leaf: SubqueryLeaf) -> Self {
        Self::Subquery(leaf)
    }
}
