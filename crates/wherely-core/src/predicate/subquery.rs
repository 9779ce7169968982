use crate::{error::WhereError, predicate::model::Predicate, scope::Where, value::Value};
use std::fmt;
use thiserror::Error as ThisError;

///
/// SubqueryOperand
///
/// Which outer-query operand an operator compares against the subquery.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubqueryOperand {
    None,
    Value,
    Field,
}

///
/// SubqueryOperator
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubqueryOperator {
    Exists,
    NotExists,

    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,

    FieldEq,
    FieldNe,
    FieldGt,
    FieldGte,
    FieldLt,
    FieldLte,
    FieldIn,
    FieldNotIn,
}

impl SubqueryOperator {
    #[must_use]
    pub const fn operand(self) -> SubqueryOperand {
        match self {
            Self::Exists | Self::NotExists => SubqueryOperand::None,
            Self::Eq | Self::Ne | Self::Gt | Self::Gte | Self::Lt | Self::Lte => {
                SubqueryOperand::Value
            }
            Self::FieldEq
            | Self::FieldNe
            | Self::FieldGt
            | Self::FieldGte
            | Self::FieldLt
            | Self::FieldLte
            | Self::FieldIn
            | Self::FieldNotIn => SubqueryOperand::Field,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Exists => "EXISTS",
            Self::NotExists => "NOT_EXISTS",
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Gt => "GT",
            Self::Gte => "GTE",
            Self::Lt => "LT",
            Self::Lte => "LTE",
            Self::FieldEq => "FIELD_EQ",
            Self::FieldNe => "FIELD_NE",
            Self::FieldGt => "FIELD_GT",
            Self::FieldGte => "FIELD_GTE",
            Self::FieldLt => "FIELD_LT",
            Self::FieldLte => "FIELD_LTE",
            Self::FieldIn => "FIELD_IN",
            Self::FieldNotIn => "FIELD_NOT_IN",
        }
    }
}

impl fmt::Display for SubqueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// ArgumentPolicy
///
/// How `Exists`/`NotExists` treat a stray value or field argument.
/// `Permissive` drops it silently; `Strict` rejects it like any other
/// operator would.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ArgumentPolicy {
    #[default]
    Strict,
    Permissive,
}

///
/// Subquery
///
/// Nested query fragment as seen by the filter builder: a source entity, its
/// output columns and an already-compiled filter. Projection and rendering
/// belong to the query-composition layer.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Subquery {
    entity: String,
    alias: Option<String>,
    columns: Vec<String>,
    filter: Option<Predicate>,
}

impl Subquery {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            alias: None,
            columns: Vec::new(),
            filter: None,
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Add one output column.
    #[must_use]
    pub fn select(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Predicate) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Compile `filter` and use it as this subquery's filter.
    pub fn filter(self, filter: Where) -> Result<Self, WhereError> {
        Ok(self.with_filter(filter.compile()?))
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn has_single_output_column(&self) -> bool {
        self.columns.len() == 1
    }

    #[must_use]
    pub const fn compiled_filter(&self) -> Option<&Predicate> {
        self.filter.as_ref()
    }
}

///
/// SubqueryLeaf
///
/// Leaf whose truth depends on a nested query. Validated on construction;
/// an instance always carries exactly the operand its operator needs.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SubqueryLeaf {
    op: SubqueryOperator,
    value: Option<Value>,
    field: Option<String>,
    subquery: Box<Subquery>,
}

impl SubqueryLeaf {
    /// Validate and build a subquery leaf.
    ///
    /// A `Value::Null` value counts as absent.
    pub fn try_new(
        op: SubqueryOperator,
        value: Option<Value>,
        field: Option<String>,
        subquery: Subquery,
        policy: ArgumentPolicy,
    ) -> Result<Self, ConstructionError> {
        if !subquery.has_single_output_column() {
            return Err(ConstructionError::ProjectionCount {
                count: subquery.columns.len(),
            });
        }

        let operand = op.operand();
        let mut value = value.filter(|v| !v.is_null());
        let mut field = field;
        if operand == SubqueryOperand::None && policy == ArgumentPolicy::Permissive {
            value = None;
            field = None;
        }

        if value.is_some() && operand != SubqueryOperand::Value {
            return Err(ConstructionError::ValueNotAllowed { op });
        }
        if field.is_some() && operand != SubqueryOperand::Field {
            return Err(ConstructionError::FieldNotAllowed { op });
        }
        if value.is_none() && operand == SubqueryOperand::Value {
            return Err(ConstructionError::MissingValue { op });
        }
        if field.is_none() && operand == SubqueryOperand::Field {
            return Err(ConstructionError::MissingField { op });
        }

        Ok(Self {
            op,
            value,
            field,
            subquery: Box::new(subquery),
        })
    }

    pub fn exists(subquery: Subquery) -> Result<Self, ConstructionError> {
        Self::try_new(
            SubqueryOperator::Exists,
            None,
            None,
            subquery,
            ArgumentPolicy::Strict,
        )
    }

    pub fn not_exists(subquery: Subquery) -> Result<Self, ConstructionError> {
        Self::try_new(
            SubqueryOperator::NotExists,
            None,
            None,
            subquery,
            ArgumentPolicy::Strict,
        )
    }

    #[must_use]
    pub const fn op(&self) -> SubqueryOperator {
        self.op
    }

    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    #[must_use]
    pub fn subquery(&self) -> &Subquery {
        &self.subquery
    }
}

///
/// ConstructionError
///
/// Malformed subquery leaf, reported when the leaf is built.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConstructionError {
    #[error("subquery must have exactly one projection (found {count})")]
    ProjectionCount { count: usize },

    #[error("operator {op} does not accept a value operand")]
    ValueNotAllowed { op: SubqueryOperator },

    #[error("operator {op} does not accept a field operand")]
    FieldNotAllowed { op: SubqueryOperator },

    #[error("operator {op} requires a value operand")]
    MissingValue { op: SubqueryOperator },

    #[error("operator {op} requires a field operand")]
    MissingField { op: SubqueryOperator },
}
