//! Module: scope
//! Responsibility: fluent construction of a filter tree, block nesting,
//! conditional inclusion, and the structural checks that make a chain valid.
//! Does not own: leaf semantics or subquery validation (see `predicate`).
//! Boundary: `Where::compile` is the only way a finished tree leaves here.

mod compile;
mod node;
mod state;


use crate::{
    config::WhereConfig,
    error::WhereError,
    predicate::{
        CombinatorKind, CompareOp, Leaf, MatchMode, Predicate, Subquery, SubqueryLeaf,
        SubqueryOperator,
    },
    value::{FieldValue, Value},
};
use derive_more::Display;
use node::{Node, Trailing};
use state::Scope;
use thiserror::Error as ThisError;
use tracing::{debug, instrument, trace};

///
/// ScopeId
///
/// Index of a scope inside its builder's arena. The root scope is always 0.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("scope#{_0}")]
pub struct ScopeId(usize);

impl ScopeId {
    pub const ROOT: Self = Self(0);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// Where
///
/// Fluent filter builder. Calls read left to right the way the condition is
/// spoken: `eq(..).and().eq(..)`, `not().eq(..)`, with `block_begin` /
/// `block_end` standing in for parentheses and `if_begin` / `if_end`
/// switching whole fragments on or off.
///
/// Scopes live in an arena owned by the builder; the cursor names the one
/// receiving calls. Every call consumes the builder and hands it back, or
/// fails with the error that makes the chain unusable.
///

#[derive(Debug)]
pub struct Where {
    scopes: Vec<Scope>,
    cursor: ScopeId,
    config: WhereConfig,
}

impl Where {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WhereConfig::default())
    }

    #[must_use]
    pub fn with_config(config: WhereConfig) -> Self {
        Self {
            scopes: vec![Scope::new(None)],
            cursor: ScopeId::ROOT,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &WhereConfig {
        &self.config
    }

    /// Scope currently receiving calls.
    #[must_use]
    pub const fn current_scope(&self) -> ScopeId {
        self.cursor
    }

    /// Whether calls on the current scope take effect.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.scope().enabled.is_enabled()
    }

    /// Move the cursor to a scope handed out earlier by `current_scope`.
    pub fn enter(mut self, scope: ScopeId) -> Result<Self, WhereError> {
        if scope.index() >= self.scopes.len() {
            return Err(UsageError::UnknownScope { scope }.into());
        }
        self.cursor = scope;

        Ok(self)
    }

    // ------------------------------------------------------------------
    // Field vs literal
    // ------------------------------------------------------------------

    pub fn eq(self, field: impl Into<String>, value: impl FieldValue) -> Result<Self, WhereError> {
        self.leaf(Leaf::eq(field, value))
    }

    pub fn ne(self, field: impl Into<String>, value: impl FieldValue) -> Result<Self, WhereError> {
        self.leaf(Leaf::ne(field, value))
    }

    pub fn gt(self, field: impl Into<String>, value: impl FieldValue) -> Result<Self, WhereError> {
        self.leaf(Leaf::gt(field, value))
    }

    pub fn gte(self, field: impl Into<String>, value: impl FieldValue) -> Result<Self, WhereError> {
        self.leaf(Leaf::gte(field, value))
    }

    pub fn lt(self, field: impl Into<String>, value: impl FieldValue) -> Result<Self, WhereError> {
        self.leaf(Leaf::lt(field, value))
    }

    pub fn lte(self, field: impl Into<String>, value: impl FieldValue) -> Result<Self, WhereError> {
        self.leaf(Leaf::lte(field, value))
    }

    pub fn in_list<I>(self, field: impl Into<String>, values: I) -> Result<Self, WhereError>
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        self.leaf(Leaf::in_list(field, values))
    }

    pub fn not_in_list<I>(self, field: impl Into<String>, values: I) -> Result<Self, WhereError>
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        self.leaf(Leaf::not_in_list(field, values))
    }

    // ------------------------------------------------------------------
    // Field vs field
    // ------------------------------------------------------------------

    pub fn eq_field(
        self,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<Self, WhereError> {
        self.leaf(Leaf::compare_fields(left, CompareOp::Eq, right))
    }

    pub fn ne_field(
        self,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<Self, WhereError> {
        self.leaf(Leaf::compare_fields(left, CompareOp::Ne, right))
    }

    pub fn gt_field(
        self,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<Self, WhereError> {
        self.leaf(Leaf::compare_fields(left, CompareOp::Gt, right))
    }

    pub fn gte_field(
        self,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<Self, WhereError> {
        self.leaf(Leaf::compare_fields(left, CompareOp::Gte, right))
    }

    pub fn lt_field(
        self,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<Self, WhereError> {
        self.leaf(Leaf::compare_fields(left, CompareOp::Lt, right))
    }

    pub fn lte_field(
        self,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<Self, WhereError> {
        self.leaf(Leaf::compare_fields(left, CompareOp::Lte, right))
    }

    // ------------------------------------------------------------------
    // Text and raw expressions
    // ------------------------------------------------------------------

    /// Pattern match using the configured match mode and case handling.
    /// A `None` pattern adds nothing.
    pub fn like(self, field: impl Into<String>, pattern: Option<&str>) -> Result<Self, WhereError> {
        let mode = self.config.like_mode;
        self.like_with(field, pattern, mode)
    }

    pub fn like_with(
        self,
        field: impl Into<String>,
        pattern: Option<&str>,
        mode: MatchMode,
    ) -> Result<Self, WhereError> {
        match Leaf::like(field, pattern, mode, self.config.like_text) {
            Some(leaf) => self.leaf(leaf),
            None => Ok(self),
        }
    }

    pub fn sql(self, fragment: impl Into<String>) -> Result<Self, WhereError> {
        self.leaf(Leaf::raw(fragment, Vec::new()))
    }

    pub fn sql_with(
        self,
        fragment: impl Into<String>,
        params: Vec<Value>,
    ) -> Result<Self, WhereError> {
        self.leaf(Leaf::raw(fragment, params))
    }

    /// Attach a prebuilt predicate as a single operand.
    pub fn condition(self, predicate: impl Into<Predicate>) -> Result<Self, WhereError> {
        self.attach_predicate(predicate.into())
    }

    // ------------------------------------------------------------------
    // Subqueries
    // ------------------------------------------------------------------

    pub fn exists(self, subquery: Subquery) -> Result<Self, WhereError> {
        self.subquery_leaf(SubqueryOperator::Exists, None, None, subquery)
    }

    pub fn not_exists(self, subquery: Subquery) -> Result<Self, WhereError> {
        self.subquery_leaf(SubqueryOperator::NotExists, None, None, subquery)
    }

    pub fn eq_subquery(self, value: impl FieldValue, subquery: Subquery) -> Result<Self, WhereError> {
        self.value_subquery(SubqueryOperator::Eq, &value, subquery)
    }

    pub fn ne_subquery(self, value: impl FieldValue, subquery: Subquery) -> Result<Self, WhereError> {
        self.value_subquery(SubqueryOperator::Ne, &value, subquery)
    }

    pub fn gt_subquery(self, value: impl FieldValue, subquery: Subquery) -> Result<Self, WhereError> {
        self.value_subquery(SubqueryOperator::Gt, &value, subquery)
    }

    pub fn gte_subquery(
        self,
        value: impl FieldValue,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.value_subquery(SubqueryOperator::Gte, &value, subquery)
    }

    pub fn lt_subquery(self, value: impl FieldValue, subquery: Subquery) -> Result<Self, WhereError> {
        self.value_subquery(SubqueryOperator::Lt, &value, subquery)
    }

    pub fn lte_subquery(
        self,
        value: impl FieldValue,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.value_subquery(SubqueryOperator::Lte, &value, subquery)
    }

    pub fn eq_field_subquery(
        self,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.field_subquery(SubqueryOperator::FieldEq, field, subquery)
    }

    pub fn ne_field_subquery(
        self,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.field_subquery(SubqueryOperator::FieldNe, field, subquery)
    }

    pub fn gt_field_subquery(
        self,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.field_subquery(SubqueryOperator::FieldGt, field, subquery)
    }

    pub fn gte_field_subquery(
        self,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.field_subquery(SubqueryOperator::FieldGte, field, subquery)
    }

    pub fn lt_field_subquery(
        self,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.field_subquery(SubqueryOperator::FieldLt, field, subquery)
    }

    pub fn lte_field_subquery(
        self,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.field_subquery(SubqueryOperator::FieldLte, field, subquery)
    }

    pub fn in_subquery(
        self,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.field_subquery(SubqueryOperator::FieldIn, field, subquery)
    }

    pub fn not_in_subquery(
        self,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.field_subquery(SubqueryOperator::FieldNotIn, field, subquery)
    }

    /// Attach a subquery leaf for any operator. Validation runs only while
    /// the current scope is enabled.
    pub fn subquery_leaf(
        self,
        op: SubqueryOperator,
        value: Option<Value>,
        field: Option<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        if !self.is_enabled() {
            return Ok(self);
        }
        let policy = self.config.subquery_arguments;
        let leaf = SubqueryLeaf::try_new(op, value, field, subquery, policy)?;

        self.attach_predicate(Predicate::Subquery(leaf))
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Negate whatever is attached next.
    pub fn not(mut self) -> Result<Self, WhereError> {
        self.attach(Node::Not(None))?;

        Ok(self)
    }

    pub fn and(self) -> Result<Self, WhereError> {
        self.operator(CombinatorKind::And)
    }

    pub fn or(self) -> Result<Self, WhereError> {
        self.operator(CombinatorKind::Or)
    }

    /// Open a nested group; the cursor moves into it. A no-op while disabled.
    pub fn block_begin(mut self) -> Result<Self, WhereError> {
        if !self.is_enabled() {
            return Ok(self);
        }
        let parent = self.cursor;
        let child = ScopeId(self.scopes.len());

        self.attach(Node::Group(child))?;
        self.scopes.push(Scope::new(Some(parent)));
        self.cursor = child;
        trace!(scope = %child, parent = %parent, "block opened");

        Ok(self)
    }

    /// Close the current scope and return the cursor to its parent.
    /// Ending the root scope leaves the cursor in place; ending an already
    /// ended scope only moves the cursor again. A no-op while disabled.
    pub fn block_end(mut self) -> Result<Self, WhereError> {
        if !self.is_enabled() {
            return Ok(self);
        }
        let id = self.cursor;

        let scope = self.scope_mut();
        scope.ended = true;
        let parent = scope.parent;
        if let Some(parent) = parent {
            self.cursor = parent;
        }
        trace!(scope = %id, "block closed");

        Ok(self)
    }

    /// Push a conditional level; calls take effect only while every level
    /// on the current scope is true.
    #[must_use]
    pub fn if_begin(mut self, condition: bool) -> Self {
        let scope = self.scope_mut();
        scope.enabled.push(condition);
        trace!(
            scope = %self.cursor,
            condition,
            enabled = self.is_enabled(),
            "conditional opened"
        );

        self
    }

    pub fn if_end(mut self) -> Result<Self, WhereError> {
        let scope = self.cursor;
        if !self.scope_mut().enabled.pop() {
            return Err(UsageError::UnbalancedIfEnd { scope }.into());
        }
        trace!(scope = %scope, "conditional closed");

        Ok(self)
    }

    // ------------------------------------------------------------------
    // Compile
    // ------------------------------------------------------------------

    /// Resolve the whole builder, starting at the root scope, into one tree.
    #[instrument(level = "trace", skip(self))]
    pub fn compile(self) -> Result<Predicate, WhereError> {
        let scopes = self.scopes.len();
        let predicate = compile::compile_root(self.scopes)?;
        debug!(scopes, depth = predicate.depth(), "where expression compiled");

        Ok(predicate)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn scope(&self) -> &Scope {
        &self.scopes[self.cursor.index()]
    }

    fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scopes[self.cursor.index()]
    }

    fn ensure_open(&self, scope: ScopeId) -> Result<(), SyntaxError> {
        if self.scopes[scope.index()].ended {
            return Err(SyntaxError::ScopeEnded { scope });
        }

        Ok(())
    }

    fn leaf(self, leaf: Leaf) -> Result<Self, WhereError> {
        self.attach_predicate(Predicate::Leaf(leaf))
    }

    fn attach_predicate(mut self, predicate: Predicate) -> Result<Self, WhereError> {
        self.attach(Node::Predicate(predicate))?;

        Ok(self)
    }

    fn value_subquery(
        self,
        op: SubqueryOperator,
        value: &impl FieldValue,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.subquery_leaf(op, Some(value.to_value()), None, subquery)
    }

    fn field_subquery(
        self,
        op: SubqueryOperator,
        field: impl Into<String>,
        subquery: Subquery,
    ) -> Result<Self, WhereError> {
        self.subquery_leaf(op, None, Some(field.into()), subquery)
    }

    fn attach(&mut self, node: Node) -> Result<(), WhereError> {
        if !self.is_enabled() {
            return Ok(());
        }
        self.ensure_open(self.cursor)?;
        self.scope_mut().attach(node)?;

        Ok(())
    }

    fn operator(mut self, kind: CombinatorKind) -> Result<Self, WhereError> {
        if !self.is_enabled() {
            return Ok(self);
        }
        self.ensure_open(self.cursor)?;

        let Some(root) = self.scope().root.as_ref() else {
            return Err(SyntaxError::MissingLeftOperand { operator: kind }.into());
        };
        match root.trailing() {
            Trailing::Operand => {}
            Trailing::PendingNegation => return Err(SyntaxError::NegationWithoutOperand.into()),
            Trailing::Group(group) => {
                let group = &self.scopes[group.index()];
                if group.is_empty() {
                    return Err(SyntaxError::MissingLeftOperand { operator: kind }.into());
                }
                if !group.ended {
                    return Err(SyntaxError::GroupNotClosed.into());
                }
            }
        }

        self.scope_mut().wrap(kind);
        trace!(scope = %self.cursor, operator = %kind, "operator applied");

        Ok(self)
    }
}

impl Default for Where {
    fn default() -> Self {
        Self::new()
    }
}

///
/// SyntaxError
///
/// Call sequences that cannot form a tree. Detected at the offending call,
/// except the empty and unterminated checks which only `compile` can see.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SyntaxError {
    #[error("empty expression in {scope}")]
    EmptyExpression { scope: ScopeId },

    #[error("unterminated group: {scope} was never closed")]
    UnterminatedGroup { scope: ScopeId },

    #[error("group not closed")]
    GroupNotClosed,

    #[error("{operator} operator needs a left operand")]
    MissingLeftOperand { operator: CombinatorKind },

    #[error("two operands without a connecting operator")]
    MissingConnective,

    #[error("negation has no operand")]
    NegationWithoutOperand,

    #[error("{scope} has already ended")]
    ScopeEnded { scope: ScopeId },
}

///
/// UsageError
///
/// Caller contract violations around conditional levels and scope handles.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum UsageError {
    #[error("if_end without a matching if_begin in {scope}")]
    UnbalancedIfEnd { scope: ScopeId },

    #[error("{open} conditional level(s) left open in {scope}")]
    UnclosedConditional { scope: ScopeId, open: usize },

    #[error("unknown {scope}")]
    UnknownScope { scope: ScopeId },
}
