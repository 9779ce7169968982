//! Compile step: resolve a scope arena into one immutable `Predicate`.

use crate::{
    error::WhereError,
    predicate::Predicate,
    scope::{ScopeId, SyntaxError, UsageError, node::Node, state::Scope},
};

/// Consume the arena and compile from the root scope.
pub(crate) fn compile_root(scopes: Vec<Scope>) -> Result<Predicate, WhereError> {
    let mut slots: Vec<Option<Scope>> = scopes.into_iter().map(Some).collect();

    compile_scope(&mut slots, ScopeId::ROOT)
}

fn compile_scope(slots: &mut [Option<Scope>], id: ScopeId) -> Result<Predicate, WhereError> {
    // Each group node is attached exactly once, so a scope is only taken once.
    let Some(scope) = slots.get_mut(id.index()).and_then(Option::take) else {
        return Err(UsageError::UnknownScope { scope: id }.into());
    };

    let Some(root) = scope.root else {
        return Err(SyntaxError::EmptyExpression { scope: id }.into());
    };
    if scope.parent.is_some() && !scope.ended {
        return Err(SyntaxError::UnterminatedGroup { scope: id }.into());
    }
    let open = scope.enabled.open_levels();
    if open > 0 {
        return Err(UsageError::UnclosedConditional { scope: id, open }.into());
    }

    compile_node(slots, root)
}

fn compile_node(slots: &mut [Option<Scope>], node: Node) -> Result<Predicate, WhereError> {
    match node {
        Node::Predicate(predicate) => Ok(predicate),
        Node::Not(None) => Err(SyntaxError::NegationWithoutOperand.into()),
        Node::Not(Some(target)) => Ok(Predicate::not(compile_node(slots, *target)?)),
        Node::Combinator(combinator) => Ok(combinator
            .try_map(|child| compile_node(slots, child))?
            .into_predicate()),
        Node::Group(id) => Ok(Predicate::group(compile_scope(slots, id)?)),
    }
}
