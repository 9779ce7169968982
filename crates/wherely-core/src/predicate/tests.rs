use super::*;
use crate::value::{TextMode, Value};

fn single_column() -> Subquery {
    Subquery::new("Order").alias("o").select("o.customer_id")
}

// ---- leaves ------------------------------------------------------------

#[test]
fn compare_leaf_carries_field_op_and_value() {
    let leaf = Leaf::gte("age", 18);

    assert_eq!(
        leaf,
        Leaf::Compare {
            field: "age".to_string(),
            op: CompareOp::Gte,
            value: Value::Int(18),
        }
    );
}

#[test]
fn membership_leaves_wrap_values_in_a_list() {
    let Leaf::Compare { op, value, .. } = Leaf::not_in_list("status", ["A", "B"]) else {
        panic!("expected compare leaf");
    };

    assert_eq!(op, CompareOp::NotIn);
    assert!(op.is_membership());
    assert_eq!(
        value,
        Value::List(vec![
            Value::Text("A".to_string()),
            Value::Text("B".to_string()),
        ])
    );
}

#[test]
fn like_without_pattern_is_omitted() {
    assert_eq!(
        Leaf::like("name", None, MatchMode::Anywhere, TextMode::Ci),
        None
    );

    let leaf = Leaf::like("name", Some("ice"), MatchMode::Start, TextMode::Cs);
    assert!(matches!(
        leaf,
        Some(Leaf::Like { ref pattern, mode: MatchMode::Start, text: TextMode::Cs, .. })
            if pattern == "ice"
    ));
}

#[test]
fn match_mode_anchors_pattern() {
    assert_eq!(MatchMode::Exact.apply("ab"), "ab");
    assert_eq!(MatchMode::Start.apply("ab"), "ab%");
    assert_eq!(MatchMode::End.apply("ab"), "%ab");
    assert_eq!(MatchMode::Anywhere.apply("ab"), "%ab%");
}

// ---- combinators -------------------------------------------------------

#[test]
fn combinator_completes_on_second_child() {
    let mut and = Combinator::new(CombinatorKind::And, 1);
    assert!(!and.is_complete());
    assert_eq!(and.last_child(), Some(&1));

    and.append(2);
    assert!(and.is_complete());
    assert_eq!(and.last_child(), Some(&2));
    assert_eq!(and.len(), 2);
}

#[test]
fn combinator_map_last_rewrites_only_the_tail() {
    let mut or = Combinator::new(CombinatorKind::Or, 1);
    or.append(2);
    or.map_last(|last| last * 10);

    assert_eq!(or.into_children(), vec![1, 20]);
}

#[test]
fn combinator_folds_without_flattening() {
    let inner = Combinator::new(CombinatorKind::And, Predicate::Leaf(Leaf::eq("a", 1)));
    let mut outer = Combinator::new(CombinatorKind::And, inner.into_predicate());
    outer.append(Predicate::Leaf(Leaf::eq("b", 2)));

    assert_eq!(
        outer.into_predicate(),
        Predicate::And(vec![
            Predicate::And(vec![Predicate::Leaf(Leaf::eq("a", 1))]),
            Predicate::Leaf(Leaf::eq("b", 2)),
        ])
    );
}

#[test]
fn combinator_try_map_stops_at_first_error() {
    let mut and = Combinator::new(CombinatorKind::And, 1);
    and.append(-1);
    and.append(3);

    let mapped: Result<Combinator<u32>, i32> =
        and.try_map(|n| u32::try_from(n).map_err(|_| n));

    assert_eq!(mapped, Err(-1));
}

#[test]
fn predicate_depth_counts_longest_path() {
    let tree = Predicate::or(vec![
        Predicate::Leaf(Leaf::eq("a", 1)),
        Predicate::group(Predicate::not(Predicate::Leaf(Leaf::eq("b", 2)))),
    ]);

    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.children().len(), 2);
}

// ---- subquery leaves ---------------------------------------------------

#[test]
fn exists_accepts_a_bare_subquery() {
    let leaf = SubqueryLeaf::exists(single_column()).expect("exists leaf");

    assert_eq!(leaf.op(), SubqueryOperator::Exists);
    assert_eq!(leaf.value(), None);
    assert_eq!(leaf.field(), None);
    assert_eq!(leaf.subquery().entity(), "Order");
}

#[test]
fn value_operator_without_value_is_rejected() {
    let err = SubqueryLeaf::try_new(
        SubqueryOperator::Eq,
        None,
        None,
        single_column(),
        ArgumentPolicy::Strict,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConstructionError::MissingValue {
            op: SubqueryOperator::Eq
        }
    );
}

#[test]
fn null_value_counts_as_missing() {
    let err = SubqueryLeaf::try_new(
        SubqueryOperator::Lt,
        Some(Value::Null),
        None,
        single_column(),
        ArgumentPolicy::Strict,
    )
    .unwrap_err();

    assert!(matches!(err, ConstructionError::MissingValue { .. }));
}

#[test]
fn field_operator_without_field_is_rejected() {
    let err = SubqueryLeaf::try_new(
        SubqueryOperator::FieldEq,
        None,
        None,
        single_column(),
        ArgumentPolicy::Strict,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConstructionError::MissingField {
            op: SubqueryOperator::FieldEq
        }
    );
}

#[test]
fn value_on_field_operator_is_rejected() {
    let err = SubqueryLeaf::try_new(
        SubqueryOperator::FieldIn,
        Some(Value::Int(1)),
        Some("id".to_string()),
        single_column(),
        ArgumentPolicy::Strict,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConstructionError::ValueNotAllowed {
            op: SubqueryOperator::FieldIn
        }
    );
}

#[test]
fn field_on_value_operator_is_rejected() {
    let err = SubqueryLeaf::try_new(
        SubqueryOperator::Gt,
        Some(Value::Int(1)),
        Some("id".to_string()),
        single_column(),
        ArgumentPolicy::Strict,
    )
    .unwrap_err();

    assert!(matches!(err, ConstructionError::FieldNotAllowed { .. }));
}

#[test]
fn two_projections_are_rejected() {
    let subquery = Subquery::new("Order").select("id").select("total");
    let err = SubqueryLeaf::exists(subquery).unwrap_err();

    assert_eq!(err, ConstructionError::ProjectionCount { count: 2 });
    assert!(
        err.to_string()
            .starts_with("subquery must have exactly one projection")
    );
}

#[test]
fn zero_projections_are_rejected() {
    let err = SubqueryLeaf::not_exists(Subquery::new("Order")).unwrap_err();

    assert_eq!(err, ConstructionError::ProjectionCount { count: 0 });
}

#[test]
fn exists_with_stray_value_depends_on_policy() {
    let strict = SubqueryLeaf::try_new(
        SubqueryOperator::Exists,
        Some(Value::Int(1)),
        None,
        single_column(),
        ArgumentPolicy::Strict,
    );
    assert_eq!(
        strict.unwrap_err(),
        ConstructionError::ValueNotAllowed {
            op: SubqueryOperator::Exists
        }
    );

    let permissive = SubqueryLeaf::try_new(
        SubqueryOperator::NotExists,
        Some(Value::Int(1)),
        Some("id".to_string()),
        single_column(),
        ArgumentPolicy::Permissive,
    )
    .expect("permissive exists");
    assert_eq!(permissive.value(), None);
    assert_eq!(permissive.field(), None);
}

#[test]
fn permissive_policy_still_checks_operand_operators() {
    let err = SubqueryLeaf::try_new(
        SubqueryOperator::Eq,
        None,
        Some("id".to_string()),
        single_column(),
        ArgumentPolicy::Permissive,
    )
    .unwrap_err();

    assert!(matches!(err, ConstructionError::FieldNotAllowed { .. }));
}

#[test]
fn operator_operands_partition_the_tags() {
    use SubqueryOperator as Op;

    let none = [Op::Exists, Op::NotExists];
    let value = [Op::Eq, Op::Ne, Op::Gt, Op::Gte, Op::Lt, Op::Lte];
    let field = [
        Op::FieldEq,
        Op::FieldNe,
        Op::FieldGt,
        Op::FieldGte,
        Op::FieldLt,
        Op::FieldLte,
        Op::FieldIn,
        Op::FieldNotIn,
    ];

    assert!(none.iter().all(|op| op.operand() == SubqueryOperand::None));
    assert!(value.iter().all(|op| op.operand() == SubqueryOperand::Value));
    assert!(field.iter().all(|op| op.operand() == SubqueryOperand::Field));
}
