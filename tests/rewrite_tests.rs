// tests/rewrite_tests.rs

use std::sync::Arc;

use treexl::ast::{Binary, Expr, ExprRef, Identifier, Literal};
use treexl::rewrite::{Rewriter, rewrite_list};
use treexl::rewriters::{IdentifierCase, LiteralToParameter};
use treexl::visitor::ReferencedNames;
use treexl::{Options, Treexl, Value, parse};

/// Leaves every node alone.
struct Identity;

impl Rewriter for Identity {}

/// Replaces the integer literal `2` with `20`.
struct BumpTwo;

impl Rewriter for BumpTwo {
    fn rewrite_literal(&mut self, expr: &ExprRef, literal: &Literal) -> ExprRef {
        if literal.value == Value::Integer(2) {
            Expr::literal(20)
        } else {
            expr.clone()
        }
    }
}

/// Turns every identifier into the literal `0`.
struct IdentifierToZero;

impl Rewriter for IdentifierToZero {
    fn rewrite_identifier(&mut self, _expr: &ExprRef, _identifier: &Identifier) -> ExprRef {
        Expr::literal(0)
    }
}

fn binary(expr: &ExprRef) -> &Binary {
    match expr.as_ref() {
        Expr::Binary(binary) => binary,
        other => panic!("Expected binary, got {:?}", other),
    }
}

// ============================================================================
// Identity and minimal rebuild
// ============================================================================

#[test]
fn test_identity_rewrite_returns_same_root() {
    let inputs = [
        "a = 1 and (b <> 'x' or c in (1, 2, 3))",
        "not f(x, :p) and y in 1..10",
        "-1",
    ];
    for input in inputs {
        let tree = parse(input).unwrap();
        assert!(Arc::ptr_eq(&tree.rewrite(&mut Identity), &tree), "input: {}", input);
    }
}

#[test]
fn test_untouched_sibling_is_shared() {
    let tree = parse("(a = 1) and (b = 2)").unwrap();
    let rewritten = tree.rewrite(&mut BumpTwo);

    assert_eq!(rewritten, parse("(a = 1) and (b = 20)").unwrap());
    assert!(!Arc::ptr_eq(&tree, &rewritten));
    assert!(Arc::ptr_eq(&binary(&tree).left, &binary(&rewritten).left));
    assert!(!Arc::ptr_eq(&binary(&tree).right, &binary(&rewritten).right));
}

#[test]
fn test_input_tree_is_unchanged() {
    let tree = parse("a = 2").unwrap();
    let before = (*tree).clone();
    let _ = tree.rewrite(&mut BumpTwo);
    assert_eq!(*tree, before);
}

#[test]
fn test_rewrite_list_shares_prefix_and_untouched_tail() {
    let list = vec![Expr::literal(1), Expr::literal(2), Expr::literal(3)];
    let rewritten = rewrite_list(&mut BumpTwo, &list).unwrap();

    assert_eq!(rewritten, vec![Expr::literal(1), Expr::literal(20), Expr::literal(3)]);
    assert!(Arc::ptr_eq(&list[0], &rewritten[0]));
    assert!(!Arc::ptr_eq(&list[1], &rewritten[1]));
    assert!(Arc::ptr_eq(&list[2], &rewritten[2]));
}

#[test]
fn test_rewrite_list_unchanged() {
    let list = vec![Expr::literal(1), Expr::literal(3)];
    assert!(rewrite_list(&mut BumpTwo, &list).is_none());
}

#[test]
fn test_in_list_rewritten_in_place() {
    let tree = parse("x in (1, 2, 3)").unwrap();
    let rewritten = tree.rewrite(&mut BumpTwo);
    assert_eq!(rewritten, parse("x in (1, 20, 3)").unwrap());
    assert!(Arc::ptr_eq(&binary(&tree).left, &binary(&rewritten).left));
}

#[test]
fn test_call_arguments_rewritten() {
    let tree = parse("f(1, 2)").unwrap();
    assert_eq!(tree.rewrite(&mut BumpTwo), parse("f(1, 20)").unwrap());
}

#[test]
fn test_unchanged_callee_is_shared() {
    let tree = parse("f(2)").unwrap();
    let rewritten = tree.rewrite(&mut BumpTwo);

    let (Expr::Call(before), Expr::Call(after)) = (tree.as_ref(), rewritten.as_ref()) else {
        panic!("Expected calls, got {:?} and {:?}", tree, rewritten);
    };
    assert_eq!(rewritten, parse("f(20)").unwrap());
    assert!(Arc::ptr_eq(&before.callee, &after.callee));
}

#[test]
fn test_callee_replaced_by_non_identifier_is_kept() {
    let tree = parse("f(a)").unwrap();
    assert_eq!(tree.rewrite(&mut IdentifierToZero), parse("f(0)").unwrap());
}

// ============================================================================
// LiteralToParameter
// ============================================================================

#[test]
fn test_literal_to_parameter() {
    let mut values = Vec::new();
    let mut pass = LiteralToParameter::with_namer(|_, value: &Value| {
        values.push(value.clone());
        format!("_{}", values.len())
    });

    let rewritten = parse("A > 1 and (B <> '2' or C = null)")
        .unwrap()
        .rewrite(&mut pass);

    assert_eq!(rewritten, parse("A > :_1 and (B <> :_2 or C = :_3)").unwrap());
    assert_eq!(pass.values(), &[Value::Integer(1), Value::from("2"), Value::Null]);
    drop(pass);
    assert_eq!(values, vec![Value::Integer(1), Value::from("2"), Value::Null]);
}

#[test]
fn test_literal_to_parameter_default_names() {
    let mut pass = LiteralToParameter::new();
    let rewritten = parse("c = 1 or c = '2'").unwrap().rewrite(&mut pass);

    assert_eq!(rewritten, parse("c = :_1 or c = :_2").unwrap());
    assert_eq!(pass.into_values(), vec![Value::Integer(1), Value::from("2")]);
}

#[test]
fn test_literal_to_parameter_keeps_existing_parameters() {
    let mut pass = LiteralToParameter::new();
    let rewritten = parse("a = :x and b = 5").unwrap().rewrite(&mut pass);

    assert_eq!(rewritten, parse("a = :x and b = :_1").unwrap());
    assert_eq!(pass.values(), &[Value::Integer(5)]);
}

#[test]
fn test_literal_to_parameter_without_literals() {
    let tree = parse("a = b").unwrap();
    let mut pass = LiteralToParameter::new();
    assert!(Arc::ptr_eq(&tree.rewrite(&mut pass), &tree));
    assert!(pass.values().is_empty());
}

// ============================================================================
// IdentifierCase
// ============================================================================

#[test]
fn test_identifier_upper_case() {
    let tree = parse("a = B and c < D").unwrap();
    let rewritten = tree.rewrite(&mut IdentifierCase::upper());
    assert_eq!(rewritten, parse("A = B and C < D").unwrap());
}

#[test]
fn test_identifier_case_renames_callee() {
    let tree = parse("LOWER(Name) = 'x'").unwrap();
    let rewritten = tree.rewrite(&mut IdentifierCase::lower());
    assert_eq!(rewritten, parse("lower(name) = 'x'").unwrap());
}

#[test]
fn test_identifier_case_already_normalized() {
    let tree = parse("A = 1 and B.C = 2").unwrap();
    assert!(Arc::ptr_eq(&tree.rewrite(&mut IdentifierCase::upper()), &tree));
}

// ============================================================================
// Options pipeline
// ============================================================================

#[test]
fn test_options_apply_passes_in_order() {
    let mut literals = LiteralToParameter::new();
    let mut treexl = Treexl::new(
        Options::new()
            .with_rewriter(IdentifierCase::upper())
            .with_rewriter(&mut literals),
    );

    let tree = treexl.parse("a = 1 or b in (2, 3)").unwrap();
    assert_eq!(tree, parse("A = :_1 or B in (:_2, :_3)").unwrap());

    drop(treexl);
    assert_eq!(
        literals.into_values(),
        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]
    );
}

#[test]
fn test_passes_see_previous_output() {
    let mut treexl = Treexl::new(
        Options::new()
            .with_rewriter(BumpTwo)
            .with_rewriter(LiteralToParameter::with_namer(|_, value: &Value| {
                format!("v{}", value)
            })),
    );

    assert_eq!(treexl.parse("x = 2").unwrap(), parse("x = :v20").unwrap());
}

// ============================================================================
// Visitor
// ============================================================================

#[test]
fn test_referenced_names() {
    let tree = parse("a = :p and f(b, a) > 1 or c.d in (:q, :p)").unwrap();
    let names = ReferencedNames::collect(&tree);

    assert_eq!(names.identifiers, vec!["a", "b", "c.d"]);
    assert_eq!(names.parameters, vec!["p", "q"]);
}
