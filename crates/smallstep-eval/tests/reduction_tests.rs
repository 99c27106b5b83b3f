//! Single-step rule tests: one `reduce` call at a time, no machine.

use pretty_assertions::assert_eq;
use smallstep_eval::{EvalError, Reducible};
use smallstep_types::{Environment, Expression, Statement, Value};

fn n(v: i64) -> Expression {
    Expression::number(v)
}

fn var(name: &str) -> Expression {
    Expression::variable(name)
}

fn env(bindings: &[(&str, Value)]) -> Environment {
    bindings.iter().map(|(k, v)| (*k, *v)).collect()
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn terminals_are_not_reducible() {
    for terminal in [n(0), n(-5), Expression::boolean(true), Expression::boolean(false)] {
        assert!(!terminal.is_reducible());
        let err = terminal.reduce(&Environment::new()).unwrap_err();
        assert_eq!(
            err,
            EvalError::NonReducible {
                node: terminal.to_string()
            }
        );
    }
}

#[test]
fn variables_and_operators_are_always_reducible() {
    assert!(var("x").is_reducible());
    assert!(Expression::add(n(1), n(2)).is_reducible());
    assert!(Expression::multiply(n(1), n(2)).is_reducible());
    assert!(Expression::less_than(n(1), n(2)).is_reducible());
    assert!(Expression::greater_than(n(1), n(2)).is_reducible());
}

#[test]
fn variable_reduces_to_bound_value() {
    let e = env(&[("flag", Value::Boolean(true))]);
    assert_eq!(var("flag").reduce(&e).unwrap(), Expression::boolean(true));
}

#[test]
fn variable_lookup_fails_when_unbound() {
    let e = env(&[("x", Value::Number(1))]);
    assert_eq!(
        var("y").reduce(&e).unwrap_err(),
        EvalError::UnboundVariable { name: "y".into() }
    );
}

#[test]
fn errors_surface_from_nested_operands() {
    let e = Expression::add(n(1), Expression::multiply(var("missing"), n(2)));
    let err = e
        .reduce(&Environment::new())
        .and_then(|e| e.reduce(&Environment::new()))
        .unwrap_err();
    assert!(matches!(err, EvalError::UnboundVariable { .. }));
}

#[test]
fn comparison_of_booleans_is_type_mismatch() {
    let e = Expression::greater_than(Expression::boolean(true), Expression::boolean(false));
    let err = e.reduce(&Environment::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "type mismatch: cannot apply `>` to boolean and boolean"
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn assign_replaces_stale_binding() {
    let before = env(&[("x", Value::Boolean(false)), ("y", Value::Number(1))]);
    let (stmt, after) = Statement::assign("x", n(10)).reduce(&before).unwrap();

    assert_eq!(stmt, Statement::DoNothing);
    assert_eq!(
        after,
        env(&[("x", Value::Number(10)), ("y", Value::Number(1))])
    );
    // The input snapshot is unchanged.
    assert_eq!(before.get(&"x".into()), Some(Value::Boolean(false)));
}

#[test]
fn sequence_with_finished_head_yields_tail_in_one_step() {
    let tail = Statement::assign("y", Expression::add(var("x"), n(1)));
    let e = env(&[("x", Value::Number(4))]);
    let (stmt, after) = Statement::sequence(Statement::DoNothing, tail.clone())
        .reduce(&e)
        .unwrap();
    assert_eq!(stmt, tail);
    assert_eq!(after, e);
}

#[test]
fn while_unrolls_without_touching_condition() {
    let cond = Expression::less_than(var("x"), n(5));
    let body = Statement::assign("x", Expression::multiply(var("x"), n(3)));
    let w = Statement::while_loop(cond.clone(), body.clone());
    let e = env(&[("x", Value::Number(1))]);

    let (stmt, after) = w.reduce(&e).unwrap();
    assert_eq!(
        stmt,
        Statement::if_else(
            cond,
            Statement::sequence(body, w.clone()),
            Statement::DoNothing
        )
    );
    assert_eq!(after, e);
}

#[test]
fn while_unrolls_even_with_unbound_condition() {
    let w = Statement::while_loop(var("nowhere"), Statement::DoNothing);
    assert!(w.reduce(&Environment::new()).is_ok());
}

#[test]
fn every_compound_statement_is_reducible() {
    let stmts = [
        Statement::assign("x", n(1)),
        Statement::if_else(Expression::boolean(true), Statement::DoNothing, Statement::DoNothing),
        Statement::sequence(Statement::DoNothing, Statement::DoNothing),
        Statement::while_loop(Expression::boolean(false), Statement::DoNothing),
    ];
    for stmt in stmts {
        assert!(stmt.is_reducible(), "{stmt} should be reducible");
    }
    assert!(!Statement::DoNothing.is_reducible());
}
