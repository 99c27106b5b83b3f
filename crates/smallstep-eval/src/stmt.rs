//! Statement reduction.
//!
//! Each step returns a fresh `(statement, environment)` pair. Only a
//! completed `Assign` produces a different environment.

use crate::error::{EvalError, EvalResult};
use crate::reduce::Reducible;
use smallstep_types::{with_stack_headroom, Environment, Statement, Value};

impl Reducible for Statement {
    type Output = (Statement, Environment);

    fn is_reducible(&self) -> bool {
        !self.is_do_nothing()
    }

    fn reduce(&self, env: &Environment) -> EvalResult<(Statement, Environment)> {
        match self {
            Statement::DoNothing => Err(EvalError::NonReducible {
                node: self.to_string(),
            }),

            Statement::Assign(name, expr) => match expr.as_value() {
                None => {
                    let expr = with_stack_headroom(|| expr.reduce(env))?;
                    Ok((Statement::Assign(name.clone(), expr), env.clone()))
                }
                Some(value) => {
                    tracing::trace!(%name, %value, "binding");
                    Ok((Statement::DoNothing, env.with_binding(name.clone(), value)))
                }
            },

            Statement::If(cond, consequence, alternative) => match cond.as_value() {
                None => {
                    let cond = with_stack_headroom(|| cond.reduce(env))?;
                    Ok((
                        Statement::If(cond, consequence.clone(), alternative.clone()),
                        env.clone(),
                    ))
                }
                Some(Value::Boolean(true)) => Ok((consequence.as_ref().clone(), env.clone())),
                Some(Value::Boolean(false)) => Ok((alternative.as_ref().clone(), env.clone())),
                Some(other) => Err(EvalError::NonBooleanCondition {
                    condition: other.to_string(),
                }),
            },

            Statement::Sequence(first, second) => {
                if first.is_do_nothing() {
                    return Ok((second.as_ref().clone(), env.clone()));
                }
                let (first, env) = with_stack_headroom(|| first.reduce(env))?;
                Ok((Statement::Sequence(Box::new(first), second.clone()), env))
            }

            // Unrolls to `if (cond) { body; while (cond) { body } } else { do-nothing }`
            // without touching the condition or the body.
            Statement::While(cond, body) => Ok((
                Statement::if_else(
                    cond.clone(),
                    Statement::sequence(body.as_ref().clone(), self.clone()),
                    Statement::DoNothing,
                ),
                env.clone(),
            )),
        }
    }

    fn step(&self, env: &Environment) -> EvalResult<(Statement, Environment)> {
        self.reduce(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallstep_types::Expression;

    fn n(v: i64) -> Expression {
        Expression::number(v)
    }

    fn x() -> Expression {
        Expression::variable("x")
    }

    #[test]
    fn assign_reduces_expression_before_binding() {
        let env: Environment = [("x", Value::Number(2))].into_iter().collect();
        let stmt = Statement::assign("x", Expression::add(x(), n(1)));

        let (stmt, env) = stmt.reduce(&env).unwrap();
        assert_eq!(stmt, Statement::assign("x", Expression::add(n(2), n(1))));
        assert_eq!(env.get(&"x".into()), Some(Value::Number(2)));

        let (stmt, env) = stmt.reduce(&env).unwrap();
        assert_eq!(stmt, Statement::assign("x", n(3)));

        let (stmt, env) = stmt.reduce(&env).unwrap();
        assert_eq!(stmt, Statement::DoNothing);
        assert_eq!(env.get(&"x".into()), Some(Value::Number(3)));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn if_dispatches_on_boolean() {
        let env = Environment::new();
        let yes = Statement::assign("y", n(1));
        let no = Statement::assign("y", n(2));

        let taken = Statement::if_else(Expression::boolean(true), yes.clone(), no.clone());
        assert_eq!(taken.reduce(&env).unwrap().0, yes);

        let skipped = Statement::if_else(Expression::boolean(false), yes, no.clone());
        assert_eq!(skipped.reduce(&env).unwrap().0, no);
    }

    #[test]
    fn if_reduces_condition_first() {
        let stmt = Statement::if_else(
            Expression::less_than(n(1), n(2)),
            Statement::DoNothing,
            Statement::DoNothing,
        );
        let (next, _) = stmt.reduce(&Environment::new()).unwrap();
        assert_eq!(
            next,
            Statement::if_else(Expression::boolean(true), Statement::DoNothing, Statement::DoNothing)
        );
    }

    #[test]
    fn if_rejects_numeric_condition() {
        let stmt = Statement::if_else(n(0), Statement::DoNothing, Statement::DoNothing);
        assert_eq!(
            stmt.reduce(&Environment::new()).unwrap_err(),
            EvalError::NonBooleanCondition {
                condition: "0".into()
            }
        );
    }

    #[test]
    fn sequence_steps_into_first() {
        let stmt = Statement::sequence(Statement::assign("x", n(1)), Statement::assign("y", x()));
        let (next, env) = stmt.reduce(&Environment::new()).unwrap();
        assert_eq!(
            next,
            Statement::sequence(Statement::DoNothing, Statement::assign("y", x()))
        );
        assert_eq!(env.get(&"x".into()), Some(Value::Number(1)));
    }

    #[test]
    fn do_nothing_is_irreducible() {
        assert!(!Statement::DoNothing.is_reducible());
        assert!(matches!(
            Statement::DoNothing.reduce(&Environment::new()),
            Err(EvalError::NonReducible { .. })
        ));
    }

    #[test]
    fn deep_sequence_nesting_does_not_overflow() {
        let mut stmt = Statement::assign("x", n(1));
        for _ in 0..50_000 {
            stmt = Statement::sequence(stmt, Statement::DoNothing);
        }
        let (next, env) = stmt.reduce(&Environment::new()).unwrap();
        assert!(next.is_reducible());
        assert_eq!(env.get(&"x".into()), Some(Value::Number(1)));
        drop(next);
        drop(stmt);
    }

    #[test]
    fn deep_right_nested_sequence_clones_its_tail() {
        let mut stmt = Statement::DoNothing;
        for i in 0..50_000 {
            stmt = Statement::sequence(Statement::assign("x", n(i)), stmt);
        }
        let (next, env) = stmt.reduce(&Environment::new()).unwrap();
        assert!(matches!(next, Statement::Sequence(..)));
        assert_eq!(env.get(&"x".into()), Some(Value::Number(49_999)));
    }
}
