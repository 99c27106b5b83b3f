//! Expression reduction.
//!
//! Binary operators evaluate strictly left to right, one sub-step per call:
//! reduce the left operand until terminal, then the right, then combine.

use crate::error::{EvalError, EvalResult};
use crate::reduce::Reducible;
use smallstep_types::{with_stack_headroom, Environment, Expression, Value};

impl Reducible for Expression {
    type Output = Expression;

    fn is_reducible(&self) -> bool {
        !self.is_value()
    }

    fn reduce(&self, env: &Environment) -> EvalResult<Expression> {
        match self {
            Expression::Variable(name) => env
                .get(name)
                .map(Expression::from)
                .ok_or_else(|| EvalError::UnboundVariable { name: name.clone() }),
            Expression::Number(_) | Expression::Boolean(_) => Err(EvalError::NonReducible {
                node: self.to_string(),
            }),
            Expression::Add(l, r) => reduce_binary(BinaryOp::Add, l, r, env),
            Expression::Multiply(l, r) => reduce_binary(BinaryOp::Multiply, l, r, env),
            Expression::LessThan(l, r) => reduce_binary(BinaryOp::LessThan, l, r, env),
            Expression::GreaterThan(l, r) => reduce_binary(BinaryOp::GreaterThan, l, r, env),
        }
    }

    /// Expressions never touch the environment.
    fn step(&self, env: &Environment) -> EvalResult<(Expression, Environment)> {
        Ok((self.reduce(env)?, env.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Multiply,
    LessThan,
    GreaterThan,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Multiply => "*",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
        }
    }

    /// Rebuild the same node kind around new operands.
    fn node(self, left: Expression, right: Expression) -> Expression {
        match self {
            Self::Add => Expression::add(left, right),
            Self::Multiply => Expression::multiply(left, right),
            Self::LessThan => Expression::less_than(left, right),
            Self::GreaterThan => Expression::greater_than(left, right),
        }
    }

    /// Combine two terminal operands.
    fn apply(self, left: Value, right: Value) -> EvalResult<Expression> {
        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(EvalError::TypeMismatch {
                op: self.symbol(),
                left: left.type_name(),
                right: right.type_name(),
            });
        };
        let overflow = || EvalError::ArithmeticOverflow {
            op: self.symbol(),
            left: a,
            right: b,
        };
        match self {
            Self::Add => a.checked_add(b).map(Expression::Number).ok_or_else(overflow),
            Self::Multiply => a.checked_mul(b).map(Expression::Number).ok_or_else(overflow),
            Self::LessThan => Ok(Expression::Boolean(a < b)),
            Self::GreaterThan => Ok(Expression::Boolean(a > b)),
        }
    }
}

fn reduce_binary(
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    env: &Environment,
) -> EvalResult<Expression> {
    match (left.as_value(), right.as_value()) {
        (None, _) => {
            let left = with_stack_headroom(|| left.reduce(env))?;
            Ok(op.node(left, right.clone()))
        }
        (Some(_), None) => {
            let right = with_stack_headroom(|| right.reduce(env))?;
            Ok(op.node(left.clone(), right))
        }
        (Some(l), Some(r)) => op.apply(l, r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn n(v: i64) -> Expression {
        Expression::number(v)
    }

    #[test]
    fn left_operand_reduces_first() {
        let e = Expression::add(Expression::multiply(n(1), n(2)), Expression::multiply(n(3), n(4)));
        let env = Environment::new();
        assert_eq!(
            e.reduce(&env).unwrap(),
            Expression::add(n(2), Expression::multiply(n(3), n(4)))
        );
    }

    #[test]
    fn right_operand_reduces_once_left_is_terminal() {
        let e = Expression::less_than(n(1), Expression::add(n(2), n(3)));
        assert_eq!(
            e.reduce(&Environment::new()).unwrap(),
            Expression::less_than(n(1), n(5))
        );
    }

    #[test]
    fn comparison_collapses_to_boolean() {
        let env = Environment::new();
        assert_eq!(
            Expression::less_than(n(1), n(2)).reduce(&env).unwrap(),
            Expression::boolean(true)
        );
        assert_eq!(
            Expression::greater_than(n(1), n(2)).reduce(&env).unwrap(),
            Expression::boolean(false)
        );
    }

    #[test]
    fn boolean_operand_is_type_mismatch() {
        let e = Expression::add(n(1), Expression::boolean(true));
        let err = e.reduce(&Environment::new()).unwrap_err();
        assert_eq!(
            err,
            EvalError::TypeMismatch {
                op: "+",
                left: "number",
                right: "boolean",
            }
        );
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let e = Expression::multiply(n(i64::MAX), n(2));
        assert!(matches!(
            e.reduce(&Environment::new()),
            Err(EvalError::ArithmeticOverflow { op: "*", .. })
        ));
    }

    #[test]
    fn step_keeps_environment() {
        let env: Environment = [("x", Value::Number(3))].into_iter().collect();
        let (next, env_after) = Expression::variable("x").step(&env).unwrap();
        assert_eq!(next, n(3));
        assert_eq!(env_after, env);
    }
}
