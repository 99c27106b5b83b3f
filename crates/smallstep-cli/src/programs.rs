//! Catalogue of hand-built programs.
//!
//! There is no concrete syntax, so every program is assembled from node
//! constructors here.

use smallstep_types::{Environment, Expression, Statement, Value};

/// The term a program starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Expression(Expression),
    Statement(Statement),
}

/// A named starting configuration.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: &'static str,
    pub summary: &'static str,
    pub term: Term,
    pub environment: Environment,
}

fn n(v: i64) -> Expression {
    Expression::number(v)
}

fn var(name: &str) -> Expression {
    Expression::variable(name)
}

fn env(bindings: &[(&str, Value)]) -> Environment {
    bindings.iter().map(|(k, v)| (*k, *v)).collect()
}

/// Every program, in listing order.
pub fn catalogue() -> Vec<Program> {
    vec![
        Program {
            name: "arithmetic",
            summary: "1 * 2 + 3 * 4 with no bindings",
            term: Term::Expression(Expression::add(
                Expression::multiply(n(1), n(2)),
                Expression::multiply(n(3), n(4)),
            )),
            environment: Environment::new(),
        },
        Program {
            name: "variables",
            summary: "x + y with x = 3, y = 4",
            term: Term::Expression(Expression::add(var("x"), var("y"))),
            environment: env(&[("x", Value::Number(3)), ("y", Value::Number(4))]),
        },
        Program {
            name: "increment",
            summary: "x = x + 1 with x = 2",
            term: Term::Statement(Statement::assign("x", Expression::add(var("x"), n(1)))),
            environment: env(&[("x", Value::Number(2))]),
        },
        Program {
            name: "sequence",
            summary: "x = 1 + 1; y = x + 3",
            term: Term::Statement(Statement::sequence(
                Statement::assign("x", Expression::add(n(1), n(1))),
                Statement::assign("y", Expression::add(var("x"), n(3))),
            )),
            environment: Environment::new(),
        },
        Program {
            name: "conditional",
            summary: "if (x) { y = 1 } else { y = 2 } with x = true",
            term: Term::Statement(Statement::if_else(
                var("x"),
                Statement::assign("y", n(1)),
                Statement::assign("y", n(2)),
            )),
            environment: env(&[("x", Value::Boolean(true))]),
        },
        Program {
            name: "loop",
            summary: "while (x < 5) { x = x * 3 } with x = 1",
            term: Term::Statement(Statement::while_loop(
                Expression::less_than(var("x"), n(5)),
                Statement::assign("x", Expression::multiply(var("x"), n(3))),
            )),
            environment: env(&[("x", Value::Number(1))]),
        },
        Program {
            name: "unbound",
            summary: "z with no bindings (fails)",
            term: Term::Expression(var("z")),
            environment: Environment::new(),
        },
    ]
}

/// Look a program up by name.
pub fn find(name: &str) -> Option<Program> {
    catalogue().into_iter().find(|p| p.name == name)
}
