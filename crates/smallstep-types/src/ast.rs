//! Expression and statement nodes.
//!
//! Both families are closed sum types. Trees are assembled by hand through
//! the constructors below and never change after construction: every
//! reduction step builds a new tree. Recursive children are boxed to keep
//! enum sizes reasonable.
//!
//! The `Display` impls produce a diagnostic rendering (`1 * 2 + 3 * 4`,
//! `x = x + 1`, `while (x < 5) { x = x * 3 }`). It is not a parseable
//! syntax and does not parenthesise, so nested operators can render
//! ambiguously: `(1 + 2) * 3` and `1 + 2 * 3` both print as `1 + 2 * 3`.
//! Compare trees, not trace lines, when operator grouping matters.
//!
//! Trees can be nested far deeper than the native stack allows for naive
//! recursion. `Display` and `Clone` recurse under [`with_stack_headroom`],
//! and `Drop` tears trees down iteratively.

use crate::{with_stack_headroom, Value};
use serde::{Deserialize, Serialize};
use std::{fmt, mem};

// ══════════════════════════════════════════════════════════════════════════════
// Symbols
// ══════════════════════════════════════════════════════════════════════════════

/// A variable name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression node. Terminal exactly when it is a `Number` or `Boolean`.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Looks itself up in the environment.
    Variable(Symbol),
    Number(i64),
    Boolean(bool),
    Add(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    LessThan(Box<Expression>, Box<Expression>),
    GreaterThan(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn variable(name: impl Into<Symbol>) -> Self {
        Self::Variable(name.into())
    }

    pub fn number(n: i64) -> Self {
        Self::Number(n)
    }

    pub fn boolean(b: bool) -> Self {
        Self::Boolean(b)
    }

    pub fn add(left: Expression, right: Expression) -> Self {
        Self::Add(Box::new(left), Box::new(right))
    }

    pub fn multiply(left: Expression, right: Expression) -> Self {
        Self::Multiply(Box::new(left), Box::new(right))
    }

    pub fn less_than(left: Expression, right: Expression) -> Self {
        Self::LessThan(Box::new(left), Box::new(right))
    }

    pub fn greater_than(left: Expression, right: Expression) -> Self {
        Self::GreaterThan(Box::new(left), Box::new(right))
    }

    /// The terminal value of this node, or `None` if it can still reduce.
    pub fn as_value(&self) -> Option<Value> {
        match self {
            Self::Number(n) => Some(Value::Number(*n)),
            Self::Boolean(b) => Some(Value::Boolean(*b)),
            _ => None,
        }
    }

    /// Whether this node is a terminal value.
    pub fn is_value(&self) -> bool {
        self.as_value().is_some()
    }

    /// Move compound operands out into `out`, leaving `0` in their place.
    fn detach_operands(&mut self, out: &mut Vec<Expression>) {
        if let Self::Add(l, r) | Self::Multiply(l, r) | Self::LessThan(l, r) | Self::GreaterThan(l, r) =
            self
        {
            for operand in [l, r] {
                if operand.is_compound() {
                    out.push(mem::replace(&mut **operand, Self::Number(0)));
                }
            }
        }
    }

    fn is_compound(&self) -> bool {
        matches!(
            self,
            Self::Add(..) | Self::Multiply(..) | Self::LessThan(..) | Self::GreaterThan(..)
        )
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        match self {
            Self::Variable(name) => Self::Variable(name.clone()),
            Self::Number(n) => Self::Number(*n),
            Self::Boolean(b) => Self::Boolean(*b),
            Self::Add(l, r) => with_stack_headroom(|| Self::Add(l.clone(), r.clone())),
            Self::Multiply(l, r) => with_stack_headroom(|| Self::Multiply(l.clone(), r.clone())),
            Self::LessThan(l, r) => with_stack_headroom(|| Self::LessThan(l.clone(), r.clone())),
            Self::GreaterThan(l, r) => {
                with_stack_headroom(|| Self::GreaterThan(l.clone(), r.clone()))
            }
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_operands(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_operands(&mut pending);
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Self::Number(n),
            Value::Boolean(b) => Self::Boolean(b),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "{name}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Add(l, r) => with_stack_headroom(|| write!(f, "{l} + {r}")),
            Self::Multiply(l, r) => with_stack_headroom(|| write!(f, "{l} * {r}")),
            Self::LessThan(l, r) => with_stack_headroom(|| write!(f, "{l} < {r}")),
            Self::GreaterThan(l, r) => with_stack_headroom(|| write!(f, "{l} > {r}")),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A statement node. `DoNothing` is the only terminal statement.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    DoNothing,
    /// `name = expression`
    Assign(Symbol, Expression),
    /// `if (condition) { consequence } else { alternative }`
    If(Expression, Box<Statement>, Box<Statement>),
    /// `first; second`
    Sequence(Box<Statement>, Box<Statement>),
    /// `while (condition) { body }`
    While(Expression, Box<Statement>),
}

impl Statement {
    pub fn assign(name: impl Into<Symbol>, expression: Expression) -> Self {
        Self::Assign(name.into(), expression)
    }

    pub fn if_else(condition: Expression, consequence: Statement, alternative: Statement) -> Self {
        Self::If(condition, Box::new(consequence), Box::new(alternative))
    }

    pub fn sequence(first: Statement, second: Statement) -> Self {
        Self::Sequence(Box::new(first), Box::new(second))
    }

    pub fn while_loop(condition: Expression, body: Statement) -> Self {
        Self::While(condition, Box::new(body))
    }

    pub fn is_do_nothing(&self) -> bool {
        matches!(self, Self::DoNothing)
    }

    /// Move compound child statements out into `out`, leaving `do-nothing`
    /// in their place.
    fn detach_children(&mut self, out: &mut Vec<Statement>) {
        let mut detach = |child: &mut Box<Statement>| {
            if matches!(**child, Self::If(..) | Self::Sequence(..) | Self::While(..)) {
                out.push(mem::replace(&mut **child, Self::DoNothing));
            }
        };
        match self {
            Self::If(_, a, b) | Self::Sequence(a, b) => {
                detach(a);
                detach(b);
            }
            Self::While(_, body) => detach(body),
            Self::DoNothing | Self::Assign(..) => {}
        }
    }
}

impl Clone for Statement {
    fn clone(&self) -> Self {
        match self {
            Self::DoNothing => Self::DoNothing,
            Self::Assign(name, expr) => Self::Assign(name.clone(), expr.clone()),
            Self::If(cond, cons, alt) => {
                with_stack_headroom(|| Self::If(cond.clone(), cons.clone(), alt.clone()))
            }
            Self::Sequence(first, second) => {
                with_stack_headroom(|| Self::Sequence(first.clone(), second.clone()))
            }
            Self::While(cond, body) => with_stack_headroom(|| Self::While(cond.clone(), body.clone())),
        }
    }
}

impl Drop for Statement {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut stmt) = pending.pop() {
            stmt.detach_children(&mut pending);
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DoNothing => f.write_str("do-nothing"),
            Self::Assign(name, expr) => write!(f, "{name} = {expr}"),
            Self::If(cond, cons, alt) => with_stack_headroom(|| {
                write!(f, "if ({cond}) {{ {cons} }} else {{ {alt} }}")
            }),
            Self::Sequence(first, second) => {
                with_stack_headroom(|| write!(f, "{first}; {second}"))
            }
            Self::While(cond, body) => {
                with_stack_headroom(|| write!(f, "while ({cond}) {{ {body} }}"))
            }
        }
    }
}
