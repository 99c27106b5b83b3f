//! Reduction error types.

use smallstep_types::Symbol;
use thiserror::Error;

/// Evaluation error. Any of these aborts the run that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A `Variable` named something the environment does not bind.
    #[error("unbound variable: {name}")]
    UnboundVariable { name: Symbol },
    /// `reduce` called on a node whose `is_reducible` is false.
    #[error("cannot reduce `{node}`: already irreducible")]
    NonReducible { node: String },
    /// An `If` condition reached a terminal value that is not a boolean.
    #[error("condition reduced to non-boolean `{condition}`")]
    NonBooleanCondition { condition: String },
    /// A binary operator met operands of the wrong kind.
    #[error("type mismatch: cannot apply `{op}` to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    /// Checked integer arithmetic overflowed.
    #[error("arithmetic overflow: {left} {op} {right}")]
    ArithmeticOverflow { op: &'static str, left: i64, right: i64 },
    /// A caller-imposed step bound ran out before the term became irreducible.
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },
}

/// Result alias for reduction operations.
pub type EvalResult<T> = Result<T, EvalError>;
