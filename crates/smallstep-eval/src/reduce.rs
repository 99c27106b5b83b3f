//! The single-step reduction contract shared by expressions and statements.

use crate::error::EvalResult;
use smallstep_types::Environment;
use std::fmt;

/// A node that can be rewritten one small step at a time.
///
/// `reduce` is only defined while `is_reducible` holds; calling it on an
/// irreducible node fails with [`EvalError::NonReducible`]. Reduction is a
/// pure function of the node and the environment: both are borrowed and
/// the result is built fresh.
///
/// [`EvalError::NonReducible`]: crate::EvalError::NonReducible
pub trait Reducible: Sized + fmt::Display {
    /// What one step of `reduce` yields.
    type Output;

    /// Whether at least one more step is available.
    fn is_reducible(&self) -> bool;

    /// Perform one step against `env`.
    fn reduce(&self, env: &Environment) -> EvalResult<Self::Output>;

    /// One step as a whole-configuration transition, the shape the
    /// [`Machine`](crate::Machine) drives.
    fn step(&self, env: &Environment) -> EvalResult<(Self, Environment)>;
}
