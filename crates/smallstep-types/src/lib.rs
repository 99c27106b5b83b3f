//! Shared types for the small-step evaluator.
//!
//! This crate defines the node model: expressions, statements, the
//! terminal values they reduce to, and the environment binding names to
//! those values. Reduction rules live in `smallstep-eval`.

pub mod ast;
mod env;
mod stack;
mod value;

pub use ast::{Expression, Statement, Symbol};
pub use env::Environment;
pub use stack::with_stack_headroom;
pub use value::Value;
