//! Small-step reduction semantics.
//!
//! Expressions and statements rewrite themselves one step at a time
//! against an [`Environment`](smallstep_types::Environment). A [`Machine`]
//! repeats single steps until nothing is left to reduce and reports every
//! configuration it passes through to a [`TraceSink`].
//!
//! ```text
//! Machine::run → Statement::reduce → Expression::reduce
//!      │
//!      └─ TraceSink::record (before each step, and once at the end)
//! ```

pub mod error;
mod expr;
pub mod machine;
mod reduce;
mod stmt;
pub mod trace;

pub use error::{EvalError, EvalResult};
pub use machine::{Machine, MachineConfig};
pub use reduce::Reducible;
pub use trace::{LogSink, StdoutSink, Trace, TraceEntry, TraceSink};
