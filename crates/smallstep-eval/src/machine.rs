//! The machine: drives a term to a fixed point one step at a time.
//!
//! ```text
//! while term is reducible:
//!     record (term, environment)
//!     (term, environment) := step(term, environment)
//! record (term, environment)
//! ```
//!
//! The machine never reduces expressions itself. All recursion happens
//! inside the term's own `reduce`.

use crate::error::{EvalError, EvalResult};
use crate::reduce::Reducible;
use crate::trace::{Trace, TraceEntry, TraceSink};
use smallstep_types::Environment;

/// Caller-side limits for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Abort with [`EvalError::StepLimitExceeded`] once this many steps
    /// have been taken and the term can still reduce. `None` runs until
    /// the term is irreducible, however long that takes.
    pub step_limit: Option<u64>,
}

impl MachineConfig {
    pub fn with_step_limit(limit: u64) -> Self {
        Self {
            step_limit: Some(limit),
        }
    }
}

/// A configuration `(term, environment)` plus the driver loop.
///
/// `T` is normally a [`Statement`](smallstep_types::Statement); an
/// [`Expression`](smallstep_types::Expression) machine runs until the
/// expression is a terminal value.
#[derive(Debug, Clone)]
pub struct Machine<T> {
    term: T,
    environment: Environment,
    config: MachineConfig,
    steps: u64,
}

impl<T: Reducible> Machine<T> {
    /// Create an unbounded machine.
    pub fn new(term: T, environment: Environment) -> Self {
        Self::with_config(term, environment, MachineConfig::default())
    }

    pub fn with_config(term: T, environment: Environment, config: MachineConfig) -> Self {
        Self {
            term,
            environment,
            config,
            steps: 0,
        }
    }

    pub fn term(&self) -> &T {
        &self.term
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn into_parts(self) -> (T, Environment) {
        (self.term, self.environment)
    }

    /// Apply one reduction step.
    ///
    /// Term and environment are replaced together, and only on success: a
    /// failed step leaves the machine exactly as it was.
    pub fn step(&mut self) -> EvalResult<()> {
        let (term, environment) = self.term.step(&self.environment)?;
        self.term = term;
        self.environment = environment;
        self.steps += 1;
        Ok(())
    }

    /// Step until the term is irreducible, recording every configuration.
    ///
    /// The sink sees each configuration before the step that leaves it, and
    /// the final irreducible configuration exactly once. Errors abort the
    /// run immediately; entries already recorded stay with the sink.
    pub fn run<S: TraceSink + ?Sized>(&mut self, sink: &mut S) -> EvalResult<()> {
        while self.term.is_reducible() {
            if let Some(limit) = self.config.step_limit {
                if self.steps >= limit {
                    tracing::warn!(limit, term = %self.term, "step limit reached");
                    return Err(EvalError::StepLimitExceeded { limit });
                }
            }
            sink.record(&self.entry());
            tracing::debug!(step = self.steps, term = %self.term, "reducing");
            self.step()?;
        }
        sink.record(&self.entry());
        tracing::debug!(steps = self.steps, "reached irreducible configuration");
        Ok(())
    }

    /// [`run`](Self::run) into a fresh in-memory [`Trace`].
    pub fn run_to_trace(&mut self) -> EvalResult<Trace> {
        let mut trace = Trace::new();
        self.run(&mut trace)?;
        Ok(trace)
    }

    fn entry(&self) -> TraceEntry {
        TraceEntry {
            step: self.steps,
            statement: self.term.to_string(),
            environment: self.environment.to_string(),
        }
    }
}
