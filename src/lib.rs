//! An interactive matrix calculator with a restricted MATLAB-style
//! expression language: dense f64 matrices, zero-based sub-indexing,
//! colon ranges, a small statistics and linear-algebra library, and a
//! bridge to an external Barnes-Hut t-SNE executable.

use pest_derive::Parser;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use thiserror::Error;

pub mod env;
pub mod evaluator;
pub mod functions;
pub mod syntax;
pub mod value;

pub use env::Environment;
pub use value::{CharMatrix, DenseMatrix, Value};

#[derive(Parser)]
#[grammar = "matshell.pest"]
pub struct MatParser;

/// Everything that can go wrong while parsing or evaluating a line.
#[derive(Error, Debug)]
pub enum EvalError {
  #[error("Unknown expression: {0}")]
  UnknownExpression(String),
  #[error("Unknown function {0}()")]
  UnknownFunction(String),
  #[error("Unknown variable {0}")]
  UnknownVariable(String),
  #[error("Dimension mismatch: {0}")]
  DimensionMismatch(String),
  #[error("Index out of range: {0}")]
  IndexOutOfRange(String),
  #[error("Invalid argument {position} to {function}(): {reason}")]
  InvalidArgument {
    function: String,
    position: usize,
    reason: String,
  },
  #[error("Invalid range: {0}")]
  InvalidRange(String),
  #[error("Missing term")]
  MissingTerm,
  #[error("Too many indices for matrix subindexing")]
  TooManyIndices,
  #[error("Unsupported operation: {0}")]
  UnsupportedOperation(String),
  #[error("External process failure: {0}")]
  ExternalProcess(String),
  #[error("I/O failure: {0}")]
  Io(#[from] std::io::Error),
  #[error("Empty input")]
  EmptyInput,
}

// Global RNG state: None = use thread_rng(), Some = use a seeded ChaCha8Rng
thread_local! {
  static SEEDED_RNG: RefCell<Option<ChaCha8Rng>> = const { RefCell::new(None) };
}

/// Seed the global RNG for deterministic `rand` output.
pub fn seed_rng(seed: u64) {
  use rand::SeedableRng;
  SEEDED_RNG.with(|rng| {
    *rng.borrow_mut() = Some(ChaCha8Rng::seed_from_u64(seed));
  });
}

/// Reset the global RNG to non-deterministic mode.
pub fn unseed_rng() {
  SEEDED_RNG.with(|rng| {
    *rng.borrow_mut() = None;
  });
}

/// Execute a closure with a mutable reference to the current RNG.
/// Uses the seeded RNG if set, otherwise falls back to thread_rng().
pub fn with_rng<F, R>(f: F) -> R
where
  F: FnOnce(&mut dyn rand::RngCore) -> R,
{
  SEEDED_RNG.with(|cell| {
    let mut borrow = cell.borrow_mut();
    if let Some(ref mut seeded) = *borrow {
      f(seeded)
    } else {
      f(&mut rand::thread_rng())
    }
  })
}

/// A calculator session: one environment plus the evaluate-and-print
/// cycle around it.
#[derive(Default)]
pub struct Interpreter {
  env: Environment,
}

impl Interpreter {
  pub fn new() -> Self {
    Interpreter::default()
  }

  pub fn env(&self) -> &Environment {
    &self.env
  }

  /// Pre-binds a variable, e.g. a matrix loaded by the embedding program.
  pub fn bind(&mut self, name: &str, value: Value) {
    self.env.bind_persistent(name, value);
  }

  /// Evaluates one input line and returns its printed output: side
  /// returns first, then the assigned binding (`ans` for a bare
  /// expression). The temp arena drains afterwards whether the line
  /// succeeded or not; side returns only survive success.
  pub fn eval(&mut self, input: &str) -> Result<String, EvalError> {
    let line = input.trim();
    if line.is_empty() {
      return Err(EvalError::EmptyInput);
    }

    let outcome = self.eval_line(line);
    self.env.clear_temp();
    if outcome.is_err() {
      self.env.clear_side_returns();
    }
    outcome
  }

  fn eval_line(&mut self, line: &str) -> Result<String, EvalError> {
    let statement = syntax::parse_statement(line)?;
    let (name, expr) = match &statement {
      syntax::Statement::Assign { name, expr } => (name.as_str(), expr),
      syntax::Statement::Expr(expr) => ("ans", expr),
    };

    let value = evaluator::evaluate_expr(&mut self.env, expr, None)?;

    let mut printed = Vec::new();
    for side in self.env.flush_side_returns() {
      if let Some(v) = self.env.resolve(&side) {
        printed.push(value::format_binding(&side, v));
      }
    }
    self.env.bind_persistent(name, value);
    if let Some(v) = self.env.resolve(name) {
      printed.push(value::format_binding(name, v));
    }
    Ok(printed.join("\n"))
  }
}
