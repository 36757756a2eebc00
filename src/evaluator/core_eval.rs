use crate::env::Environment;
use crate::syntax::Expr;
use crate::value::{DenseMatrix, Value};
use crate::EvalError;

use super::{binary_ops, indexing};

/// Evaluates one expression node against the environment.
///
/// `bounds` is the ambient index range, set only while evaluating the
/// arguments of a matrix sub-index: it is what a bare `:` (and nothing
/// else) expands to. Every intermediate produced by a parenthesis group or
/// a call is also recorded in the environment's temp arena, which the
/// interpreter drains after the top-level line finishes.
pub fn evaluate_expr(
  env: &mut Environment,
  expr: &Expr,
  bounds: Option<(f64, f64)>,
) -> Result<Value, EvalError> {
  match expr {
    Expr::Number(v) => Ok(DenseMatrix::scalar(*v).into()),

    Expr::Identifier(name) => {
      if name == "pi" {
        return Ok(DenseMatrix::scalar(std::f64::consts::PI).into());
      }
      env
        .resolve(name)
        .cloned()
        .ok_or_else(|| EvalError::UnknownVariable(name.clone()))
    }

    Expr::Transpose(inner) => {
      match evaluate_expr(env, inner, bounds)? {
        Value::Dense(m) => Ok(m.transpose().into()),
        Value::Char(_) => Err(EvalError::UnsupportedOperation(
          "char matrices cannot be transposed".into(),
        )),
      }
    }

    Expr::Group(inner) => {
      let value = evaluate_expr(env, inner, bounds)?;
      env.bind_temp(value.clone());
      Ok(value)
    }

    Expr::Neg(inner) => {
      let m =
        dense_operand(evaluate_expr(env, inner, bounds)?, "unary minus")?;
      Ok(m.map(|v| -v).into())
    }

    Expr::Matrix(rows) => evaluate_matrix(env, rows, bounds),

    Expr::Range { start, step, stop } => {
      let lo = scalar_operand(env, start, bounds, "range start")?;
      let hi = scalar_operand(env, stop, bounds, "range stop")?;
      let st = match step {
        Some(e) => scalar_operand(env, e, bounds, "range step")?,
        None => 1.0,
      };
      if !(st > 0.0) {
        return Err(EvalError::InvalidRange(format!(
          "step must be positive, got {st}"
        )));
      }
      if lo > hi {
        return Err(EvalError::InvalidRange(format!(
          "start {lo} exceeds stop {hi}"
        )));
      }
      Ok(range_values(lo, st, hi)?.into())
    }

    Expr::FullRange => match bounds {
      Some((lo, hi)) if hi >= lo => Ok(range_values(lo, 1.0, hi)?.into()),
      Some(_) => Ok(DenseMatrix::empty().into()),
      None => Err(EvalError::InvalidRange(
        "a bare `:` is only valid inside matrix subindexing".into(),
      )),
    },

    Expr::Binary { op, left, right } => {
      let l = dense_operand(
        evaluate_expr(env, left, bounds)?,
        op.symbol(),
      )?;
      let r = dense_operand(
        evaluate_expr(env, right, bounds)?,
        op.symbol(),
      )?;
      Ok(binary_ops::apply(*op, &l, &r)?.into())
    }

    Expr::Call { name, args } => evaluate_call(env, name, args, bounds),
  }
}

/// `identifier(args)` is sub-indexing when the identifier is bound,
/// otherwise a builtin call.
fn evaluate_call(
  env: &mut Environment,
  name: &str,
  args: &[Expr],
  bounds: Option<(f64, f64)>,
) -> Result<Value, EvalError> {
  match env.resolve(name).cloned() {
    Some(Value::Dense(target)) => {
      let result = indexing::subindex(env, &target, args)?;
      env.bind_temp(result.clone());
      Ok(result)
    }
    Some(Value::Char(_)) => Err(EvalError::UnsupportedOperation(format!(
      "char matrix {name} cannot be indexed"
    ))),
    None => {
      let mut values = Vec::with_capacity(args.len());
      for arg in args {
        values.push(evaluate_expr(env, arg, bounds)?);
      }
      let (result, side_returns) =
        crate::functions::call_builtin(name, &values)?;
      for (side_name, side_value) in side_returns {
        env.add_side_return(&side_name, side_value);
      }
      env.bind_temp(result.clone());
      Ok(result)
    }
  }
}

/// `[a b; c d]`: elements concatenate horizontally inside a row, rows
/// concatenate vertically. Elements may themselves be matrices, so a
/// literal also works as a block composition.
fn evaluate_matrix(
  env: &mut Environment,
  rows: &[Vec<Expr>],
  bounds: Option<(f64, f64)>,
) -> Result<Value, EvalError> {
  let mut acc: Option<DenseMatrix> = None;
  for row in rows {
    let mut row_acc: Option<DenseMatrix> = None;
    for item in row {
      let m = dense_operand(
        evaluate_expr(env, item, bounds)?,
        "a matrix literal",
      )?;
      row_acc = Some(match row_acc {
        None => m,
        Some(prev) => binary_ops::hconcat(&prev, &m)?,
      });
    }
    if let Some(block) = row_acc {
      acc = Some(match acc {
        None => block,
        Some(prev) => binary_ops::vconcat(&prev, &block)?,
      });
    }
  }
  Ok(acc.unwrap_or_else(DenseMatrix::empty).into())
}

pub(super) fn dense_operand(
  value: Value,
  context: &str,
) -> Result<DenseMatrix, EvalError> {
  match value {
    Value::Dense(m) => Ok(m),
    Value::Char(_) => Err(EvalError::UnsupportedOperation(format!(
      "char matrices cannot be used with {context}"
    ))),
  }
}

fn scalar_operand(
  env: &mut Environment,
  expr: &Expr,
  bounds: Option<(f64, f64)>,
  what: &str,
) -> Result<f64, EvalError> {
  let m = dense_operand(evaluate_expr(env, expr, bounds)?, what)?;
  m.as_scalar().ok_or_else(|| {
    let (r, c) = m.dims();
    EvalError::InvalidRange(format!("{what} must be a scalar, got {r}x{c}"))
  })
}

/// Inclusive arithmetic progression as a row vector. Callers have already
/// checked `step > 0` and `lo <= hi`.
fn range_values(lo: f64, step: f64, hi: f64) -> Result<DenseMatrix, EvalError> {
  let n = ((hi - lo) / step).floor() as usize + 1;
  let data = (0..n).map(|i| lo + i as f64 * step).collect();
  DenseMatrix::from_vec(1, n, data)
}
