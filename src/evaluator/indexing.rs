use crate::env::Environment;
use crate::syntax::Expr;
use crate::value::{DenseMatrix, Value};
use crate::EvalError;

use super::core_eval::{dense_operand, evaluate_expr};

/// Sub-indexing of a bound matrix, `x(...)`. All positions are zero-based.
///
/// One argument selects in row-major linear order; a bare `:` as the only
/// argument instead reshapes the whole matrix into a column. Two arguments
/// select rows and columns, each argument a row vector of positions, and a
/// bare `:` expands to the full extent of its axis.
pub fn subindex(
  env: &mut Environment,
  target: &DenseMatrix,
  args: &[Expr],
) -> Result<Value, EvalError> {
  match args.len() {
    0 => Err(EvalError::MissingTerm),
    1 => linear_index(env, target, &args[0]),
    2 => grid_index(env, target, args),
    _ => Err(EvalError::TooManyIndices),
  }
}

fn linear_index(
  env: &mut Environment,
  target: &DenseMatrix,
  arg: &Expr,
) -> Result<Value, EvalError> {
  let len = target.data().len();

  if matches!(arg, Expr::FullRange) {
    return Ok(
      DenseMatrix::from_vec(len, 1, target.data().to_vec())?.into(),
    );
  }

  let hi = len as f64 - 1.0;
  let picks = dense_operand(
    evaluate_expr(env, arg, Some((0.0, hi)))?,
    "matrix subindexing",
  )?;

  // Fractional positions truncate toward zero, matching an integer cast.
  let mut data = Vec::with_capacity(picks.data().len());
  for &p in picks.data() {
    if !p.is_finite() || p < 0.0 || p.trunc() > hi {
      return Err(EvalError::IndexOutOfRange(format!(
        "linear index {p} is outside 0..{len}"
      )));
    }
    data.push(target.linear(p.trunc() as usize)?);
  }
  Ok(DenseMatrix::from_vec(picks.rows(), picks.cols(), data)?.into())
}

fn grid_index(
  env: &mut Environment,
  target: &DenseMatrix,
  args: &[Expr],
) -> Result<Value, EvalError> {
  let rows = index_vector(env, &args[0], target.rows(), "row")?;
  let cols = index_vector(env, &args[1], target.cols(), "column")?;

  let mut out = DenseMatrix::zeros(rows.len(), cols.len());
  for (i, &ri) in rows.iter().enumerate() {
    for (j, &cj) in cols.iter().enumerate() {
      out.set(i, j, target.at(ri, cj)?)?;
    }
  }
  Ok(out.into())
}

/// Evaluates one axis argument of a two-dimensional index with the axis
/// extent as the ambient bound, requiring a row vector of in-range
/// positions. Fractional positions round to the nearest integer.
fn index_vector(
  env: &mut Environment,
  expr: &Expr,
  extent: usize,
  axis: &str,
) -> Result<Vec<usize>, EvalError> {
  let hi = extent as f64 - 1.0;
  let m = dense_operand(
    evaluate_expr(env, expr, Some((0.0, hi)))?,
    "matrix subindexing",
  )?;
  if m.rows() != 1 {
    let (r, c) = m.dims();
    return Err(EvalError::DimensionMismatch(format!(
      "{axis} index must be a row vector, got {r}x{c}"
    )));
  }

  m.data()
    .iter()
    .map(|&p| {
      let rounded = p.round();
      if !p.is_finite() || rounded < 0.0 || rounded > hi {
        Err(EvalError::IndexOutOfRange(format!(
          "{axis} index {p} is outside 0..{extent}"
        )))
      } else {
        Ok(rounded as usize)
      }
    })
    .collect()
}
