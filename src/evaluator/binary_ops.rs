use crate::syntax::BinaryOp;
use crate::value::DenseMatrix;
use crate::EvalError;

/// Applies one binary operator to two dense operands.
pub fn apply(
  op: BinaryOp,
  left: &DenseMatrix,
  right: &DenseMatrix,
) -> Result<DenseMatrix, EvalError> {
  match op {
    BinaryOp::Add => add_sub(left, right, false),
    BinaryOp::Sub => add_sub(left, right, true),
    BinaryOp::ElemDiv => zip_strict(left, right, "./", |a, b| a / b),
    BinaryOp::ElemMul => zip_strict(left, right, ".*", |a, b| a * b),
    BinaryOp::MatMul => matmul(left, right),
    BinaryOp::ScalarDiv => scalar_div(left, right),
    BinaryOp::Concat => hconcat(left, right),
  }
}

fn mismatch(op: &str, a: &DenseMatrix, b: &DenseMatrix) -> EvalError {
  let (ar, ac) = a.dims();
  let (br, bc) = b.dims();
  EvalError::DimensionMismatch(format!(
    "operands of {op} have shapes {ar}x{ac} and {br}x{bc}"
  ))
}

/// `+` and `-`, with scalar broadcast on either side and row-vector
/// broadcast over the rows of the other operand.
fn add_sub(
  a: &DenseMatrix,
  b: &DenseMatrix,
  subtract: bool,
) -> Result<DenseMatrix, EvalError> {
  let sign = if subtract { -1.0 } else { 1.0 };

  if let Some(s) = b.as_scalar() {
    return Ok(a.map(|v| v + sign * s));
  }
  if let Some(s) = a.as_scalar() {
    return Ok(b.map(|v| s + sign * v));
  }
  if a.dims() == b.dims() {
    let data = a
      .data()
      .iter()
      .zip(b.data())
      .map(|(&x, &y)| x + sign * y)
      .collect();
    return DenseMatrix::from_vec(a.rows(), a.cols(), data);
  }
  if b.rows() == 1 && b.cols() == a.cols() {
    let mut out = a.clone();
    for i in 0..out.rows() {
      for (x, &y) in out.row_mut(i).iter_mut().zip(b.data()) {
        *x += sign * y;
      }
    }
    return Ok(out);
  }
  if a.rows() == 1 && a.cols() == b.cols() {
    let mut out = DenseMatrix::zeros(b.rows(), b.cols());
    for i in 0..b.rows() {
      for j in 0..b.cols() {
        out.set(i, j, a.at(0, j)? + sign * b.at(i, j)?)?;
      }
    }
    return Ok(out);
  }
  Err(mismatch(if subtract { "-" } else { "+" }, a, b))
}

/// Elementwise operators require exactly matching shapes.
fn zip_strict(
  a: &DenseMatrix,
  b: &DenseMatrix,
  op: &str,
  f: impl Fn(f64, f64) -> f64,
) -> Result<DenseMatrix, EvalError> {
  if a.dims() != b.dims() {
    return Err(mismatch(op, a, b));
  }
  let data = a
    .data()
    .iter()
    .zip(b.data())
    .map(|(&x, &y)| f(x, y))
    .collect();
  DenseMatrix::from_vec(a.rows(), a.cols(), data)
}

/// `*`: scalar scaling when either side is 1×1, matrix product otherwise.
fn matmul(a: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix, EvalError> {
  if let Some(s) = a.as_scalar() {
    return Ok(b.map(|v| s * v));
  }
  if let Some(s) = b.as_scalar() {
    return Ok(a.map(|v| v * s));
  }
  if a.cols() != b.rows() {
    return Err(mismatch("*", a, b));
  }
  let mut out = DenseMatrix::zeros(a.rows(), b.cols());
  for i in 0..a.rows() {
    for j in 0..b.cols() {
      let mut acc = 0.0;
      for k in 0..a.cols() {
        acc += a.at(i, k)? * b.at(k, j)?;
      }
      out.set(i, j, acc)?;
    }
  }
  Ok(out)
}

/// `/` only accepts a scalar divisor.
fn scalar_div(
  a: &DenseMatrix,
  b: &DenseMatrix,
) -> Result<DenseMatrix, EvalError> {
  match b.as_scalar() {
    Some(s) => Ok(a.map(|v| v / s)),
    None => {
      let (br, bc) = b.dims();
      Err(EvalError::DimensionMismatch(format!(
        "right operand of / must be a scalar, got {br}x{bc}"
      )))
    }
  }
}

/// Horizontal concatenation: equal row counts, columns append. Empty
/// operands pass through.
pub fn hconcat(
  a: &DenseMatrix,
  b: &DenseMatrix,
) -> Result<DenseMatrix, EvalError> {
  if a.is_empty() {
    return Ok(b.clone());
  }
  if b.is_empty() {
    return Ok(a.clone());
  }
  if a.rows() != b.rows() {
    return Err(mismatch("horizontal concatenation", a, b));
  }
  let mut data = Vec::with_capacity(a.data().len() + b.data().len());
  for i in 0..a.rows() {
    data.extend_from_slice(a.row(i));
    data.extend_from_slice(b.row(i));
  }
  DenseMatrix::from_vec(a.rows(), a.cols() + b.cols(), data)
}

/// Vertical concatenation of matrix-literal rows: equal column counts,
/// rows append.
pub fn vconcat(
  a: &DenseMatrix,
  b: &DenseMatrix,
) -> Result<DenseMatrix, EvalError> {
  if a.is_empty() {
    return Ok(b.clone());
  }
  if b.is_empty() {
    return Ok(a.clone());
  }
  if a.cols() != b.cols() {
    return Err(EvalError::DimensionMismatch(format!(
      "rows of a matrix literal must have the same number of columns \
       ({} vs {})",
      a.cols(),
      b.cols()
    )));
  }
  let mut data = Vec::with_capacity(a.data().len() + b.data().len());
  data.extend_from_slice(a.data());
  data.extend_from_slice(b.data());
  DenseMatrix::from_vec(a.rows() + b.rows(), a.cols(), data)
}
