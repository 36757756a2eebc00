//! Shape queries and matrix constructors.

use crate::value::DenseMatrix;
use crate::EvalError;

use super::{scalar_arg, usize_arg};

/// `size(x)` is the 1×2 vector `[rows cols]`; `size(x, d)` picks one
/// extent, 1 for rows and 2 for columns.
pub fn size(args: &[&DenseMatrix]) -> Result<DenseMatrix, EvalError> {
  let (r, c) = args[0].dims();
  match args.get(1) {
    None => DenseMatrix::from_vec(1, 2, vec![r as f64, c as f64]),
    Some(dim) if scalar_arg(dim) == 1.0 => Ok(DenseMatrix::scalar(r as f64)),
    Some(_) => Ok(DenseMatrix::scalar(c as f64)),
  }
}

/// Shape from one or two extent arguments; a single argument makes a
/// square matrix.
fn shape(args: &[&DenseMatrix]) -> (usize, usize) {
  let r = usize_arg(args[0]);
  let c = args.get(1).map_or(r, |m| usize_arg(m));
  (r, c)
}

/// `rand(r)` / `rand(r, c)`: uniform samples from [0, 1).
pub fn rand(args: &[&DenseMatrix]) -> Result<DenseMatrix, EvalError> {
  use rand::Rng;

  let (r, c) = shape(args);
  let data = crate::with_rng(|rng| {
    (0..r * c).map(|_| rng.gen_range(0.0..1.0)).collect()
  });
  DenseMatrix::from_vec(r, c, data)
}

/// `ones` and `zeros` share this constant-fill constructor.
pub fn fill(args: &[&DenseMatrix], value: f64) -> DenseMatrix {
  let (r, c) = shape(args);
  DenseMatrix::zeros(r, c).map(|_| value)
}

/// `eye(n)`: the n×n identity.
pub fn eye(args: &[&DenseMatrix]) -> Result<DenseMatrix, EvalError> {
  let n = usize_arg(args[0]);
  let mut out = DenseMatrix::zeros(n, n);
  for i in 0..n {
    out.set(i, i, 1.0)?;
  }
  Ok(out)
}
