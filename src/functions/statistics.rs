//! Column statistics, sorting, and histograms. Unless a dimension
//! selector says otherwise, these reduce along columns, producing a 1×C
//! row vector.

use crate::value::DenseMatrix;
use crate::EvalError;

use super::{scalar_arg, usize_arg};

fn column_reduce(
  x: &DenseMatrix,
  f: impl Fn(&mut dyn Iterator<Item = f64>) -> f64,
) -> Result<DenseMatrix, EvalError> {
  let (r, c) = x.dims();
  if r == 0 || c == 0 {
    return Ok(DenseMatrix::empty());
  }
  let data = (0..c)
    .map(|j| {
      let mut column = (0..r).map(|i| x.data()[i * c + j]);
      f(&mut column)
    })
    .collect();
  DenseMatrix::from_vec(1, c, data)
}

/// `mean(x)`: column means.
pub fn mean(x: &DenseMatrix) -> Result<DenseMatrix, EvalError> {
  let r = x.rows() as f64;
  column_reduce(x, |col| col.sum::<f64>() / r)
}

/// `sum(x)` / `sum(x, d)`: column sums by default, row sums for `d = 2`
/// (as an R×1 column).
pub fn sum(args: &[&DenseMatrix]) -> Result<DenseMatrix, EvalError> {
  let x = args[0];
  if args.get(1).map(|d| scalar_arg(d)) == Some(2.0) {
    let (r, _) = x.dims();
    let data = (0..r).map(|i| x.row(i).iter().sum()).collect();
    return DenseMatrix::from_vec(r, 1, data);
  }
  column_reduce(x, |col| col.sum())
}

/// Column-wise fold for `min` and `max`.
pub fn extremum(
  x: &DenseMatrix,
  pick: fn(f64, f64) -> f64,
) -> Result<DenseMatrix, EvalError> {
  column_reduce(x, |col| {
    let first = col.next().unwrap_or(f64::NAN);
    col.fold(first, pick)
  })
}

/// `var(x)`: unbiased column variance (n − 1 denominator).
pub fn var(x: &DenseMatrix) -> Result<DenseMatrix, EvalError> {
  let n = x.rows() as f64;
  column_reduce(x, |col| {
    let values: Vec<f64> = col.collect();
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0)
  })
}

/// `sort(x)` / `sort(x, d)`: ascending within columns, or within rows for
/// a row vector or `d = 2`.
pub fn sort(args: &[&DenseMatrix]) -> DenseMatrix {
  let x = args[0];
  let by_rows = match args.get(1) {
    Some(d) => scalar_arg(d) == 2.0,
    None => x.rows() == 1,
  };

  let mut out = x.clone();
  if by_rows {
    for i in 0..out.rows() {
      out
        .row_mut(i)
        .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    }
  } else {
    let (r, c) = out.dims();
    let mut transposed = out.transpose();
    for j in 0..c {
      transposed
        .row_mut(j)
        .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    }
    out = transposed.transpose();
    debug_assert_eq!(out.dims(), (r, c));
  }
  out
}

/// `hist(x, n)`: per-column counts over `n` equal-width bins spanning the
/// global min..max of the matrix. The result is C×n, one row per column
/// of the input. The maximum lands in the last bin.
pub fn hist(args: &[&DenseMatrix]) -> Result<DenseMatrix, EvalError> {
  let x = args[0];
  let bins = usize_arg(args[1]);
  let (r, c) = x.dims();
  if r == 0 || c == 0 {
    return Ok(DenseMatrix::empty());
  }

  let lo = x.data().iter().copied().fold(f64::INFINITY, f64::min);
  let hi = x.data().iter().copied().fold(f64::NEG_INFINITY, f64::max);
  let width = (hi - lo) / bins as f64;

  let mut out = DenseMatrix::zeros(c, bins);
  for j in 0..c {
    for i in 0..r {
      let v = x.at(i, j)?;
      let bin = if v >= hi {
        bins - 1
      } else {
        (((v - lo) / width) as usize).min(bins - 1)
      };
      out.set(j, bin, out.at(j, bin)? + 1.0)?;
    }
  }
  Ok(out)
}
