//! Row normalization, pairwise distances, and the nalgebra-backed
//! decompositions (svd, pca).

use nalgebra::DMatrix;

use crate::value::{DenseMatrix, Value};
use crate::EvalError;

use super::{usize_arg, SideReturns};

fn to_nalgebra(m: &DenseMatrix) -> DMatrix<f64> {
  DMatrix::from_row_slice(m.rows(), m.cols(), m.data())
}

fn from_nalgebra(m: &DMatrix<f64>) -> Result<DenseMatrix, EvalError> {
  let mut data = Vec::with_capacity(m.nrows() * m.ncols());
  for i in 0..m.nrows() {
    for j in 0..m.ncols() {
      data.push(m[(i, j)]);
    }
  }
  DenseMatrix::from_vec(m.nrows(), m.ncols(), data)
}

/// `normr(x)`: every row scaled to unit Euclidean length.
pub fn normr(x: &DenseMatrix) -> DenseMatrix {
  let mut out = x.clone();
  for i in 0..out.rows() {
    let norm = out.row(i).iter().map(|v| v * v).sum::<f64>().sqrt();
    for v in out.row_mut(i) {
      *v /= norm;
    }
  }
  out
}

/// `pdist(x)`: Euclidean distances between every pair of rows i < j, as a
/// column vector in i-major order.
pub fn pdist(x: &DenseMatrix) -> Result<DenseMatrix, EvalError> {
  let r = x.rows();
  let mut data = Vec::with_capacity(r * (r.saturating_sub(1)) / 2);
  for i in 0..r {
    for j in i + 1..r {
      let d = x
        .row(i)
        .iter()
        .zip(x.row(j))
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt();
      data.push(d);
    }
  }
  let n = data.len();
  DenseMatrix::from_vec(n, 1, data)
}

/// `svd(x)`: thin singular value decomposition. The primary result is the
/// column of singular values; the factors are published as the `U`, `S`,
/// and `V` side returns, `S` shaped like `x` with the singular values on
/// its diagonal.
pub fn svd(x: &DenseMatrix) -> Result<(Value, SideReturns), EvalError> {
  let svd = to_nalgebra(x).svd(true, true);
  let (u, v_t) = match (svd.u, svd.v_t) {
    (Some(u), Some(v_t)) => (u, v_t),
    _ => {
      return Err(EvalError::InvalidArgument {
        function: "svd".to_string(),
        position: 1,
        reason: "decomposition did not converge".to_string(),
      })
    }
  };

  let singular: Vec<f64> = svd.singular_values.iter().copied().collect();
  let k = singular.len();
  let mut s = DenseMatrix::zeros(x.rows(), x.cols());
  for (i, &v) in singular.iter().enumerate() {
    s.set(i, i, v)?;
  }

  let side = vec![
    ("U".to_string(), Value::Dense(from_nalgebra(&u)?)),
    ("S".to_string(), Value::Dense(s)),
    (
      "V".to_string(),
      Value::Dense(from_nalgebra(&v_t.transpose())?),
    ),
  ];
  let primary = DenseMatrix::from_vec(k, 1, singular)?;
  Ok((Value::Dense(primary), side))
}

/// `pca(x, k)`: principal component analysis over the column covariance.
/// The primary result is the data projected onto the first `k`
/// components; per-component variances, the full component matrix, and
/// the projection itself are published as the `vars`, `vectors`, and
/// `proj` side returns.
pub fn pca(args: &[&DenseMatrix]) -> Result<(Value, SideReturns), EvalError> {
  let x = args[0];
  let k = usize_arg(args[1]);
  let (r, c) = x.dims();
  if k > c {
    return Err(EvalError::InvalidArgument {
      function: "pca".to_string(),
      position: 2,
      reason: format!("cannot keep {k} components of {c} columns"),
    });
  }
  if r < 2 {
    return Err(EvalError::InvalidArgument {
      function: "pca".to_string(),
      position: 1,
      reason: "need at least two observation rows".to_string(),
    });
  }

  // Column-centered covariance, then its eigenpairs sorted by descending
  // eigenvalue.
  let mut centered = to_nalgebra(x);
  for j in 0..c {
    let mean = centered.column(j).sum() / r as f64;
    for i in 0..r {
      centered[(i, j)] -= mean;
    }
  }
  let cov = centered.transpose() * &centered / (r as f64 - 1.0);
  let eigen = cov.symmetric_eigen();

  let mut order: Vec<usize> = (0..c).collect();
  order.sort_by(|&a, &b| {
    eigen.eigenvalues[b]
      .partial_cmp(&eigen.eigenvalues[a])
      .unwrap_or(std::cmp::Ordering::Equal)
  });

  let mut vars = DenseMatrix::zeros(1, c);
  let mut vectors = DenseMatrix::zeros(c, c);
  for (rank, &src) in order.iter().enumerate() {
    vars.set(0, rank, eigen.eigenvalues[src])?;
    for i in 0..c {
      vectors.set(i, rank, eigen.eigenvectors[(i, src)])?;
    }
  }

  // Projection onto the leading k components: X * vectors(:, 0..k).
  let mut projected = DenseMatrix::zeros(r, k);
  for i in 0..r {
    for j in 0..k {
      let mut acc = 0.0;
      for l in 0..c {
        acc += x.at(i, l)? * vectors.at(l, j)?;
      }
      projected.set(i, j, acc)?;
    }
  }

  let side = vec![
    ("vars".to_string(), Value::Dense(vars)),
    ("vectors".to_string(), Value::Dense(vectors)),
    ("proj".to_string(), Value::Dense(projected.clone())),
  ];
  Ok((Value::Dense(projected), side))
}
