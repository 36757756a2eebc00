//! Bridge to the external Barnes-Hut t-SNE executable.
//!
//! The executable reads `data.dat` from the working directory and writes
//! `result.dat`. Both files are little-endian: the input carries the row
//! and column counts as i32, theta and perplexity as f64, the output
//! dimensionality and the iteration cap as i32, then the data row-major
//! as f64; the result carries the two i32 extents followed by the
//! embedded rows.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::value::{DenseMatrix, Value};
use crate::EvalError;

use super::{scalar_arg, SideReturns};

pub const INPUT_FILE: &str = "data.dat";
pub const RESULT_FILE: &str = "result.dat";
pub const TSNE_BINARY: &str = "bh_tsne";
pub const MAX_ITERATIONS: i32 = 1000;

/// Name the embedding is published under as a side return.
pub const RESULT_NAME: &str = "tsne";

/// `bh_tsne(x, out_dims, theta, perplexity)`: embeds the rows of `x` into
/// `out_dims` dimensions. Progress lines from the executable stream to
/// stdout while it runs. The embedding is both the primary result and the
/// `tsne` side return.
pub fn bh_tsne(
  args: &[&DenseMatrix],
) -> Result<(Value, SideReturns), EvalError> {
  let data = args[0];
  let out_dims = scalar_arg(args[1]) as i32;
  let theta = scalar_arg(args[2]);
  let perplexity = scalar_arg(args[3]);

  write_input_file(
    Path::new(INPUT_FILE),
    data,
    out_dims,
    theta,
    perplexity,
  )?;

  let mut child = Command::new(TSNE_BINARY)
    .stdout(Stdio::piped())
    .spawn()
    .map_err(|e| {
      EvalError::ExternalProcess(format!("could not start {TSNE_BINARY}: {e}"))
    })?;
  if let Some(out) = child.stdout.take() {
    for line in BufReader::new(out).lines() {
      println!("{}", line?);
    }
  }
  let status = child.wait().map_err(|e| {
    EvalError::ExternalProcess(format!("waiting for {TSNE_BINARY}: {e}"))
  })?;
  if !status.success() {
    return Err(EvalError::ExternalProcess(format!(
      "{TSNE_BINARY} exited with {status}"
    )));
  }

  let result = read_result_file(Path::new(RESULT_FILE))?;
  let side = vec![(RESULT_NAME.to_string(), Value::Dense(result.clone()))];
  Ok((Value::Dense(result), side))
}

/// Writes the input file the executable expects.
pub fn write_input_file(
  path: &Path,
  data: &DenseMatrix,
  out_dims: i32,
  theta: f64,
  perplexity: f64,
) -> Result<(), EvalError> {
  let (r, c) = data.dims();
  let mut w = BufWriter::new(File::create(path)?);
  w.write_all(&(r as i32).to_le_bytes())?;
  w.write_all(&(c as i32).to_le_bytes())?;
  w.write_all(&theta.to_le_bytes())?;
  w.write_all(&perplexity.to_le_bytes())?;
  w.write_all(&out_dims.to_le_bytes())?;
  w.write_all(&MAX_ITERATIONS.to_le_bytes())?;
  for &v in data.data() {
    w.write_all(&v.to_le_bytes())?;
  }
  w.flush()?;
  Ok(())
}

/// Reads the embedding the executable wrote.
pub fn read_result_file(path: &Path) -> Result<DenseMatrix, EvalError> {
  let mut r = BufReader::new(File::open(path)?);
  let rows = read_i32(&mut r)?;
  let cols = read_i32(&mut r)?;
  if rows < 0 || cols < 0 {
    return Err(EvalError::ExternalProcess(format!(
      "{TSNE_BINARY} reported a {rows}x{cols} result"
    )));
  }
  let n = rows as usize * cols as usize;
  let mut data = Vec::with_capacity(n);
  for _ in 0..n {
    data.push(read_f64(&mut r)?);
  }
  DenseMatrix::from_vec(rows as usize, cols as usize, data)
}

fn read_i32(r: &mut impl Read) -> Result<i32, EvalError> {
  let mut buf = [0u8; 4];
  r.read_exact(&mut buf)?;
  Ok(i32::from_le_bytes(buf))
}

fn read_f64(r: &mut impl Read) -> Result<f64, EvalError> {
  let mut buf = [0u8; 8];
  r.read_exact(&mut buf)?;
  Ok(f64::from_le_bytes(buf))
}
