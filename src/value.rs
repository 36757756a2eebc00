use crate::EvalError;

/// Print window for matrix excerpts: matrices wider or taller than this
/// print only the leading and trailing half with an ellipsis between.
pub const MAX_PRINT_WIDTH: usize = 10;

/// A value held by the environment: either a dense matrix of f64 or a
/// char matrix (an ordered list of strings). The two kinds are not
/// arithmetically composable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Dense(DenseMatrix),
  Char(CharMatrix),
}

impl Value {
  pub fn dims(&self) -> (usize, usize) {
    match self {
      Value::Dense(m) => m.dims(),
      Value::Char(m) => m.dims(),
    }
  }

  pub fn is_scalar(&self) -> bool {
    self.dims() == (1, 1)
  }

  /// The dense matrix inside, or `None` for char values.
  pub fn as_dense(&self) -> Option<&DenseMatrix> {
    match self {
      Value::Dense(m) => Some(m),
      Value::Char(_) => None,
    }
  }

  pub fn type_line(&self, name: &str) -> String {
    let (r, c) = self.dims();
    let kind = match self {
      Value::Dense(_) => "Float64",
      Value::Char(_) => "Char",
    };
    format!("{name:<10} {kind:<12} Dims({r}, {c})")
  }
}

impl From<DenseMatrix> for Value {
  fn from(m: DenseMatrix) -> Self {
    Value::Dense(m)
  }
}

impl From<CharMatrix> for Value {
  fn from(m: CharMatrix) -> Self {
    Value::Char(m)
  }
}

/// Rectangular matrix of f64 in row-major storage. A 1×1 matrix is the
/// representation of a scalar throughout the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
  rows: usize,
  cols: usize,
  data: Vec<f64>,
}

impl DenseMatrix {
  /// All-zero matrix of the given shape.
  pub fn zeros(rows: usize, cols: usize) -> Self {
    DenseMatrix {
      rows,
      cols,
      data: vec![0.0; rows * cols],
    }
  }

  /// Builds from row-major data; the length must be rows·cols.
  pub fn from_vec(
    rows: usize,
    cols: usize,
    data: Vec<f64>,
  ) -> Result<Self, EvalError> {
    if data.len() != rows * cols {
      return Err(EvalError::DimensionMismatch(format!(
        "expected {} elements for a {rows}x{cols} matrix, got {}",
        rows * cols,
        data.len()
      )));
    }
    Ok(DenseMatrix { rows, cols, data })
  }

  pub fn scalar(v: f64) -> Self {
    DenseMatrix {
      rows: 1,
      cols: 1,
      data: vec![v],
    }
  }

  pub fn empty() -> Self {
    DenseMatrix {
      rows: 0,
      cols: 0,
      data: Vec::new(),
    }
  }

  pub fn dims(&self) -> (usize, usize) {
    (self.rows, self.cols)
  }

  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn cols(&self) -> usize {
    self.cols
  }

  pub fn is_scalar(&self) -> bool {
    self.rows == 1 && self.cols == 1
  }

  pub fn is_empty(&self) -> bool {
    self.rows == 0 && self.cols == 0
  }

  /// The scalar inside a 1×1 matrix.
  pub fn as_scalar(&self) -> Option<f64> {
    if self.is_scalar() {
      Some(self.data[0])
    } else {
      None
    }
  }

  /// Bounds-checked element access.
  pub fn at(&self, i: usize, j: usize) -> Result<f64, EvalError> {
    if i >= self.rows || j >= self.cols {
      return Err(EvalError::IndexOutOfRange(format!(
        "({i}, {j}) exceeds matrix dimensions ({}, {})",
        self.rows, self.cols
      )));
    }
    Ok(self.data[i * self.cols + j])
  }

  pub fn set(&mut self, i: usize, j: usize, v: f64) -> Result<(), EvalError> {
    if i >= self.rows || j >= self.cols {
      return Err(EvalError::IndexOutOfRange(format!(
        "({i}, {j}) exceeds matrix dimensions ({}, {})",
        self.rows, self.cols
      )));
    }
    self.data[i * self.cols + j] = v;
    Ok(())
  }

  /// Bounds-checked access in row-major linear order.
  pub fn linear(&self, index: usize) -> Result<f64, EvalError> {
    self.data.get(index).copied().ok_or_else(|| {
      EvalError::IndexOutOfRange(format!(
        "index {index} exceeds matrix dimensions ({}, {})",
        self.rows, self.cols
      ))
    })
  }

  /// Row-major backing slice.
  pub fn data(&self) -> &[f64] {
    &self.data
  }

  pub fn row(&self, i: usize) -> &[f64] {
    &self.data[i * self.cols..(i + 1) * self.cols]
  }

  pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
    &mut self.data[i * self.cols..(i + 1) * self.cols]
  }

  pub fn transpose(&self) -> DenseMatrix {
    let mut out = DenseMatrix::zeros(self.cols, self.rows);
    for i in 0..self.rows {
      for j in 0..self.cols {
        out.data[j * self.rows + i] = self.data[i * self.cols + j];
      }
    }
    out
  }

  /// Applies `f` to every element, producing a new matrix.
  pub fn map(&self, f: impl Fn(f64) -> f64) -> DenseMatrix {
    DenseMatrix {
      rows: self.rows,
      cols: self.cols,
      data: self.data.iter().map(|&v| f(v)).collect(),
    }
  }
}

/// Char matrix: an ordered list of strings. Row count is the number of
/// strings, column count the longest string length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharMatrix {
  rows: Vec<String>,
}

impl CharMatrix {
  pub fn new(rows: Vec<String>) -> Self {
    CharMatrix { rows }
  }

  pub fn push(&mut self, s: String) {
    self.rows.push(s);
  }

  pub fn row_view(&self, i: usize) -> &str {
    &self.rows[i]
  }

  pub fn rows(&self) -> &[String] {
    &self.rows
  }

  pub fn dims(&self) -> (usize, usize) {
    let cols = self.rows.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    (self.rows.len(), cols)
  }
}

/// Formats `name = value` the way the shell prints a binding: scalars and
/// empty matrices inline, everything else as a bracketed block at 4-decimal
/// precision with an excerpt for large matrices.
pub fn format_binding(name: &str, value: &Value) -> String {
  match value {
    Value::Dense(m) => match m.dims() {
      (0, 0) => format!("{name} = []"),
      (1, 1) => format!("{name} = {:.4}", m.data[0]),
      _ => format!("{name} =\n{}", format_dense(m)),
    },
    Value::Char(m) => match m.dims() {
      (0, _) => format!("{name} = []"),
      _ => format!("{name} =\n{}", format_char(m)),
    },
  }
}

fn bracket_pair(i: usize, count: usize) -> (char, char) {
  if count == 1 {
    ('[', ']')
  } else if i == 0 {
    ('⎡', '⎤')
  } else if i + 1 == count {
    ('⎣', '⎦')
  } else {
    ('⎢', '⎥')
  }
}

/// Row and column indices to print, with `None` marking the ellipsis gap.
fn excerpt(n: usize) -> Vec<Option<usize>> {
  let half = MAX_PRINT_WIDTH / 2;
  if n <= MAX_PRINT_WIDTH {
    (0..n).map(Some).collect()
  } else {
    let mut picks: Vec<Option<usize>> = (0..half).map(Some).collect();
    picks.push(None);
    picks.extend((n - half..n).map(Some));
    picks
  }
}

fn format_dense(m: &DenseMatrix) -> String {
  let (r, c) = m.dims();
  let row_picks = excerpt(r);
  let col_picks = excerpt(c);

  // Column width from the widest visible entry.
  let mut width = 0;
  for ri in row_picks.iter().flatten() {
    for ci in col_picks.iter().flatten() {
      width = width.max(format!("{:.4}", m.data[ri * c + ci]).len());
    }
  }

  let mut lines = Vec::new();
  if r > MAX_PRINT_WIDTH || c > MAX_PRINT_WIDTH {
    lines.push(format!("Dims({r}, {c})"));
  }
  let shown = row_picks.len();
  for (line_no, pick) in row_picks.iter().enumerate() {
    let (open, close) = bracket_pair(line_no, shown);
    let body = match pick {
      None => col_picks
        .iter()
        .map(|_| format!("{:>width$}", "."))
        .collect::<Vec<_>>()
        .join("  "),
      Some(ri) => col_picks
        .iter()
        .map(|cp| match cp {
          Some(ci) => format!("{:>width$.4}", m.data[ri * c + ci]),
          None => format!("{:>width$}", "..."),
        })
        .collect::<Vec<_>>()
        .join("  "),
    };
    lines.push(format!("{open}{body}{close}"));
  }
  lines.join("\n")
}

fn format_char(m: &CharMatrix) -> String {
  let (r, c) = m.dims();
  let pad = |s: &str| {
    let fill = c.saturating_sub(s.chars().count());
    format!("{s}{}", " ".repeat(fill))
  };

  let mut lines = Vec::new();
  if r > 10 {
    lines.push(format!("Dims({r}, 1)"));
    lines.push(format!("⎡{}⎤", pad(m.row_view(0))));
    for i in 1..5 {
      lines.push(format!("⎢{}⎥", pad(m.row_view(i))));
    }
    lines.push(" .".to_string());
    lines.push(" .".to_string());
    lines.push(" .".to_string());
    for i in r - 5..r - 1 {
      lines.push(format!("⎢{}⎥", pad(m.row_view(i))));
    }
    lines.push(format!("⎣{}⎦", pad(m.row_view(r - 1))));
  } else {
    for i in 0..r {
      let (open, close) = bracket_pair(i, r);
      lines.push(format!("{open}{}{close}", pad(m.row_view(i))));
    }
  }
  lines.join("\n")
}
