use pest::iterators::Pair;

use crate::{EvalError, MatParser, Rule};

/// Binary operator classes, listed loosest-binding first. The evaluator
/// never reorders these; the grammar's precedence cascade already fixed the
/// shape of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  ElemDiv,
  ElemMul,
  MatMul,
  ScalarDiv,
  Concat,
}

impl BinaryOp {
  /// Surface spelling of the operator, for error messages.
  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::ElemDiv => "./",
      BinaryOp::ElemMul => ".*",
      BinaryOp::MatMul => "*",
      BinaryOp::ScalarDiv => "/",
      BinaryOp::Concat => "space concatenation",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Number(f64),
  Identifier(String),
  /// Trailing `'` marker.
  Transpose(Box<Expr>),
  /// Parenthesis group. Kept as an explicit node so the evaluator can bind
  /// the group result into the temp arena, one entry per group.
  Group(Box<Expr>),
  /// `[row; row; ...]` — each row is a list of space-separated elements.
  Matrix(Vec<Vec<Expr>>),
  /// `start:stop` or `start:step:stop`.
  Range {
    start: Box<Expr>,
    step: Option<Box<Expr>>,
    stop: Box<Expr>,
  },
  /// Bare `:` — the whole ambient index range.
  FullRange,
  /// Leading unary minus.
  Neg(Box<Expr>),
  Binary {
    op: BinaryOp,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  /// `identifier(args)` — builtin call or matrix sub-indexing, decided at
  /// evaluation time depending on what the identifier resolves to.
  Call { name: String, args: Vec<Expr> },
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
  Assign { name: String, expr: Expr },
  Expr(Expr),
}

/// Parse a trimmed input line into a [`Statement`].
///
/// Pest failures are folded into the language's own error taxonomy: inputs
/// with an empty operand term (`3++4`, `f(1,,2)`, a trailing operator)
/// report `MissingTerm`, anything else `UnknownExpression`.
pub fn parse_statement(input: &str) -> Result<Statement, EvalError> {
  use pest::Parser;

  let mut pairs = MatParser::parse(Rule::Program, input)
    .map_err(|_| classify_parse_failure(input))?;
  let program = pairs.next().ok_or(EvalError::EmptyInput)?;
  let node = program
    .into_inner()
    .find(|p| matches!(p.as_rule(), Rule::Assignment | Rule::Expression))
    .ok_or(EvalError::EmptyInput)?;

  match node.as_rule() {
    Rule::Assignment => {
      let mut inner = node.into_inner();
      let name = inner.next().expect("assignment name").as_str().to_string();
      let expr = pair_to_expr(inner.next().expect("assignment value"));
      Ok(Statement::Assign { name, expr })
    }
    Rule::Expression => Ok(Statement::Expr(pair_to_expr(node))),
    _ => unreachable!(),
  }
}

/// Decide which taxonomy error a parse failure maps to. An operator
/// followed by another operator (or by the end of the input, or an empty
/// function argument) means a term string of zero length: `MissingTerm`.
fn classify_parse_failure(input: &str) -> EvalError {
  let compact: String = input.chars().filter(|c| *c != ' ').collect();
  let bytes = compact.as_bytes();
  let is_op = |b: u8| matches!(b, b'+' | b'-' | b'*' | b'/');

  if let Some(&last) = bytes.last() {
    if is_op(last) || last == b',' || last == b':' && bytes.len() > 1 {
      return EvalError::MissingTerm;
    }
  }
  for w in bytes.windows(2) {
    let doubled_op = is_op(w[0]) && is_op(w[1]) && w[1] != b'-';
    let empty_arg = w[0] == b',' && (w[1] == b',' || w[1] == b')');
    let empty_lead = w[0] == b'(' && w[1] == b',';
    if doubled_op || empty_arg || empty_lead {
      return EvalError::MissingTerm;
    }
  }
  EvalError::UnknownExpression(input.to_string())
}

/// Convert a pest pair into an [`Expr`]. The grammar guarantees shape, so
/// this is a mechanical fold over the precedence cascade.
pub fn pair_to_expr(pair: Pair<Rule>) -> Expr {
  match pair.as_rule() {
    Rule::Expression => {
      let inner = pair.into_inner().next().expect("inner expression");
      pair_to_expr(inner)
    }
    Rule::Range | Rule::BareRange => {
      let mut parts = pair.into_inner().map(pair_to_expr);
      let start = parts.next().expect("range start");
      let second = parts.next().expect("range bound");
      match parts.next() {
        Some(stop) => Expr::Range {
          start: Box::new(start),
          step: Some(Box::new(second)),
          stop: Box::new(stop),
        },
        None => Expr::Range {
          start: Box::new(start),
          step: None,
          stop: Box::new(second),
        },
      }
    }
    Rule::FullRange => Expr::FullRange,
    Rule::Additive | Rule::BareAdditive => additive_to_expr(pair),
    Rule::ElemDiv | Rule::BareElemDiv => {
      fold_binary(pair, BinaryOp::ElemDiv)
    }
    Rule::ElemMul | Rule::BareElemMul => {
      fold_binary(pair, BinaryOp::ElemMul)
    }
    Rule::MatMul | Rule::BareMatMul => fold_binary(pair, BinaryOp::MatMul),
    Rule::ScalarDiv | Rule::BareScalarDiv => {
      fold_binary(pair, BinaryOp::ScalarDiv)
    }
    Rule::Concat => fold_binary(pair, BinaryOp::Concat),
    // RangeAtom has no transpose marker, so the trailing check is a no-op
    // for it.
    Rule::Postfix | Rule::ConcatItem | Rule::RangeAtom => {
      let mut inner = pair.into_inner().peekable();
      let negate = inner
        .peek()
        .is_some_and(|p| p.as_rule() == Rule::UnaryMinus);
      if negate {
        inner.next();
      }
      let mut expr = pair_to_expr(inner.next().expect("postfix primary"));
      if inner.next().is_some() {
        expr = Expr::Transpose(Box::new(expr));
      }
      if negate {
        expr = Expr::Neg(Box::new(expr));
      }
      expr
    }
    Rule::Group => {
      let inner = pair.into_inner().next().expect("group body");
      Expr::Group(Box::new(pair_to_expr(inner)))
    }
    Rule::Call => {
      let mut inner = pair.into_inner();
      let name = inner.next().expect("call name").as_str().to_string();
      let args = match inner.next() {
        Some(arg_list) => arg_list.into_inner().map(pair_to_expr).collect(),
        None => Vec::new(),
      };
      Expr::Call { name, args }
    }
    Rule::Matrix => {
      let rows = pair
        .into_inner()
        .map(|row| row.into_inner().map(pair_to_expr).collect())
        .collect();
      Expr::Matrix(rows)
    }
    Rule::Identifier => Expr::Identifier(pair.as_str().to_string()),
    Rule::Number => {
      // The Number rule only admits strings f64 parsing accepts.
      Expr::Number(pair.as_str().parse().expect("numeric literal"))
    }
    other => unreachable!("unexpected rule {other:?}"),
  }
}

/// Fold `operand (op operand)*` into a left-associative chain. When only
/// one operand is present the node collapses into it.
fn fold_binary(pair: Pair<Rule>, op: BinaryOp) -> Expr {
  let mut inner = pair.into_inner();
  let first = pair_to_expr(inner.next().expect("left operand"));
  inner.fold(first, |left, right| Expr::Binary {
    op,
    left: Box::new(left),
    right: Box::new(pair_to_expr(right)),
  })
}

/// Additive chains mix `+` and `-` between operands, so the generic
/// single-operator fold does not apply.
fn additive_to_expr(pair: Pair<Rule>) -> Expr {
  let mut inner = pair.into_inner();

  let mut expr = pair_to_expr(inner.next().expect("additive operand"));

  while let Some(op_pair) = inner.next() {
    let op = match op_pair.as_str() {
      "+" => BinaryOp::Add,
      "-" => BinaryOp::Sub,
      other => unreachable!("unexpected additive operator {other}"),
    };
    let right = pair_to_expr(inner.next().expect("additive operand"));
    expr = Expr::Binary {
      op,
      left: Box::new(expr),
      right: Box::new(right),
    };
  }
  expr
}
