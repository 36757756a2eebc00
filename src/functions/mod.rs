//! Builtin functions, organized by category. Every builtin validates its
//! arguments against a declared parameter contract before running, so the
//! handlers themselves can assume well-shaped input.

pub mod construction;
pub mod elementwise;
pub mod linalg;
pub mod statistics;
pub mod tsne;

use crate::value::{DenseMatrix, Value};
use crate::EvalError;

/// Extra named results a builtin publishes alongside its primary result.
pub type SideReturns = Vec<(String, Value)>;

/// What a single parameter position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
  /// Any dense matrix.
  Matrix,
  /// A 1×1 matrix.
  Scalar,
  /// A 1×1 matrix holding an integer-valued float.
  Integer,
  /// An integer of at least one.
  PositiveInteger,
  /// The literal dimension selector, 1 (columns) or 2 (rows).
  Dimension,
}

#[derive(Debug, Clone, Copy)]
pub struct Param {
  pub kind: ParamKind,
  pub optional: bool,
}

const fn req(kind: ParamKind) -> Param {
  Param {
    kind,
    optional: false,
  }
}

const fn opt(kind: ParamKind) -> Param {
  Param {
    kind,
    optional: true,
  }
}

/// Checks an argument list against a parameter contract. Positions in the
/// reported errors are one-based.
pub fn validate(
  function: &str,
  params: &[Param],
  args: &[&DenseMatrix],
) -> Result<(), EvalError> {
  let required = params.iter().filter(|p| !p.optional).count();
  if args.len() < required || args.len() > params.len() {
    let expected = if required == params.len() {
      format!("{required}")
    } else {
      format!("{required} to {}", params.len())
    };
    return Err(EvalError::InvalidArgument {
      function: function.to_string(),
      position: args.len(),
      reason: format!("expected {expected} arguments, got {}", args.len()),
    });
  }

  for (i, (param, arg)) in params.iter().zip(args).enumerate() {
    let scalar = arg.as_scalar();
    let integer = scalar.filter(|s| s.fract() == 0.0);
    let failure = match param.kind {
      ParamKind::Matrix => None,
      ParamKind::Scalar => scalar.is_none().then_some("expected a scalar"),
      ParamKind::Integer => {
        integer.is_none().then_some("expected an integer")
      }
      ParamKind::PositiveInteger => integer
        .filter(|&s| s >= 1.0)
        .is_none()
        .then_some("expected a positive integer"),
      ParamKind::Dimension => integer
        .filter(|&s| s == 1.0 || s == 2.0)
        .is_none()
        .then_some("expected a dimension selector (1 or 2)"),
    };
    if let Some(reason) = failure {
      return Err(EvalError::InvalidArgument {
        function: function.to_string(),
        position: i + 1,
        reason: reason.to_string(),
      });
    }
  }
  Ok(())
}

/// The scalar inside a contract-validated 1×1 argument.
pub(crate) fn scalar_arg(m: &DenseMatrix) -> f64 {
  m.as_scalar().unwrap_or(f64::NAN)
}

pub(crate) fn usize_arg(m: &DenseMatrix) -> usize {
  scalar_arg(m) as usize
}

/// Dispatches a builtin by name. Char matrices are never valid arguments.
pub fn call_builtin(
  name: &str,
  args: &[Value],
) -> Result<(Value, SideReturns), EvalError> {
  let mut dense: Vec<&DenseMatrix> = Vec::with_capacity(args.len());
  for (i, arg) in args.iter().enumerate() {
    match arg.as_dense() {
      Some(m) => dense.push(m),
      None => {
        return Err(EvalError::InvalidArgument {
          function: name.to_string(),
          position: i + 1,
          reason: "char matrices are not valid arguments".to_string(),
        })
      }
    }
  }
  let args = dense.as_slice();

  use ParamKind::*;
  let plain = |result: Result<DenseMatrix, EvalError>| {
    result.map(|m| (Value::Dense(m), SideReturns::new()))
  };

  match name {
    "size" => {
      validate(name, &[req(Matrix), opt(Dimension)], args)?;
      plain(construction::size(args))
    }
    "rand" | "random" => {
      validate(name, &[req(PositiveInteger), opt(PositiveInteger)], args)?;
      plain(construction::rand(args))
    }
    "ones" => {
      validate(name, &[req(PositiveInteger), opt(PositiveInteger)], args)?;
      plain(Ok(construction::fill(args, 1.0)))
    }
    "zeros" => {
      validate(name, &[req(PositiveInteger), opt(PositiveInteger)], args)?;
      plain(Ok(construction::fill(args, 0.0)))
    }
    "eye" => {
      validate(name, &[req(PositiveInteger)], args)?;
      plain(construction::eye(args))
    }
    "mean" => {
      validate(name, &[req(Matrix)], args)?;
      plain(statistics::mean(args[0]))
    }
    "sum" => {
      validate(name, &[req(Matrix), opt(Dimension)], args)?;
      plain(statistics::sum(args))
    }
    "min" => {
      validate(name, &[req(Matrix)], args)?;
      plain(statistics::extremum(args[0], f64::min))
    }
    "max" => {
      validate(name, &[req(Matrix)], args)?;
      plain(statistics::extremum(args[0], f64::max))
    }
    "var" => {
      validate(name, &[req(Matrix)], args)?;
      plain(statistics::var(args[0]))
    }
    "sort" => {
      validate(name, &[req(Matrix), opt(Dimension)], args)?;
      plain(Ok(statistics::sort(args)))
    }
    "hist" => {
      validate(name, &[req(Matrix), req(PositiveInteger)], args)?;
      plain(statistics::hist(args))
    }
    "normr" => {
      validate(name, &[req(Matrix)], args)?;
      plain(Ok(linalg::normr(args[0])))
    }
    "pdist" => {
      validate(name, &[req(Matrix)], args)?;
      plain(linalg::pdist(args[0]))
    }
    "svd" => {
      validate(name, &[req(Matrix)], args)?;
      linalg::svd(args[0])
    }
    "pca" => {
      validate(name, &[req(Matrix), req(PositiveInteger)], args)?;
      linalg::pca(args)
    }
    "bh_tsne" | "bhtsne" => {
      validate(
        name,
        &[req(Matrix), req(PositiveInteger), req(Scalar), req(Scalar)],
        args,
      )?;
      tsne::bh_tsne(args)
    }
    _ => match elementwise::unary(name) {
      Some(f) => {
        validate(name, &[req(Matrix)], args)?;
        plain(Ok(args[0].map(f)))
      }
      None => Err(EvalError::UnknownFunction(name.to_string())),
    },
  }
}
