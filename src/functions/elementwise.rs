//! Elementwise math: each of these maps a scalar function over every
//! entry of its single matrix argument.

/// Looks up an elementwise builtin by name.
pub fn unary(name: &str) -> Option<fn(f64) -> f64> {
  let f: fn(f64) -> f64 = match name {
    "exp" => f64::exp,
    "log" => f64::ln,
    "sqrt" => f64::sqrt,
    "abs" => f64::abs,
    "sin" => f64::sin,
    "cos" => f64::cos,
    "tan" => f64::tan,
    "sinh" => f64::sinh,
    "cosh" => f64::cosh,
    "tanh" => f64::tanh,
    "asin" => f64::asin,
    "acos" => f64::acos,
    "atan" => f64::atan,
    "asinh" => f64::asinh,
    "acosh" => f64::acosh,
    "atanh" => f64::atanh,
    "round" => f64::round,
    "floor" => f64::floor,
    "ceil" => f64::ceil,
    _ => return None,
  };
  Some(f)
}
