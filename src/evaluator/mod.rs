//! Expression evaluation: the tree walker, binary operator semantics, and
//! matrix sub-indexing.

pub(crate) mod binary_ops;
mod core_eval;
mod indexing;

pub use core_eval::evaluate_expr;
