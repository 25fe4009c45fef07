//! Scalar expressions over named variables.
//!
//! Parsing and evaluation are done by `meval`. Expressions are compiled once
//! against a [`Variables`] table that maps free-variable names to
//! evaluation-time slots, then evaluated any number of times with
//! [`Expr::eval`]. Failures carry the offending token and its character
//! position.

mod error;
pub mod expr;

pub use expr::{Expr, Variables};
