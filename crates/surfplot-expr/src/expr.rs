//! Compiled expressions and their variable tables.

use std::f64::consts::{E, PI};
use std::fmt;

use log::trace;
use meval::{Context, ContextProvider};
use surfplot_core::{ErrorCode, EvalError};

use crate::error::from_meval;

thread_local! {
    static FUNCTIONS: Context<'static> = functions();
}

/// Constants and functions every expression may use.
fn functions() -> Context<'static> {
    let mut ctx = Context::new();
    ctx.var("pi", PI).var("e", E);
    ctx.func("sin", f64::sin)
        .func("cos", f64::cos)
        .func("tan", f64::tan)
        .func("asin", f64::asin)
        .func("acos", f64::acos)
        .func("atan", f64::atan)
        .func("sinh", f64::sinh)
        .func("cosh", f64::cosh)
        .func("tanh", f64::tanh)
        .func("sqrt", f64::sqrt)
        .func("exp", f64::exp)
        .func("ln", f64::ln)
        .func("log", f64::ln)
        .func("log10", f64::log10)
        .func("log2", f64::log2)
        .func("abs", f64::abs)
        .func("floor", f64::floor)
        .func("ceil", f64::ceil)
        .func("round", f64::round)
        .func("sign", f64::signum);
    ctx.func2("atan2", f64::atan2)
        .func2("pow", f64::powf)
        .func2("min", f64::min)
        .func2("max", f64::max);
    ctx
}

/// Names of the free variables an expression may reference.
///
/// Each name maps to an evaluation slot; several aliases may share a slot
/// (e.g. `theta` and `t`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    names: Vec<(String, usize)>,
}

impl Variables {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Add a name bound to `slot`.
    pub fn with(mut self, name: &str, slot: usize) -> Self {
        self.names.push((name.to_string(), slot));
        self
    }

    pub fn slot(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, slot)| slot)
    }

    /// Number of distinct slots (highest slot plus one).
    pub fn slot_count(&self) -> usize {
        self.names.iter().map(|&(_, s)| s + 1).max().unwrap_or(0)
    }
}

/// Slot values seen through their variable names.
struct Scope<'a> {
    vars: &'a Variables,
    values: &'a [f64],
}

impl ContextProvider for Scope<'_> {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.vars
            .slot(name)
            .and_then(|slot| self.values.get(slot))
            .copied()
    }
}

/// An expression compiled once and evaluated many times.
#[derive(Debug, Clone)]
pub struct Expr {
    source: String,
    parsed: meval::Expr,
    vars: Variables,
}

impl Expr {
    /// Compile `source` against a variable table.
    ///
    /// Syntax errors, unknown identifiers and wrong argument counts are
    /// reported here; evaluation itself can only fail on a slot-count
    /// mismatch.
    pub fn compile(source: &str, vars: &Variables) -> Result<Self, EvalError> {
        if source.trim().is_empty() {
            return Err(EvalError::new(
                ErrorCode::EmptyExpression,
                "Empty expression",
                source,
                "",
                0,
            ));
        }
        let parsed: meval::Expr = source.parse().map_err(|e| from_meval(source, e))?;
        let expr = Self {
            source: source.to_string(),
            parsed,
            vars: vars.clone(),
        };

        // Resolve every name once so that evaluation cannot hit an unknown one.
        let zeros = vec![0.0; vars.slot_count()];
        expr.run(&zeros).map_err(|e| from_meval(source, e))?;
        trace!("compiled '{source}'");
        Ok(expr)
    }

    /// Compile and evaluate an expression without free variables.
    pub fn constant(source: &str) -> Result<f64, EvalError> {
        Self::compile(source, &Variables::new())?.eval(&[])
    }

    /// Evaluate with `values[i]` bound to slot `i`.
    ///
    /// NaN and infinities are returned as ordinary values.
    pub fn eval(&self, values: &[f64]) -> Result<f64, EvalError> {
        let slots = self.vars.slot_count();
        if values.len() != slots {
            return Err(EvalError::new(
                ErrorCode::VariableCount,
                format!("Expected {} variable value(s), got {}", slots, values.len()),
                &self.source,
                "",
                0,
            ));
        }
        self.run(values).map_err(|e| from_meval(&self.source, e))
    }

    fn run(&self, values: &[f64]) -> Result<f64, meval::Error> {
        let scope = Scope {
            vars: &self.vars,
            values,
        };
        FUNCTIONS.with(|functions| self.parsed.eval_with_context((&scope, functions)))
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aliases_share_slot() {
        let vars = Variables::new().with("theta", 1).with("t", 1).with("r", 0);
        assert_eq!(vars.slot("t"), vars.slot("theta"));
        assert_eq!(vars.slot_count(), 2);
        let e = Expr::compile("r * cos(t) + theta", &vars).unwrap();
        assert_relative_eq!(e.eval(&[2.0, 0.0]).unwrap(), 2.0);
    }

    #[test]
    fn test_constant() {
        assert_relative_eq!(Expr::constant("2*pi").unwrap(), std::f64::consts::TAU);
        assert!(Expr::constant("1/0").unwrap().is_infinite());
        let err = Expr::constant("x").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownVariable);
    }

    #[test]
    fn test_slot_mismatch() {
        let vars = Variables::new().with("x", 0).with("y", 1);
        let e = Expr::compile("x + y", &vars).unwrap();
        let err = e.eval(&[1.0]).unwrap_err();
        assert_eq!(err.code, ErrorCode::VariableCount);
        assert_eq!(err.expression, "x + y");
    }

    #[test]
    fn test_function_table() {
        assert_relative_eq!(Expr::constant("log(e)").unwrap(), 1.0);
        assert_relative_eq!(Expr::constant("log10(1000)").unwrap(), 3.0);
        assert_relative_eq!(Expr::constant("log2(8)").unwrap(), 3.0);
        assert_relative_eq!(Expr::constant("pow(2, 10)").unwrap(), 1024.0);
        assert_relative_eq!(Expr::constant("max(1, 2) + min(1, 2)").unwrap(), 3.0);
        assert_relative_eq!(Expr::constant("sign(-3)").unwrap(), -1.0);
        assert_relative_eq!(Expr::constant("atan2(1, 1)").unwrap(), std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn test_empty_source() {
        let err = Expr::constant("   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyExpression);
    }
}
