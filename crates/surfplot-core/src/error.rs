use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input field an expression error is attributed to.
///
/// The UI uses this tag to focus the offending input, so the names are part
/// of the persisted and displayed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorField {
    RowMin,
    RowMax,
    ColMin,
    ColMax,
    Equation,
    EquationX,
    EquationY,
    EquationZ,
}

impl ErrorField {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorField::RowMin => "row_min",
            ErrorField::RowMax => "row_max",
            ErrorField::ColMin => "col_min",
            ErrorField::ColMax => "col_max",
            ErrorField::Equation => "equation",
            ErrorField::EquationX => "equation_x",
            ErrorField::EquationY => "equation_y",
            ErrorField::EquationZ => "equation_z",
        }
    }

    /// True for the four axis-bound fields.
    pub fn is_bound(self) -> bool {
        matches!(
            self,
            ErrorField::RowMin | ErrorField::RowMax | ErrorField::ColMin | ErrorField::ColMax
        )
    }
}

impl fmt::Display for ErrorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure category reported by the expression evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    EmptyExpression,
    UnexpectedToken,
    UnexpectedEnd,
    UnknownVariable,
    UnknownFunction,
    ArgumentCount,
    MissingParen,
    VariableCount,
    NotFinite,
}

impl ErrorCode {
    /// Stable numeric code for the UI collaborator.
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::EmptyExpression => 1,
            ErrorCode::UnexpectedToken => 2,
            ErrorCode::UnexpectedEnd => 3,
            ErrorCode::UnknownVariable => 5,
            ErrorCode::UnknownFunction => 6,
            ErrorCode::ArgumentCount => 7,
            ErrorCode::MissingParen => 8,
            ErrorCode::VariableCount => 9,
            ErrorCode::NotFinite => 10,
        }
    }
}

/// Parse or evaluation failure, with enough location data to highlight the
/// offending substring of the input.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message} at position {position} ('{token}')")]
pub struct EvalError {
    pub message: String,
    /// Full text of the expression that failed.
    pub expression: String,
    /// Text of the offending token (may be empty at end of input).
    pub token: String,
    /// Character offset of `token` inside `expression`.
    pub position: usize,
    pub code: ErrorCode,
}

impl EvalError {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        expression: &str,
        token: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            message: message.into(),
            expression: expression.to_string(),
            token: token.into(),
            position,
            code,
        }
    }
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Invalid {field}: {source}")]
    Expression {
        field: ErrorField,
        #[source]
        source: EvalError,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl PlotError {
    pub fn expression(field: ErrorField, source: EvalError) -> Self {
        PlotError::Expression { field, source }
    }

    /// Field tag of an expression error, if any.
    pub fn field(&self) -> Option<ErrorField> {
        match self {
            PlotError::Expression { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Evaluator detail of an expression error, if any.
    pub fn eval_error(&self) -> Option<&EvalError> {
        match self {
            PlotError::Expression { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
