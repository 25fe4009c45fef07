pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{ErrorCode, ErrorField, EvalError, PlotError, Result};
pub use tolerance::{is_defined, Tolerance};
