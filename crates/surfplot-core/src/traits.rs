use crate::error::Result;

/// Validate the structural consistency of a value before it is used.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
