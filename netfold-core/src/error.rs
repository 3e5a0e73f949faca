/// Error taxonomy for shape construction and descriptor parsing
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Shape parameters fail the build precondition (non-positive size).
    #[error("invalid shape parameters: {0}")]
    InvalidParameters(String),

    /// A shape descriptor string could not be parsed.
    #[error("invalid shape descriptor: {0}")]
    Parse(String),
}
