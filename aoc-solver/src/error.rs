//! Error types shared by every solver

use thiserror::Error;

/// Error raised while turning puzzle text into a solver's shared data
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Input format doesn't match expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
    /// Other parsing errors
    #[error("Parse error: {0}")]
    Other(String),
}

impl ParseError {
    /// Wrap any displayable error as an `InvalidFormat` parse error
    pub fn invalid(err: impl std::fmt::Display) -> Self {
        ParseError::InvalidFormat(err.to_string())
    }
}

/// Error raised while solving one part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The requested part number has no implementation
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// The requested part number is outside `1..=PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The puzzle could not be solved with the given input
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Build a `SolveFailed` from a plain message
    pub fn failed(message: impl Into<String>) -> Self {
        SolveError::SolveFailed(message.into().into())
    }
}

/// Error type for registry lookups and solver creation
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solver is registered for the given year and day
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// The year or day cannot be addressed by the registry
    #[error("Invalid year/day: {0}/{1}")]
    InvalidYearDay(u16, u8),
    /// Error occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    /// Error occurred during solving
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// A factory already exists for this year and day
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateFactory(u16, u8),
    /// The year or day cannot be addressed by the registry
    #[error("Invalid year/day for registration: {0}/{1}")]
    InvalidYearDay(u16, u8),
}
