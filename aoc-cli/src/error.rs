//! Error types for the runner

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Top-level runner error
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// `--user-id` disagrees with the account behind the session
    #[error("User ID mismatch: expected {expected}, session belongs to {actual}")]
    UserIdMismatch { expected: u64, actual: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failures collected while running solvers
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Errors raised while running work items
///
/// Wrapped in [`ArcExecutorError`] so errors from concurrent work can be
/// cloned into a single `Multiple`.
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    #[error("Input unavailable for {year}/{day:02}: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Result channel closed")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested ones
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = Vec::new();
        for error in [first, second] {
            match error.inner() {
                ExecutorError::Multiple(inner) => errors.extend(inner.iter().cloned()),
                _ => errors.push(error),
            }
        }
        ExecutorError::Multiple(errors).into()
    }

    /// Merge `new` into an optional accumulated error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    /// Number of leaf errors
    pub fn count(&self) -> usize {
        match self.inner() {
            ExecutorError::Multiple(inner) => inner.len(),
            _ => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache directory creation failed: {0}")]
    DirCreation(String),
}
