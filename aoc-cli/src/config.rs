//! Configuration resolution from CLI args and the environment

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::Zeroizing;

/// Environment variable holding the session cookie
pub const SESSION_ENV: &str = "AOC_SESSION";

/// Token file location, relative to the home directory
const TOKEN_FILE: &str = ".config/aocd/token";

/// Resolved runtime configuration
pub struct Config {
    pub year_filter: Option<u16>,
    pub day_filter: Option<u8>,
    pub part_filter: Option<u8>,
    /// Every tag must be present on a solver for it to run
    pub tags: Vec<String>,
    /// Local input file; bypasses cache and network
    pub input_file: Option<PathBuf>,
    pub cache_dir: PathBuf,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub submit: bool,
    pub auto_retry: bool,
    /// Account id partitioning the cache (0 when reading a local file)
    pub user_id: u64,
    /// Whether the user id came from the user rather than the session
    pub user_id_provided: bool,
    /// Session cookie; empty when none is known yet
    pub session: Zeroizing<String>,
    pub quiet: bool,
}

impl Config {
    /// Resolve the session and user id, prompting only when needed
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let cache_dir = expand_tilde(&args.cache_dir);
        let thread_count = args.threads.unwrap_or_else(num_cpus);
        let user_id_provided = args.user_id.is_some();

        let (session, user_id) = if args.input.is_some() {
            (Zeroizing::new(String::new()), args.user_id.unwrap_or(0))
        } else {
            resolve_session_and_user_id(args.user_id, args.submit)?
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input_file: args.input,
            cache_dir,
            thread_count,
            parallelize_by: args.parallelize_by,
            submit: args.submit,
            auto_retry: args.auto_retry,
            user_id,
            user_id_provided,
            session,
            quiet: args.quiet,
        })
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// First non-empty line of a token file
fn read_token_file(path: &Path) -> Option<Zeroizing<String>> {
    let contents = Zeroizing::new(std::fs::read_to_string(path).ok()?);
    let token = contents.lines().next()?.trim();
    (!token.is_empty()).then(|| Zeroizing::new(token.to_string()))
}

/// Session from `AOC_SESSION`, then the token file
fn stored_session() -> Option<Zeroizing<String>> {
    if let Ok(session) = std::env::var(SESSION_ENV)
        && !session.trim().is_empty()
    {
        debug!("using session from {SESSION_ENV}");
        return Some(Zeroizing::new(session.trim().to_string()));
    }

    let path = dirs::home_dir()?.join(TOKEN_FILE);
    let session = read_token_file(&path)?;
    debug!(path = %path.display(), "using session from token file");
    Some(session)
}

fn prompt_user_id() -> Result<u64, CliError> {
    use std::io::Write;
    println!("No user ID provided. Enter your AOC user ID (shown on the settings page).");
    print!("User ID: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    input
        .trim()
        .parse()
        .map_err(|_| CliError::Config("Invalid user ID: must be a number".to_string()))
}

/// Ask for the session cookie without echoing it
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    println!("{reason}");
    let session = Zeroizing::new(rpassword::prompt_password("Enter AOC session key: ")?);
    if session.trim().is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(Zeroizing::new(session.trim().to_string()))
}

/// Resolve the account behind `session`, checking it against `expected`
pub fn verify_session(session: &str, expected: Option<u64>) -> Result<u64, CliError> {
    let client = aoc_http_client::AocClient::new()?;
    let actual = client
        .verify_session(session)?
        .user_id
        .ok_or_else(|| CliError::Config("Invalid session: could not fetch user ID".to_string()))?;
    check_user_id(expected, actual)
}

fn check_user_id(expected: Option<u64>, actual: u64) -> Result<u64, CliError> {
    match expected {
        Some(expected) if expected != actual => Err(CliError::UserIdMismatch { expected, actual }),
        _ => Ok(actual),
    }
}

fn resolve_session_and_user_id(
    provided_user_id: Option<u64>,
    submit: bool,
) -> Result<(Zeroizing<String>, u64), CliError> {
    let session = match stored_session() {
        Some(session) => session,
        None if submit => prompt_session("Session token required for submission")?,
        None => Zeroizing::new(String::new()),
    };

    let user_id = match (provided_user_id, session.is_empty()) {
        (expected, false) => verify_session(&session, expected)?,
        (Some(user_id), true) => user_id,
        (None, true) => prompt_user_id()?,
    };

    Ok((session, user_id))
}
