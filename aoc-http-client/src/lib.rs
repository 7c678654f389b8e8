//! Client for adventofcode.com
//!
//! Fetches personal puzzle inputs, checks session cookies and submits
//! answers. Blocking, rustls-only.
//!
//! ```no_run
//! use aoc_http_client::{AocClient, SubmissionResult};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new()?;
//! let session = std::env::var("AOC_SESSION")?;
//!
//! let input = client.get_input(2015, 1, &session)?;
//! let floor: i32 = input.trim_end().chars().map(|c| if c == '(' { 1 } else { -1 }).sum();
//!
//! match client.submit_answer(2015, 1, 1, &floor.to_string(), &session)? {
//!     SubmissionResult::Correct => println!("gold star"),
//!     SubmissionResult::Incorrect { hint } => println!("wrong ({hint:?})"),
//!     SubmissionResult::AlreadyCompleted => println!("already solved"),
//!     SubmissionResult::Throttled { wait_time } => println!("wait {wait_time:?}"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod parser;

pub use client::{AnswerHint, AocClient, AocClientBuilder, SessionInfo, SubmissionResult};
pub use error::AocError;
