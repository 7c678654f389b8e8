//! Blocking client for adventofcode.com

use crate::error::AocError;
use crate::parser;
use reqwest::Url;
use reqwest::header::{COOKIE, HeaderValue};
use std::time::Duration;
use tracing::{debug, info};
use zeroize::Zeroizing;

const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

/// Result of session verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// User id when the session is valid, `None` otherwise
    pub user_id: Option<u64>,
}

/// Direction hint the site gives for some wrong answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerHint {
    TooHigh,
    TooLow,
}

/// Outcome of posting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The answer was accepted
    Correct,
    /// The answer was rejected
    Incorrect {
        /// Too high / too low, when the site says so
        hint: Option<AnswerHint>,
    },
    /// The part was already solved on this account
    AlreadyCompleted,
    /// Submitted too soon after a previous attempt
    Throttled {
        /// How long the site asks to wait, when it could be parsed
        wait_time: Option<Duration>,
    },
}

/// Client for session checks, input download and answer submission
///
/// Redirects are never followed: the site answers an expired session with a
/// redirect to the home page, which must not be mistaken for success.
///
/// ```no_run
/// use aoc_http_client::AocClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let session = "53616c7465645f5f";
///
/// if let Some(user_id) = client.verify_session(session)?.user_id {
///     println!("logged in as #{user_id}");
/// }
/// let input = client.get_input(2015, 1, session)?;
/// println!("{} bytes", input.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl AocClient {
    /// Client pointed at adventofcode.com with default settings
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    /// Builder for a customised client
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// `Cookie` header for the session, flagged sensitive so it never shows
    /// up in debug output
    fn session_cookie(session: &str) -> Result<HeaderValue, AocError> {
        let cookie = Zeroizing::new(format!("session={session}"));
        let mut header = HeaderValue::from_str(&cookie)
            .map_err(|_| AocError::ClientInit("session cookie is not a valid header".into()))?;
        header.set_sensitive(true);
        Ok(header)
    }

    /// Absolute URL for the given path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AocError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit(format!("{} cannot be a base URL", self.base_url)))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    /// Check a session cookie against the settings page
    ///
    /// A 2xx page carrying the anonymous user id means the session is valid.
    /// Redirects and error statuses mean it is not; only transport failures
    /// are returned as `Err`.
    pub fn verify_session(&self, session: &str) -> Result<SessionInfo, AocError> {
        let url = self.endpoint(&["settings"])?;
        debug!(%url, "verifying session");

        let response = self
            .client
            .get(url)
            .header(COOKIE, Self::session_cookie(session)?)
            .send()?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "session rejected");
            return Ok(SessionInfo { user_id: None });
        }

        let html = response.text().map_err(|_| AocError::Encoding)?;
        Ok(SessionInfo {
            user_id: parser::extract_user_id(&html),
        })
    }

    /// Download the personal puzzle input for `year`/`day`
    ///
    /// The text is returned exactly as served, trailing newline included.
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        let url = self.endpoint(&[&year.to_string(), "day", &day.to_string(), "input"])?;
        debug!(%url, "fetching puzzle input");

        let response = self
            .client
            .get(url.clone())
            .header(COOKIE, Self::session_cookie(session)?)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AocError::InvalidStatus {
                status,
                url: url.to_string(),
            });
        }

        response.text().map_err(|_| AocError::Encoding)
    }

    /// Post `answer` for one part and classify the response page
    pub fn submit_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
        answer: &str,
        session: &str,
    ) -> Result<SubmissionResult, AocError> {
        let url = self.endpoint(&[&year.to_string(), "day", &day.to_string(), "answer"])?;
        let form = [("level", part.to_string()), ("answer", answer.to_string())];

        let response = self
            .client
            .post(url.clone())
            .header(COOKIE, Self::session_cookie(session)?)
            .form(&form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AocError::InvalidStatus {
                status,
                url: url.to_string(),
            });
        }

        let html = response.text().map_err(|_| AocError::Encoding)?;
        let result = parser::parse_submission_response(&html)?;
        info!(year, day, part, answer, ?result, "answer submitted");
        Ok(result)
    }
}

/// Builder for [`AocClient`]
///
/// ```no_run
/// use aoc_http_client::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .client_builder(reqwest::blocking::Client::builder().timeout(Duration::from_secs(10)))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AocClientBuilder {
    base_url: Option<Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client somewhere other than adventofcode.com (mock servers)
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Start from a custom reqwest builder (timeouts, proxies)
    ///
    /// The redirect policy is always reset to `none`.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let client = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient { client, base_url })
    }
}
