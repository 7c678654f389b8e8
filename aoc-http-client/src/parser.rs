//! Scraping of the site's HTML responses

use crate::client::{AnswerHint, SubmissionResult};
use crate::error::AocError;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

static USER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(anonymous user #(\d+)\)").expect("user id pattern"));

static THROTTLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"You have (.+?) left to wait\.").expect("throttle pattern"));

static MAIN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main").expect("main selector"));

/// User id shown on the settings page
pub(crate) fn extract_user_id(html: &str) -> Option<u64> {
    USER_ID.captures(html)?.get(1)?.as_str().parse().ok()
}

/// Concatenated text of the first `<main>` element
pub(crate) fn extract_main_text(html: &str) -> Result<String, AocError> {
    let document = Html::parse_document(html);
    let main = document.select(&MAIN).next().ok_or(AocError::HtmlParse)?;
    Ok(main.text().collect())
}

fn extract_wait_time(text: &str) -> Option<Duration> {
    let wait = THROTTLE.captures(text)?.get(1)?.as_str();
    humantime::parse_duration(wait).ok()
}

fn extract_hint(text: &str) -> Option<AnswerHint> {
    if text.contains("your answer is too high") {
        Some(AnswerHint::TooHigh)
    } else if text.contains("your answer is too low") {
        Some(AnswerHint::TooLow)
    } else {
        None
    }
}

/// Classify the page returned after posting an answer
pub(crate) fn parse_submission_response(html: &str) -> Result<SubmissionResult, AocError> {
    let text = extract_main_text(html)?;

    if text.contains("not the right answer") {
        return Ok(SubmissionResult::Incorrect {
            hint: extract_hint(&text),
        });
    }
    if text.contains("already complete it") {
        return Ok(SubmissionResult::AlreadyCompleted);
    }
    if text.contains("gave an answer too recently") {
        return Ok(SubmissionResult::Throttled {
            wait_time: extract_wait_time(&text),
        });
    }

    Ok(SubmissionResult::Correct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn page(main: &str) -> String {
        format!("<html><body><article>ignored</article><main>{main}</main></body></html>")
    }

    #[test]
    fn test_lenient_html() {
        assert_eq!(
            extract_main_text("<html><body><main>Unclosed tag").unwrap(),
            "Unclosed tag"
        );
    }

    #[test]
    fn test_missing_main() {
        assert!(matches!(
            parse_submission_response("<html><body><p>nope</p></body></html>"),
            Err(AocError::HtmlParse)
        ));
    }

    #[test]
    fn test_incorrect_with_hint() {
        let html = page(
            "That's not the right answer; your answer is too low. \
             You have 59s left to wait.",
        );
        assert_eq!(
            parse_submission_response(&html).unwrap(),
            SubmissionResult::Incorrect {
                hint: Some(AnswerHint::TooLow)
            }
        );

        let html = page("That's not the right answer.");
        assert_eq!(
            parse_submission_response(&html).unwrap(),
            SubmissionResult::Incorrect { hint: None }
        );
    }

    #[test]
    fn test_already_completed() {
        let html = page("You don't seem to be solving the right level.  Did you already complete it?");
        assert_eq!(
            parse_submission_response(&html).unwrap(),
            SubmissionResult::AlreadyCompleted
        );
    }

    #[test]
    fn test_throttled_without_parsable_wait() {
        let html = page("You gave an answer too recently. You have soon left to wait.");
        assert_eq!(
            parse_submission_response(&html).unwrap(),
            SubmissionResult::Throttled { wait_time: None }
        );
    }

    #[test]
    fn test_empty_main_is_correct() {
        assert_eq!(
            parse_submission_response(&page("")).unwrap(),
            SubmissionResult::Correct
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_wait_time_extracted(minutes in 1u64..10, seconds in 0u64..60) {
            let html = page(&format!(
                "You gave an answer too recently. You have {minutes}m {seconds}s left to wait."
            ));
            prop_assert_eq!(
                parse_submission_response(&html).unwrap(),
                SubmissionResult::Throttled {
                    wait_time: Some(Duration::from_secs(minutes * 60 + seconds))
                }
            );
        }

        #[test]
        fn prop_user_id_extracted(id in 1u64..10_000_000) {
            let html = format!("<html><body>(anonymous user #{id})</body></html>");
            prop_assert_eq!(extract_user_id(&html), Some(id));
        }

        #[test]
        fn prop_user_id_requires_marker(id in 1u64..10_000_000) {
            let html = format!("<html><body>user #{id}</body></html>");
            prop_assert_eq!(extract_user_id(&html), None);
        }
    }
}
