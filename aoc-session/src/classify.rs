//! Classification of answer submission responses
//!
//! The site reports every submission result as free text inside an HTML page.
//! [`Classifier`] maps that text to a [`SubmissionOutcome`] by checking a fixed
//! list of trigger phrases in order; the first rule that matches wins.

use crate::error::AocError;
use crate::extract::{extract_cooldown, extract_recorded_answers, extract_wait_left};
use crate::puzzle::Part;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Characters of an unrecognized body kept for inspection
pub const SNIPPET_CHARS: usize = 200;

/// Result of an answer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Answer was correct
    Correct,
    /// Answer was incorrect
    Incorrect {
        /// Wait before the next attempt, when the site mentions one
        cooldown: Option<String>,
    },
    /// Submission was rejected because the previous one was too recent
    OnCooldown {
        /// Remaining wait as worded by the site, e.g. `3m 20s`
        cooldown: String,
    },
    /// The response matched none of the known phrases
    Unrecognized {
        /// Start of the response body
        snippet: String,
    },
}

impl SubmissionOutcome {
    /// The cooldown text, if the site reported one
    pub fn cooldown(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Incorrect { cooldown } => cooldown.as_deref(),
            SubmissionOutcome::OnCooldown { cooldown } => Some(cooldown),
            _ => None,
        }
    }

    /// The cooldown as a `Duration`, when it is worded like `3m 20s`
    ///
    /// Wordings such as `one minute` yield `None`; the raw text is still
    /// available through [`cooldown`](Self::cooldown).
    pub fn cooldown_duration(&self) -> Option<Duration> {
        humantime::parse_duration(self.cooldown()?).ok()
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, SubmissionOutcome::Correct)
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionOutcome::Correct => write!(f, "correct"),
            SubmissionOutcome::Incorrect { cooldown: None } => write!(f, "incorrect"),
            SubmissionOutcome::Incorrect {
                cooldown: Some(cooldown),
            } => write!(f, "incorrect, on cooldown: {}", cooldown),
            SubmissionOutcome::OnCooldown { cooldown } => write!(f, "on cooldown: {}", cooldown),
            SubmissionOutcome::Unrecognized { snippet } => {
                write!(f, "unrecognized response: {}", snippet)
            }
        }
    }
}

/// Trigger phrases for each classification rule
///
/// The defaults follow the site's current wording. Any phrase of a rule
/// matching is enough for that rule to fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPhrases {
    pub correct: Vec<String>,
    pub already_completed: Vec<String>,
    pub too_recent: Vec<String>,
    pub incorrect: Vec<String>,
}

impl Default for SubmissionPhrases {
    fn default() -> Self {
        Self {
            correct: vec!["That's the right answer!".to_string()],
            already_completed: vec![
                "Did you already complete it?".to_string(),
                "Both parts of this puzzle are complete!".to_string(),
            ],
            too_recent: vec!["You gave an answer too recently".to_string()],
            incorrect: vec![
                "That's not the right answer.".to_string(),
                "before trying again.".to_string(),
            ],
        }
    }
}

fn contains_any(body: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| body.contains(phrase.as_str()))
}

/// Maps submission response bodies to outcomes
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    phrases: SubmissionPhrases,
}

impl Classifier {
    pub fn new(phrases: SubmissionPhrases) -> Self {
        Self { phrases }
    }

    pub fn phrases(&self) -> &SubmissionPhrases {
        &self.phrases
    }

    /// Classify the body returned by an answer submission
    ///
    /// Rules, first match wins:
    ///
    /// 1. right answer: `Correct`
    /// 2. already completed: `reload` the puzzle page and compare the answer the
    ///    site recorded for `part` with `submitted_answer`
    /// 3. answered too recently: `OnCooldown` with the "left to wait" time
    /// 4. wrong answer: `Incorrect`, with a cooldown when one is mentioned
    /// 5. anything else: `Unrecognized`
    ///
    /// `reload` is only called for rule 2.
    ///
    /// # Errors
    ///
    /// * `AocError::Extraction` - the puzzle page lacks a recorded answer for
    ///   `part`, or a too-recent response lacks its wait time
    /// * any error returned by `reload`
    ///
    /// # Example
    ///
    /// ```
    /// use aoc_session::{Classifier, Part, SubmissionOutcome};
    ///
    /// let body = "<main>That's not the right answer. Please wait 1m before trying again.</main>";
    /// let outcome = Classifier::default()
    ///     .classify(Part::One, "12", body, || unreachable!())
    ///     .unwrap();
    /// assert_eq!(outcome, SubmissionOutcome::Incorrect { cooldown: Some("1m".into()) });
    /// ```
    pub fn classify<F>(
        &self,
        part: Part,
        submitted_answer: &str,
        response: &str,
        reload: F,
    ) -> Result<SubmissionOutcome, AocError>
    where
        F: FnOnce() -> Result<String, AocError>,
    {
        if contains_any(response, &self.phrases.correct) {
            debug!(%part, "submission accepted");
            return Ok(SubmissionOutcome::Correct);
        }

        if contains_any(response, &self.phrases.already_completed) {
            debug!(%part, "puzzle already completed, checking recorded answer");
            let page = reload()?;
            let recorded = extract_recorded_answers(&page);
            let index = usize::from(part.number()) - 1;
            let expected = recorded
                .get(index)
                .ok_or_else(|| AocError::extraction("recorded answer unavailable"))?;

            return Ok(if expected == submitted_answer {
                SubmissionOutcome::Correct
            } else {
                SubmissionOutcome::Incorrect { cooldown: None }
            });
        }

        if contains_any(response, &self.phrases.too_recent) {
            let cooldown = extract_wait_left(response)
                .ok_or_else(|| AocError::extraction("cooldown time unavailable"))?;
            debug!(%part, %cooldown, "submission rejected, too recent");
            return Ok(SubmissionOutcome::OnCooldown { cooldown });
        }

        if contains_any(response, &self.phrases.incorrect) {
            let cooldown = extract_cooldown(response);
            debug!(%part, ?cooldown, "submission rejected, wrong answer");
            return Ok(SubmissionOutcome::Incorrect { cooldown });
        }

        let snippet: String = response.chars().take(SNIPPET_CHARS).collect();
        warn!(%part, %snippet, "unrecognized submission response");
        Ok(SubmissionOutcome::Unrecognized { snippet })
    }
}

/// Classify with the default phrases
///
/// See [`Classifier::classify`].
pub fn classify<F>(
    part: Part,
    submitted_answer: &str,
    response: &str,
    reload: F,
) -> Result<SubmissionOutcome, AocError>
where
    F: FnOnce() -> Result<String, AocError>,
{
    Classifier::default().classify(part, submitted_answer, response, reload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;

    const ANSWERED_PAGE: &str = concat!(
        "<main><article><p>Part one.</p></article>\n",
        "<p>Your puzzle answer was <code>42</code>.</p>\n",
        "<article><p>Part two.</p></article>\n",
        "<p>Your puzzle answer was <code>1764</code>.</p></main>\n",
    );

    fn wrap(text: &str) -> String {
        format!("<html><body><main><article><p>{}</p></article></main></body></html>", text)
    }

    fn no_reload() -> Result<String, AocError> {
        panic!("reload must not be called for this response")
    }

    #[test]
    fn test_correct() {
        let body = wrap("That's the right answer! You are one gold star closer.");
        let outcome = classify(Part::One, "1", &body, no_reload).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Correct);
        assert!(outcome.is_correct());
    }

    #[test]
    fn test_already_completed_matching_answer() {
        let body = wrap("You don't seem to be solving the right level.  Did you already complete it?");
        let outcome = classify(Part::One, "42", &body, || Ok(ANSWERED_PAGE.to_string())).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Correct);
    }

    #[test]
    fn test_already_completed_different_answer() {
        let body = wrap("You don't seem to be solving the right level.  Did you already complete it?");
        let outcome = classify(Part::One, "7", &body, || Ok(ANSWERED_PAGE.to_string())).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Incorrect { cooldown: None });
        assert!(!outcome.is_correct());
    }

    #[test]
    fn test_already_completed_wins_over_cooldown_wording() {
        let body = wrap(
            "Did you already complete it? You have 5m left to wait. Please wait 1m before trying again.",
        );
        let page = "<p>Your puzzle answer was <code>42</code>.</p>";

        let outcome = classify(Part::One, "42", &body, || Ok(page.to_string())).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Correct);

        let outcome = classify(Part::One, "41", &body, || Ok(page.to_string())).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Incorrect { cooldown: None });
        assert_eq!(outcome.cooldown(), None);
    }

    #[test]
    fn test_already_completed_wins_over_too_recent() {
        let body = wrap("Both parts of this puzzle are complete! You gave an answer too recently.");
        let outcome = classify(Part::Two, "1764", &body, || Ok(ANSWERED_PAGE.to_string())).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Correct);
    }

    #[test]
    fn test_both_parts_complete_checks_part_two() {
        let body = wrap("Both parts of this puzzle are complete! They provide two gold stars: **");
        let outcome = classify(Part::Two, "1764", &body, || Ok(ANSWERED_PAGE.to_string())).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Correct);

        let outcome = classify(Part::Two, "42", &body, || Ok(ANSWERED_PAGE.to_string())).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Incorrect { cooldown: None });
    }

    #[test]
    fn test_already_completed_without_recorded_answer() {
        let body = wrap("Did you already complete it?");
        let page = "<p>Your puzzle answer was <code>42</code>.</p>";
        let result = classify(Part::Two, "42", &body, || Ok(page.to_string()));
        assert!(matches!(result, Err(AocError::Extraction { .. })));
    }

    #[test]
    fn test_already_completed_reload_failure_propagates() {
        let body = wrap("Did you already complete it?");
        let result = classify(Part::One, "42", &body, || {
            Err(AocError::Transport {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            })
        });
        assert!(matches!(result, Err(AocError::Transport { .. })));
    }

    #[test]
    fn test_too_recent_with_wait() {
        let body = wrap(
            "You gave an answer too recently; you have to wait after submitting an answer before trying again.  You have 3m 20s left to wait.",
        );
        let outcome = classify(Part::One, "1", &body, no_reload).unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::OnCooldown {
                cooldown: "3m 20s".to_string()
            }
        );
        assert_eq!(outcome.cooldown_duration(), Some(Duration::from_secs(200)));
    }

    #[test]
    fn test_too_recent_without_wait() {
        let body = wrap("You gave an answer too recently.");
        let result = classify(Part::One, "1", &body, no_reload);
        assert!(matches!(result, Err(AocError::Extraction { .. })));
    }

    #[test]
    fn test_incorrect_with_cooldown() {
        let body = wrap("That's not the right answer. Please wait 1m before trying again.");
        let outcome = classify(Part::One, "1", &body, no_reload).unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Incorrect {
                cooldown: Some("1m".to_string())
            }
        );
    }

    #[test]
    fn test_incorrect_without_cooldown() {
        let body = wrap("That's not the right answer.");
        let outcome = classify(Part::One, "1", &body, no_reload).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Incorrect { cooldown: None });
        assert_eq!(outcome.cooldown(), None);
    }

    #[test]
    fn test_before_trying_again_alone_is_incorrect() {
        let body = wrap("Please wait one minute before trying again.");
        let outcome = classify(Part::Two, "1", &body, no_reload).unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Incorrect {
                cooldown: Some("one minute".to_string())
            }
        );
        assert_eq!(outcome.cooldown_duration(), None);
    }

    #[test]
    fn test_unrecognized_snippet_truncated() {
        let body = "x".repeat(1000);
        let outcome = classify(Part::One, "1", &body, no_reload).unwrap();
        match outcome {
            SubmissionOutcome::Unrecognized { snippet } => {
                assert_eq!(snippet.chars().count(), SNIPPET_CHARS);
            }
            other => panic!("Expected Unrecognized, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_short_body_kept_whole() {
        let outcome = classify(Part::One, "1", "<main>Maintenance</main>", no_reload).unwrap();
        assert_eq!(
            outcome,
            SubmissionOutcome::Unrecognized {
                snippet: "<main>Maintenance</main>".to_string()
            }
        );
    }

    #[test]
    fn test_reload_called_once_for_already_completed() {
        let calls = Cell::new(0);
        let body = wrap("Did you already complete it?");
        classify(Part::One, "42", &body, || {
            calls.set(calls.get() + 1);
            Ok(ANSWERED_PAGE.to_string())
        })
        .unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_custom_phrases() {
        let phrases = SubmissionPhrases {
            correct: vec!["Nailed it".to_string()],
            ..SubmissionPhrases::default()
        };
        let classifier = Classifier::new(phrases);
        assert_eq!(classifier.phrases().correct, vec!["Nailed it".to_string()]);
        assert_eq!(
            classifier.phrases().incorrect,
            SubmissionPhrases::default().incorrect
        );

        let outcome = classifier
            .classify(Part::One, "1", "Nailed it", no_reload)
            .unwrap();
        assert_eq!(outcome, SubmissionOutcome::Correct);

        // the old wording no longer counts as correct
        let outcome = classifier
            .classify(Part::One, "1", "That's the right answer!", no_reload)
            .unwrap();
        assert!(matches!(outcome, SubmissionOutcome::Unrecognized { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(SubmissionOutcome::Correct.to_string(), "correct");
        assert_eq!(
            SubmissionOutcome::Incorrect { cooldown: None }.to_string(),
            "incorrect"
        );
        assert_eq!(
            SubmissionOutcome::Incorrect {
                cooldown: Some("1m".into())
            }
            .to_string(),
            "incorrect, on cooldown: 1m"
        );
        assert_eq!(
            SubmissionOutcome::OnCooldown {
                cooldown: "30s".into()
            }
            .to_string(),
            "on cooldown: 30s"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn prop_right_answer_wins(
            prefix in "[a-zA-Z0-9 .,]{0,80}",
            suffix in "[a-zA-Z0-9 .,]{0,80}",
            other in prop::sample::select(vec![
                "Did you already complete it?",
                "Both parts of this puzzle are complete!",
                "You gave an answer too recently",
                "That's not the right answer.",
                "wait 1m before trying again.",
            ]),
            right_first in prop::bool::ANY,
        ) {
            let text = if right_first {
                format!("{} That's the right answer! {} {}", prefix, other, suffix)
            } else {
                format!("{} {} That's the right answer! {}", prefix, other, suffix)
            };
            let outcome = classify(Part::One, "1", &wrap(&text), no_reload);
            prop_assert_eq!(outcome.unwrap(), SubmissionOutcome::Correct);
        }

        #[test]
        fn prop_too_recent_reports_wait(
            minutes in 0u64..60u64,
            seconds in 0u64..60u64,
        ) {
            prop_assume!(minutes > 0 || seconds > 0);
            let wait = match (minutes, seconds) {
                (0, s) => format!("{}s", s),
                (m, 0) => format!("{}m", m),
                (m, s) => format!("{}m {}s", m, s),
            };
            let body = wrap(&format!(
                "You gave an answer too recently. You have {} left to wait.",
                wait
            ));

            let outcome = classify(Part::Two, "1", &body, no_reload).unwrap();
            prop_assert_eq!(outcome.cooldown(), Some(wait.as_str()));
            prop_assert_eq!(
                outcome.cooldown_duration(),
                Some(Duration::from_secs(minutes * 60 + seconds))
            );
            prop_assert!(
                matches!(outcome, SubmissionOutcome::OnCooldown { .. }),
                "Expected OnCooldown for wait {}",
                wait
            );
        }

        #[test]
        fn prop_wrong_answer_never_errors(
            prefix in "[a-zA-Z0-9 .,]{0,100}",
            suffix in "[a-zA-Z0-9 .,]{0,100}",
        ) {
            let body = wrap(&format!("{} That's not the right answer. {}", prefix, suffix));
            let outcome = classify(Part::One, "1", &body, no_reload);
            prop_assert!(
                matches!(outcome, Ok(SubmissionOutcome::Incorrect { .. })),
                "Expected Incorrect, got {:?}",
                outcome
            );
        }
    }
}
