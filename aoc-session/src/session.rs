//! Per-puzzle session facade

use crate::classify::{Classifier, SubmissionOutcome, SubmissionPhrases};
use crate::credential::Credential;
use crate::error::AocError;
use crate::extract::{StarTally, extract_samples, extract_star_tally};
use crate::fetcher::PageFetcher;
use crate::puzzle::{Part, PuzzleCoordinate};
use regex::Regex;
use std::fmt::Display;
use tracing::{debug, info};

/// Path of the events overview page
const EVENTS_PATH: &str = "events";

/// A logged-in view of one puzzle
///
/// Binds a credential (held by the fetcher) to a year and day. Nothing is
/// cached: every call fetches the pages it needs.
///
/// # Example
///
/// ```no_run
/// use aoc_session::{Credential, Part, PuzzleCoordinate, Session, SubmissionOutcome};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let session = Session::new(Credential::from_env()?, PuzzleCoordinate::new(2024, 1)?)?;
///
/// let lines = session.get_input_lines()?;
/// let example = session.get_sample_text(1)?;
/// println!("{} input lines, first example:\n{}", lines.len(), example);
///
/// match session.submit_answer(Part::One, 1234)? {
///     SubmissionOutcome::Correct => println!("Correct!"),
///     other => println!("{}", other),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    fetcher: PageFetcher,
    coordinate: PuzzleCoordinate,
    classifier: Classifier,
}

impl Session {
    /// Create a session against the default site
    pub fn new(credential: Credential, coordinate: PuzzleCoordinate) -> Result<Self, AocError> {
        Ok(Self::with_fetcher(PageFetcher::new(credential)?, coordinate))
    }

    /// Create a session around a preconfigured fetcher
    pub fn with_fetcher(fetcher: PageFetcher, coordinate: PuzzleCoordinate) -> Self {
        Self {
            fetcher,
            coordinate,
            classifier: Classifier::default(),
        }
    }

    /// Create a session whose year and day are read out of `text`
    ///
    /// See [`PuzzleCoordinate::from_pattern`].
    pub fn from_pattern(
        credential: Credential,
        text: &str,
        pattern: &Regex,
    ) -> Result<Self, AocError> {
        Self::new(credential, PuzzleCoordinate::from_pattern(text, pattern)?)
    }

    /// Replace the phrases used to classify submission responses
    pub fn with_phrases(mut self, phrases: SubmissionPhrases) -> Self {
        self.classifier = Classifier::new(phrases);
        self
    }

    pub fn coordinate(&self) -> PuzzleCoordinate {
        self.coordinate
    }

    /// Personal puzzle input with trailing newlines removed
    pub fn get_input_text(&self) -> Result<String, AocError> {
        let input = self.fetcher.get(&self.coordinate.input_path())?;
        Ok(input.trim_end_matches('\n').to_string())
    }

    /// Personal puzzle input split on `\n`
    ///
    /// Joining the lines with `\n` gives back [`get_input_text`](Self::get_input_text).
    pub fn get_input_lines(&self) -> Result<Vec<String>, AocError> {
        Ok(split_lines(&self.get_input_text()?))
    }

    /// The `nth` example block (1-based) of the puzzle description
    ///
    /// # Errors
    ///
    /// Returns `AocError::Extraction` if the page has fewer than `nth` examples.
    pub fn get_sample_text(&self, nth: usize) -> Result<String, AocError> {
        let page = self.fetcher.get(&self.coordinate.puzzle_path())?;
        nth.checked_sub(1)
            .and_then(|index| extract_samples(&page).nth(index))
            .ok_or_else(|| {
                AocError::extraction(format!(
                    "sample {} not found on {}",
                    nth, self.coordinate
                ))
            })
    }

    /// The `nth` example block split on `\n`
    pub fn get_sample_lines(&self, nth: usize) -> Result<Vec<String>, AocError> {
        Ok(split_lines(&self.get_sample_text(nth)?))
    }

    /// Stars earned in every event year of the logged-in account
    pub fn get_star_tally(&self) -> Result<StarTally, AocError> {
        let page = self.fetcher.get(EVENTS_PATH)?;
        let tally = extract_star_tally(&page)?;
        debug!(years = tally.len(), "read star tally");
        Ok(tally)
    }

    /// Submit `answer` for `part` and classify the response
    ///
    /// When the site reports the part as already completed, the puzzle page is
    /// fetched again to compare `answer` with the recorded one.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` / `AocError::Transport` - either request failed
    /// * `AocError::Extraction` - an expected marker was missing
    pub fn submit_answer(
        &self,
        part: Part,
        answer: impl Display,
    ) -> Result<SubmissionOutcome, AocError> {
        let answer = answer.to_string();
        let form = [("level", part.to_string()), ("answer", answer.clone())];

        let response = self
            .fetcher
            .post_form(&self.coordinate.answer_path(), &form)?;
        let outcome = self.classifier.classify(part, &answer, &response, || {
            self.fetcher.get(&self.coordinate.puzzle_path())
        })?;

        info!(puzzle = %self.coordinate, %part, %outcome, "answer submitted");
        Ok(outcome)
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}
