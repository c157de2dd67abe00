//! Pattern extraction from server-rendered pages
//!
//! All functions here are pure: the same page text always yields the same
//! result. The markers are the literal HTML the site currently emits; no DOM
//! is built.

use crate::error::AocError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Stars earned per event year
pub type StarTally = BTreeMap<u16, u8>;

static SAMPLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<pre><code>(?<sample>(?:.*?\n)*?)</code></pre>").expect("sample regex is valid")
});

static RECORDED_ANSWER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>Your puzzle answer was <code>(?<answer>.*?)</code>.</p>")
        .expect("recorded answer regex is valid")
});

static WAIT_LEFT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"You have (?<time>.*?) left to wait").expect("wait-left regex is valid")
});

static WAIT_BEFORE_RETRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"wait (?<time>.*?) before trying again").expect("retry regex is valid")
});

/// Prefix of each per-year row on the events page
const EVENT_ROW_MARKER: &str = "<div class=\"eventlist-event\">";
/// Closes the `[2015]` year link
const YEAR_ANCHOR: &str = "</a>";
/// Closes the `50*` star counter
const STAR_ANCHOR: &str = "</span>";
/// Distance from the year anchor back to the first year digit (`2015]</a>`)
const YEAR_OFFSET: usize = 5;
/// Distance from the star anchor back to the first count digit (`50*</span>`)
const STAR_OFFSET: usize = 3;

/// Every `<pre><code>` block on a puzzle page, in document order
///
/// Each block loses exactly one trailing newline. A page without samples
/// yields nothing.
///
/// # Example
///
/// ```
/// use aoc_session::extract::extract_samples;
///
/// let page = "<pre><code>1\n2\n</code></pre>text<pre><code>3\n</code></pre>";
/// let samples: Vec<String> = extract_samples(page).collect();
/// assert_eq!(samples, ["1\n2", "3"]);
/// ```
pub fn extract_samples(page: &str) -> impl Iterator<Item = String> + '_ {
    SAMPLE_REGEX.captures_iter(page).map(|captures| {
        let sample = captures.name("sample").map_or("", |m| m.as_str());
        sample.strip_suffix('\n').unwrap_or(sample).to_string()
    })
}

/// Answers the site recorded for already solved parts, part 1 first
pub fn extract_recorded_answers(page: &str) -> Vec<String> {
    RECORDED_ANSWER_REGEX
        .captures_iter(page)
        .filter_map(|captures| captures.name("answer"))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Cooldown from a "You have TIME left to wait" sentence
pub fn extract_wait_left(text: &str) -> Option<String> {
    capture_time(&WAIT_LEFT_REGEX, text)
}

/// Cooldown from a "wait TIME before trying again" sentence
pub fn extract_wait_before_retry(text: &str) -> Option<String> {
    capture_time(&WAIT_BEFORE_RETRY_REGEX, text)
}

/// Cooldown text from a submission response, trying the "left to wait"
/// wording first
pub fn extract_cooldown(text: &str) -> Option<String> {
    extract_wait_left(text).or_else(|| extract_wait_before_retry(text))
}

fn capture_time(regex: &Regex, text: &str) -> Option<String> {
    let captures = regex.captures(text)?;
    Some(captures.name("time")?.as_str().to_string())
}

/// Stars per year from the events page
///
/// Only lines starting with the event row marker are read. The year and star
/// count are taken at fixed offsets before their closing tags; a row without a
/// star counter has 0 stars.
///
/// # Errors
///
/// Returns `AocError::Parse` for a row whose year or star count cannot be read,
/// or for a year listed twice.
pub fn extract_star_tally(events_page: &str) -> Result<StarTally, AocError> {
    let mut tally = StarTally::new();

    for line in events_page
        .lines()
        .filter(|line| line.starts_with(EVENT_ROW_MARKER))
    {
        let (year, stars) = parse_event_row(line)?;
        if tally.insert(year, stars).is_some() {
            return Err(AocError::parse(format!("year {} listed twice", year)));
        }
    }

    Ok(tally)
}

fn parse_event_row(line: &str) -> Result<(u16, u8), AocError> {
    let year_field = line
        .find(YEAR_ANCHOR)
        .and_then(|anchor| anchor.checked_sub(YEAR_OFFSET))
        .and_then(|start| line.get(start..start + 4))
        .ok_or_else(|| AocError::parse(format!("no year label in event row {:?}", line)))?;
    let year = year_field
        .parse::<u16>()
        .map_err(|_| AocError::parse(format!("year {:?} is not a number", year_field)))?;

    let stars = match line
        .find(STAR_ANCHOR)
        .and_then(|anchor| anchor.checked_sub(STAR_OFFSET))
    {
        None => 0,
        Some(start) => {
            let star_field = line
                .get(start..start + 2)
                .ok_or_else(|| AocError::parse(format!("no star count in event row {:?}", line)))?;
            star_field
                .trim()
                .parse::<u8>()
                .map_err(|_| AocError::parse(format!("stars {:?} is not a number", star_field)))?
        }
    };

    Ok((year, stars))
}
