//! Puzzle coordinates and part numbers

use crate::error::AocError;
use regex::Regex;
use std::fmt;

/// First year the site ran
pub const FIRST_YEAR: u16 = 2015;

/// Last day of an event
pub const LAST_DAY: u8 = 25;

/// A (year, day) pair identifying one puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PuzzleCoordinate {
    year: u16,
    day: u8,
}

impl PuzzleCoordinate {
    /// Create a coordinate, rejecting years before 2015 and days outside 1..=25
    ///
    /// # Example
    ///
    /// ```
    /// use aoc_session::PuzzleCoordinate;
    ///
    /// let coord = PuzzleCoordinate::new(2024, 1).unwrap();
    /// assert_eq!(coord.year(), 2024);
    /// assert!(PuzzleCoordinate::new(2014, 1).is_err());
    /// assert!(PuzzleCoordinate::new(2024, 26).is_err());
    /// ```
    pub fn new(year: u16, day: u8) -> Result<Self, AocError> {
        if year < FIRST_YEAR || !(1..=LAST_DAY).contains(&day) {
            return Err(AocError::InvalidCoordinate { year, day });
        }
        Ok(Self { year, day })
    }

    /// Derive a coordinate from arbitrary text using a regex with named
    /// groups `year` and `day`
    ///
    /// Handy for solution files laid out like `2023/Day07.rs`.
    ///
    /// # Errors
    ///
    /// * `AocError::Extraction` - the pattern does not match or lacks a group
    /// * `AocError::Parse` - a group is not a number
    /// * `AocError::InvalidCoordinate` - the numbers are out of range
    ///
    /// # Example
    ///
    /// ```
    /// use aoc_session::PuzzleCoordinate;
    /// use regex::Regex;
    ///
    /// let pattern = Regex::new(r"(?<year>\d{4})/Day(?<day>\d{2})").unwrap();
    /// let coord = PuzzleCoordinate::from_pattern("src/2023/Day07.rs", &pattern).unwrap();
    /// assert_eq!((coord.year(), coord.day()), (2023, 7));
    /// ```
    pub fn from_pattern(text: &str, pattern: &Regex) -> Result<Self, AocError> {
        let captures = pattern
            .captures(text)
            .ok_or_else(|| AocError::extraction(format!("pattern did not match {:?}", text)))?;

        let year = captures
            .name("year")
            .ok_or_else(|| AocError::extraction("pattern has no `year` group"))?
            .as_str();
        let day = captures
            .name("day")
            .ok_or_else(|| AocError::extraction("pattern has no `day` group"))?
            .as_str();

        let year = year
            .parse::<u16>()
            .map_err(|_| AocError::parse(format!("year {:?} is not a number", year)))?;
        let day = day
            .parse::<u8>()
            .map_err(|_| AocError::parse(format!("day {:?} is not a number", day)))?;

        Self::new(year, day)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Path of the puzzle page, relative to the site root
    pub(crate) fn puzzle_path(&self) -> String {
        format!("{}/day/{}", self.year, self.day)
    }

    pub(crate) fn input_path(&self) -> String {
        format!("{}/input", self.puzzle_path())
    }

    pub(crate) fn answer_path(&self) -> String {
        format!("{}/answer", self.puzzle_path())
    }
}

impl fmt::Display for PuzzleCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/day{:02}", self.year, self.day)
    }
}

/// Which half of a puzzle an answer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    One,
    Two,
}

impl Part {
    /// The `level` form value the site expects (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }
}

impl TryFrom<u8> for Part {
    type Error = AocError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Part::One),
            2 => Ok(Part::Two),
            other => Err(AocError::InvalidPart(other)),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
