//! Error types for the AOC session client

use thiserror::Error;

/// Errors that can occur when using the AOC session client
#[derive(Error, Debug)]
pub enum AocError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status: {status}")]
    Transport {
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// An expected marker was missing from a page
    #[error("Extraction failed: {reason}")]
    Extraction {
        /// What could not be found
        reason: String,
    },

    /// A numeric field on a page could not be converted
    #[error("Parse failed: {reason}")]
    Parse {
        /// What could not be parsed
        reason: String,
    },

    /// Failed to decode response body
    #[error("Failed to decode response body")]
    Encoding,

    /// Year or day outside the range the site publishes
    #[error("Invalid puzzle coordinate: year {year}, day {day}")]
    InvalidCoordinate {
        /// The rejected year
        year: u16,
        /// The rejected day
        day: u8,
    },

    /// Part other than 1 or 2
    #[error("Invalid part: {0}")]
    InvalidPart(u8),

    /// Configuration error (credential lookup and similar)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl AocError {
    pub(crate) fn extraction(reason: impl Into<String>) -> Self {
        AocError::Extraction {
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        AocError::Parse {
            reason: reason.into(),
        }
    }
}
