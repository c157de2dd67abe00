//! AOC Session Client
//!
//! A blocking client for the per-user pages of the Advent of Code website:
//! puzzle inputs, the example blocks embedded in puzzle descriptions, the
//! per-year star tally and answer submission.
//!
//! # Features
//!
//! - Session cookie authentication, zeroized on drop and never logged
//! - Input and sample fetching as text or lines
//! - Star tally scraped from the events page
//! - Answer submission classified into a typed [`SubmissionOutcome`]
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Well-typed errors using thiserror, diagnostics through `tracing`
//!
//! # Example
//!
//! ```no_run
//! use aoc_session::{Credential, Part, PuzzleCoordinate, Session, SubmissionOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::new(
//!     Credential::new("your_session_cookie_here"),
//!     PuzzleCoordinate::new(2024, 1)?,
//! )?;
//!
//! let input = session.get_input_text()?;
//! let sample = session.get_sample_lines(1)?;
//!
//! for (year, stars) in session.get_star_tally()? {
//!     println!("{}: {} stars", year, stars);
//! }
//!
//! match session.submit_answer(Part::One, 42)? {
//!     SubmissionOutcome::Correct => println!("Correct!"),
//!     SubmissionOutcome::Incorrect { cooldown } => println!("Incorrect ({:?})", cooldown),
//!     SubmissionOutcome::OnCooldown { cooldown } => println!("Wait {}", cooldown),
//!     SubmissionOutcome::Unrecognized { snippet } => println!("Unknown page: {}", snippet),
//! }
//! # Ok(())
//! # }
//! ```

mod classify;
mod credential;
mod error;
pub mod extract;
mod fetcher;
mod puzzle;
mod session;

pub use classify::{Classifier, SNIPPET_CHARS, SubmissionOutcome, SubmissionPhrases, classify};
pub use credential::{Credential, SESSION_ENV_VAR};
pub use error::AocError;
pub use extract::StarTally;
pub use fetcher::{DEFAULT_BASE_URL, PageFetcher, PageFetcherBuilder};
pub use puzzle::{FIRST_YEAR, LAST_DAY, Part, PuzzleCoordinate};
pub use session::Session;
