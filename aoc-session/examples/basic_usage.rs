//! Basic usage example for the AOC session client
//!
//! This example demonstrates how to:
//! - Read the session cookie from `AOC_SESSION`
//! - Fetch puzzle input and the first example block
//! - Read the per-year star tally
//! - Submit an answer and react to the outcome
//!
//! Run with `RUST_LOG=aoc_session=debug` to see each request.
//! Note: This example requires a valid AOC session cookie to run.

use aoc_session::{Credential, Part, PuzzleCoordinate, Session, SubmissionOutcome};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let credential = Credential::from_env()?;
    let session = Session::new(credential, PuzzleCoordinate::new(2024, 1)?)?;
    println!("=== {} ===", session.coordinate());

    let lines = session.get_input_lines()?;
    println!("Input: {} lines", lines.len());

    match session.get_sample_text(1) {
        Ok(sample) => println!("First example:\n{}", sample),
        Err(e) => println!("No example: {}", e),
    }

    println!("\n=== Stars ===");
    for (year, stars) in session.get_star_tally()? {
        println!("{}: {:>2}*", year, stars);
    }

    // Submit an answer (example - this will likely be incorrect)
    let answer = 12345;
    println!("\nSubmitting answer '{}' for part 1...", answer);
    match session.submit_answer(Part::One, answer)? {
        SubmissionOutcome::Correct => println!("✓ Answer is correct!"),
        outcome @ SubmissionOutcome::Incorrect { .. } => println!("✗ {}", outcome),
        outcome @ SubmissionOutcome::OnCooldown { .. } => match outcome.cooldown_duration() {
            Some(duration) => println!("⏱ {} ({:?})", outcome, duration),
            None => println!("⏱ {}", outcome),
        },
        SubmissionOutcome::Unrecognized { snippet } => {
            println!("? Unrecognized response, page starts with: {}", snippet)
        }
    }

    Ok(())
}
