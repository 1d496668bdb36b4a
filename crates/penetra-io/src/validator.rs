//! Batch input validation.
//!
//! Validates penalty inputs before the loss receives them, catching
//! data-level errors early with the offending example named.

use penetra_types::{PenetraError, PenetraResult};

use crate::contract::PenaltyInput;

/// Validates a complete penalty input.
///
/// Checks:
/// - The batch holds at least one example
/// - Every cloth sample has matching current/predicted channels
/// - Every obstacle has consistent snapshots with in-range indices
/// - The embedded config, if any, is valid
pub fn validate_input(input: &PenaltyInput) -> PenetraResult<()> {
    if input.examples.is_empty() {
        return Err(PenetraError::EmptyBatch);
    }

    for (i, example) in input.examples.iter().enumerate() {
        example.validate().map_err(|e| in_example(i, e))?;
    }

    if let Some(ref config) = input.config {
        config.validate()?;
    }

    Ok(())
}

/// Prefixes mesh errors with the example index. Other variants pass
/// through unchanged so callers can still match on them.
fn in_example(index: usize, err: PenetraError) -> PenetraError {
    match err {
        PenetraError::InvalidMesh(msg) => {
            PenetraError::InvalidMesh(format!("Example {index}: {msg}"))
        }
        PenetraError::ShapeMismatch {
            what,
            expected,
            found,
        } => PenetraError::ShapeMismatch {
            what: format!("example {index} {what}"),
            expected,
            found,
        },
        other => other,
    }
}
