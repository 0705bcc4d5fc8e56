//! Aggregates a CSV table into a small JSON summary.
//!
//! [`process`] never fails: a missing file, a table without any known
//! column, or a malformed table all come back as a [`Summary`] describing
//! what happened.

pub mod aggregate;
pub mod coerce;
pub mod error;
pub mod output;
pub mod summary;
pub mod table;

use std::path::Path;

use tracing::warn;

pub use error::ProcessError;
pub use summary::Summary;

/// Loads the table at `path` and summarizes it.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn process(path: impl AsRef<Path>) -> Summary {
    let outcome = table::load(path.as_ref()).and_then(|t| aggregate::summarize(&t));
    if let Err(e) = &outcome {
        warn!(error = %e, "Processing failed");
    }
    Summary::from(outcome)
}

/// [`process`] followed by [`output::render`].
pub fn process_to_string(path: impl AsRef<Path>) -> String {
    output::render(&process(path))
}
