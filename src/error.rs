//! Pipeline error taxonomy.
//!
//! Only fatal conditions are represented here. Cell-level parse failures are
//! recovered during cleaning by treating the cell as null and never surface
//! as process errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The dataset file is missing, unreadable, or not the expected table.
    #[error("cannot load dataset {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// A numeric column had no non-null values left to average, so the
    /// imputation fill value is undefined.
    #[error("cannot impute column {column:?}: no non-null values to compute a mean from")]
    Imputation { column: &'static str },

    /// Every measure value in a group was null, so the group mean is
    /// undefined.
    #[error("group ({key}) has no non-null {measure} values")]
    EmptyGroup { key: String, measure: String },

    /// The HTTP server failed to bind or crashed while serving.
    #[error("server: {0}")]
    Server(String),
}
