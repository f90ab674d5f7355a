//! Error types for the skill graph pipeline
//!
//! Every failure is terminal for a run: the pipeline never writes partial output.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across `core`.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed or inconsistent input data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The document is not valid JSON or does not have the expected shape.
    #[error("malformed skill data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A `depends_on` entry names a skill that is not in the dataset.
    #[error("skill '{skill}' depends on unknown skill '{dependency}'")]
    UnknownDependency {
        /// Skill declaring the dependency
        skill: String,
        /// Name that could not be resolved
        dependency: String,
    },

    /// Completion is outside `[0, 100]` or not a finite number.
    #[error("skill '{skill}' has completion {value}, expected a value between 0 and 100")]
    CompletionOutOfRange {
        /// Offending skill
        skill: String,
        /// Value found in the input
        value: f64,
    },

    /// The document defines no skills at all.
    #[error("skill data defines no skills")]
    Empty,
}

/// Structural problems with the dependency graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The graph has a cycle, so no transitive reduction exists.
    #[error("dependency cycle between skills: {}", .skills.join(" → "))]
    Cycle {
        /// Skills that lie on the cycle, sorted by name
        skills: Vec<String>,
    },
}

/// Top-level pipeline error.
#[derive(Debug, Error)]
pub enum Error {
    /// Input data problem
    #[error(transparent)]
    Data(#[from] DataError),

    /// Graph structure problem
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The HTML template failed to render
    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
}

impl Error {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
