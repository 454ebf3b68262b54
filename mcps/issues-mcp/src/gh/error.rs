//! gh CLI failures

use thiserror::Error;

/// Why a GitHub lookup through `gh` produced nothing
///
/// The query service logs these and moves on, so the messages are written
/// to be read in a log line.
#[derive(Error, Debug)]
pub enum GhError {
    /// `gh` ran and exited non-zero: unknown PR or commit, rate limit, disabled issues
    #[error("gh exited with {code}: {stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("could not start gh: {0}")]
    SpawnError(#[from] std::io::Error),

    #[error("unexpected gh JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// No `gh` binary on PATH
    #[error("gh CLI not found, GitHub lookups need it on PATH")]
    NotFound,

    #[error("gh is not logged in, run 'gh auth login' or set GITHUB_TOKEN")]
    NotAuthenticated,
}

pub type GhResult<T> = Result<T, GhError>;
