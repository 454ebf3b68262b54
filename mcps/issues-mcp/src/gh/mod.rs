//! gh CLI wrapper module
//!
//! Async access to GitHub pull requests, issues and commits through the
//! `gh` CLI, converted into tracker records.

pub mod client;
pub mod error;
pub mod executor;
pub mod types;

pub use client::{GhClient, GithubBackend};
pub use error::{GhError, GhResult};
pub use executor::GhExecutor;
