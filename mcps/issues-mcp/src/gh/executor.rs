//! Async executor for gh CLI commands
//!
//! Runs `gh` with an optional token (exported as `GH_TOKEN`) and maps its
//! exit status and stderr onto [`GhError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use issues_mcp::gh::GhExecutor;
//!
//! let gh = GhExecutor::new(None);
//! let pr: serde_json::Value = gh
//!     .json(&["pr", "view", "5012", "-R", "apache/hive"], &["number", "title"])
//!     .await?;
//! ```

use std::process::{Output, Stdio};

use serde::de::DeserializeOwned;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::error::{GhError, GhResult};

/// Spawns gh commands on behalf of one configured account
#[derive(Clone, Default)]
pub struct GhExecutor {
    token: Option<String>,
}

impl GhExecutor {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    async fn output(&self, args: &[&str]) -> GhResult<Output> {
        let mut command = Command::new("gh");
        command
            .args(args)
            .env("GH_PROMPT_DISABLED", "1")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref token) = self.token {
            command.env("GH_TOKEN", token);
        }

        let output = command
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GhError::NotFound
                } else {
                    GhError::SpawnError(e)
                }
            })?
            .wait_with_output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let code = output.status.code().unwrap_or(-1);

            if stderr.contains("gh auth login") || stderr.contains("not logged in") {
                error!("gh authentication required");
                return Err(GhError::NotAuthenticated);
            }

            error!(code, stderr = %stderr, "gh command failed");
            return Err(GhError::CommandFailed { code, stderr });
        }

        Ok(output)
    }

    /// Run a gh command with `--json <fields>` and parse the output
    #[instrument(skip(self, json_fields), fields(cmd = %args.join(" ")))]
    pub async fn json<T: DeserializeOwned>(
        &self,
        args: &[&str],
        json_fields: &[&str],
    ) -> GhResult<T> {
        let fields = json_fields.join(",");

        let mut full_args: Vec<&str> = args.to_vec();
        full_args.push("--json");
        full_args.push(&fields);

        debug!("executing: gh {}", full_args.join(" "));

        let output = self.output(&full_args).await?;
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// Call a REST endpoint through `gh api` and parse the response
    #[instrument(skip(self))]
    pub async fn api<T: DeserializeOwned>(&self, endpoint: &str) -> GhResult<T> {
        debug!("executing: gh api {}", endpoint);

        let output = self.output(&["api", endpoint]).await?;
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    /// Run a gh command and return its raw stdout (diffs and the like)
    #[instrument(skip(self), fields(cmd = %args.join(" ")))]
    pub async fn raw(&self, args: &[&str]) -> GhResult<String> {
        debug!("executing: gh {}", args.join(" "));

        let output = self.output(args).await?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Check that gh is installed and can reach GitHub
    #[instrument(skip(self))]
    pub async fn check_available(&self) -> GhResult<()> {
        debug!("checking gh availability");
        if self.token.is_some() {
            self.output(&["--version"]).await?;
        } else {
            self.output(&["auth", "status"]).await?;
        }
        debug!("gh is available");
        Ok(())
    }
}
