//! Configuration loading for the publish command.

use std::fmt;

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

/// Publishing configuration, extracted from the environment once at
/// startup and passed into the commands that need it.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target repository in owner/repo form (GITHUB_REPOSITORY).
    pub github_repository: Option<String>,
    /// Token for the issue-comment API calls (GITHUB_TOKEN).
    pub github_token: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_repository", &self.github_repository)
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Config {
    /// Loads configuration from the environment.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::raw().only(&["GITHUB_REPOSITORY", "GITHUB_TOKEN"]))
            .extract()
    }
}
