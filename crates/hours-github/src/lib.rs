//! GitHub issue-comment publishing for the work-hours reporter.
//!
//! Renders an aggregated range summary as markdown and posts it to a
//! tracked issue. A marker string embedded in the comment lets re-runs
//! find and update the previous summary instead of stacking duplicates.

use std::fmt::{self, Write as _};
use std::time::Duration;

use reqwest::{Method, StatusCode, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hours_core::{RangeMode, RangeSummary, RangeTotal};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("hours/", env!("CARGO_PKG_VERSION"));

/// Comments fetched per page when scanning an issue.
const COMMENTS_PER_PAGE: u32 = 100;

/// Marker embedded in published comments so re-runs can find them.
pub const COMMENT_MARKER: &str = "<!-- range-hours-summary -->";

/// Footer appended to every published comment.
const COMMENT_FOOTER: &str = "_This comment is auto-updated by the repository workflow._";

/// GitHub client errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The provided token was invalid.
    #[error("invalid token: {reason}")]
    InvalidToken { reason: &'static str },
    /// The repository identifier was not in owner/repo form.
    #[error("invalid repository {repo:?}: expected owner/repo")]
    InvalidRepo { repo: String },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The API returned a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
    /// A success response failed to parse.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A repository identified as `owner/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    owner: String,
    repo: String,
}

impl RepoId {
    /// The repository owner (user or organization).
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.repo
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl std::str::FromStr for RepoId {
    type Err = GithubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((owner, repo)) = s.split_once('/') else {
            return Err(GithubError::InvalidRepo {
                repo: s.to_string(),
            });
        };
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(GithubError::InvalidRepo {
                repo: s.to_string(),
            });
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

/// Outcome of publishing a summary comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A new comment was created.
    Created { id: u64 },
    /// The previous marker comment was updated in place.
    Updated { id: u64 },
}

/// Blocking GitHub API client.
pub struct Client {
    http: reqwest::blocking::Client,
    token: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the given token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(token: impl Into<String>) -> Result<Self, GithubError> {
        let token = token.into();

        if token.is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be empty",
            });
        }
        if token.trim().is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be whitespace-only",
            });
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self { http, token })
    }

    /// Creates or updates the summary comment on the given issue.
    ///
    /// All comments on the issue are scanned for the marker; a hit owned
    /// by the current credential is updated in place, otherwise a new
    /// comment is created. Races between concurrent invocations are not
    /// coordinated; the last writer wins.
    pub fn publish_comment(
        &self,
        repo: &RepoId,
        issue: u64,
        body: &str,
    ) -> Result<PublishOutcome, GithubError> {
        let viewer = self.viewer_login()?;
        if viewer.is_none() {
            tracing::debug!("viewer login unavailable; matching marker comments from any author");
        }

        let payload = CommentPayload { body };
        match self.find_marker_comment(repo, issue, viewer.as_deref())? {
            Some(id) => {
                let url = format!(
                    "{GITHUB_API_URL}/repos/{}/{}/issues/comments/{id}",
                    repo.owner(),
                    repo.name()
                );
                let response = self.request(Method::PATCH, &url).json(&payload).send()?;
                let _: IssueComment = read_json(response)?;
                Ok(PublishOutcome::Updated { id })
            }
            None => {
                let url = format!(
                    "{GITHUB_API_URL}/repos/{}/{}/issues/{issue}/comments",
                    repo.owner(),
                    repo.name()
                );
                let response = self.request(Method::POST, &url).json(&payload).send()?;
                let created: IssueComment = read_json(response)?;
                Ok(PublishOutcome::Created { id: created.id })
            }
        }
    }

    /// Resolves the authenticated user's login, if the API exposes one.
    fn viewer_login(&self) -> Result<Option<String>, GithubError> {
        let url = format!("{GITHUB_API_URL}/user");
        let response = self.request(Method::GET, &url).send()?;
        let viewer: Viewer = read_json(response)?;
        Ok(viewer.login)
    }

    /// Scans the issue's comments page by page for the marker.
    fn find_marker_comment(
        &self,
        repo: &RepoId,
        issue: u64,
        viewer: Option<&str>,
    ) -> Result<Option<u64>, GithubError> {
        let url = format!(
            "{GITHUB_API_URL}/repos/{}/{}/issues/{issue}/comments",
            repo.owner(),
            repo.name()
        );
        let mut page: u32 = 1;
        loop {
            let response = self
                .request(Method::GET, &url)
                .query(&[("per_page", COMMENTS_PER_PAGE), ("page", page)])
                .send()?;
            let batch: Vec<IssueComment> = read_json(response)?;
            let short_page = batch.len() < COMMENTS_PER_PAGE as usize;

            if let Some(comment) = batch
                .into_iter()
                .find(|comment| comment_matches(comment, viewer))
            {
                tracing::debug!(id = comment.id, page, "found existing marker comment");
                return Ok(Some(comment.id));
            }
            if short_page {
                return Ok(None);
            }
            page += 1;
        }
    }

    fn request(&self, method: Method, url: &str) -> reqwest::blocking::RequestBuilder {
        self.http
            .request(method, url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, GITHUB_ACCEPT)
    }
}

#[derive(Debug, Deserialize)]
struct Viewer {
    login: Option<String>,
}

/// An issue comment as returned by the list/create/update endpoints.
#[derive(Debug, Deserialize)]
struct IssueComment {
    id: u64,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    user: Option<CommentUser>,
}

#[derive(Debug, Deserialize)]
struct CommentUser {
    login: String,
}

#[derive(Debug, Serialize)]
struct CommentPayload<'a> {
    body: &'a str,
}

/// Returns true when the comment carries the marker and belongs to the
/// viewer. An unknown viewer login matches any marker-bearing comment.
fn comment_matches(comment: &IssueComment, viewer: Option<&str>) -> bool {
    let Some(body) = comment.body.as_deref() else {
        return false;
    };
    if !body.contains(COMMENT_MARKER) {
        return false;
    }
    match viewer {
        Some(login) => comment
            .user
            .as_ref()
            .is_some_and(|user| user.login == login),
        None => true,
    }
}

/// Checks the response status and deserializes a success body.
fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
) -> Result<T, GithubError> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(api_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|err| GithubError::InvalidResponse(err.to_string()))
}

/// Extracts GitHub's `{"message": ...}` error payload when present.
fn api_error(status: StatusCode, body: &str) -> GithubError {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    let message = serde_json::from_str::<ErrorPayload>(body)
        .map_or_else(|_| body.to_string(), |payload| payload.message);
    GithubError::Api { status, message }
}

/// Renders the summary comment markdown, marker included.
#[must_use]
pub fn build_comment(summary: &RangeSummary) -> String {
    let start = summary.range.start();
    let end = summary.range.end();
    let mode = match summary.mode {
        RangeMode::Workdays => "Working days (Mon–Fri)",
        RangeMode::Calendar => "All calendar days",
    };

    let mut body = String::new();
    writeln!(body, "Range hours summary: {start} → {end}").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "{COMMENT_MARKER}").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "**{mode} counted between {start} and {end} (inclusive).**").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "Total counted days: {}", summary.day_count).unwrap();
    writeln!(body).unwrap();
    match summary.total {
        RangeTotal::Exact(total) => {
            writeln!(body, "**Exact total hours:** **{total:.2} hours**").unwrap();
        }
        RangeTotal::Estimate { low, mid, high } => {
            writeln!(body, "Estimated totals (using your daily range 8–9 h/day):").unwrap();
            writeln!(body).unwrap();
            writeln!(body, "- 8.0 h/day → **{low:.2} hours**").unwrap();
            writeln!(body, "- 8.5 h/day → **{mid:.2} hours** (recommended midpoint)").unwrap();
            writeln!(body, "- 9.0 h/day → **{high:.2} hours**").unwrap();
        }
    }
    writeln!(body).unwrap();
    body.push_str(COMMENT_FOOTER);
    body
}
