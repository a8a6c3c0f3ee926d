//! Forwards technology submissions to the catalog repository as GitHub issues.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "ReleaseCheckBot";

/// A proposed catalog entry as submitted by a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologySubmission {
    pub name: String,
    pub category: String,
    pub release_year: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TechnologySubmission {
    /// Name, category and release year are mandatory.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("name", &self.name),
            ("category", &self.category),
            ("releaseYear", &self.release_year),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GithubIssue {
    pub title: String,
    pub body: String,
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
}

/// Formats a submission as a review issue.
pub fn render_issue(submission: &TechnologySubmission) -> GithubIssue {
    let body = format!(
        "### New Technology Submission\n\
         \n\
         - **Name:** {name}\n\
         - **Category:** {category}\n\
         - **Release Year:** {year}\n\
         - **Release Date:** {date}\n\
         - **Documentation Link:** {link}\n\
         \n\
         ### Notes\n\
         {notes}\n\
         \n\
         ---\n\
         \n\
         *Submitted via Release Check API*\n",
        name = submission.name.trim(),
        category = submission.category.trim(),
        year = submission.release_year.trim(),
        date = or_placeholder(&submission.release_date, "N/A"),
        link = or_placeholder(&submission.link, "N/A"),
        notes = or_placeholder(&submission.description, "No description provided."),
    );

    GithubIssue {
        title: format!("[New Submission] {}", submission.name.trim()),
        body,
    }
}

/// Posts submissions to `repos/<repo>/issues` with a bearer token.
#[derive(Clone)]
pub struct SubmissionRelay {
    client: Client,
    token: String,
    issues_url: String,
}

impl SubmissionRelay {
    pub fn new(token: String, repo: &str, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()?,
            token,
            issues_url: format!("{GITHUB_API_URL}/repos/{}/issues", repo.trim_matches('/')),
        })
    }

    /// Callers validate the submission first.
    pub async fn submit(&self, submission: &TechnologySubmission) -> Result<(), AppError> {
        let issue = render_issue(submission);

        let response = self
            .client
            .post(&self.issues_url)
            .bearer_auth(&self.token)
            .json(&issue)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GitHub rejected submission '{}': {status}", submission.name);
            return Err(AppError::Relay(format!("status {status}: {body}")));
        }

        info!("Submission '{}' relayed as issue", submission.name);
        Ok(())
    }
}
