//! Netlify API client for newsletter form submissions.
//!
//! The newsletter signup is a Netlify form named `newsletter`; the admin
//! export reads every submission back through the REST API.

use std::time::Duration;

use chrono::DateTime;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::{NetlifyConfig, bearer};

/// Name of the newsletter signup form.
pub const NEWSLETTER_FORM: &str = "newsletter";

/// Submissions requested per page.
pub const PER_PAGE: usize = 100;

/// Errors that can occur when interacting with the Netlify API.
#[derive(Debug, Error)]
pub enum NetlifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("Netlify API {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Form {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionData {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub data: Option<SubmissionData>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One exported signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedEmail {
    pub email: String,
    /// Submission timestamp as Netlify reported it.
    pub date: String,
}

impl From<Submission> for ExportedEmail {
    fn from(sub: Submission) -> Self {
        let email = sub
            .data
            .and_then(|d| d.email)
            .filter(|e| !e.is_empty())
            .or(sub.email)
            .unwrap_or_default();
        Self {
            email,
            date: sub.created_at.unwrap_or_default(),
        }
    }
}

/// `M/D/YYYY` for a timestamp, or an empty string when it does not parse.
fn us_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|d| d.to_utc().format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// CSV export with an `Email,Date Submitted` header.
#[must_use]
pub fn to_csv(emails: &[ExportedEmail]) -> String {
    let mut csv = String::from("Email,Date Submitted\n");
    for e in emails {
        csv.push_str(&csv_field(&e.email));
        csv.push(',');
        csv.push_str(&csv_field(&us_date(&e.date)));
        csv.push('\n');
    }
    csv
}

/// Netlify API client.
#[derive(Clone)]
pub struct NetlifyClient {
    client: reqwest::Client,
    api_url: String,
    site_id: String,
}

impl NetlifyClient {
    /// Create a new Netlify API client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &NetlifyConfig, timeout: Duration) -> Result<Self, NetlifyError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&bearer(&config.api_token))
            .map_err(|e| NetlifyError::Parse(format!("Invalid API token format: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            site_id: config.site_id.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, NetlifyError> {
        let url = format!("{}{path}", self.api_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), path, "Netlify API error");
            return Err(NetlifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| NetlifyError::Parse(e.to_string()))
    }

    /// Every form on the site.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    pub async fn forms(&self) -> Result<Vec<Form>, NetlifyError> {
        self.get(&format!(
            "/sites/{}/forms",
            urlencoding::encode(&self.site_id)
        ))
        .await
    }

    /// One page (1-based) of a form's submissions.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    pub async fn submissions(&self, form_id: &str, page: u32) -> Result<Vec<Submission>, NetlifyError> {
        self.get(&format!(
            "/forms/{}/submissions?per_page={PER_PAGE}&page={page}",
            urlencoding::encode(form_id)
        ))
        .await
    }

    /// Every newsletter signup, or `None` when the site has no form named
    /// [`NEWSLETTER_FORM`].
    ///
    /// # Errors
    ///
    /// Returns error if any API request fails.
    #[instrument(skip(self), fields(site_id = %self.site_id))]
    pub async fn newsletter_emails(&self) -> Result<Option<Vec<ExportedEmail>>, NetlifyError> {
        let forms = self.forms().await?;
        let Some(form) = forms
            .into_iter()
            .find(|f| f.name.as_deref() == Some(NEWSLETTER_FORM))
        else {
            return Ok(None);
        };

        // A page shorter than PER_PAGE (including an empty one) is the last.
        let mut emails = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.submissions(&form.id, page).await?;
            let len = batch.len();
            emails.extend(batch.into_iter().map(ExportedEmail::from));
            if len < PER_PAGE {
                break;
            }
            page += 1;
        }

        debug!(count = emails.len(), pages = page, "Fetched newsletter submissions");
        Ok(Some(emails))
    }
}
