//! Gmail API client for transactional e-mail.
//!
//! Messages are built with `lettre` and delivered through
//! `users/me/messages/send` rather than SMTP. Each send exchanges the
//! long-lived refresh token for a short-lived access token.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use lettre::Message;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, instrument};

use crate::config::{GmailConfig, bearer};

/// Display name on every outgoing message.
pub const FROM_NAME: &str = "The Grasshopper";

/// Errors that can occur when sending mail through Gmail.
#[derive(Debug, Error)]
pub enum GmailError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint did not return an access token.
    #[error("Failed to get Gmail access token: {0}")]
    Token(String),

    /// Gmail rejected the message.
    #[error("Gmail send failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid sender or recipient address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Failed to build the MIME message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),
}

/// A message ready to send.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    /// When set, the message is `multipart/alternative`.
    pub html: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Client for the Gmail REST API.
#[derive(Clone)]
pub struct GmailClient {
    client: reqwest::Client,
    config: GmailConfig,
}

impl GmailClient {
    /// Create a new Gmail client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &GmailConfig, timeout: Duration) -> Result<Self, GmailError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Exchange the refresh token for an access token.
    async fn access_token(&self) -> Result<SecretString, GmailError> {
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret()),
            ("refresh_token", self.config.refresh_token.expose_secret()),
            ("grant_type", "refresh_token"),
        ];
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        serde_json::from_str::<TokenResponse>(&body)
            .ok()
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
            .ok_or_else(|| GmailError::Token(format!("{} {body}", status.as_u16())))
    }

    /// Send one message.
    ///
    /// # Errors
    ///
    /// Returns error if the token exchange fails, the message cannot be
    /// built, or Gmail rejects it.
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    pub async fn send(&self, email: &OutgoingEmail) -> Result<(), GmailError> {
        let raw = encode_message(&self.config.from_email.to_string(), email)?;
        let token = self.access_token().await?;

        let url = format!("{}/users/me/messages/send", self.config.api_url);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, bearer(&token))
            .json(&json!({ "raw": raw }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GmailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!("Email sent");
        Ok(())
    }
}

/// Build the RFC 5322 message and base64url-encode it (no padding), the
/// form Gmail's `raw` field expects.
///
/// # Errors
///
/// Returns error if an address is invalid or the message fails to build.
pub fn encode_message(from: &str, email: &OutgoingEmail) -> Result<String, GmailError> {
    let from_address = from
        .parse::<lettre::Address>()
        .map_err(|_| GmailError::InvalidAddress(from.to_string()))?;
    let to_address = email
        .to
        .parse::<lettre::Address>()
        .map_err(|_| GmailError::InvalidAddress(email.to.clone()))?;

    let builder = Message::builder()
        .from(Mailbox::new(Some(FROM_NAME.to_string()), from_address))
        .to(Mailbox::new(None, to_address))
        .subject(email.subject.as_str());

    let message = match &email.html {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            html.clone(),
        ))?,
        None => builder.singlepart(SinglePart::plain(email.text.clone()))?,
    };

    Ok(URL_SAFE_NO_PAD.encode(message.formatted()))
}
