//! Application state shared across handlers.

use std::sync::Arc;

use crate::claude::{ClaudeClient, ClaudeError};
use crate::config::StorefrontConfig;
use crate::db::ReviewStore;
use crate::services::{GmailClient, GmailError, Mailer, NetlifyClient, NetlifyError};
use crate::square::{SquareClient, SquareError};

/// Error building an upstream client at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("square client: {0}")]
    Square(#[from] SquareError),
    #[error("claude client: {0}")]
    Claude(#[from] ClaudeError),
    #[error("gmail client: {0}")]
    Gmail(#[from] GmailError),
    #[error("netlify client: {0}")]
    Netlify(#[from] NetlifyError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Optional integrations are
/// `None` when their environment variables are missing.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    square: SquareClient,
    mailer: Mailer,
    claude: Option<ClaudeClient>,
    netlify: Option<NetlifyClient>,
    reviews: ReviewStore,
}

impl AppState {
    /// Build every upstream client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured credential is not a valid header
    /// value or an HTTP client fails to build.
    pub fn new(config: StorefrontConfig, reviews: ReviewStore) -> Result<Self, StateError> {
        let timeout = config.http_timeout;
        let square = SquareClient::new(&config.square, timeout)?;
        let gmail = config
            .gmail
            .as_ref()
            .map(|c| GmailClient::new(c, timeout))
            .transpose()?;
        let mailer = Mailer::new(gmail, config.owner_email.clone());
        let claude = config
            .anthropic
            .as_ref()
            .map(|c| ClaudeClient::new(c, timeout))
            .transpose()?;
        let netlify = config
            .netlify
            .as_ref()
            .map(|c| NetlifyClient::new(c, timeout))
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                square,
                mailer,
                claude,
                netlify,
                reviews,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Square commerce client.
    #[must_use]
    pub fn square(&self) -> &SquareClient {
        &self.inner.square
    }

    /// Order and pickup e-mails.
    #[must_use]
    pub fn mailer(&self) -> &Mailer {
        &self.inner.mailer
    }

    /// Claude client, when `ANTHROPIC_API_KEY` is set.
    #[must_use]
    pub fn claude(&self) -> Option<&ClaudeClient> {
        self.inner.claude.as_ref()
    }

    /// Netlify client, when the site id and token are set.
    #[must_use]
    pub fn netlify(&self) -> Option<&NetlifyClient> {
        self.inner.netlify.as_ref()
    }

    #[must_use]
    pub fn reviews(&self) -> &ReviewStore {
        &self.inner.reviews
    }
}
