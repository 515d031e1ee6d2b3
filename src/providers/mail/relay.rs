//! HTTP client for the mail relay.
//!
//! The relay accepts one JSON POST per send: `{to, subject, text, html}`.
//! Recipients are filtered to syntactically plausible addresses before any
//! network activity; an empty filtered list rejects the send outright.

use std::time::Duration;

use pulldown_cmark::{html, Parser};
use serde::Serialize;
use thiserror::Error;

use crate::config::MailSettings;

/// Errors that can occur while sending a summary email.
#[derive(Debug, Error)]
pub enum SendError {
    /// No syntactically valid recipient addresses were supplied.
    #[error("no valid recipient addresses")]
    NoValidRecipients,

    /// The relay answered with a non-success status.
    #[error("mail relay error: HTTP {status}: {message}")]
    Relay { status: u16, message: String },

    /// The request itself failed.
    #[error("mail relay request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for mail operations.
pub type SendResult<T> = Result<T, SendError>;

/// Checks an address for the minimal shape `local@domain.tld` with no
/// whitespace anywhere.
pub fn is_valid_address(address: &str) -> bool {
    if address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Trims and filters a recipient list down to valid addresses.
pub fn filter_recipients(recipients: &[String]) -> Vec<String> {
    recipients
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty() && is_valid_address(r))
        .map(str::to_string)
        .collect()
}

/// Renders the summary Markdown to HTML wrapped in a preformatted block.
pub fn render_summary_html(summary: &str) -> String {
    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new(summary));
    format!("<pre>{}</pre>", rendered)
}

/// JSON body for the relay endpoint.
#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// Client for the local mail relay.
pub struct MailRelayClient {
    client: reqwest::Client,
    relay_url: String,
}

impl MailRelayClient {
    /// Creates a client from the mail settings.
    pub fn new(settings: &MailSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            relay_url: settings.relay_url.clone(),
        }
    }

    /// Sends the summary to the given recipients.
    ///
    /// Filters recipients first; if none survive, fails with
    /// [`SendError::NoValidRecipients`] without touching the network.
    /// Returns the number of recipients the relay accepted.
    pub async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        message: &str,
        html_summary: &str,
    ) -> SendResult<usize> {
        let valid = filter_recipients(recipients);
        if valid.is_empty() {
            return Err(SendError::NoValidRecipients);
        }

        let body = SendMailRequest {
            to: &valid,
            subject,
            text: message,
            html: html_summary,
        };

        tracing::info!(recipients = valid.len(), "Sending summary email");

        let response = self
            .client
            .post(&self.relay_url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Mail relay rejected the send");
            return Err(SendError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        Ok(valid.len())
    }
}
