//! # Notify — Best-Effort Lead Forwarding
//!
//! After a contact is stored, the contact route hands it to a [`Notifier`].
//! The default [`NoopNotifier`] does nothing; [`WebhookNotifier`] POSTs the
//! stored record as JSON to a configured URL (a CRM intake hook, a chat
//! webhook, ...).
//!
//! Delivery runs on a spawned task. `notify` returns immediately, and a failed
//! delivery is logged and counted but never reaches the HTTP response.

use crate::store::Contact;
use anyhow::{bail, Context, Result};
use prometheus_client::metrics::counter::Counter;
use std::time::Duration;
use tracing::{debug, warn};

/// Receives each contact after it has been stored. Must not block or fail.
pub trait Notifier: Send + Sync {
    fn notify(&self, contact: &Contact);
}

pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _contact: &Contact) {}
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    url: url::Url,
    failures: Counter,
}

impl WebhookNotifier {
    pub fn new(url: url::Url, timeout: Duration, failures: Counter) -> Result<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            bail!("webhook URL must be http or https, got {}", url.scheme());
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build webhook HTTP client")?;
        Ok(WebhookNotifier {
            client,
            url,
            failures,
        })
    }

    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, contact: &Contact) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(contact_id = %contact.id, "no async runtime, contact webhook skipped");
            self.failures.inc();
            return;
        };
        let client = self.client.clone();
        let url = self.url.clone();
        let failures = self.failures.clone();
        let contact = contact.clone();
        handle.spawn(async move {
            match deliver(&client, &url, &contact).await {
                Ok(()) => debug!(contact_id = %contact.id, "contact forwarded to webhook"),
                Err(e) => {
                    failures.inc();
                    warn!(contact_id = %contact.id, error = %e, "contact webhook failed");
                }
            }
        });
    }
}

/// POST one contact. Any non-2xx status is an error.
pub async fn deliver(client: &reqwest::Client, url: &url::Url, contact: &Contact) -> Result<()> {
    let response = client
        .post(url.clone())
        .json(contact)
        .send()
        .await
        .context("webhook request failed")?;
    let status = response.status();
    if !status.is_success() {
        bail!("webhook responded with {status}");
    }
    Ok(())
}
