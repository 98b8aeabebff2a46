use anyhow::Context;
use reqwest::Client;
use std::time::Duration;

use crate::logic::client::url_utils::endpoint_url;
use crate::logic::status::{normalize_source_record, SourceRecord};
use crate::logic::types::Application;

/// Build the HTTP client with the configured request timeout
pub fn build_client(request_timeout_seconds: u64) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(request_timeout_seconds))
        .build()
        .context("building HTTP client")
}

/// One poll: fetch the `/applications` payload and normalize every record.
///
/// A non-2xx response is a transport failure for the whole poll, as is a
/// malformed record inside a 2xx payload. Per-source backend errors inside a
/// 2xx payload are not failures: they come back as fully offline applications
/// so the fleet keeps accounting for every known source.
pub async fn fetch_applications(
    client: &Client,
    base_url: Option<&str>,
    host: &str,
    port: u16,
) -> anyhow::Result<Vec<Application>> {
    let url = endpoint_url(base_url, host, port, "/applications");
    let resp = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        anyhow::bail!("server responded with status {status}: {body}");
    }

    let records: Vec<SourceRecord> = resp
        .json()
        .await
        .with_context(|| format!("decoding applications payload from {url}"))?;

    let mut apps = Vec::with_capacity(records.len());
    for record in records {
        apps.push(normalize_source_record(record)?);
    }
    Ok(apps)
}
