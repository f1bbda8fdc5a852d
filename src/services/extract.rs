use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::PipelineError;
use crate::model::{ExtractRequest, ExtractedFilters};
use crate::pipeline::event::Event;

/// Extraction collaborator client (free text -> structured city/filters).
/// Treated as slow and unreliable: a failure becomes an
/// `ExtractionCompleted(Err)` event and never touches filter state.
#[derive(Clone)]
pub struct ExtractService {
    client: Client,
    url: String,
    tx: mpsc::Sender<Event>,
}

impl ExtractService {
    pub fn new(url: impl Into<String>, timeout: Duration, tx: mpsc::Sender<Event>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
            tx,
        })
    }

    pub fn dispatch(&self, prompt: String) {
        let client = self.client.clone();
        let url = self.url.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let outcome = execute(&client, &url, prompt).await.map_err(|e| {
                warn!("extraction call failed: {e}");
                PipelineError::Extraction(e.to_string())
            });
            let _ = tx.send(Event::ExtractionCompleted { outcome }).await;
        });
    }
}

async fn execute(client: &Client, url: &str, prompt: String) -> Result<ExtractedFilters> {
    let response = client
        .post(url)
        .json(&ExtractRequest { prompt })
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(anyhow!("extraction server error: {}", response.status()));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str::<ExtractedFilters>(&body)?)
}
