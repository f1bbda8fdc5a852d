use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

use crate::error::PipelineError;
use crate::model::{SearchRequest, SearchResponse};
use crate::pipeline::epoch::RequestEpoch;
use crate::pipeline::event::Event;

/// Search backend client. `dispatch` spawns the call and reports the
/// outcome back over the session channel tagged with its epoch; there is
/// no hard cancellation of in-flight calls, superseded ones simply arrive
/// stale and get dropped.
#[derive(Clone)]
pub struct SearchService {
    client: Client,
    url: String,
    tx: mpsc::Sender<Event>,
}

impl SearchService {
    pub fn new(url: impl Into<String>, timeout: Duration, tx: mpsc::Sender<Event>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
            tx,
        })
    }

    pub fn dispatch(&self, epoch: RequestEpoch, request: SearchRequest) {
        let client = self.client.clone();
        let url = self.url.clone();
        let tx = self.tx.clone();
        let correlation = Uuid::new_v4();

        tokio::spawn(async move {
            let outcome = execute(&client, &url, &request).await.map_err(|e| {
                warn!(%correlation, epoch = epoch.0, "search call failed: {e}");
                PipelineError::Search(e.to_string())
            });
            let _ = tx.send(Event::SearchCompleted { epoch, outcome }).await;
        });
    }
}

async fn execute(client: &Client, url: &str, request: &SearchRequest) -> Result<SearchResponse> {
    let response = client.post(url).json(request).send().await?;
    if !response.status().is_success() {
        return Err(anyhow!("search server error: {}", response.status()));
    }
    // Parse strictly so a malformed payload surfaces as a request failure
    // rather than a half-applied response.
    let body = response.text().await?;
    Ok(serde_json::from_str::<SearchResponse>(&body)?)
}
