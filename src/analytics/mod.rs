//! Fire-and-forget usage analytics.
//!
//! Commands report what they resolved through the [`Analytics`] trait. Sinks
//! must never block or fail the caller: [`LogAnalytics`] only writes a log
//! line and [`MixpanelAnalytics`] ships the event from a spawned task.

use log::{info, warn};
use reqwest::Client;
use serde_json::{Map, Value, json};

const MIXPANEL_TRACK_URL: &str = "https://api.mixpanel.com/track";

/// Sink for analytics events.
pub trait Analytics: Send + Sync {
    /// Records an event with its property bag.
    fn track(&self, event: &str, properties: Map<String, Value>);
}

/// Writes every event to the log.
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn track(&self, event: &str, properties: Map<String, Value>) {
        info!("analytics event {} {}", event, Value::Object(properties));
    }
}

/// Sends events to the Mixpanel ingestion API.
pub struct MixpanelAnalytics {
    token: String,
    url: String,
    client: Client,
}

impl MixpanelAnalytics {
    pub fn new(token: &str) -> Self {
        Self::with_url(token, MIXPANEL_TRACK_URL)
    }

    fn with_url(token: &str, url: &str) -> Self {
        MixpanelAnalytics {
            token: token.to_owned(),
            url: url.to_owned(),
            client: Client::new(),
        }
    }

    fn payload(&self, event: &str, mut properties: Map<String, Value>) -> Value {
        properties.insert("token".to_owned(), Value::String(self.token.clone()));
        json!([{ "event": event, "properties": properties }])
    }
}

impl Analytics for MixpanelAnalytics {
    fn track(&self, event: &str, properties: Map<String, Value>) {
        let payload = self.payload(event, properties);
        let client = self.client.clone();
        let url = self.url.clone();
        let event = event.to_owned();

        tokio::spawn(async move {
            let result = client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            if let Err(e) = result {
                warn!("failed to track analytics event {}: {}", event, e);
            }
        });
    }
}

/// Builds the analytics sink from the optional Mixpanel token.
pub fn from_token(token: Option<&str>) -> Box<dyn Analytics> {
    match token {
        Some(token) if !token.is_empty() => Box::new(MixpanelAnalytics::new(token)),
        _ => Box::new(LogAnalytics),
    }
}
