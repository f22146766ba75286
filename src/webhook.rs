use crate::errors::TransmitError;
use crate::models::WebhookPayload;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Forwards committed days to the outside world.
#[async_trait]
pub trait Transmitter: Send + Sync {
    async fn transmit(&self, payload: &WebhookPayload) -> Result<(), TransmitError>;
}

pub struct WebhookTransmitter {
    client: reqwest::Client,
    url: String,
}

impl WebhookTransmitter {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Transmitter for WebhookTransmitter {
    async fn transmit(&self, payload: &WebhookPayload) -> Result<(), TransmitError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(TransmitError::Status(response.status()));
        }
        Ok(())
    }
}

/// Sends `payload` on a background task. The outcome is only logged; nothing
/// retries it and callers are free to drop the handle.
pub fn spawn_transmission(
    transmitter: Arc<dyn Transmitter>,
    payload: WebhookPayload,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match transmitter.transmit(&payload).await {
            Ok(()) => info!(date = %payload.date, "forwarded daily log to webhook"),
            Err(err) => error!(date = %payload.date, "failed to forward daily log: {err}"),
        }
    })
}
