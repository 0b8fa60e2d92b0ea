//! Client for the WhatsApp Cloud API message-send endpoint.

use log::debug;
use serde::Serialize;
use url::Url;

use crate::error::{BridgeError, Result};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

pub struct GraphClient {
    access_token: String,
    client: reqwest::Client,
    base_url: Url,
    api_version: String,
}

impl GraphClient {
    pub fn new(access_token: String, base_url: Url, api_version: String) -> Self {
        Self {
            access_token,
            client: reqwest::Client::new(),
            base_url,
            api_version,
        }
    }

    fn messages_url(&self, phone_number_id: &str) -> String {
        format!(
            "{}/{}/{}/messages",
            self.base_url.as_str().trim_end_matches('/'),
            self.api_version,
            phone_number_id
        )
    }

    /// Send `text` to `to` through the business number `phone_number_id`.
    ///
    /// Sent once; a non-success status is returned with the response body.
    pub async fn send_text(&self, phone_number_id: &str, to: &str, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to,
            text: TextBody { body: text },
        };

        debug!("Sending WhatsApp message to {to} via {phone_number_id}");

        let response = self
            .client
            .post(self.messages_url(phone_number_id))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BridgeError::GraphApi { status, message });
        }

        Ok(())
    }
}
