use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{BridgeError, Result};
use crate::persona::SYSTEM_PROMPT;
use crate::types::{Reply, Turn};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Turn>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct CompletionClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
    api_url: Url,
}

impl CompletionClient {
    pub fn new(api_key: String, model: String, api_url: Url) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            model,
            api_url,
        }
    }

    /// Ask the completion service for the next reply.
    ///
    /// The request is the persona prompt, then `history`, then `text` as the
    /// new user turn. Every failure is returned; callers decide on a fallback.
    pub async fn generate_reply(&self, text: &str, history: &[Turn]) -> Result<Reply> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Turn::system(SYSTEM_PROMPT));
        messages.extend_from_slice(history);
        messages.push(Turn::user(text));

        debug!(
            "Sending request to completion API with {} messages",
            messages.len()
        );

        let request = CompletionRequest {
            model: &self.model,
            messages,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(self.api_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BridgeError::CompletionApi { status, message });
        }

        let api_response: CompletionResponse = response.json().await?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BridgeError::CompletionResponse("No choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| BridgeError::CompletionResponse("Empty message content".to_string()))?;

        let reply: Reply = serde_json::from_str(&content).map_err(|e| {
            BridgeError::CompletionResponse(format!("Reply is not a {{reply}} object: {e}"))
        })?;

        debug!("Received response from completion API");
        Ok(reply)
    }
}
