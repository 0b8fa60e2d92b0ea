//! axum routes for `GET /webhook` and `POST /webhook`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use log::{debug, error, info, warn};

use crate::signature::{SIGNATURE_HEADER, verify_request_signature};

use super::dispatch::{AppState, dispatch_message};
use super::events::WebhookEnvelope;

/// Acknowledgement body for accepted events.
pub const EVENT_RECEIVED: &str = "EVENT_RECEIVED";

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", get(verify_subscription).post(receive_event))
        .with_state(state)
}

/// GET /webhook: echo `hub.challenge` when the platform subscribes with our token.
///
/// Read as a plain map: repeated or unexpected keys still end in 403.
async fn verify_subscription(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mode = params.get("hub.mode").map(String::as_str);
    let verify_token = params.get("hub.verify_token").map(String::as_str);

    if mode == Some("subscribe") && verify_token == Some(state.verify_token.as_str()) {
        info!("Webhook subscription verified");
        let challenge = params.get("hub.challenge").cloned().unwrap_or_default();
        return (StatusCode::OK, challenge).into_response();
    }

    warn!(
        "Webhook verification rejected (mode: {:?})",
        mode.unwrap_or("<none>")
    );
    StatusCode::FORBIDDEN.into_response()
}

/// POST /webhook: verify, parse and dispatch every message in the event batch.
///
/// Per-message failures never change the response; the platform always gets
/// `200 EVENT_RECEIVED` for a recognised envelope.
async fn receive_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // A header that is not valid UTF-8 counts as present and wrong.
    let signature = headers
        .get(SIGNATURE_HEADER)
        .map(|value| value.to_str().unwrap_or_default());

    if let Err(e) = verify_request_signature(&state.app_secret, signature, &body) {
        warn!("Rejecting webhook event: {e}");
        return StatusCode::FORBIDDEN.into_response();
    }

    let envelope = match serde_json::from_slice::<WebhookEnvelope>(&body) {
        Ok(envelope) if envelope.is_business_account() => envelope,
        Ok(envelope) => {
            debug!("Ignoring webhook event for object {:?}", envelope.object);
            return StatusCode::NOT_FOUND.into_response();
        }
        Err(e) => {
            debug!("Ignoring unparseable webhook event: {e}");
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    for change in envelope.entry.iter().flat_map(|entry| &entry.changes) {
        let value = &change.value;
        if value.messages.is_empty() {
            continue;
        }

        let Some(metadata) = &value.metadata else {
            warn!(
                "Skipping {} messages without metadata.phone_number_id",
                value.messages.len()
            );
            continue;
        };

        for message in &value.messages {
            match dispatch_message(&state, &metadata.phone_number_id, message).await {
                Ok(outcome) => debug!("Message from {} handled: {outcome:?}", message.from),
                Err(e) => error!("Failed to handle message from {}: {e}", message.from),
            }
        }
    }

    (StatusCode::OK, EVENT_RECEIVED).into_response()
}
