//! Inbound event envelope as posted by the WhatsApp Cloud API.
//!
//! Only the fields the bridge reads are modelled; everything else is ignored.

use serde::Deserialize;

/// `object` value of envelopes carrying WhatsApp Business events.
pub const BUSINESS_ACCOUNT_OBJECT: &str = "whatsapp_business_account";

/// Text used for messages that carry no text body (flows, buttons, media).
pub const NON_TEXT_PLACEHOLDER: &str = "Interacción de Flow";

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

impl WebhookEnvelope {
    pub fn is_business_account(&self) -> bool {
        self.object == BUSINESS_ACCOUNT_OBJECT
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// Routing identifier of the business number that received the message.
    pub phone_number_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    /// Sender identifier (the user's WhatsApp id).
    pub from: String,
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub body: String,
}

impl InboundMessage {
    pub fn text_body(&self) -> &str {
        self.text
            .as_ref()
            .map_or(NON_TEXT_PLACEHOLDER, |text| text.body.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_nested_message_batch() {
        let envelope: WebhookEnvelope = serde_json::from_value(json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "102290129340398",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {
                            "display_phone_number": "15550783881",
                            "phone_number_id": "106540352242922"
                        },
                        "contacts": [{"profile": {"name": "Ana"}, "wa_id": "5551"}],
                        "messages": [{
                            "from": "5551",
                            "id": "wamid.HBgL",
                            "timestamp": "1749416383",
                            "type": "text",
                            "text": {"body": "Hola"}
                        }]
                    }
                }]
            }]
        }))
        .unwrap();

        assert!(envelope.is_business_account());
        let value = &envelope.entry[0].changes[0].value;
        assert_eq!(
            value.metadata.as_ref().unwrap().phone_number_id,
            "106540352242922"
        );
        assert_eq!(value.messages[0].from, "5551");
        assert_eq!(value.messages[0].text_body(), "Hola");
    }

    #[test]
    fn status_updates_have_no_messages() {
        let envelope: WebhookEnvelope = serde_json::from_value(json!({
            "object": "whatsapp_business_account",
            "entry": [{"changes": [{"value": {
                "metadata": {"phone_number_id": "1234"},
                "statuses": [{"id": "wamid.X", "status": "delivered"}]
            }}]}]
        }))
        .unwrap();
        assert!(envelope.entry[0].changes[0].value.messages.is_empty());
    }

    #[test]
    fn non_text_message_uses_placeholder() {
        let message: InboundMessage = serde_json::from_value(json!({
            "from": "5551",
            "type": "interactive",
            "interactive": {"type": "nfm_reply"}
        }))
        .unwrap();
        assert_eq!(message.text_body(), NON_TEXT_PLACEHOLDER);
    }

    #[test]
    fn missing_object_is_not_business_account() {
        let envelope: WebhookEnvelope = serde_json::from_value(json!({"entry": []})).unwrap();
        assert!(!envelope.is_business_account());
    }
}
