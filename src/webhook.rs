//! WhatsApp webhook: subscription verification, event intake and per-message dispatch.

mod dispatch;
mod events;
mod handlers;


pub use dispatch::{AppState, MessageOutcome, dispatch_message};
pub use events::{
    BUSINESS_ACCOUNT_OBJECT, Change, ChangeValue, Entry, InboundMessage, Metadata,
    NON_TEXT_PLACEHOLDER, TextContent, WebhookEnvelope,
};
pub use handlers::{EVENT_RECEIVED, build_router};
