//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! applying subscription commands and forwarding filtered events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::{SubscriptionManager, parse_views};
use crate::domain::{AdminEvent, AdminIdentity};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and applies them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<AdminEvent>,
    identity: AdminIdentity,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if ws_tx.send(Message::text(response.to_text())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(admin_event) => {
                        if subs.matches(admin_event.view) {
                            let msg = event_message(&admin_event);
                            if ws_tx.send(Message::text(msg.to_text())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, user_id = %identity.user_id, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!(user_id = %identity.user_id, "ws connection closed");
}

/// Wraps a change notification in the event envelope.
#[must_use]
pub fn event_message(event: &AdminEvent) -> WsMessage {
    WsMessage::new(
        uuid::Uuid::new_v4().to_string(),
        WsMessageType::Event,
        serde_json::to_value(event).unwrap_or_default(),
    )
}

/// Handles a text message from the client, returning the reply.
pub fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> WsMessage {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error(String::new(), 400, "malformed JSON");
    };
    if msg.msg_type != WsMessageType::Command {
        return WsMessage::error(msg.id, 400, "expected a command");
    }
    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return WsMessage::error(msg.id, 404, "unknown command");
    };

    let payload = match command {
        WsCommand::Subscribe { views } => {
            let (views, wildcard, rejected) = parse_views(&views);
            subs.subscribe(&views, wildcard);
            serde_json::json!({
                "subscribed": subs.views(),
                "wildcard": subs.is_subscribed_all(),
                "rejected": rejected,
            })
        }
        WsCommand::Unsubscribe { views } => {
            let (views, wildcard, rejected) = parse_views(&views);
            subs.unsubscribe(&views, wildcard);
            serde_json::json!({
                "subscribed": subs.views(),
                "wildcard": subs.is_subscribed_all(),
                "rejected": rejected,
            })
        }
        WsCommand::Ping => serde_json::json!({ "pong": true }),
    };
    WsMessage::new(msg.id, WsMessageType::Response, payload)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{AdminView, ChangeKind, QueueItemId, UserId};

    fn command(id: &str, payload: serde_json::Value) -> String {
        WsMessage::new(id.to_string(), WsMessageType::Command, payload).to_text()
    }

    #[test]
    fn subscribe_reports_views_and_rejections() {
        let mut subs = SubscriptionManager::new();
        let reply = handle_text_message(
            &command("1", serde_json::json!({"command": "subscribe", "views": ["queues", "bogus"]})),
            &mut subs,
        );
        assert_eq!(reply.id, "1");
        assert_eq!(reply.msg_type, WsMessageType::Response);
        assert_eq!(reply.payload["subscribed"], serde_json::json!(["queues"]));
        assert_eq!(reply.payload["rejected"], serde_json::json!(["bogus"]));
        assert!(subs.matches(AdminView::Queues));
    }

    #[test]
    fn unsubscribe_wildcard_stops_everything() {
        let mut subs = SubscriptionManager::new();
        let _ = handle_text_message(
            &command("1", serde_json::json!({"command": "subscribe", "views": ["*"]})),
            &mut subs,
        );
        assert!(subs.matches(AdminView::Gallery));
        let _ = handle_text_message(
            &command("2", serde_json::json!({"command": "unsubscribe", "views": ["*"]})),
            &mut subs,
        );
        assert!(!subs.matches(AdminView::Gallery));
    }

    #[test]
    fn garbage_and_unknown_commands_are_errors() {
        let mut subs = SubscriptionManager::new();
        let reply = handle_text_message("{not json", &mut subs);
        assert_eq!(reply.msg_type, WsMessageType::Error);

        let reply = handle_text_message(
            &command("9", serde_json::json!({"command": "reboot"})),
            &mut subs,
        );
        assert_eq!(reply.msg_type, WsMessageType::Error);
        assert_eq!(reply.payload["code"], 404);
    }

    #[test]
    fn event_message_carries_view_and_change() {
        let event = AdminEvent::now(
            AdminView::Queues,
            ChangeKind::Updated,
            "queues",
            QueueItemId::new(),
            UserId::new(),
        );
        let msg = event_message(&event);
        assert_eq!(msg.msg_type, WsMessageType::Event);
        assert_eq!(msg.payload["view"], "queues");
        assert_eq!(msg.payload["change"], "updated");
    }
}
