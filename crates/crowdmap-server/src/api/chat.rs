//! Assistant chat endpoints: a WebSocket for the widget and an HTTP POST
//! fallback, both backed by the same rule set in [`crate::bot`].

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::bot;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    message: &'static str,
}

pub async fn chat_message(Json(request): Json<ChatRequest>) -> impl IntoResponse {
    Json(ChatResponse {
        message: bot::reply(&request.message),
    })
}

pub async fn chat_socket(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(run_chat_session)
}

async fn run_chat_session(mut socket: WebSocket) {
    while let Some(Ok(message)) = socket.recv().await {
        match message {
            Message::Text(text) => {
                let Ok(payload) = frame_reply(&text) else {
                    break;
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            // Pings are answered by axum automatically; other frames are
            // ignored.
            _ => {}
        }
    }
}

/// Serialized reply for one inbound text frame. The widget sends
/// `{"message": "..."}`; any frame that does not parse as that shape is
/// treated as a bare message string.
fn frame_reply(text: &str) -> Result<String, serde_json::Error> {
    let incoming = serde_json::from_str::<ChatRequest>(text)
        .map_or_else(|_| text.to_string(), |request| request.message);
    serde_json::to_string(&ChatResponse {
        message: bot::reply(&incoming),
    })
}
