use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::events::SocketReply;
use crate::api::server::AppState;
use crate::error::RegistrationError;
use crate::registration::{Ack, RegistrationRequest, Registrar, Transport};

/// Renders registration outcomes as socket text frames.
pub struct SocketTransport;

impl Transport for SocketTransport {
    type Reply = SocketReply;

    fn acknowledge(&self, ack: Ack) -> SocketReply {
        SocketReply::Connected {
            username: ack.username,
        }
    }

    fn reject(&self, error: RegistrationError) -> SocketReply {
        warn!(kind = error.kind(), error = %error, "socket registration failed");
        SocketReply::Error
    }
}

pub async fn ws_handler(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    match ws {
        Ok(ws) => ws.on_upgrade(move |socket| handle_socket(socket, state)),
        Err(rejection) => {
            debug!(%rejection, "websocket upgrade rejected");
            (StatusCode::INTERNAL_SERVER_ERROR, "Upgrade failed").into_response()
        }
    }
}

/// Decode one inbound payload and register it. Never fails the connection.
pub async fn handle_message(registrar: &Registrar, payload: &[u8]) -> SocketReply {
    match serde_json::from_slice::<RegistrationRequest>(payload) {
        Ok(request) => registrar.respond(&SocketTransport, &request).await,
        Err(e) => SocketTransport.reject(RegistrationError::Decode(e.to_string())),
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    info!("socket connected");
    let (mut sender, mut receiver) = socket.split();

    // Messages are handled one at a time, so replies follow send order
    while let Some(msg) = receiver.next().await {
        let reply = match msg {
            Ok(Message::Text(text)) => handle_message(&state.registrar, text.as_bytes()).await,
            Ok(Message::Binary(bytes)) => handle_message(&state.registrar, &bytes).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!(error = %e, "socket receive failed");
                break;
            }
        };

        if sender
            .send(Message::Text(reply.to_string().into()))
            .await
            .is_err()
        {
            break;
        }
    }

    info!("socket disconnected");
}
