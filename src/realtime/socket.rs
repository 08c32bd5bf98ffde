/// WebSocket sessions for reminder listeners
///
/// Each upgraded connection joins the listener registry for as long as it
/// stays open. Outbound reminders are drained from the listener's queue by a
/// writer task; inbound frames are only logged.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::http::AppState;
use crate::realtime::ListenerRegistry;

/// `GET /ws`: upgrade to a listener connection
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let registry = state.listeners.clone();
    ws.on_upgrade(move |socket| run_session(socket, registry))
}

/// Drive one listener connection until the client goes away
pub async fn run_session(socket: WebSocket, registry: ListenerRegistry) {
    let (id, mut outbound) = registry.register();
    info!("Listener {} connected ({} open)", id, registry.len());

    let (mut sink, mut stream) = socket.split();

    let mut writer = tokio::spawn(async move {
        while let Some(text) = outbound.recv().await {
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => info!("Received from {}: {}", id, text),
                Some(Ok(Message::Binary(bytes))) => {
                    info!("Received {} bytes from {}", bytes.len(), id)
                }
                Some(Ok(Message::Close(_))) | None => break,
                // Ping/pong replies are handled by axum
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Listener {} errored: {}", id, e);
                    break;
                }
            },
            // Writer ends when the socket stops accepting frames
            _ = &mut writer => break,
        }
    }

    registry.remove(id);
    writer.abort();
    debug!("Listener {} disconnected ({} open)", id, registry.len());
}
