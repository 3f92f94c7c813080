//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionPhase, PUSHER_CHANNEL_CAPACITY},
    ui::state::AppState,
};

use super::event::dispatch;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: every event addressed to
/// this connection (via rx channel) is written to its WebSocket in order.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Channel for events addressed to this connection
    let (tx, rx) = mpsc::channel(PUSHER_CHANNEL_CAPACITY);
    let mut send_task = pusher_loop(rx, sender);

    let connection_id = match state.open_connection_usecase.execute(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to open connection: {}", e);
            send_task.abort();
            return;
        }
    };
    tracing::info!("Connection '{}' opened", connection_id);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        let mut phase = ConnectionPhase::default();

        while phase.accepts_events() {
            let Some(msg) = receiver.next().await else {
                break;
            };
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", connection_id_clone, text);
                    phase = dispatch(&state_clone, &connection_id_clone, phase, &text).await;
                }
                Message::Binary(_) => {
                    tracing::warn!("Dropping binary frame from '{}'", connection_id_clone);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    phase = phase.begin_disconnect();
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let outcome = state
        .disconnect_connection_usecase
        .execute(connection_id.clone())
        .await;
    match outcome.display_name {
        Some(name) => tracing::info!(
            "Connection '{}' ({}) closed, left {} room(s)",
            connection_id,
            name.as_str(),
            outcome.departures.len()
        ),
        None => tracing::info!("Connection '{}' closed before joining", connection_id),
    }
}
