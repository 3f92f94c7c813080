//! Helpers shared by the integration tests.
//!
//! Each test serves its own router on an ephemeral port so that tests never
//! share rooms.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use irori_server::{
    infrastructure::{
        dto::websocket::ServerEvent,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryIdentityRepository, InMemoryRoomMembershipRepository},
        storage::{InMemoryChatMessageStore, PersistQueue},
    },
    ui::{AppState, Server},
};
use serde_json::{Value, json};
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const QUIET_PERIOD: Duration = Duration::from_millis(200);

pub struct TestServer {
    pub addr: SocketAddr,
    pub history: Arc<InMemoryChatMessageStore>,
}

impl TestServer {
    pub async fn start() -> Self {
        let history = Arc::new(InMemoryChatMessageStore::new(100));
        let persist_queue = Arc::new(PersistQueue::spawn(history.clone(), 16));
        let state = AppState::new(
            Arc::new(InMemoryIdentityRepository::new()),
            Arc::new(InMemoryRoomMembershipRepository::new()),
            Arc::new(WebSocketMessagePusher::new()),
            persist_queue,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(Server::new(state).serve(listener, std::future::pending()));

        Self { addr, history }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// A raw WebSocket client speaking the JSON protocol
pub struct TestClient {
    pub socket_id: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the `connected` greeting
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        let mut client = Self {
            socket_id: String::new(),
            stream,
        };
        match client.recv().await {
            ServerEvent::Connected { socket_id } => client.socket_id = socket_id,
            other => panic!("expected connected, got {:?}", other),
        }
        client
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send_raw(&value.to_string()).await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn join(&mut self, room_id: &str, username: &str) {
        self.send_json(json!({"type": "join", "roomId": room_id, "username": username}))
            .await;
    }

    /// Join and consume this client's own `joined`
    pub async fn join_and_wait(&mut self, room_id: &str, username: &str) -> ServerEvent {
        self.join(room_id, username).await;
        self.recv().await
    }

    /// Next server event, failing the test after a timeout
    pub async fn recv(&mut self) -> ServerEvent {
        loop {
            let frame = timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for server event")
                .expect("Stream closed")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Server sent invalid JSON");
            }
        }
    }

    /// Every event that arrives before the connection goes quiet
    pub async fn recv_until_quiet(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(Some(frame)) = timeout(QUIET_PERIOD, self.stream.next()).await {
            if let Message::Text(text) = frame.expect("WebSocket error") {
                events.push(serde_json::from_str(text.as_str()).expect("Server sent invalid JSON"));
            }
        }
        events
    }

    /// Assert that nothing arrives for a short while
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(Ok(Message::Text(text)))) = timeout(QUIET_PERIOD, self.stream.next()).await
        {
            panic!("expected no event, got {}", text);
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
