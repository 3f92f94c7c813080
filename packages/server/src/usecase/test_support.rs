//! UseCase テスト用のフィクスチャ

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, DisplayName, IdentityRepository, MessagePusher, RoomId,
        RoomMembershipRepository,
    },
    infrastructure::{
        dto::websocket::ServerEvent,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryIdentityRepository, InMemoryRoomMembershipRepository},
    },
    usecase::RoomStateGate,
};

/// インメモリ実装一式
pub(crate) struct Fixture {
    pub identities: Arc<InMemoryIdentityRepository>,
    pub membership: Arc<InMemoryRoomMembershipRepository>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub gate: RoomStateGate,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            identities: Arc::new(InMemoryIdentityRepository::new()),
            membership: Arc::new(InMemoryRoomMembershipRepository::new()),
            pusher: Arc::new(WebSocketMessagePusher::new()),
            gate: RoomStateGate::new(),
        }
    }

    /// 接続を MessagePusher に登録し、受信側を返す
    pub async fn connect(&self, id: &str) -> (ConnectionId, mpsc::Receiver<String>) {
        let connection_id = connection(id);
        let (tx, rx) = mpsc::channel(16);
        self.pusher.register_client(connection_id.clone(), tx).await;
        (connection_id, rx)
    }

    /// イベントを送らずに状態だけを JOIN 済みにする
    pub async fn seed_member(&self, connection_id: &ConnectionId, room_id: &str, name: &str) {
        self.identities
            .set_identity(connection_id.clone(), display_name(name))
            .await;
        self.membership
            .join(connection_id.clone(), room(room_id))
            .await;
    }
}

pub(crate) fn connection(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub(crate) fn room(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

pub(crate) fn display_name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

/// 受信済みのイベントをすべて取り出す
pub(crate) fn drain(rx: &mut mpsc::Receiver<String>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(text) = rx.try_recv() {
        events.push(serde_json::from_str(&text).expect("server sent invalid JSON"));
    }
    events
}
