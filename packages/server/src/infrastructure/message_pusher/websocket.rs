//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの上限付き送信チャンネル（`PusherChannel`）を管理
//! - 計算済みの宛先へのメッセージ送信（push_to, broadcast）
//! - ドメインイベントをワイヤ形式（JSON テキスト）にエンコード
//!
//! WebSocket の受け付けと sender の生成は UI 層（`ui/handler/websocket.rs`）で行われ、
//! この実装は受け取った sender を使って送信するだけです。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// ドメインイベントを JSON テキストに変換
fn encode(event: &OutboundEvent) -> Result<String, MessagePushError> {
    serde_json::to_string(&ServerEvent::from(event))
        .map_err(|e| MessagePushError::Encode(e.to_string()))
}

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続 ID → 送信チャンネル
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みの接続数
    pub async fn client_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        self.clients.lock().await.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.clients.lock().await.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let content = encode(event)?;
        let clients = self.clients.lock().await;
        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .try_send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let content = encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            let Some(sender) = clients.get(target) else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
                continue;
            };
            // ブロードキャストでは一部の送信失敗（満杯・切断済み）を許容
            if let Err(e) = sender.try_send(content.to_string()) {
                tracing::warn!("Failed to push message to '{}': {}", target, e);
            }
        }
        tracing::debug!("Broadcasted message to {} connection(s)", targets.len());

        Ok(())
    }
}
