//! UseCase: 接続の受け付け
//!
//! 接続 ID を払い出して MessagePusher に登録し、本人に `connected` を送ります。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionIdFactory, MessagePushError, MessagePusher, OutboundEvent,
    PusherChannel,
};

/// 接続受け付けのユースケース
pub struct OpenConnectionUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl OpenConnectionUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を登録し、払い出した接続 ID を返す
    pub async fn execute(&self, sender: PusherChannel) -> Result<ConnectionId, MessagePushError> {
        let connection_id = ConnectionIdFactory::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        let event = OutboundEvent::Connected {
            connection_id: connection_id.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(&connection_id, &event).await {
            self.message_pusher.unregister_client(&connection_id).await;
            return Err(e);
        }

        Ok(connection_id)
    }
}
