//! UseCase: ファイルのアップロード（UPLOAD_FILE）
//!
//! アップロードされたファイルの内容でルームのコードを置き換える。
//! アップロードした本人のエディタも置き換える必要があるため、送信者を含むルーム全員に
//! `code-change` として送る。

use std::sync::Arc;

use crate::domain::{
    CodeSnapshot, ConnectionId, MessagePusher, OutboundEvent, RoomId, RoomMembershipRepository,
};

use super::{audience::Audience, error::RelayError};

/// ファイルアップロードのユースケース
pub struct UploadFileUseCase {
    membership: Arc<dyn RoomMembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl UploadFileUseCase {
    pub fn new(
        membership: Arc<dyn RoomMembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            membership,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        room_id: RoomId,
        file_content: CodeSnapshot,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let targets = Audience::Room(room_id)
            .resolve(self.membership.as_ref())
            .await;
        let event = OutboundEvent::CodeChanged { code: file_content };
        self.message_pusher
            .broadcast(&targets, &event)
            .await
            .map_err(|e| RelayError::BroadcastFailed(e.to_string()))?;
        Ok(targets)
    }
}
