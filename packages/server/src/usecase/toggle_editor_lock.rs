//! UseCase: エディタロックの切り替え（TOGGLE_EDITOR_LOCK）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, OutboundEvent, RoomId, RoomMembershipRepository};

use super::{audience::Audience, error::RelayError};

/// エディタロック切り替えのユースケース
///
/// ロック状態はサーバーで保持せず、送信者以外のメンバーに中継するだけ。
/// 送信者は自分の UI を既に切り替えている前提。
pub struct ToggleEditorLockUseCase {
    membership: Arc<dyn RoomMembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ToggleEditorLockUseCase {
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
        sender: ConnectionId,
        room_id: RoomId,
        locked: bool,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let targets = Audience::RoomExcept(room_id, sender)
            .resolve(self.membership.as_ref())
            .await;
        self.message_pusher
            .broadcast(&targets, &OutboundEvent::EditorLockToggled { locked })
            .await
            .map_err(|e| RelayError::BroadcastFailed(e.to_string()))?;
        Ok(targets)
    }
}
