//! UseCase: ルーム詳細の取得（HTTP API）

use std::sync::Arc;

use crate::domain::{IdentityRepository, RoomId, RoomMembershipRepository, RoomSnapshot};

use super::{error::GetRoomDetailError, get_rooms::snapshot_room};

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    identities: Arc<dyn IdentityRepository>,
    membership: Arc<dyn RoomMembershipRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        membership: Arc<dyn RoomMembershipRepository>,
    ) -> Self {
        Self {
            identities,
            membership,
        }
    }

    /// # Returns
    ///
    /// * `Ok(RoomSnapshot)` - ルームの現在の状態
    /// * `Err(GetRoomDetailError::RoomNotFound)` - ルームが存在しない
    pub async fn execute(&self, room_id: RoomId) -> Result<RoomSnapshot, GetRoomDetailError> {
        let not_found = GetRoomDetailError::RoomNotFound(room_id.to_string());
        snapshot_room(self.identities.as_ref(), self.membership.as_ref(), room_id)
            .await
            .ok_or(not_found)
    }
}
