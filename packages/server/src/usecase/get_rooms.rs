//! UseCase: ルーム一覧の取得（HTTP API）

use std::sync::Arc;

use crate::domain::{IdentityRepository, RoomId, RoomMembershipRepository, RoomSnapshot};

/// ルームの読み取りモデルを組み立てる
///
/// ルームが存在しない（または直前に破棄された）場合は `None`。
pub(crate) async fn snapshot_room(
    identities: &dyn IdentityRepository,
    membership: &dyn RoomMembershipRepository,
    room_id: RoomId,
) -> Option<RoomSnapshot> {
    let created_at = membership.room_created_at(&room_id).await?;
    let member_ids = membership.members_of(&room_id).await;
    let members = identities.describe(&member_ids).await;
    Some(RoomSnapshot {
        id: room_id,
        members,
        created_at,
    })
}

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    identities: Arc<dyn IdentityRepository>,
    membership: Arc<dyn RoomMembershipRepository>,
}

impl GetRoomsUseCase {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        membership: Arc<dyn RoomMembershipRepository>,
    ) -> Self {
        Self {
            identities,
            membership,
        }
    }

    /// 存在する全てのルーム（ID 順）
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        let mut rooms = Vec::new();
        for room_id in self.membership.list_rooms().await {
            if let Some(room) =
                snapshot_room(self.identities.as_ref(), self.membership.as_ref(), room_id).await
            {
                rooms.push(room);
            }
        }
        rooms
    }
}
