//! 送信先（オーディエンス）の計算

use crate::domain::{ConnectionId, RoomId, RoomMembershipRepository};

/// ルーム単位のイベント送信先
///
/// 単一接続宛て（SYNC_CODE）は `MessagePusher::push_to` を直接使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// ルームの全メンバー（送信者を含む）
    Room(RoomId),
    /// 送信者以外のルームメンバー
    RoomExcept(RoomId, ConnectionId),
}

impl Audience {
    /// 現在のメンバーシップから宛先の接続 ID を求める（JOIN 順）
    pub async fn resolve(&self, membership: &dyn RoomMembershipRepository) -> Vec<ConnectionId> {
        match self {
            Self::Room(room_id) => membership.members_of(room_id).await,
            Self::RoomExcept(room_id, excluded) => membership
                .members_of(room_id)
                .await
                .into_iter()
                .filter(|id| id != excluded)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryRoomMembershipRepository;

    fn connection(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    async fn create_membership() -> InMemoryRoomMembershipRepository {
        let membership = InMemoryRoomMembershipRepository::new();
        membership.join(connection("a"), room("r1")).await;
        membership.join(connection("b"), room("r1")).await;
        membership.join(connection("c"), room("r1")).await;
        membership.join(connection("d"), room("r2")).await;
        membership
    }

    #[tokio::test]
    async fn test_room_audience_includes_everyone() {
        // テスト項目: Room はルームの全メンバーに解決される
        // given (前提条件):
        let membership = create_membership().await;

        // when (操作):
        let targets = Audience::Room(room("r1")).resolve(&membership).await;

        // then (期待する結果):
        assert_eq!(targets, vec![connection("a"), connection("b"), connection("c")]);
    }

    #[tokio::test]
    async fn test_room_except_audience_excludes_sender() {
        // テスト項目: RoomExcept は送信者以外のメンバーに解決される
        // given (前提条件):
        let membership = create_membership().await;

        // when (操作):
        let targets = Audience::RoomExcept(room("r1"), connection("b"))
            .resolve(&membership)
            .await;

        // then (期待する結果):
        assert_eq!(targets, vec![connection("a"), connection("c")]);
    }

    #[tokio::test]
    async fn test_room_except_for_non_member_sender() {
        // テスト項目: ルームに属していない送信者を除外しても全メンバーが対象になる
        // given (前提条件):
        let membership = create_membership().await;

        // when (操作):
        let targets = Audience::RoomExcept(room("r2"), connection("a"))
            .resolve(&membership)
            .await;

        // then (期待する結果):
        assert_eq!(targets, vec![connection("d")]);
    }

    #[tokio::test]
    async fn test_unknown_room_resolves_to_nobody() {
        // テスト項目: 存在しないルームは空の宛先になる
        // given (前提条件):
        let membership = create_membership().await;

        // when (操作):
        let targets = Audience::Room(room("nowhere")).resolve(&membership).await;

        // then (期待する結果):
        assert!(targets.is_empty());
    }
}
