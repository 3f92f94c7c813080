//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectConnectionUseCase::execute() メソッド
//! - 所属ルームからの一括退出、残ったメンバーへの `disconnected` 通知、状態の後始末
//!
//! ### なぜこのテストが必要か
//! - 切断した接続の ID や表示名が残ると、後続の `joined` のメンバー一覧に幽霊が現れる
//! - 空になったルームが残り続けないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人のルームから 1 人が切断
//! - エッジケース：JOIN 前の切断、複数ルームに所属したままの切断、最後のメンバーの切断

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, IdentityRepository, MessagePusher, OutboundEvent, RoomDeparture,
    RoomMembershipRepository,
};

use super::state_gate::RoomStateGate;

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// 切断した接続の表示名（JOIN 前なら `None`）
    pub display_name: Option<DisplayName>,
    /// 退出したルームと、そこに残ったメンバー
    pub departures: Vec<RoomDeparture>,
}

/// 切断処理のユースケース
pub struct DisconnectConnectionUseCase {
    identities: Arc<dyn IdentityRepository>,
    membership: Arc<dyn RoomMembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    gate: RoomStateGate,
}

impl DisconnectConnectionUseCase {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        membership: Arc<dyn RoomMembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        gate: RoomStateGate,
    ) -> Self {
        Self {
            identities,
            membership,
            message_pusher,
            gate,
        }
    }

    /// 切断処理を実行
    ///
    /// 通知は退出前の表示名で行い、表示名の削除は全ての通知の後に行う。
    /// 通知の失敗は後始末を止めない。進行中の JOIN があれば、その `joined` の送信後に実行される。
    pub async fn execute(&self, connection_id: ConnectionId) -> DisconnectOutcome {
        let _guard = self.gate.enter().await;

        // 1. 退出前に表示名を取得
        let display_name = self.identities.get_identity(&connection_id).await;

        // 2. 全ての所属ルームから一括で退出
        let departures = self.membership.leave_all(&connection_id).await;

        // 3. メンバーが残っているルームにだけ通知
        let event = OutboundEvent::Disconnected {
            connection_id: connection_id.clone(),
            display_name: display_name.clone(),
        };
        for departure in departures.iter().filter(|d| !d.remaining.is_empty()) {
            if let Err(e) = self
                .message_pusher
                .broadcast(&departure.remaining, &event)
                .await
            {
                tracing::warn!(
                    "Failed to notify room '{}' of '{}' leaving: {}",
                    departure.room_id,
                    connection_id,
                    e
                );
            }
        }

        // 4. 表示名と送信チャンネルを破棄
        self.identities.remove_identity(&connection_id).await;
        self.message_pusher.unregister_client(&connection_id).await;

        DisconnectOutcome {
            display_name,
            departures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{infrastructure::dto::websocket::ServerEvent, usecase::test_support::*};

    fn create_usecase(fixture: &Fixture) -> DisconnectConnectionUseCase {
        DisconnectConnectionUseCase::new(
            fixture.identities.clone(),
            fixture.membership.clone(),
            fixture.pusher.clone(),
            fixture.gate.clone(),
        )
    }

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_members() {
        // テスト項目: 残ったメンバーに切断した接続の ID と表示名が通知される
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let (alice, _alice_rx) = fixture.connect("alice-conn").await;
        let (bob, mut bob_rx) = fixture.connect("bob-conn").await;
        fixture.seed_member(&alice, "r1", "Alice").await;
        fixture.seed_member(&bob, "r1", "Bob").await;

        // when (操作):
        let outcome = usecase.execute(alice.clone()).await;

        // then (期待する結果):
        assert_eq!(outcome.display_name, Some(display_name("Alice")));
        assert_eq!(
            drain(&mut bob_rx),
            vec![ServerEvent::Disconnected {
                socket_id: "alice-conn".to_string(),
                username: Some("Alice".to_string()),
            }]
        );
        assert_eq!(fixture.membership.members_of(&room("r1")).await, vec![bob]);
        assert_eq!(fixture.identities.get_identity(&alice).await, None);
        assert_eq!(fixture.pusher.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_before_join_is_silent() {
        // テスト項目: JOIN 前の切断では誰にも通知されず、送信チャンネルだけが破棄される
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let (stranger, _rx) = fixture.connect("stranger").await;
        let (bob, mut bob_rx) = fixture.connect("bob-conn").await;
        fixture.seed_member(&bob, "r1", "Bob").await;

        // when (操作):
        let outcome = usecase.execute(stranger).await;

        // then (期待する結果):
        assert_eq!(
            outcome,
            DisconnectOutcome {
                display_name: None,
                departures: vec![],
            }
        );
        assert!(drain(&mut bob_rx).is_empty());
        assert_eq!(fixture.pusher.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_from_multiple_rooms() {
        // テスト項目: 複数ルームに所属していた場合、それぞれのルームに通知される
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let (alice, _alice_rx) = fixture.connect("alice-conn").await;
        let (bob, mut bob_rx) = fixture.connect("bob-conn").await;
        let (carol, mut carol_rx) = fixture.connect("carol-conn").await;
        fixture.seed_member(&alice, "r1", "Alice").await;
        fixture.seed_member(&alice, "r2", "Alice").await;
        fixture.seed_member(&bob, "r1", "Bob").await;
        fixture.seed_member(&carol, "r2", "Carol").await;

        // when (操作):
        let outcome = usecase.execute(alice.clone()).await;

        // then (期待する結果):
        assert_eq!(outcome.departures.len(), 2);
        assert_eq!(drain(&mut bob_rx).len(), 1);
        assert_eq!(drain(&mut carol_rx).len(), 1);
        assert!(fixture.membership.rooms_of(&alice).await.is_empty());
    }

    #[tokio::test]
    async fn test_last_member_leaving_reaps_room() {
        // テスト項目: 最後のメンバーが切断するとルームが破棄される
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = create_usecase(&fixture);
        let (alice, _alice_rx) = fixture.connect("alice-conn").await;
        fixture.seed_member(&alice, "r1", "Alice").await;

        // when (操作):
        let outcome = usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(outcome.departures.len(), 1);
        assert!(outcome.departures[0].remaining.is_empty());
        assert_eq!(fixture.membership.room_count().await, 0);
        assert!(fixture.identities.is_empty().await);
    }
}
