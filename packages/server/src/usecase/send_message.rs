//! UseCase: チャット送信（SEND_MESSAGE）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者の表示名の付与、ルーム全員（送信者を含む）へのブロードキャスト、永続化の依頼
//!
//! ### なぜこのテストが必要か
//! - 表示名はクライアントの自己申告ではなく、JOIN 時に登録された値を使う必要がある
//! - 永続化の失敗が配信を妨げないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：JOIN 前の送信、ストレージの失敗

use std::sync::Arc;

use crate::domain::{
    ChatMessage, ChatMessageStore, ChatText, ConnectionId, IdentityRepository, MessagePusher,
    OutboundEvent, RoomId, RoomMembershipRepository, Timestamp,
};

use super::{audience::Audience, error::SendMessageError};

/// チャット送信のユースケース
pub struct SendMessageUseCase {
    identities: Arc<dyn IdentityRepository>,
    membership: Arc<dyn RoomMembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    /// ストレージ連携先（通常は `PersistQueue`）
    store: Arc<dyn ChatMessageStore>,
}

impl SendMessageUseCase {
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        membership: Arc<dyn RoomMembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        store: Arc<dyn ChatMessageStore>,
    ) -> Self {
        Self {
            identities,
            membership,
            message_pusher,
            store,
        }
    }

    /// チャット送信を実行
    ///
    /// 配信を先に行い、その後で永続化を依頼する。永続化の失敗はログに残すだけで、
    /// 呼び出し元には返さない。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 配信先（送信者を含むルーム全員）
    /// * `Err(SendMessageError)` - JOIN 前の送信、または配信失敗
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        text: ChatText,
    ) -> Result<Vec<ConnectionId>, SendMessageError> {
        // 1. 送信者の表示名を解決
        let display_name = self
            .identities
            .get_identity(&sender)
            .await
            .ok_or_else(|| SendMessageError::SenderNotIdentified(sender.to_string()))?;

        // 2. ルーム全員に配信
        let targets = Audience::Room(room_id.clone())
            .resolve(self.membership.as_ref())
            .await;
        let event = OutboundEvent::ChatReceived {
            display_name: display_name.clone(),
            text: text.clone(),
        };
        let delivered = self.message_pusher.broadcast(&targets, &event).await;

        // 3. 永続化を依頼（配信の成否に関係なく）
        let message = ChatMessage::new(room_id, display_name, text, Timestamp::now());
        if let Err(e) = self.store.persist(message).await {
            tracing::warn!("Chat message from '{}' was not persisted: {}", sender, e);
        }

        delivered.map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))?;
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockChatMessageStore, StorageError},
        infrastructure::{dto::websocket::ServerEvent, storage::InMemoryChatMessageStore},
        usecase::test_support::*,
    };

    fn text(value: &str) -> ChatText {
        ChatText::new(value.to_string()).unwrap()
    }

    fn create_usecase(fixture: &Fixture, store: Arc<dyn ChatMessageStore>) -> SendMessageUseCase {
        SendMessageUseCase::new(
            fixture.identities.clone(),
            fixture.membership.clone(),
            fixture.pusher.clone(),
            store,
        )
    }

    #[tokio::test]
    async fn test_send_message_reaches_whole_room() {
        // テスト項目: 送信者を含むルーム全員に登録済みの表示名でメッセージが届く
        // given (前提条件):
        let fixture = Fixture::new();
        let store = Arc::new(InMemoryChatMessageStore::new(10));
        let usecase = create_usecase(&fixture, store.clone());
        let (alice, mut alice_rx) = fixture.connect("alice-conn").await;
        let (bob, mut bob_rx) = fixture.connect("bob-conn").await;
        fixture.seed_member(&alice, "r1", "Alice").await;
        fixture.seed_member(&bob, "r1", "Bob").await;

        // when (操作):
        let targets = usecase
            .execute(alice.clone(), room("r1"), text("hello"))
            .await
            .unwrap();

        // then (期待する結果):
        let expected = ServerEvent::ReceiveMessage {
            username: "Alice".to_string(),
            message: "hello".to_string(),
        };
        assert_eq!(targets, vec![alice, bob]);
        assert_eq!(drain(&mut alice_rx), vec![expected.clone()]);
        assert_eq!(drain(&mut bob_rx), vec![expected]);

        let saved = store.messages().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].display_name, display_name("Alice"));
        assert_eq!(saved[0].room_id, room("r1"));
    }

    #[tokio::test]
    async fn test_send_message_before_join_is_rejected() {
        // テスト項目: JOIN 前の接続からの送信は配信も永続化もされない
        // given (前提条件):
        let fixture = Fixture::new();
        let store = Arc::new(InMemoryChatMessageStore::new(10));
        let usecase = create_usecase(&fixture, store.clone());
        let (stranger, _rx) = fixture.connect("stranger").await;
        let (bob, mut bob_rx) = fixture.connect("bob-conn").await;
        fixture.seed_member(&bob, "r1", "Bob").await;

        // when (操作):
        let result = usecase
            .execute(stranger, room("r1"), text("hi"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::SenderNotIdentified("stranger".to_string()))
        );
        assert!(drain(&mut bob_rx).is_empty());
        assert!(store.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_block_delivery() {
        // テスト項目: ストレージが失敗してもメッセージは配信され、成功として扱われる
        // given (前提条件):
        let fixture = Fixture::new();
        let mut store = MockChatMessageStore::new();
        store
            .expect_persist()
            .times(1)
            .returning(|_| Err(StorageError::Unavailable("db down".to_string())));
        let usecase = create_usecase(&fixture, Arc::new(store));
        let (alice, mut alice_rx) = fixture.connect("alice-conn").await;
        fixture.seed_member(&alice, "r1", "Alice").await;

        // when (操作):
        let result = usecase
            .execute(alice.clone(), room("r1"), text("still here"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![alice]));
        assert_eq!(
            drain(&mut alice_rx),
            vec![ServerEvent::ReceiveMessage {
                username: "Alice".to_string(),
                message: "still here".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_duplicate_display_names_are_not_merged() {
        // テスト項目: 同じ表示名の 2 つの接続は、それぞれの接続として扱われる
        // given (前提条件):
        let fixture = Fixture::new();
        let store = Arc::new(InMemoryChatMessageStore::new(10));
        let usecase = create_usecase(&fixture, store.clone());
        let (first, _first_rx) = fixture.connect("first").await;
        let (second, mut second_rx) = fixture.connect("second").await;
        fixture.seed_member(&first, "r1", "Alice").await;
        fixture.seed_member(&second, "r1", "Alice").await;

        // when (操作):
        let targets = usecase
            .execute(first.clone(), room("r1"), text("which one?"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(targets, vec![first, second]);
        assert_eq!(drain(&mut second_rx).len(), 1);
    }
}
