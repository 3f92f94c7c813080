//! UseCase: 途中参加者へのコード同期（SYNC_CODE）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SyncCodeUseCase::execute() メソッド
//! - 指定された接続 1 つだけへの `code-change` の送信
//!
//! ### なぜこのテストが必要か
//! - サーバーはコードを保持しないため、途中参加者は既存メンバーからの返信でしか
//!   現在のコードを受け取れない
//! - 宛先が既に切断されていてもエラーにせず、黙って捨てる必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存メンバーから新規参加者への返信
//! - エッジケース：宛先が切断済み、同じ宛先への複数の返信

use std::sync::Arc;

use crate::domain::{CodeSnapshot, ConnectionId, MessagePushError, MessagePusher, OutboundEvent};

use super::error::SyncCodeError;

/// SYNC_CODE の処理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// 宛先に送信した
    Delivered,
    /// 宛先が存在しないため捨てた
    Dropped,
}

/// コード同期のユースケース
///
/// 送信者と宛先が同じルームにいるかは確認しない。宛先の接続 ID は `joined` で
/// ルームメンバーにしか公開されないため、それを知っていることを資格とみなす。
pub struct SyncCodeUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl SyncCodeUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn execute(
        &self,
        target: ConnectionId,
        code: CodeSnapshot,
    ) -> Result<SyncOutcome, SyncCodeError> {
        match self
            .message_pusher
            .push_to(&target, &OutboundEvent::CodeChanged { code })
            .await
        {
            Ok(()) => Ok(SyncOutcome::Delivered),
            Err(MessagePushError::ClientNotFound(_)) | Err(MessagePushError::PushFailed(_)) => {
                tracing::debug!("Sync target '{}' is gone, dropping reply", target);
                Ok(SyncOutcome::Dropped)
            }
            Err(MessagePushError::Encode(e)) => Err(SyncCodeError::Encode(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{infrastructure::dto::websocket::ServerEvent, usecase::test_support::*};

    #[tokio::test]
    async fn test_sync_is_unicast() {
        // テスト項目: 同期は指定された接続だけに届き、ルームの他のメンバーには届かない
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = SyncCodeUseCase::new(fixture.pusher.clone());
        let (alice, mut alice_rx) = fixture.connect("alice-conn").await;
        let (bob, mut bob_rx) = fixture.connect("bob-conn").await;
        let (carol, mut carol_rx) = fixture.connect("carol-conn").await;
        fixture.seed_member(&alice, "r1", "Alice").await;
        fixture.seed_member(&bob, "r1", "Bob").await;
        fixture.seed_member(&carol, "r1", "Carol").await;

        // when (操作):
        let outcome = usecase
            .execute(carol, CodeSnapshot::new("x = 42".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome, SyncOutcome::Delivered);
        assert_eq!(
            drain(&mut carol_rx),
            vec![ServerEvent::CodeChange {
                code: "x = 42".to_string()
            }]
        );
        assert!(drain(&mut alice_rx).is_empty());
        assert!(drain(&mut bob_rx).is_empty());
    }

    #[tokio::test]
    async fn test_sync_to_departed_connection_is_dropped() {
        // テスト項目: 宛先が既に切断されている場合は捨てられ、エラーにならない
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = SyncCodeUseCase::new(fixture.pusher.clone());

        // when (操作):
        let outcome = usecase
            .execute(connection("gone"), CodeSnapshot::new("x".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(outcome, Ok(SyncOutcome::Dropped));
    }

    #[tokio::test]
    async fn test_sync_to_closed_channel_is_dropped() {
        // テスト項目: 宛先の送信チャンネルが閉じている場合も捨てられる
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = SyncCodeUseCase::new(fixture.pusher.clone());
        let (carol, carol_rx) = fixture.connect("carol-conn").await;
        drop(carol_rx);

        // when (操作):
        let outcome = usecase
            .execute(carol, CodeSnapshot::new("x".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(outcome, Ok(SyncOutcome::Dropped));
    }

    #[tokio::test]
    async fn test_multiple_replies_are_all_delivered_in_order() {
        // テスト項目: 複数の既存メンバーからの返信はすべて届き、最後のものが最終状態になる
        // given (前提条件):
        let fixture = Fixture::new();
        let usecase = SyncCodeUseCase::new(fixture.pusher.clone());
        let (carol, mut carol_rx) = fixture.connect("carol-conn").await;

        // when (操作):
        usecase
            .execute(carol.clone(), CodeSnapshot::new("from alice".to_string()))
            .await
            .unwrap();
        usecase
            .execute(carol, CodeSnapshot::new("from bob".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        let received = drain(&mut carol_rx);
        assert_eq!(received.len(), 2);
        assert_eq!(
            received.last(),
            Some(&ServerEvent::CodeChange {
                code: "from bob".to_string()
            })
        );
    }
}
