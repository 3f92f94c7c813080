//! UseCase: ルームへの参加（JOIN）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 表示名の登録、メンバーシップへの追加、`joined` の送信先と内容
//!
//! ### なぜこのテストが必要か
//! - `joined` は既存メンバーに新規参加者の接続 ID を知らせる唯一の手段で、
//!   途中参加者へのコード同期（SYNC_CODE）の起点になる
//! - 参加者本人も含めたルーム全員が同じメンバー一覧を受け取る必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者、2 人目の参加者
//! - エッジケース：同じ接続からの再 JOIN、複数ルームへの参加

use std::sync::Arc;

use crate::domain::{
    ClientDescriptor, ConnectionId, DisplayName, IdentityRepository, MessagePusher,
    OutboundEvent, RoomId, RoomMembershipRepository,
};

use super::{audience::Audience, error::JoinRoomError, state_gate::RoomStateGate};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    identities: Arc<dyn IdentityRepository>,
    membership: Arc<dyn RoomMembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    gate: RoomStateGate,
}

impl JoinRoomUseCase {
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

    /// ルーム参加を実行
    ///
    /// 再 JOIN は通常の JOIN として扱う（表示名は上書き、メンバーシップは冪等）。
    /// 状態の更新から `joined` の送信までは切断処理と直列に実行される。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ClientDescriptor>)` - 参加後のメンバー一覧（JOIN 順、`joined` の内容と同じ）
    /// * `Err(JoinRoomError)` - `joined` の送信失敗（状態の更新は完了している）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        display_name: DisplayName,
    ) -> Result<Vec<ClientDescriptor>, JoinRoomError> {
        let _guard = self.gate.enter().await;

        // 1. 表示名を登録
        self.identities
            .set_identity(connection_id.clone(), display_name.clone())
            .await;

        // 2. ルームに追加
        if !self
            .membership
            .join(connection_id.clone(), room_id.clone())
            .await
        {
            tracing::debug!("'{}' re-joined room '{}'", connection_id, room_id);
        }

        // 3. 参加者本人を含むルーム全員に joined を送信
        let members = Audience::Room(room_id).resolve(self.membership.as_ref()).await;
        let clients = self.identities.describe(&members).await;
        let event = OutboundEvent::Joined {
            clients: clients.clone(),
            display_name,
            connection_id,
        };
        self.message_pusher
            .broadcast(&members, &event)
            .await
            .map_err(|e| JoinRoomError::BroadcastFailed(e.to_string()))?;

        Ok(clients)
    }
}
