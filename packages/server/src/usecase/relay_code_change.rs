//! UseCase: コード変更の中継（CODE_CHANGE）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayCodeChangeUseCase::execute() メソッド
//! - 送信者以外のルームメンバーへの `code-change` の中継
//!
//! ### なぜこのテストが必要か
//! - 送信者に自分の編集がエコーされると、エディタのカーソルや入力が巻き戻る
//! - サーバーはコードを保持しないため、中継の宛先だけが正しさを決める
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人のルームでの中継
//! - エッジケース：1 人だけのルーム、空文字列のコード、別ルームへの漏れ

use std::sync::Arc;

use crate::domain::{
    CodeSnapshot, ConnectionId, MessagePusher, OutboundEvent, RoomId, RoomMembershipRepository,
};

use super::{audience::Audience, error::RelayError};

/// コード変更中継のユースケース
pub struct RelayCodeChangeUseCase {
    membership: Arc<dyn RoomMembershipRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayCodeChangeUseCase {
    pub fn new(
        membership: Arc<dyn RoomMembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            membership,
            message_pusher,
        }
    }

    /// 送信者以外のルームメンバーにコードを中継
    ///
    /// コードの内容は検証も保持もしない。
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        code: CodeSnapshot,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let targets = Audience::RoomExcept(room_id, sender)
            .resolve(self.membership.as_ref())
            .await;
        self.message_pusher
            .broadcast(&targets, &OutboundEvent::CodeChanged { code })
            .await
            .map_err(|e| RelayError::BroadcastFailed(e.to_string()))?;
        Ok(targets)
    }
}
