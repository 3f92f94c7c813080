//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）を抽象化します。
//! 送信対象（単一接続・ルーム全員・送信者以外）の計算は UseCase 層が行い、
//! この trait は計算済みの宛先に送るだけです。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, OutboundEvent};

/// クライアントへの送信チャンネル
///
/// 上限付き。読み出しの遅い接続のキューが満杯になった場合、そのメッセージは捨てられる。
pub type PusherChannel = mpsc::Sender<String>;

/// 接続ごとの送信キューの上限
pub const PUSHER_CHANNEL_CAPACITY: usize = 256;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の登録を解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 単一の接続に送信
    ///
    /// 接続が存在しない場合は `MessagePushError::ClientNotFound`。
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に送信
    ///
    /// 一部の宛先への送信失敗は許容され、ログに記録される。
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;
}
