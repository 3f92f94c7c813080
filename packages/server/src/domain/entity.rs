//! エンティティとビューモデル

use serde::Serialize;

use super::value_object::{ChatText, ConnectionId, DisplayName, RoomId, Timestamp};

/// ブロードキャスト用のクライアント記述子 `{connectionId, displayName}`
///
/// 保存はされず、必要なときに IdentityRepository から組み立てられる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDescriptor {
    pub connection_id: ConnectionId,
    /// JOIN 前の接続では `None`
    pub display_name: Option<DisplayName>,
}

impl ClientDescriptor {
    pub fn new(connection_id: ConnectionId, display_name: Option<DisplayName>) -> Self {
        Self {
            connection_id,
            display_name,
        }
    }
}

/// チャットメッセージ
///
/// 送信者の表示名はクライアントの自己申告ではなく、IdentityRepository から付与される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub room_id: RoomId,
    pub display_name: DisplayName,
    pub text: ChatText,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    pub fn new(
        room_id: RoomId,
        display_name: DisplayName,
        text: ChatText,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            room_id,
            display_name,
            text,
            sent_at,
        }
    }
}

/// ルームの読み取りモデル（HTTP API 用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub id: RoomId,
    /// JOIN 順
    pub members: Vec<ClientDescriptor>,
    pub created_at: Timestamp,
}

/// 接続のライフサイクル
///
/// `Connected → Identified → Disconnecting` の一方向にのみ遷移する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionPhase {
    #[default]
    Connected,
    Identified,
    Disconnecting,
}

impl ConnectionPhase {
    /// JOIN 完了後の状態
    ///
    /// `Identified` で再度 JOIN しても `Identified` のまま。`Disconnecting` からは戻らない。
    pub fn identify(self) -> Self {
        match self {
            Self::Connected | Self::Identified => Self::Identified,
            Self::Disconnecting => Self::Disconnecting,
        }
    }

    /// 切断処理開始後の状態
    pub fn begin_disconnect(self) -> Self {
        Self::Disconnecting
    }

    /// イベントを受け付けるかどうか
    pub fn accepts_events(self) -> bool {
        !matches!(self, Self::Disconnecting)
    }
}
