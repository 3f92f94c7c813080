//! サーバーからクライアントへ送るイベント（ドメイン表現）
//!
//! ワイヤ上のイベント名や JSON 形式への変換は Infrastructure 層の DTO が担当します。

use super::{ChatText, ClientDescriptor, CodeSnapshot, ConnectionId, DisplayName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// 接続直後に本人へ送る、割り当て済みの接続 ID
    Connected { connection_id: ConnectionId },
    /// ルームへの参加通知（参加者本人を含むルーム全員へ）
    Joined {
        clients: Vec<ClientDescriptor>,
        display_name: DisplayName,
        connection_id: ConnectionId,
    },
    /// チャットメッセージ
    ChatReceived {
        display_name: DisplayName,
        text: ChatText,
    },
    /// コードの更新（CODE_CHANGE / SYNC_CODE / UPLOAD_FILE の配送形）
    CodeChanged { code: CodeSnapshot },
    /// エディタのロック切り替え
    EditorLockToggled { locked: bool },
    /// 切断通知
    Disconnected {
        connection_id: ConnectionId,
        display_name: Option<DisplayName>,
    },
}
