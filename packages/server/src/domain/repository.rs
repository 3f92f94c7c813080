//! Repository trait 定義
//!
//! ドメイン層が必要とする状態ストアへのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 状態はすべてインスタンススコープで保持されます。プロセスグローバルな状態は持たないため、
//! テストや複数ルーターの同居で状態が混ざることはありません。

use async_trait::async_trait;

use super::{ClientDescriptor, ConnectionId, DisplayName, RoomId, Timestamp};

/// 接続 ID → 表示名 の対応表（Identity Registry）
///
/// エントリは「その接続が 1 回以上 JOIN を完了した」ときに限り存在する。
/// 書き込むのは JOIN、削除するのは切断処理のみ。
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// 表示名を登録（再 JOIN 時は上書き）
    async fn set_identity(&self, connection_id: ConnectionId, display_name: DisplayName);

    /// 表示名を取得
    async fn get_identity(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 表示名を削除し、削除前の値を返す
    async fn remove_identity(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 接続 ID 列をクライアント記述子列に変換（順序は入力のまま）
    async fn describe(&self, connection_ids: &[ConnectionId]) -> Vec<ClientDescriptor>;
}

/// 切断によってルームから抜けた結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDeparture {
    pub room_id: RoomId,
    /// 退出後に残っているメンバー（JOIN 順）
    pub remaining: Vec<ConnectionId>,
}

/// ルーム ID → 接続 ID 集合 の対応表（Room Membership Index）
///
/// ルームは最初の JOIN で暗黙に生成され、最後のメンバーが抜けた時点で破棄される。
/// 1 つの接続は複数のルームに同時に所属できる。
#[async_trait]
pub trait RoomMembershipRepository: Send + Sync {
    /// ルームに参加（冪等）。新規に追加された場合は `true`
    async fn join(&self, connection_id: ConnectionId, room_id: RoomId) -> bool;

    /// ルームから退出。所属していた場合は `true`
    async fn leave(&self, connection_id: &ConnectionId, room_id: &RoomId) -> bool;

    /// 接続が所属する全てのルームから一括で退出
    ///
    /// 他のイベントから見て不可分に実行される。
    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<RoomDeparture>;

    /// ルームの現在のメンバー（JOIN 順）。存在しないルームは空
    async fn members_of(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// 接続が所属しているルーム一覧
    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId>;

    /// 存在する全てのルーム ID（ID 順）
    async fn list_rooms(&self) -> Vec<RoomId>;

    /// ルームの生成時刻
    async fn room_created_at(&self, room_id: &RoomId) -> Option<Timestamp>;
}
