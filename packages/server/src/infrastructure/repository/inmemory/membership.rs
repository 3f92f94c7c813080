//! InMemory Room Membership Repository 実装
//!
//! ルームはメンバー数で参照カウントされます。
//! 最初の JOIN でレコードを生成し、最後のメンバーが抜けた時点で破棄します。
//! ルームの生成・破棄はクライアントには通知しない内部の事情です。

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use irori_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomDeparture, RoomId, RoomMembershipRepository, Timestamp};

/// ルームのレコード
#[derive(Debug, Clone)]
struct RoomRecord {
    /// JOIN 順のメンバー（重複なし）
    members: Vec<ConnectionId>,
    created_at: Timestamp,
}

/// ルーム側と接続側の両方向のインデックス
///
/// 両方を 1 つのロックで守り、常に互いに整合した状態を保つ。
#[derive(Debug, Default)]
struct MembershipIndex {
    rooms: BTreeMap<RoomId, RoomRecord>,
    connections: HashMap<ConnectionId, Vec<RoomId>>,
}

impl MembershipIndex {
    fn join(&mut self, connection_id: ConnectionId, room_id: RoomId, now: Timestamp) -> bool {
        let record = self
            .rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::debug!("Room '{}' created", room_id);
                RoomRecord {
                    members: Vec::new(),
                    created_at: now,
                }
            });
        if record.members.contains(&connection_id) {
            return false;
        }
        record.members.push(connection_id.clone());
        self.connections
            .entry(connection_id)
            .or_default()
            .push(room_id);
        true
    }

    /// ルームからメンバーを外し、空になったルームを破棄する
    fn remove_member(
        &mut self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Option<Vec<ConnectionId>> {
        let record = self.rooms.get_mut(room_id)?;
        let position = record.members.iter().position(|id| id == connection_id)?;
        record.members.remove(position);
        let remaining = record.members.clone();
        if remaining.is_empty() {
            self.rooms.remove(room_id);
            tracing::debug!("Room '{}' reaped (no members left)", room_id);
        }
        Some(remaining)
    }

    fn leave(&mut self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        if self.remove_member(connection_id, room_id).is_none() {
            return false;
        }
        if let Some(rooms) = self.connections.get_mut(connection_id) {
            rooms.retain(|id| id != room_id);
            if rooms.is_empty() {
                self.connections.remove(connection_id);
            }
        }
        true
    }

    fn leave_all(&mut self, connection_id: &ConnectionId) -> Vec<RoomDeparture> {
        let Some(room_ids) = self.connections.remove(connection_id) else {
            return Vec::new();
        };
        room_ids
            .into_iter()
            .filter_map(|room_id| {
                self.remove_member(connection_id, &room_id)
                    .map(|remaining| RoomDeparture { room_id, remaining })
            })
            .collect()
    }
}

/// インメモリ Room Membership Repository 実装
pub struct InMemoryRoomMembershipRepository {
    index: Arc<Mutex<MembershipIndex>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomMembershipRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// ルーム生成時刻に使う時計を指定して作成
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            index: Arc::new(Mutex::new(MembershipIndex::default())),
            clock,
        }
    }

    /// 存在するルーム数
    pub async fn room_count(&self) -> usize {
        self.index.lock().await.rooms.len()
    }
}

impl Default for InMemoryRoomMembershipRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomMembershipRepository for InMemoryRoomMembershipRepository {
    async fn join(&self, connection_id: ConnectionId, room_id: RoomId) -> bool {
        let now = Timestamp::new(self.clock.now_millis());
        self.index.lock().await.join(connection_id, room_id, now)
    }

    async fn leave(&self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        self.index.lock().await.leave(connection_id, room_id)
    }

    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<RoomDeparture> {
        self.index.lock().await.leave_all(connection_id)
    }

    async fn members_of(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.index
            .lock()
            .await
            .rooms
            .get(room_id)
            .map(|record| record.members.clone())
            .unwrap_or_default()
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        self.index
            .lock()
            .await
            .connections
            .get(connection_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn list_rooms(&self) -> Vec<RoomId> {
        self.index.lock().await.rooms.keys().cloned().collect()
    }

    async fn room_created_at(&self, room_id: &RoomId) -> Option<Timestamp> {
        self.index
            .lock()
            .await
            .rooms
            .get(room_id)
            .map(|record| record.created_at)
    }
}
