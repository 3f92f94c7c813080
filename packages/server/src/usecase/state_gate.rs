//! JOIN と切断の直列化
//!
//! JOIN と切断はどちらも Identity Registry と Room Membership Index の両方を読み書きし、
//! その結果をルームに通知する。`RoomStateGate` を通過している間は、もう一方の処理は
//! 状態の更新から通知の送信までを終えるまで待たされる。
//! これにより、ルームのメンバーは joined / disconnected を状態の変化と同じ順序で受け取る。

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// ルーム状態を変更する処理の通過口
#[derive(Debug, Clone, Default)]
pub struct RoomStateGate {
    lock: Arc<Mutex<()>>,
}

impl RoomStateGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// ガードを保持している間、他の処理は `enter` で待たされる
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
