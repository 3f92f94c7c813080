//! 上限付きの非同期チャット永続化キュー
//!
//! ## 概要
//!
//! `PersistQueue` 自身も `ChatMessageStore` を実装しており、`persist` はキューへの投入だけを行って
//! 即座に戻ります。実際の書き込みはワーカータスクが 1 件ずつ順に行います。
//!
//! - キューが満杯・停止済みの場合は、待たずに dead letter として記録する
//! - 書き込みに失敗したメッセージも dead letter として記録し、再試行はしない
//!
//! dead letter は `irori::dead_letter` ターゲットに `error` レベルで記録されます。

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{ChatMessage, ChatMessageStore, StorageError};

/// dead letter ログのターゲット
pub const DEAD_LETTER_TARGET: &str = "irori::dead_letter";

/// 上限付き永続化キュー
pub struct PersistQueue {
    sender: mpsc::Sender<ChatMessage>,
    dead_letters: Arc<AtomicU64>,
}

impl PersistQueue {
    /// キューとワーカータスクを起動
    ///
    /// Tokio ランタイム上で呼び出す必要がある。`capacity` が 0 の場合は 1 として扱う。
    pub fn spawn(store: Arc<dyn ChatMessageStore>, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let dead_letters = Arc::new(AtomicU64::new(0));
        // キューが破棄されると、ワーカーは残りを書き込んでから終了する
        tokio::spawn(run_worker(store, receiver, dead_letters.clone()));
        Self {
            sender,
            dead_letters,
        }
    }

    /// これまでに dead letter になったメッセージ数
    pub fn dead_letter_count(&self) -> u64 {
        self.dead_letters.load(Ordering::Relaxed)
    }
}

async fn run_worker(
    store: Arc<dyn ChatMessageStore>,
    mut receiver: mpsc::Receiver<ChatMessage>,
    dead_letters: Arc<AtomicU64>,
) {
    while let Some(message) = receiver.recv().await {
        if let Err(e) = store.persist(message.clone()).await {
            dead_letter(&dead_letters, &message, &e.to_string());
        }
    }
    tracing::debug!("Persist queue worker stopped");
}

fn dead_letter(counter: &AtomicU64, message: &ChatMessage, reason: &str) {
    counter.fetch_add(1, Ordering::Relaxed);
    tracing::error!(
        target: DEAD_LETTER_TARGET,
        room_id = %message.room_id,
        username = message.display_name.as_str(),
        sent_at = message.sent_at.value(),
        text = message.text.as_str(),
        "Chat message dropped: {}",
        reason
    );
}

#[async_trait]
impl ChatMessageStore for PersistQueue {
    async fn persist(&self, message: ChatMessage) -> Result<(), StorageError> {
        match self.sender.try_send(message) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(message)) => {
                dead_letter(&self.dead_letters, &message, "persist queue is full");
                Err(StorageError::Unavailable("persist queue is full".to_string()))
            }
            Err(mpsc::error::TrySendError::Closed(message)) => {
                dead_letter(&self.dead_letters, &message, "persist queue is closed");
                Err(StorageError::Unavailable(
                    "persist queue is closed".to_string(),
                ))
            }
        }
    }
}
