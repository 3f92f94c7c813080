//! InMemory ChatMessageStore 実装

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, ChatMessageStore, StorageError};

/// 上限付きのインメモリチャット履歴
///
/// 上限に達した後の書き込みは `StorageError::CapacityExceeded` になる。
pub struct InMemoryChatMessageStore {
    messages: Arc<Mutex<Vec<ChatMessage>>>,
    capacity: usize,
}

impl InMemoryChatMessageStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            capacity,
        }
    }

    /// 保存済みのメッセージ（保存順）
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl ChatMessageStore for InMemoryChatMessageStore {
    async fn persist(&self, message: ChatMessage) -> Result<(), StorageError> {
        let mut messages = self.messages.lock().await;
        if messages.len() >= self.capacity {
            return Err(StorageError::CapacityExceeded(self.capacity));
        }
        messages.push(message);
        Ok(())
    }
}
