//! ChatMessageStore trait 定義
//!
//! チャット履歴の永続化はこのクレートの外部の責務です。
//! ここではストレージ連携先に渡すためのインターフェースだけを定義します。

use async_trait::async_trait;

use super::{ChatMessage, StorageError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatMessageStore: Send + Sync {
    /// チャットメッセージを保存
    async fn persist(&self, message: ChatMessage) -> Result<(), StorageError>;
}
