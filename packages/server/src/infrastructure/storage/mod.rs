//! チャット永続化（ストレージ連携先）の実装
//!
//! - `inmemory`: プロセス内に上限付きで履歴を保持する ChatMessageStore
//! - `queue`: 任意の ChatMessageStore の前段に置く、上限付きの非同期書き込みキュー

pub mod inmemory;
pub mod queue;

pub use inmemory::InMemoryChatMessageStore;
pub use queue::{DEAD_LETTER_TARGET, PersistQueue};
