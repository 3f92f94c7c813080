//! ドメイン層
//!
//! 接続・ルーム・表示名といった概念をドメインモデルとして表現し、
//! UseCase 層が依存するインターフェース（Repository, MessagePusher, ChatMessageStore）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod storage;
pub mod value_object;

pub use entity::{ChatMessage, ClientDescriptor, ConnectionPhase, RoomSnapshot};
pub use event::OutboundEvent;
pub use error::{MessagePushError, StorageError, ValueObjectError};
pub use message_pusher::{MessagePusher, PUSHER_CHANNEL_CAPACITY, PusherChannel};
pub use repository::{IdentityRepository, RoomDeparture, RoomMembershipRepository};
pub use storage::ChatMessageStore;
#[cfg(test)]
pub use storage::MockChatMessageStore;
pub use value_object::{
    ChatText, CodeSnapshot, ConnectionId, ConnectionIdFactory, DisplayName, RoomId, Timestamp,
};
