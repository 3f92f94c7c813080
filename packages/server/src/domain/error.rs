//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの生成に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("connection id is too long ({0} chars, max {max})", max = super::value_object::ConnectionId::MAX_LEN)]
    ConnectionIdTooLong(usize),

    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("room id is too long ({0} chars, max {max})", max = super::value_object::RoomId::MAX_LEN)]
    RoomIdTooLong(usize),

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("display name is too long ({0} chars, max {max})", max = super::value_object::DisplayName::MAX_LEN)]
    DisplayNameTooLong(usize),

    #[error("chat text is too long ({0} chars, max {max})", max = super::value_object::ChatText::MAX_LEN)]
    ChatTextTooLong(usize),
}

/// MessagePusher 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    Encode(String),
}

/// ChatMessageStore（ストレージ連携先）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("chat history is full (capacity {0})")]
    CapacityExceeded(usize),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}
