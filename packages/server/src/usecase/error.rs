//! UseCase 層のエラー型
//!
//! いずれもハンドラ境界（UI 層）でログに記録されるだけで、クライアントには返されない。

use thiserror::Error;

/// JOIN のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("failed to broadcast joined: {0}")]
    BroadcastFailed(String),
}

/// チャット送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// JOIN していない接続からの送信
    #[error("connection '{0}' has not joined any room yet")]
    SenderNotIdentified(String),

    #[error("failed to broadcast message: {0}")]
    BroadcastFailed(String),
}

/// ルーム内への中継（CODE_CHANGE / TOGGLE_EDITOR_LOCK / UPLOAD_FILE）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("failed to relay event: {0}")]
    BroadcastFailed(String),
}

/// SYNC_CODE のエラー
///
/// 宛先が存在しない場合はエラーではなく `SyncOutcome::Dropped`。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncCodeError {
    #[error("failed to encode sync reply: {0}")]
    Encode(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
