//! UseCase 層
//!
//! クライアントからの各イベントに 1 つのユースケースが対応します。
//! 各ユースケースは Identity / Membership の状態を読み書きし、
//! 計算した宛先（単一接続・ルーム全員・送信者以外）にイベントを送ります。

pub mod audience;
pub mod disconnect_connection;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod open_connection;
pub mod relay_code_change;
pub mod send_message;
pub mod state_gate;
pub mod sync_code;
pub mod toggle_editor_lock;
pub mod upload_file;

#[cfg(test)]
pub(crate) mod test_support;

pub use audience::Audience;
pub use disconnect_connection::{DisconnectConnectionUseCase, DisconnectOutcome};
pub use error::{
    GetRoomDetailError, JoinRoomError, RelayError, SendMessageError, SyncCodeError,
};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use open_connection::OpenConnectionUseCase;
pub use relay_code_change::RelayCodeChangeUseCase;
pub use send_message::SendMessageUseCase;
pub use state_gate::RoomStateGate;
pub use sync_code::{SyncCodeUseCase, SyncOutcome};
pub use toggle_editor_lock::ToggleEditorLockUseCase;
pub use upload_file::UploadFileUseCase;
