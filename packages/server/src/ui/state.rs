//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{ChatMessageStore, IdentityRepository, MessagePusher, RoomMembershipRepository},
    usecase::{
        DisconnectConnectionUseCase, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase,
        OpenConnectionUseCase, RelayCodeChangeUseCase, RoomStateGate, SendMessageUseCase,
        SyncCodeUseCase, ToggleEditorLockUseCase, UploadFileUseCase,
    },
};

/// Use cases shared by every handler
///
/// All state lives behind the injected repositories, so two `AppState`s built
/// from different repositories never see each other's rooms.
pub struct AppState {
    pub open_connection_usecase: OpenConnectionUseCase,
    pub join_room_usecase: JoinRoomUseCase,
    pub send_message_usecase: SendMessageUseCase,
    pub relay_code_change_usecase: RelayCodeChangeUseCase,
    pub sync_code_usecase: SyncCodeUseCase,
    pub toggle_editor_lock_usecase: ToggleEditorLockUseCase,
    pub upload_file_usecase: UploadFileUseCase,
    pub disconnect_connection_usecase: DisconnectConnectionUseCase,
    pub get_rooms_usecase: GetRoomsUseCase,
    pub get_room_detail_usecase: GetRoomDetailUseCase,
}

impl AppState {
    /// Wire every use case to the given collaborators
    ///
    /// * `identities` - Identity Registry
    /// * `membership` - Room Membership Index
    /// * `message_pusher` - Per-connection outbound channels
    /// * `store` - Where chat messages are handed off for persistence
    ///
    /// Join and disconnect share one [`RoomStateGate`], so a disconnect never
    /// interleaves with an in-flight join.
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        membership: Arc<dyn RoomMembershipRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        store: Arc<dyn ChatMessageStore>,
    ) -> Self {
        let gate = RoomStateGate::new();
        Self {
            open_connection_usecase: OpenConnectionUseCase::new(message_pusher.clone()),
            join_room_usecase: JoinRoomUseCase::new(
                identities.clone(),
                membership.clone(),
                message_pusher.clone(),
                gate.clone(),
            ),
            send_message_usecase: SendMessageUseCase::new(
                identities.clone(),
                membership.clone(),
                message_pusher.clone(),
                store,
            ),
            relay_code_change_usecase: RelayCodeChangeUseCase::new(
                membership.clone(),
                message_pusher.clone(),
            ),
            sync_code_usecase: SyncCodeUseCase::new(message_pusher.clone()),
            toggle_editor_lock_usecase: ToggleEditorLockUseCase::new(
                membership.clone(),
                message_pusher.clone(),
            ),
            upload_file_usecase: UploadFileUseCase::new(membership.clone(), message_pusher.clone()),
            disconnect_connection_usecase: DisconnectConnectionUseCase::new(
                identities.clone(),
                membership.clone(),
                message_pusher,
                gate,
            ),
            get_rooms_usecase: GetRoomsUseCase::new(identities.clone(), membership.clone()),
            get_room_detail_usecase: GetRoomDetailUseCase::new(identities, membership),
        }
    }
}
