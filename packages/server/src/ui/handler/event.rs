//! Client event dispatch.
//!
//! Decodes one text frame into a `ClientEvent`, validates its fields into
//! domain values and hands it to the matching use case. Nothing here ever
//! answers the sender with an error: bad input is logged and dropped.

use std::fmt::Display;

use crate::{
    domain::{ChatText, CodeSnapshot, ConnectionId, ConnectionPhase, DisplayName, RoomId},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::SyncOutcome,
};

/// Unwrap a validated field, logging and dropping the event when invalid
fn validated<T, E: Display>(sender: &ConnectionId, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Dropping event from '{}': {}", sender, e);
            None
        }
    }
}

/// Handle one text frame and return the connection's next phase
pub(super) async fn dispatch(
    state: &AppState,
    sender: &ConnectionId,
    phase: ConnectionPhase,
    text: &str,
) -> ConnectionPhase {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping malformed frame from '{}': {}", sender, e);
            return phase;
        }
    };

    match event {
        ClientEvent::Join { room_id, username } => {
            let (Some(room_id), Some(display_name)) = (
                validated(sender, RoomId::new(room_id)),
                validated(sender, DisplayName::new(username)),
            ) else {
                return phase;
            };
            match state
                .join_room_usecase
                .execute(sender.clone(), room_id.clone(), display_name)
                .await
            {
                Ok(members) => tracing::info!(
                    "'{}' joined room '{}' ({} member(s))",
                    sender,
                    room_id,
                    members.len()
                ),
                Err(e) => tracing::warn!("Join of '{}' to '{}': {}", sender, room_id, e),
            }
            // 通知に失敗しても状態の更新は完了している
            return phase.identify();
        }
        ClientEvent::SendMessage { room_id, message } => {
            let (Some(room_id), Some(text)) = (
                validated(sender, RoomId::new(room_id)),
                validated(sender, ChatText::new(message)),
            ) else {
                return phase;
            };
            if let Err(e) = state
                .send_message_usecase
                .execute(sender.clone(), room_id, text)
                .await
            {
                tracing::warn!("Failed to send message from '{}': {}", sender, e);
            }
        }
        ClientEvent::CodeChange { room_id, code } => {
            let Some(room_id) = validated(sender, RoomId::new(room_id)) else {
                return phase;
            };
            if let Err(e) = state
                .relay_code_change_usecase
                .execute(sender.clone(), room_id, CodeSnapshot::new(code))
                .await
            {
                tracing::warn!("Failed to relay code change from '{}': {}", sender, e);
            }
        }
        ClientEvent::SyncCode { socket_id, code } => {
            let Some(target) = validated(sender, ConnectionId::new(socket_id)) else {
                return phase;
            };
            match state
                .sync_code_usecase
                .execute(target.clone(), CodeSnapshot::new(code))
                .await
            {
                Ok(SyncOutcome::Delivered) => {
                    tracing::debug!("Synced code from '{}' to '{}'", sender, target)
                }
                Ok(SyncOutcome::Dropped) => {}
                Err(e) => tracing::warn!("Failed to sync code to '{}': {}", target, e),
            }
        }
        ClientEvent::ToggleEditorLock {
            room_id,
            editor_locked,
        } => {
            let Some(room_id) = validated(sender, RoomId::new(room_id)) else {
                return phase;
            };
            if let Err(e) = state
                .toggle_editor_lock_usecase
                .execute(sender.clone(), room_id, editor_locked)
                .await
            {
                tracing::warn!("Failed to relay editor lock from '{}': {}", sender, e);
            }
        }
        ClientEvent::UploadFile {
            room_id,
            file_content,
        } => {
            let Some(room_id) = validated(sender, RoomId::new(room_id)) else {
                return phase;
            };
            if let Err(e) = state
                .upload_file_usecase
                .execute(room_id, CodeSnapshot::new(file_content))
                .await
            {
                tracing::warn!("Failed to relay upload from '{}': {}", sender, e);
            }
        }
    }

    phase
}
