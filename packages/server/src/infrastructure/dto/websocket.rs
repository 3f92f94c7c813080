//! WebSocket event DTOs.
//!
//! Every frame is a JSON text message tagged by `"type"`. The event names are
//! the literal contract between clients and the server; renaming one is a
//! breaking protocol change.

use serde::{Deserialize, Serialize};

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Join a room under a display name
    #[serde(rename = "join", rename_all = "camelCase")]
    Join { room_id: String, username: String },

    /// Chat message to the whole room
    #[serde(rename = "send-message", rename_all = "camelCase")]
    SendMessage { room_id: String, message: String },

    /// Local edit, relayed to every other member of the room
    #[serde(rename = "code-change", rename_all = "camelCase")]
    CodeChange { room_id: String, code: String },

    /// Reply to a newcomer with the sender's current code
    #[serde(rename = "sync-code", rename_all = "camelCase")]
    SyncCode { socket_id: String, code: String },

    /// Lock or unlock the editor for the other members
    #[serde(rename = "toggle-editor-lock", rename_all = "camelCase")]
    ToggleEditorLock { room_id: String, editor_locked: bool },

    /// Replace the room's code with an uploaded file
    #[serde(rename = "UPLOAD_FILE", rename_all = "camelCase")]
    UploadFile { room_id: String, file_content: String },
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Sent once right after the upgrade with the connection's own id
    #[serde(rename = "connected", rename_all = "camelCase")]
    Connected { socket_id: String },

    #[serde(rename = "joined", rename_all = "camelCase")]
    Joined {
        clients: Vec<ClientInfo>,
        username: String,
        socket_id: String,
    },

    #[serde(rename = "receive-message", rename_all = "camelCase")]
    ReceiveMessage { username: String, message: String },

    /// Also used to deliver `sync-code` replies and uploaded files
    #[serde(rename = "code-change", rename_all = "camelCase")]
    CodeChange { code: String },

    #[serde(rename = "toggle-editor-lock", rename_all = "camelCase")]
    ToggleEditorLock { editor_locked: bool },

    #[serde(rename = "disconnected", rename_all = "camelCase")]
    Disconnected {
        socket_id: String,
        username: Option<String>,
    },
}

/// Room member as listed in `joined`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub socket_id: String,
    pub username: Option<String>,
}
