//! Conversion logic between DTOs and domain models.

use irori_shared::time::millis_to_rfc3339;

use crate::domain::{ClientDescriptor, OutboundEvent, RoomSnapshot};
use crate::infrastructure::dto::{http, websocket as ws};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<&ClientDescriptor> for ws::ClientInfo {
    fn from(descriptor: &ClientDescriptor) -> Self {
        Self {
            socket_id: descriptor.connection_id.to_string(),
            username: descriptor
                .display_name
                .as_ref()
                .map(|name| name.as_str().to_string()),
        }
    }
}

impl From<&OutboundEvent> for ws::ServerEvent {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::Connected { connection_id } => Self::Connected {
                socket_id: connection_id.to_string(),
            },
            OutboundEvent::Joined {
                clients,
                display_name,
                connection_id,
            } => Self::Joined {
                clients: clients.iter().map(ws::ClientInfo::from).collect(),
                username: display_name.as_str().to_string(),
                socket_id: connection_id.to_string(),
            },
            OutboundEvent::ChatReceived { display_name, text } => Self::ReceiveMessage {
                username: display_name.as_str().to_string(),
                message: text.as_str().to_string(),
            },
            OutboundEvent::CodeChanged { code } => Self::CodeChange {
                code: code.as_str().to_string(),
            },
            OutboundEvent::EditorLockToggled { locked } => Self::ToggleEditorLock {
                editor_locked: *locked,
            },
            OutboundEvent::Disconnected {
                connection_id,
                display_name,
            } => Self::Disconnected {
                socket_id: connection_id.to_string(),
                username: display_name.as_ref().map(|name| name.as_str().to_string()),
            },
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<RoomSnapshot> for http::RoomSummaryDto {
    fn from(room: RoomSnapshot) -> Self {
        Self {
            id: room.id.into_string(),
            members: room
                .members
                .into_iter()
                .map(|member| member.connection_id.into_string())
                .collect(),
            created_at: millis_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<RoomSnapshot> for http::RoomDetailDto {
    fn from(room: RoomSnapshot) -> Self {
        Self {
            id: room.id.into_string(),
            members: room
                .members
                .into_iter()
                .map(|member| http::MemberDetailDto {
                    connection_id: member.connection_id.into_string(),
                    display_name: member.display_name.map(|name| name.into_string()),
                })
                .collect(),
            created_at: millis_to_rfc3339(room.created_at.value()),
        }
    }
}
