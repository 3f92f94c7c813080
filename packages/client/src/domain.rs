//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use std::path::PathBuf;

use irori_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use crate::error::ClientError;

/// A line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, sent as chat
    Chat(String),
    /// `/code <text>`: replace the local code and relay it
    Code(String),
    /// `/lock`
    Lock,
    /// `/unlock`
    Unlock,
    /// `/upload <path>`: replace everyone's code with a file
    Upload(PathBuf),
    /// `/show`: print the local code
    Show,
    /// `/quit`
    Quit,
}

/// Parse one input line into a command
///
/// Lines not starting with `/` are chat messages. `//` escapes a leading slash.
pub fn parse_command(line: &str) -> Result<Command, ClientError> {
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Chat(line.to_string()));
    };
    if rest.starts_with('/') {
        return Ok(Command::Chat(rest.to_string()));
    }

    let (name, argument) = match rest.split_once(' ') {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };
    let require = |argument: &str| {
        if argument.is_empty() {
            Err(ClientError::MissingArgument(format!("/{}", name)))
        } else {
            Ok(argument.to_string())
        }
    };

    match name {
        "code" => Ok(Command::Code(require(argument)?)),
        "lock" => Ok(Command::Lock),
        "unlock" => Ok(Command::Unlock),
        "upload" => Ok(Command::Upload(PathBuf::from(require(argument)?))),
        "show" => Ok(Command::Show),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(ClientError::UnknownCommand(format!("/{}", name))),
    }
}

/// What this peer knows about its room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerState {
    room_id: String,
    username: String,
    /// Assigned by the server in `connected`
    socket_id: Option<String>,
    /// Local copy of the room's code
    code: String,
    /// Whether another member has locked the editor
    editor_locked: bool,
}

impl PeerState {
    pub fn new(room_id: String, username: String) -> Self {
        Self {
            room_id,
            username,
            socket_id: None,
            code: String::new(),
            editor_locked: false,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn socket_id(&self) -> Option<&str> {
        self.socket_id.as_deref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn editor_locked(&self) -> bool {
        self.editor_locked
    }

    /// Forget the connection but keep the code for the next session
    pub fn reset_connection(&mut self) {
        self.socket_id = None;
        self.editor_locked = false;
    }

    pub fn join_event(&self) -> ClientEvent {
        ClientEvent::Join {
            room_id: self.room_id.clone(),
            username: self.username.clone(),
        }
    }

    /// Apply a server event and return the reply it calls for, if any
    ///
    /// A `joined` for someone else is answered with `sync-code` carrying the
    /// local code, unless there is nothing to share.
    pub fn on_server_event(&mut self, event: &ServerEvent) -> Option<ClientEvent> {
        match event {
            ServerEvent::Connected { socket_id } => {
                self.socket_id = Some(socket_id.clone());
                None
            }
            ServerEvent::Joined { socket_id, .. } => {
                let is_me = self.socket_id.as_deref() == Some(socket_id.as_str());
                if is_me || self.code.is_empty() {
                    return None;
                }
                Some(ClientEvent::SyncCode {
                    socket_id: socket_id.clone(),
                    code: self.code.clone(),
                })
            }
            ServerEvent::CodeChange { code } => {
                self.code = code.clone();
                None
            }
            ServerEvent::ToggleEditorLock { editor_locked } => {
                self.editor_locked = *editor_locked;
                None
            }
            ServerEvent::ReceiveMessage { .. } | ServerEvent::Disconnected { .. } => None,
        }
    }

    /// Turn a command into the event to send
    ///
    /// `Upload`, `Show` and `Quit` are handled by the session and yield `None`.
    pub fn on_command(&mut self, command: &Command) -> Result<Option<ClientEvent>, ClientError> {
        let event = match command {
            Command::Chat(message) => ClientEvent::SendMessage {
                room_id: self.room_id.clone(),
                message: message.clone(),
            },
            Command::Code(code) => {
                if self.editor_locked {
                    return Err(ClientError::EditorLocked);
                }
                self.code = code.clone();
                ClientEvent::CodeChange {
                    room_id: self.room_id.clone(),
                    code: code.clone(),
                }
            }
            Command::Lock | Command::Unlock => ClientEvent::ToggleEditorLock {
                room_id: self.room_id.clone(),
                editor_locked: matches!(command, Command::Lock),
            },
            Command::Upload(_) | Command::Show | Command::Quit => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Event replacing the room's code with an uploaded file
    pub fn upload_event(&self, file_content: String) -> Result<ClientEvent, ClientError> {
        if self.editor_locked {
            return Err(ClientError::EditorLocked);
        }
        Ok(ClientEvent::UploadFile {
            room_id: self.room_id.clone(),
            file_content,
        })
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if retrying cannot help (e.g., InvalidUrl), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}
