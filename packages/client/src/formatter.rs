//! Message formatting utilities for client display.

use irori_server::infrastructure::dto::websocket::{ClientInfo, ServerEvent};

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server event for display
    ///
    /// `my_socket_id` marks this peer in member lists.
    pub fn format_event(event: &ServerEvent, my_socket_id: Option<&str>) -> String {
        match event {
            ServerEvent::Connected { socket_id } => format!("\nConnected as {}\n", socket_id),
            ServerEvent::Joined {
                clients,
                username,
                socket_id,
            } => Self::format_joined(clients, username, socket_id, my_socket_id),
            ServerEvent::ReceiveMessage { username, message } => {
                Self::format_chat_message(username, message)
            }
            ServerEvent::CodeChange { code } => Self::format_code(code),
            ServerEvent::ToggleEditorLock { editor_locked } => {
                if *editor_locked {
                    "\n[editor locked by another member]\n".to_string()
                } else {
                    "\n[editor unlocked]\n".to_string()
                }
            }
            ServerEvent::Disconnected {
                socket_id,
                username,
            } => format!(
                "\n- {} left\n",
                username.as_deref().unwrap_or(socket_id.as_str())
            ),
        }
    }

    /// Format the member list delivered with `joined`
    pub fn format_joined(
        clients: &[ClientInfo],
        username: &str,
        socket_id: &str,
        my_socket_id: Option<&str>,
    ) -> String {
        let mut output = String::new();
        if my_socket_id == Some(socket_id) {
            output.push_str("\nYou joined the room\n");
        } else {
            output.push_str(&format!("\n+ {} joined\n", username));
        }
        output.push_str(RULE);
        output.push_str("\nMembers:\n");
        for client in clients {
            let name = client.username.as_deref().unwrap_or("(anonymous)");
            let me_suffix = if my_socket_id == Some(client.socket_id.as_str()) {
                " (me)"
            } else {
                ""
            };
            output.push_str(&format!("{}{}\n", name, me_suffix));
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_chat_message(username: &str, message: &str) -> String {
        format!("\n@{}: {}\n", username, message)
    }

    /// Format the local code buffer
    pub fn format_code(code: &str) -> String {
        if code.is_empty() {
            return "\n(code is empty)\n".to_string();
        }
        let mut output = String::from("\n--- code ---\n");
        output.push_str(code);
        if !code.ends_with('\n') {
            output.push('\n');
        }
        output.push_str("------------\n");
        output
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(socket_id: &str, username: &str) -> ClientInfo {
        ClientInfo {
            socket_id: socket_id.to_string(),
            username: Some(username.to_string()),
        }
    }

    #[test]
    fn test_format_own_joined_marks_me() {
        // テスト項目: 自分の joined では自分に (me) が付く
        // given (前提条件):
        let clients = vec![client("a", "Alice"), client("b", "Bob")];

        // when (操作):
        let result = MessageFormatter::format_joined(&clients, "Bob", "b", Some("b"));

        // then (期待する結果):
        assert!(result.contains("You joined the room"));
        assert!(result.contains("Bob (me)"));
        assert!(!result.contains("Alice (me)"));
    }

    #[test]
    fn test_format_other_joined() {
        // テスト項目: 他人の joined では参加者名が表示される
        // given (前提条件):
        let clients = vec![client("a", "Alice"), client("b", "Bob")];

        // when (操作):
        let result = MessageFormatter::format_joined(&clients, "Bob", "b", Some("a"));

        // then (期待する結果):
        assert!(result.contains("+ Bob joined"));
        assert!(result.contains("Alice (me)"));
    }

    #[test]
    fn test_format_disconnected_without_name_uses_socket_id() {
        // テスト項目: 表示名のない切断通知では接続 ID が表示される
        // given (前提条件):
        let event = ServerEvent::Disconnected {
            socket_id: "conn-1".to_string(),
            username: None,
        };

        // when (操作):
        let result = MessageFormatter::format_event(&event, None);

        // then (期待する結果):
        assert!(result.contains("- conn-1 left"));
    }

    #[test]
    fn test_format_code() {
        // テスト項目: コードは区切り線で囲まれ、空の場合はその旨が表示される
        // given (前提条件):
        let code = "fn main() {}";

        // when (操作):
        let result = MessageFormatter::format_code(code);
        let empty = MessageFormatter::format_code("");

        // then (期待する結果):
        assert!(result.contains("--- code ---\nfn main() {}\n"));
        assert!(empty.contains("(code is empty)"));
    }

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャットメッセージが正しくフォーマットされる
        // given (前提条件):
        let event = ServerEvent::ReceiveMessage {
            username: "alice".to_string(),
            message: "Hello, world!".to_string(),
        };

        // when (操作):
        let result = MessageFormatter::format_event(&event, None);

        // then (期待する結果):
        assert!(result.contains("@alice: Hello, world!"));
    }
}
