//! WebSocket client session management.

use std::io::Write;

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use irori_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    domain::{Command, PeerState, parse_command},
    error::ClientError,
};

use super::formatter::MessageFormatter;

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Print the prompt again below output that interrupted it
fn redisplay_prompt(peer: &PeerState) {
    print!("{}> ", peer.username());
    std::io::stdout().flush().ok();
}

async fn send_event(write: &mut WsWriter, event: &ClientEvent) -> Result<(), ClientError> {
    let json =
        serde_json::to_string(event).map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Run one WebSocket session until the user quits or the connection drops
///
/// `Ok(())` means the user asked to leave; any error is a candidate for reconnecting.
pub async fn run_client_session(
    url: &str,
    peer: &mut PeerState,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        tungstenite::Error::Url(_) => ClientError::InvalidUrl(url.to_string()),
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to Irori server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send, or /code, /lock, /unlock, /upload, /show, /quit.\n",
        peer.username()
    );

    let (mut write, mut read) = ws_stream.split();
    peer.reset_connection();
    send_event(&mut write, &peer.join_event()).await?;

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => {
                            let reply = peer.on_server_event(&event);
                            print!("{}", MessageFormatter::format_event(&event, peer.socket_id()));
                            if let Some(reply) = reply {
                                send_event(&mut write, &reply).await?;
                            }
                        }
                        Err(_) => print!("{}", MessageFormatter::format_raw_message(text.as_str())),
                    }
                    redisplay_prompt(peer);
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => {
                // The readline thread ends on Ctrl+C / Ctrl+D
                let Some(line) = line else {
                    let _ = write.close().await;
                    return Ok(());
                };
                match parse_command(&line) {
                    Ok(Command::Quit) => {
                        let _ = write.close().await;
                        return Ok(());
                    }
                    Ok(Command::Show) => print!("{}", MessageFormatter::format_code(peer.code())),
                    Ok(Command::Upload(path)) => {
                        let uploaded = tokio::fs::read_to_string(&path)
                            .await
                            .map_err(|e| ClientError::FileRead {
                                path: path.display().to_string(),
                                reason: e.to_string(),
                            })
                            .and_then(|content| peer.upload_event(content));
                        match uploaded {
                            Ok(event) => send_event(&mut write, &event).await?,
                            Err(e) => println!("{}", e),
                        }
                    }
                    Ok(command) => match peer.on_command(&command) {
                        Ok(Some(event)) => send_event(&mut write, &event).await?,
                        Ok(None) => {}
                        Err(e) => println!("{}", e),
                    },
                    Err(e) => println!("{}", e),
                }
                redisplay_prompt(peer);
            }
        }
    }
}
