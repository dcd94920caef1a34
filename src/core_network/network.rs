use crate::config::Config;
use crate::core_ftpcommand::error::ProtocolError;
use crate::core_ftpcommand::ftpcommand::{parse_command, Command, FtpCommand};
use crate::core_ftpcommand::handlers::initialize_command_handlers;
use crate::core_ftpcommand::utils::send_response;
use crate::session::{Session, SessionControl};
use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

pub const GREETING: &[u8] = b"220 Welcome to Simple FTP Server\r\n";

/// Binds the listener and serves clients one at a time.
///
/// Each accepted connection runs its command loop to completion before the
/// next client is accepted. A failed session is logged and the loop keeps
/// going; only a listener-level error ends the server.
pub async fn start_server(config: Arc<Config>) -> Result<()> {
    let listener = TcpListener::bind(format!(
        "{}:{}",
        config.server.listen_addr, config.server.listen_port
    ))
    .await?;
    info!(
        "Server listening on {}:{}",
        config.server.listen_addr, config.server.listen_port
    );

    loop {
        let (socket, addr) = listener.accept().await?;
        info!("New connection from {:?}", addr);

        let session = Arc::new(Mutex::new(Session::new()));
        if let Err(e) = handle_connection(socket, Arc::clone(&config), session).await {
            error!("Connection error: {:?}", e);
        }
        info!("Connection closed for {:?}", addr);
    }
}

/// Runs one session: greeting, then the read-dispatch-respond loop.
///
/// The socket is split so the upload handler can read file data while
/// responses go out through the shared write half. One buffered reader
/// lives for the whole session, so commands pipelined into a single
/// segment are not lost between iterations.
pub async fn handle_connection(
    socket: TcpStream,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
) -> Result<()> {
    let (read_half, write_half) = socket.into_split();
    let writer = Arc::new(Mutex::new(write_half));
    let reader = Arc::new(Mutex::new(BufReader::new(read_half)));

    {
        let mut writer = writer.lock().await;
        writer.write_all(GREETING).await?;
    }

    let handlers = initialize_command_handlers();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let n = {
            let mut reader = reader.lock().await;
            reader.read_line(&mut buffer).await?
        };
        if n == 0 {
            info!("Client disconnected");
            break;
        }

        let Command { verb, argument } = parse_command(&buffer);
        debug!("Received command: {} {}", verb, argument);

        let handler = FtpCommand::from_str(&verb).and_then(|cmd| handlers.get(&cmd));
        if let Some(handler) = handler {
            match handler(
                Arc::clone(&writer),
                Arc::clone(&config),
                Arc::clone(&session),
                argument,
                Arc::clone(&reader),
            )
            .await
            {
                Ok(SessionControl::Continue) => {}
                Ok(SessionControl::Disconnect) => break,
                Err(e) => {
                    error!("Error handling command {}: {:?}", verb, e);
                    break;
                }
            }
        } else {
            let err = ProtocolError::UnrecognizedCommand(verb);
            warn!("{}", err);
            send_response(&writer, err.to_ftp_response()).await?;
        }
    }

    Ok(())
}
