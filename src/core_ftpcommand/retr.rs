use crate::config::Config;
use crate::constants::DEFAULT_TRANSFER_BUFFER_SIZE;
use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::{confine, send_response};
use crate::core_transfer::codec::Encoder;
use crate::session::{Session, SessionControl};
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::Mutex;

/// Handles the GET (download) FTP command.
///
/// Streams the confined file to the client over the control connection in
/// fixed-size chunks, transcoded for the session's transfer type. Filesystem
/// failures answer 550 and leave the session open.
///
/// # Arguments
///
/// * `writer` - Write half of the control connection.
/// * `config` - Shared server configuration.
/// * `session` - The per-connection session state.
/// * `arg` - The file to download, relative to the restricted root.
///
/// # Returns
///
/// Whether the command loop should keep reading commands.
pub async fn handle_retr_command(
    writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<SessionControl, std::io::Error> {
    let path = match confine(Path::new(&config.server.chroot_dir), &arg) {
        Ok(path) => path,
        Err(e) => {
            warn!("GET {:?} refused: {}", arg, e);
            send_response(&writer, e.to_ftp_response()).await?;
            return Ok(SessionControl::Continue);
        }
    };

    match fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => {
            warn!("GET {:?}: not a regular file", path);
            send_response(&writer, b"550 File not found or access denied.\r\n").await?;
            return Ok(SessionControl::Continue);
        }
    }

    let mut file = match File::open(&path).await {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to open {:?}: {}", path, e);
            send_response(&writer, b"550 File not found or access denied.\r\n").await?;
            return Ok(SessionControl::Continue);
        }
    };

    let transfer_type = session.lock().await.transfer_type;

    send_response(&writer, b"150 Opening data connection.\r\n").await?;
    info!("Sending {:?} ({:?} mode)", path, transfer_type);

    let buffer_size = config
        .server
        .transfer_buffer_size
        .unwrap_or(DEFAULT_TRANSFER_BUFFER_SIZE);
    let mut buffer = vec![0; buffer_size];
    let mut encoder = Encoder::new(transfer_type);
    let mut encoded = Vec::with_capacity(buffer_size + buffer_size / 2);

    loop {
        let bytes_read = match file.read(&mut buffer).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                error!("Error reading {:?}: {}", path, e);
                send_response(&writer, b"550 Error reading file.\r\n").await?;
                return Ok(SessionControl::Continue);
            }
        };

        encoded.clear();
        encoder.encode_chunk(&buffer[..bytes_read], &mut encoded);
        writer.lock().await.write_all(&encoded).await?;
    }

    send_response(&writer, b"226 Transfer complete.\r\n").await?;
    info!("Transfer complete: {:?}", path);

    Ok(SessionControl::Continue)
}
