use crate::config::Config;
use crate::constants::DEFAULT_TRANSFER_BUFFER_SIZE;
use crate::core_ftpcommand::handlers::{ControlReader, ControlWriter};
use crate::core_ftpcommand::utils::{confine, send_response};
use crate::core_transfer::codec::decode_chunk;
use crate::session::{Session, SessionControl};
use log::{error, info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::Mutex;

/// Handles the PUT (upload) FTP command.
///
/// Creates (or truncates) the confined target and then reads the control
/// connection until the client stops sending. There is no length field or
/// end-of-file marker in this protocol: end-of-stream is the end of the
/// upload, so a client that wants the 226 must half-close its side.
///
/// # Arguments
///
/// * `writer` - Write half of the control connection.
/// * `config` - Shared server configuration.
/// * `session` - The per-connection session state.
/// * `arg` - The target file name, relative to the restricted root.
/// * `reader` - Read half of the control connection carrying the file data.
///
/// # Returns
///
/// Whether the command loop should keep reading commands.
pub async fn handle_stor_command(
    writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
    reader: ControlReader,
) -> Result<SessionControl, std::io::Error> {
    let path = match confine(Path::new(&config.server.chroot_dir), &arg) {
        Ok(path) => path,
        Err(e) => {
            warn!("PUT {:?} refused: {}", arg, e);
            send_response(&writer, e.to_ftp_response()).await?;
            return Ok(SessionControl::Continue);
        }
    };

    let mut file = match File::create(&path).await {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to create {:?}: {}", path, e);
            send_response(&writer, b"550 Cannot create file.\r\n").await?;
            return Ok(SessionControl::Continue);
        }
    };

    let transfer_type = session.lock().await.transfer_type;

    send_response(&writer, b"150 Ready to receive data.\r\n").await?;
    info!("Receiving {:?} ({:?} mode)", path, transfer_type);

    let buffer_size = config
        .server
        .transfer_buffer_size
        .unwrap_or(DEFAULT_TRANSFER_BUFFER_SIZE);
    let mut buffer = vec![0; buffer_size];
    let mut decoded = Vec::with_capacity(buffer_size);

    loop {
        let bytes_read = {
            let mut reader = reader.lock().await;
            reader.read(&mut buffer).await?
        };
        if bytes_read == 0 {
            break;
        }

        decoded.clear();
        decode_chunk(transfer_type, &buffer[..bytes_read], &mut decoded);
        if let Err(e) = file.write_all(&decoded).await {
            error!("Error writing {:?}: {}", path, e);
            send_response(&writer, b"550 Failed to write file.\r\n").await?;
            return Ok(SessionControl::Continue);
        }
    }

    if let Err(e) = file.flush().await {
        error!("Error flushing {:?}: {}", path, e);
        send_response(&writer, b"550 Failed to write file.\r\n").await?;
        return Ok(SessionControl::Continue);
    }

    send_response(&writer, b"226 Transfer complete.\r\n").await?;
    info!("Stored {:?}", path);

    Ok(SessionControl::Continue)
}
