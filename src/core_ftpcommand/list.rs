use crate::config::Config;
use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::send_response;
use crate::session::SessionControl;
use log::error;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Handles the LIST FTP command.
///
/// Lists the restricted root itself, one entry name per line on the control
/// connection; any path argument is ignored. The 150/226 frame is sent even
/// when the directory cannot be read, with a 550 line in place of entries.
pub async fn handle_list_command(
    writer: ControlWriter,
    config: Arc<Config>,
    _arg: String,
) -> Result<SessionControl, std::io::Error> {
    send_response(&writer, b"150 Here comes the directory listing.\r\n").await?;

    match fs::read_dir(&config.server.chroot_dir).await {
        Ok(mut entries) => loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let mut line = entry.file_name().to_string_lossy().into_owned();
                    line.push_str("\r\n");
                    writer.lock().await.write_all(line.as_bytes()).await?;
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Error reading directory entry: {}", e);
                    break;
                }
            }
        },
        Err(e) => {
            error!(
                "Failed to open directory {:?}: {}",
                config.server.chroot_dir, e
            );
            send_response(&writer, b"550 Failed to open directory.\r\n").await?;
        }
    }

    send_response(&writer, b"226 Directory send OK.\r\n").await?;
    Ok(SessionControl::Continue)
}
