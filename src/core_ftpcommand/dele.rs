use crate::config::Config;
use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::{confine, send_response};
use crate::session::SessionControl;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

/// Handles the DELE (Delete File) FTP command.
///
/// Unlinks one confined file. A missing or undeletable file answers 550 and
/// the session stays open.
///
/// # Arguments
///
/// * `writer` - Write half of the control connection.
/// * `config` - Shared server configuration.
/// * `arg` - The file to delete, relative to the restricted root.
///
/// # Returns
///
/// Whether the command loop should keep reading commands.
pub async fn handle_dele_command(
    writer: ControlWriter,
    config: Arc<Config>,
    arg: String,
) -> Result<SessionControl, std::io::Error> {
    let path = match confine(Path::new(&config.server.chroot_dir), &arg) {
        Ok(path) => path,
        Err(e) => {
            warn!("DELE {:?} refused: {}", arg, e);
            send_response(&writer, e.to_ftp_response()).await?;
            return Ok(SessionControl::Continue);
        }
    };

    match fs::remove_file(&path).await {
        Ok(()) => {
            info!("Deleted {:?}", path);
            send_response(&writer, b"250 File deleted successfully.\r\n").await?;
        }
        Err(e) => {
            warn!("DELE {:?} failed: {}", path, e);
            send_response(&writer, b"550 File not found or cannot delete.\r\n").await?;
        }
    }

    Ok(SessionControl::Continue)
}
