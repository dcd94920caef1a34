use crate::config::Config;
use crate::core_ftpcommand::error::ProtocolError;
use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::{confine, send_response};
use crate::session::{Session, SessionControl};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Handles the RNTO (Rename To) FTP command.
///
/// Consumes the source remembered by RNFR and renames it to the confined
/// destination. The pending source is taken even when this attempt fails;
/// every rename pair is one shot.
///
/// # Arguments
///
/// * `writer` - Write half of the control connection.
/// * `config` - Shared server configuration.
/// * `session` - The per-connection session state.
/// * `arg` - The new name, relative to the restricted root.
///
/// # Returns
///
/// Whether the command loop should keep reading commands.
pub async fn handle_rnto_command(
    writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<SessionControl, std::io::Error> {
    let source = session.lock().await.rename_from.take();
    let source = match source {
        Some(path) => path,
        None => {
            let err = ProtocolError::MissingPrecondition("RNTO without preceding RNFR");
            warn!("{}", err);
            send_response(&writer, err.to_ftp_response()).await?;
            return Ok(SessionControl::Continue);
        }
    };

    let target = match confine(Path::new(&config.server.chroot_dir), &arg) {
        Ok(path) => path,
        Err(e) => {
            warn!("RNTO {:?} refused: {}", arg, e);
            send_response(&writer, b"550 Rename failed.\r\n").await?;
            return Ok(SessionControl::Continue);
        }
    };

    match fs::rename(&source, &target).await {
        Ok(()) => {
            info!("Renamed {:?} to {:?}", source, target);
            send_response(&writer, b"250 File renamed successfully.\r\n").await?;
        }
        Err(e) => {
            warn!("Rename {:?} to {:?} failed: {}", source, target, e);
            send_response(&writer, b"550 Rename failed.\r\n").await?;
        }
    }

    Ok(SessionControl::Continue)
}
