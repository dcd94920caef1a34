use crate::config::Config;
use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::{confine, send_response};
use crate::session::{Session, SessionControl};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the RNFR (Rename From) FTP command.
///
/// Resolves the rename source against the restricted root and remembers it
/// for the RNTO that should follow. The source is not required to exist;
/// a dangling source simply makes the rename itself fail later. A refused
/// source clears any pending rename.
///
/// # Arguments
///
/// * `writer` - Write half of the control connection.
/// * `config` - Shared server configuration.
/// * `session` - The per-connection session state.
/// * `arg` - The current name, relative to the restricted root.
///
/// # Returns
///
/// Whether the command loop should keep reading commands.
pub async fn handle_rnfr_command(
    writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<SessionControl, std::io::Error> {
    let path = match confine(Path::new(&config.server.chroot_dir), &arg) {
        Ok(path) => path,
        Err(e) => {
            warn!("RNFR {:?} refused: {}", arg, e);
            session.lock().await.rename_from = None;
            send_response(&writer, e.to_ftp_response()).await?;
            return Ok(SessionControl::Continue);
        }
    };

    info!("Rename source set to {:?}", path);
    session.lock().await.rename_from = Some(path);
    send_response(&writer, b"350 Ready for destination name.\r\n").await?;

    Ok(SessionControl::Continue)
}
