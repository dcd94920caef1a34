use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::send_response;
use crate::session::SessionControl;
use log::info;

/// Handles the USER FTP command.
///
/// Any username is accepted; there is no credential store. The reply only
/// moves the conversation along to PASS.
pub async fn handle_user_command(
    writer: ControlWriter,
    username: String,
) -> Result<SessionControl, std::io::Error> {
    info!("USER {} (no credential check)", username);
    send_response(&writer, b"331 Username OK, need password.\r\n").await?;
    Ok(SessionControl::Continue)
}
