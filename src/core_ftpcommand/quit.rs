use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::send_response;
use crate::session::SessionControl;
use log::info;

/// Handles the QUIT FTP command.
///
/// Sends the goodbye and tells the command loop to close the connection.
pub async fn handle_quit_command(writer: ControlWriter) -> Result<SessionControl, std::io::Error> {
    info!("Received QUIT command. Closing connection.");
    send_response(&writer, b"221 Goodbye.\r\n").await?;
    Ok(SessionControl::Disconnect)
}
