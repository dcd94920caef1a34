use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::send_response;
use crate::session::SessionControl;

pub async fn handle_pass_command(
    writer: ControlWriter,
    _password: String,
) -> Result<SessionControl, std::io::Error> {
    send_response(&writer, b"230 User logged in, proceed.\r\n").await?;
    Ok(SessionControl::Continue)
}
