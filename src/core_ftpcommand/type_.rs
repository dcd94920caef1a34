use crate::core_ftpcommand::handlers::ControlWriter;
use crate::core_ftpcommand::utils::send_response;
use crate::core_transfer::codec::TransferType;
use crate::session::{Session, SessionControl};
use log::warn;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the TYPE FTP command.
///
/// Only `A` (ASCII) and `I` (Binary) are supported. Anything else leaves
/// the session's transfer type untouched and answers 504.
pub async fn handle_type_command(
    writer: ControlWriter,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<SessionControl, std::io::Error> {
    let response: &[u8] = match arg.as_str() {
        "A" => {
            session.lock().await.transfer_type = TransferType::Ascii;
            b"200 Type set to A (ASCII mode).\r\n"
        }
        "I" => {
            session.lock().await.transfer_type = TransferType::Binary;
            b"200 Type set to I (Binary mode).\r\n"
        }
        _ => {
            warn!("TYPE {:?} not supported", arg);
            b"504 Command not implemented for that parameter.\r\n"
        }
    };

    send_response(&writer, response).await?;
    Ok(SessionControl::Continue)
}
