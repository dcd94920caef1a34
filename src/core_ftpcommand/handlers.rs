use crate::config::Config;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::session::{Session, SessionControl};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex as TokioMutex;

/// Write half of the control connection.
pub type ControlWriter = Arc<TokioMutex<OwnedWriteHalf>>;

/// Buffered read half of the control connection. File data rides the same
/// socket as commands, so the upload handler reads from here too.
pub type ControlReader = Arc<TokioMutex<BufReader<OwnedReadHalf>>>;

pub type CommandHandler = Box<
    dyn Fn(
            ControlWriter,
            Arc<Config>,
            Arc<TokioMutex<Session>>,
            String,        // Command argument
            ControlReader, // Control-channel read half
        ) -> Pin<Box<dyn Future<Output = Result<SessionControl, std::io::Error>> + Send>>
        + Send
        + Sync,
>;

pub fn initialize_command_handlers() -> HashMap<FtpCommand, Arc<CommandHandler>> {
    let mut handlers: HashMap<FtpCommand, Arc<CommandHandler>> = HashMap::new();

    handlers.insert(
        FtpCommand::USER,
        Arc::new(Box::new(|writer, _config, _session, arg, _reader| {
            Box::pin(crate::core_ftpcommand::user::handle_user_command(
                writer, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::PASS,
        Arc::new(Box::new(|writer, _config, _session, arg, _reader| {
            Box::pin(crate::core_ftpcommand::pass::handle_pass_command(
                writer, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::TYPE,
        Arc::new(Box::new(|writer, _config, session, arg, _reader| {
            Box::pin(crate::core_ftpcommand::type_::handle_type_command(
                writer, session, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::LIST,
        Arc::new(Box::new(|writer, config, _session, arg, _reader| {
            Box::pin(crate::core_ftpcommand::list::handle_list_command(
                writer, config, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::GET,
        Arc::new(Box::new(|writer, config, session, arg, _reader| {
            Box::pin(crate::core_ftpcommand::retr::handle_retr_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::PUT,
        Arc::new(Box::new(|writer, config, session, arg, reader| {
            Box::pin(crate::core_ftpcommand::stor::handle_stor_command(
                writer, config, session, arg, reader,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::RNFR,
        Arc::new(Box::new(|writer, config, session, arg, _reader| {
            Box::pin(crate::core_ftpcommand::rnfr::handle_rnfr_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::RNTO,
        Arc::new(Box::new(|writer, config, session, arg, _reader| {
            Box::pin(crate::core_ftpcommand::rnto::handle_rnto_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::DELE,
        Arc::new(Box::new(|writer, config, _session, arg, _reader| {
            Box::pin(crate::core_ftpcommand::dele::handle_dele_command(
                writer, config, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::QUIT,
        Arc::new(Box::new(|writer, _config, _session, _arg, _reader| {
            Box::pin(crate::core_ftpcommand::quit::handle_quit_command(writer))
        })),
    );

    handlers
}
