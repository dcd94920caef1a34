#[derive(Eq, Hash, PartialEq, Debug)]
pub enum FtpCommand {
    USER,
    PASS,
    TYPE,
    LIST,
    GET,
    PUT,
    RNFR,
    RNTO,
    DELE,
    QUIT,
}

impl FtpCommand {
    pub fn from_str(cmd: &str) -> Option<FtpCommand> {
        match cmd.to_ascii_uppercase().as_str() {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "TYPE" => Some(FtpCommand::TYPE),
            "LIST" => Some(FtpCommand::LIST),
            "GET" => Some(FtpCommand::GET),
            "PUT" => Some(FtpCommand::PUT),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "DELE" => Some(FtpCommand::DELE),
            "QUIT" => Some(FtpCommand::QUIT),
            _ => None,
        }
    }
}

/// One parsed control-channel line.
#[derive(Debug, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub argument: String,
}

/// Splits a raw control-channel line into a verb and its argument.
///
/// The trailing CRLF or LF is stripped. The argument is everything after the
/// first space; internal spaces stay part of it, and a missing argument
/// yields an empty string.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let (verb, argument) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (line, ""),
    };

    Command {
        verb: verb.to_string(),
        argument: argument.to_string(),
    }
}
