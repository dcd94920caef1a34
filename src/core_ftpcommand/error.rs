use std::path::PathBuf;
use thiserror::Error;

/// Path confinement failures. Every variant is reported to the client with
/// the same fixed reply; the detail stays in the server log.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("path {0:?} contains a parent directory reference")]
    Traversal(String),

    #[error("path {} resolves outside the restricted root", .0.display())]
    Escape(PathBuf),

    #[error("failed to resolve path: {0}")]
    Resolve(#[from] std::io::Error),
}

impl PathError {
    pub fn to_ftp_response(&self) -> &'static [u8] {
        b"550 Access denied.\r\n"
    }
}

/// Command-level protocol violations.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("unrecognized command {0:?}")]
    UnrecognizedCommand(String),

    #[error("{0}")]
    MissingPrecondition(&'static str),
}

impl ProtocolError {
    pub fn to_ftp_response(&self) -> &'static [u8] {
        match self {
            ProtocolError::UnrecognizedCommand(_) => b"502 Command not implemented.\r\n",
            ProtocolError::MissingPrecondition(_) => b"550 Rename failed.\r\n",
        }
    }
}
