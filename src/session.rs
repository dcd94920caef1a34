use crate::core_transfer::codec::TransferType;
use std::path::PathBuf;

/// Per-connection state. Created on accept, dropped when the control
/// connection closes; never shared across connections.
#[derive(Debug)]
pub struct Session {
    /// Transfer type for GET/PUT streaming. Binary until TYPE changes it.
    pub transfer_type: TransferType,
    /// Rename source remembered by RNFR, consumed by the next RNTO.
    pub rename_from: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            transfer_type: TransferType::Binary,
            rename_from: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Tells the command loop whether to keep reading after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Disconnect,
}
