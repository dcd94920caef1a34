// src/constants.rs

/// Configuration file read when no --config argument is given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/tinyftpd.conf";

/// Transfer chunk size used when the configuration does not set one.
pub const DEFAULT_TRANSFER_BUFFER_SIZE: usize = 8192;
