use crate::constants::DEFAULT_TRANSFER_BUFFER_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub listen_port: u16,
    pub chroot_dir: String,
    pub transfer_buffer_size: Option<usize>, // Optional to allow default value
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: String::from("0.0.0.0"),
            listen_port: 21,
            chroot_dir: String::from("/var/ftp"),
            transfer_buffer_size: Some(DEFAULT_TRANSFER_BUFFER_SIZE),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Config> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))?;

        // Set defaults if not specified
        if config.server.transfer_buffer_size.is_none() {
            config.server.transfer_buffer_size = Some(DEFAULT_TRANSFER_BUFFER_SIZE);
        }

        Ok(config)
    }
}
