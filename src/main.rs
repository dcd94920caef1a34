mod config;
mod constants;
mod core_cli;
mod core_ftpcommand;
mod core_network;
mod core_transfer;
mod server;
mod session;

use crate::config::Config;
use crate::constants::DEFAULT_CONFIG_PATH;
use crate::core_cli::Cli;
use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::info;
use std::io::Write;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    // Initialize the logger with a custom format
    let default_filter = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            writeln!(
                buf,
                "[{}] [{}] {}",
                timestamp,
                record.level(),
                record.args()
            )
        })
        .init();

    // Load configuration from the TOML file. An explicit --config must load;
    // otherwise the default path is used when present, else built-in defaults.
    let mut config = if !args.config.is_empty() {
        Config::load_from_file(&args.config)?
    } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
        Config::load_from_file(DEFAULT_CONFIG_PATH)?
    } else {
        Config::default()
    };

    // Apply CLI overrides
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }
    if let Some(root) = args.root {
        config.server.chroot_dir = root;
    }

    info!(
        "tinyftpd starting on {}:{} serving {}",
        config.server.listen_addr, config.server.listen_port, config.server.chroot_dir
    );

    // Run the FTP server
    server::run(config).await?;

    Ok(())
}
