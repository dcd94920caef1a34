use crate::config::Config;
use crate::core_network::network;
use anyhow::{bail, Context, Result};
use log::{error, info};
use std::path::Path;
use std::sync::Arc;

/// Runs the FTP server with the provided configuration.
///
/// The restricted root is validated before the listener starts so a bad
/// configuration fails at startup instead of on the first command.
///
/// # Arguments
///
/// * `config` - The server configuration.
///
/// # Returns
///
/// Result<(), anyhow::Error> indicating the success or failure of the operation.
pub async fn run(config: Config) -> Result<()> {
    let root = Path::new(&config.server.chroot_dir)
        .canonicalize()
        .with_context(|| format!("Invalid restricted root: {}", config.server.chroot_dir))?;
    if !root.is_dir() {
        bail!("Restricted root is not a directory: {}", root.display());
    }

    info!("Starting server with config: {:?}", config);
    info!("Restricted root: {}", root.display());

    match network::start_server(Arc::new(config)).await {
        Ok(_) => info!("Server stopped."),
        Err(e) => {
            error!("Failed to run server: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
