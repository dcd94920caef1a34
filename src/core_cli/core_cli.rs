use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tinyftpd", about = "A minimal single-session FTP server.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Listen port, overriding the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Restricted root directory, overriding the configuration file
    #[arg(short, long)]
    pub root: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
