// Here's the list of the FTP commands implemented
pub mod dele;
pub mod list;
pub mod pass;
pub mod quit;
pub mod retr;
pub mod rnfr;
pub mod rnto;
pub mod stor;
pub mod type_;
pub mod user;

// Parsing, dispatch and error mapping
pub mod error;
pub mod ftpcommand;
pub mod handlers;

// The utils and common functions are here
pub mod utils;

#[cfg(test)]
mod test_commands;
