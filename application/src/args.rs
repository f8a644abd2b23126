//! [`Args`] definitions.

use clap::{Parser, Subcommand};

/// Backend of the real estate marketing website.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run instead of serving the API.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// One-off command run against the database.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provisions a new admin account.
    CreateAdmin {
        /// Email the admin signs in with.
        #[arg(long)]
        email: String,

        /// Password the admin signs in with.
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}
