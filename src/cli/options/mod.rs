//! The options for the console client.

//------------ Sub-modules ---------------------------------------------------

mod attendees;
mod cameras;
mod config;
mod dashboard;
mod session;
mod users;


//------------ Content -------------------------------------------------------

use std::path::PathBuf;
use clap::Parser;
use url::Url;
use crate::config::Config;
use crate::constants::{
    CAMADMIN_ENV_API_URI, CAMADMIN_ENV_CONFIG, CAMADMIN_ENV_FORMAT,
};
use super::client::ConsoleClient;
use super::report::{Report, ReportFormat};


//------------ Options -------------------------------------------------------

/// The command line options for the console client.
#[derive(clap::Parser)]
#[command(
    version,
    about = "Administration console for camera-surveillance installations.",
)]
pub struct Options {
    #[command(flatten)]
    pub general: GeneralOptions,

    #[command(subcommand)]
    pub command: Command,
}

impl Options {
    /// Creates the options from the process arguments.
    ///
    /// If the arguments won’t result in usable options, exits the process.
    pub fn from_args() -> Self {
        Self::parse()
    }
}


//------------ GeneralOptions ------------------------------------------------

/// The options common between all commands.
#[derive(clap::Args)]
pub struct GeneralOptions {
    /// Path to the config file.
    #[arg(short, long, env = CAMADMIN_ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// The base URI of the console API, overrides the config file.
    #[arg(short = 's', long, env = CAMADMIN_ENV_API_URI)]
    pub api_uri: Option<Url>,

    /// Report format
    #[arg(
        short, long,
        env = CAMADMIN_ENV_FORMAT,
        default_value = "text",
    )]
    pub format: ReportFormat,

    /// Only show the API call and exit.
    #[arg(long)]
    pub api: bool,
}


//------------ Command -------------------------------------------------------

#[derive(clap::Subcommand)]
pub enum Command {
    /// Print a configuration file with the default settings.
    Config(config::Show),

    /// Log in and open the first page of the menu.
    Login(session::Login),

    /// Log out and forget the session.
    Logout(session::Logout),

    /// Register a new account.
    Register(session::Register),

    /// Show the current session.
    Whoami(session::Whoami),

    /// Show the pages available to the current session.
    Menu(session::Menu),

    /// Switch to another page of the menu.
    Navigate(session::Navigate),

    /// Show the camera dashboard.
    Dashboard(dashboard::Dashboard),

    /// Show the administration dashboard.
    Admin(dashboard::Admin),

    /// Manage users
    #[command(subcommand)]
    Users(users::Command),

    /// Manage attendees
    #[command(subcommand)]
    Attendees(attendees::Command),

    /// Manage cameras and show their feeds
    #[command(subcommand)]
    Cameras(cameras::Command),
}

impl Command {
    pub async fn run(self, config: &Config, api_uri: Option<Url>) -> Report {
        let mut client = match self {
            Self::Config(cmd) => return cmd.run(config).into(),
            _ => match ConsoleClient::new(config, api_uri) {
                Ok(client) => client,
                Err(err) => return Report::error(err),
            }
        };
        let client = &mut client;

        match self {
            Self::Config(cmd) => cmd.run(config).into(),
            Self::Login(cmd) => cmd.run(client).await.into(),
            Self::Logout(cmd) => cmd.run(client).into(),
            Self::Register(cmd) => cmd.run(client).await.into(),
            Self::Whoami(cmd) => cmd.run(client).into(),
            Self::Menu(cmd) => cmd.run(client).into(),
            Self::Navigate(cmd) => cmd.run(client).into(),
            Self::Dashboard(cmd) => cmd.run(client).await.into(),
            Self::Admin(cmd) => cmd.run(client).await.into(),
            Self::Users(cmd) => cmd.run(client).await,
            Self::Attendees(cmd) => cmd.run(client).await,
            Self::Cameras(cmd) => cmd.run(client).await,
        }
    }
}


//============ Tests =========================================================
