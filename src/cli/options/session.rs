//! Options for logging in and moving around the console.

use std::fmt;
use serde::Serialize;
use crate::api::auth::Credentials;
use crate::api::status::Success;
use crate::auth::{AdminTab, PageId, Role, SessionView};
use crate::cli::client::{ConsoleClient, Error};
use crate::console::{self, validate::RegistrationForm};


/// Returns the given password or asks for it.
pub fn password_or_prompt(
    password: Option<String>, prompt: &str
) -> Result<String, Error> {
    match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password(prompt).map_err(|err| {
            Error::input(format!("cannot read password: {}", err))
        }),
    }
}


//------------ Login ---------------------------------------------------------

#[derive(clap::Parser)]
pub struct Login {
    /// The user name
    #[arg(short, long)]
    username: String,

    /// The password, asked for if missing
    #[arg(short, long, env = "CAMADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl Login {
    pub async fn run(
        self, client: &mut ConsoleClient
    ) -> Result<SessionView, Error> {
        let password = password_or_prompt(self.password, "Contraseña: ")?;
        let credentials = Credentials::new(self.username, password);
        client.console_mut().login(&credentials).await?;
        client.persist()?;
        Ok(client.console().session().view())
    }
}


//------------ Logout --------------------------------------------------------

#[derive(clap::Parser)]
pub struct Logout;

impl Logout {
    pub fn run(self, client: &mut ConsoleClient) -> Result<Success, Error> {
        client.console_mut().logout();
        client.persist()?;
        Ok(Success)
    }
}


//------------ Register ------------------------------------------------------

#[derive(clap::Parser)]
pub struct Register {
    /// The user name of the new account
    #[arg(short, long)]
    username: String,

    /// The email address of the new account
    #[arg(short, long)]
    email: String,

    /// The password, asked for twice if missing
    #[arg(short, long, env = "CAMADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// The role to request
    #[arg(short, long, default_value = "operario")]
    role: Role,
}

impl Register {
    pub async fn run(self, client: &mut ConsoleClient) -> Result<Success, Error> {
        let (password, confirm_password) = match self.password {
            Some(password) => (password.clone(), password),
            None => (
                password_or_prompt(None, "Contraseña: ")?,
                password_or_prompt(None, "Confirmar contraseña: ")?,
            ),
        };
        let form = RegistrationForm {
            username: self.username,
            email: self.email,
            password,
            confirm_password,
            role: self.role,
        };
        client.console().register(form).await?;
        Ok(Success)
    }
}


//------------ Whoami --------------------------------------------------------

#[derive(clap::Parser)]
pub struct Whoami;

impl Whoami {
    pub fn run(self, client: &mut ConsoleClient) -> Result<SessionView, Error> {
        Ok(client.console().session().view())
    }
}


//------------ Menu ----------------------------------------------------------

#[derive(clap::Parser)]
pub struct Menu;

impl Menu {
    pub fn run(self, client: &mut ConsoleClient) -> Result<MenuReport, Error> {
        let session = client.console().session();
        let role = session.role().ok_or(console::Error::NotAuthenticated)?;
        let gate = session.gate();
        Ok(MenuReport {
            role,
            current_page: session.current_page(),
            pages: gate.pages().into_iter().map(|page| {
                MenuEntry { page, label: page.label() }
            }).collect(),
            tabs: gate.admin_tabs(),
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MenuEntry {
    page: PageId,
    label: &'static str,
}

/// The menu of a session.
#[derive(Clone, Debug, Serialize)]
pub struct MenuReport {
    role: Role,
    current_page: Option<PageId>,
    pages: Vec<MenuEntry>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    tabs: Vec<AdminTab>,
}

impl fmt::Display for MenuReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Menú de {}:", self.role.title())?;
        for entry in &self.pages {
            let marker = if Some(entry.page) == self.current_page {
                '*'
            }
            else {
                ' '
            };
            write!(f, "\n {} {:<14} {}", marker, entry.page, entry.label)?;
        }
        if !self.tabs.is_empty() {
            write!(f, "\nPestañas del panel:")?;
            for tab in &self.tabs {
                write!(f, " {}", tab.label())?;
            }
        }
        Ok(())
    }
}


//------------ Navigate ------------------------------------------------------

#[derive(clap::Parser)]
pub struct Navigate {
    /// The page to switch to
    page: PageId,
}

impl Navigate {
    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn run(self, client: &mut ConsoleClient) -> Result<SessionView, Error> {
        client.open(self.page)?;
        Ok(client.console().session().view())
    }
}
