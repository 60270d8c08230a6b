//! Options for managing users.

use crate::api::ident::ObjectId;
use crate::api::status::Success;
use crate::api::users::{NewUser, User};
use crate::auth::{PageId, Role};
use crate::cli::client::{ConsoleClient, Error};
use crate::cli::report::{RecordList, Report};
use crate::console::users::{self, UserList};
use super::session::password_or_prompt;


//------------ Command -------------------------------------------------------

#[derive(clap::Subcommand)]
pub enum Command {
    /// List all users
    List,

    /// Create a new user
    Add {
        /// The full name of the user
        #[arg(short, long)]
        name: String,

        /// The login name of the user
        #[arg(short, long)]
        username: String,

        /// The password, asked for if missing
        #[arg(short, long, env = "CAMADMIN_NEW_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// The role of the user
        #[arg(short, long, default_value = "operario")]
        role: Role,
    },

    /// Delete a user
    Delete {
        /// The id of the user
        id: ObjectId,
    },

    /// Change the role of a user
    Role {
        /// The id of the user
        id: ObjectId,

        /// The new role
        role: Role,
    },
}

impl Command {
    pub async fn run(self, client: &mut ConsoleClient) -> Report {
        match self {
            Self::List => list(client).await.into(),
            Self::Add { name, username, password, role } => {
                add(client, name, username, password, role).await.into()
            }
            Self::Delete { id } => delete(client, id).await.into(),
            Self::Role { id, role } => change_role(client, id, role).await.into(),
        }
    }
}

async fn list(client: &mut ConsoleClient) -> Result<RecordList<User>, Error> {
    client.open(PageId::UserList)?;
    let mut list = UserList::new();
    list.load(client.console(), PageId::UserList).await?;
    Ok(RecordList::new("Usuarios", list.users().items().to_vec()))
}

async fn add(
    client: &mut ConsoleClient,
    name: String,
    username: String,
    password: Option<String>,
    role: Role,
) -> Result<Success, Error> {
    client.open(PageId::AddUser)?;
    let password = password_or_prompt(password, "Contraseña: ")?;
    let user = NewUser { name, username, password, role };
    users::add_user(client.console(), &user).await?;
    Ok(Success)
}

async fn delete(
    client: &mut ConsoleClient, id: ObjectId
) -> Result<Success, Error> {
    client.open(PageId::UserList)?;
    let mut list = UserList::new();
    list.delete(client.console(), &id).await?;
    Ok(Success)
}

async fn change_role(
    client: &mut ConsoleClient, id: ObjectId, role: Role
) -> Result<Success, Error> {
    client.open(PageId::ManageRoles)?;
    let mut list = UserList::new();
    list.change_role(client.console(), &id, role).await?;
    Ok(Success)
}
