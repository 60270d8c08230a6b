//! The user list, role management and user creation views.

use log::info;
use crate::api::ident::ObjectId;
use crate::api::users::{NewUser, User};
use crate::auth::{PageId, Permission, Role};
use super::backend::ConsoleApi;
use super::context::Console;
use super::error::{Action, Error};
use super::resource::RemoteList;
use super::validate;


//------------ UserList ------------------------------------------------------

/// The users known to the API.
///
/// This backs both the user list page and the role management page.
#[derive(Clone, Debug, Default)]
pub struct UserList {
    users: RemoteList<User>,
}

impl UserList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &RemoteList<User> {
        &self.users
    }

    /// Fetches the users for the given page.
    ///
    /// Only the user list and role management pages show users. Listing
    /// always needs `ListUsers` on top of what the page itself needs.
    pub async fn load<A: ConsoleApi>(
        &mut self, console: &Console<A>, page: PageId,
    ) -> Result<(), Error> {
        let token = console.authorize(Permission::ListUsers)?;
        if !matches!(page, PageId::UserList | PageId::ManageRoles) {
            return Err(Error::Forbidden(Permission::ListUsers))
        }
        console.authorize_page(page)?;
        self.users.load(console.api().users(token).await.map_err(|err| {
            Error::api(Action::ListUsers, err)
        }))
    }

    /// Deletes a user at the API and then from the list.
    pub async fn delete<A: ConsoleApi>(
        &mut self, console: &Console<A>, id: &ObjectId,
    ) -> Result<(), Error> {
        let token = console.authorize(Permission::DeleteUser)?;
        console.api().delete_user(token, id).await.map_err(|err| {
            Error::api(Action::DeleteUser, err)
        })?;
        info!("Deleted user {}", id);
        self.users.remove(id);
        Ok(())
    }

    /// Changes the role of a user at the API and then in the list.
    pub async fn change_role<A: ConsoleApi>(
        &mut self, console: &Console<A>, id: &ObjectId, role: Role,
    ) -> Result<(), Error> {
        let token = console.authorize(Permission::EditUser)?;
        console.api().update_role(token, id, role).await.map_err(|err| {
            Error::api(Action::UpdateRole, err)
        })?;
        info!("Changed role of user {} to {}", id, role);
        self.users.update(id, |user| user.role = role.as_str().to_string());
        Ok(())
    }
}


//------------ add_user ------------------------------------------------------

/// Creates a user.
pub async fn add_user<A: ConsoleApi>(
    console: &Console<A>, user: &NewUser,
) -> Result<(), Error> {
    let token = console.authorize(Permission::CreateUser)?;
    validate::new_user(user)?;
    console.api().add_user(token, user).await.map_err(|err| {
        Error::api(Action::CreateUser, err)
    })?;
    info!("Created user {} with role {}", user.username, user.role);
    Ok(())
}


//============ Tests =========================================================
