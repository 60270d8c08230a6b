//! Console users.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::auth::Role;
use super::ident::{ObjectId, Record};


//------------ User ----------------------------------------------------------

/// A console user as listed by the API.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    pub id: ObjectId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The role name as the API reports it.
    pub role: String,
}

impl User {
    /// Returns the name to show for the user.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        }
        else if !self.username.is_empty() {
            &self.username
        }
        else {
            self.id.as_str()
        }
    }

    /// Returns the user's role if it is one this console knows.
    pub fn known_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

impl Record for User {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<8} {:<24} {}", self.id, self.display_name(), self.role)
    }
}


//------------ NewUser -------------------------------------------------------

/// A user to be created by an administrator.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .field("role", &self.role)
            .finish()
    }
}


//------------ RoleUpdate ----------------------------------------------------

/// The body of a role change.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleUpdate {
    pub role: Role,
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user_list() {
        let users: Vec<User> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Usuario 1", "role": "operario"},
                {"id": "2", "username": "sup", "role": "supervisor",
                 "email": "sup@example.com"},
                {"id": 3, "role": "auditor"}
            ]"#
        ).unwrap();

        assert_eq!(users[0].display_name(), "Usuario 1");
        assert_eq!(users[0].known_role(), Some(Role::Operator));
        assert_eq!(users[1].display_name(), "sup");
        assert_eq!(users[2].display_name(), "3");
        assert_eq!(users[2].known_role(), None);
    }

    #[test]
    fn new_user_hides_password_in_debug() {
        let user = NewUser {
            name: "Ana".into(),
            username: "ana".into(),
            password: "s3cret".into(),
            role: Role::Operator,
        };
        assert!(!format!("{user:?}").contains("s3cret"));
    }
}
