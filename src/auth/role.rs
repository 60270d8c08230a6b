//! Roles and the role permission table.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{fmt, str};
use serde::{Deserialize, Serialize};
use super::{PageId, Permission, PermissionSet};
use super::Permission::*;


//------------ Role ----------------------------------------------------------

/// The category of a console user.
///
/// A role is assigned by the API when a user logs in and determines which
/// pages the user can reach and which actions are offered on them. It is
/// fixed for the life of a session.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize
)]
pub enum Role {
    #[serde(rename = "administrador")]
    Administrator,

    #[serde(rename = "supervisor")]
    Supervisor,

    #[serde(rename = "operario")]
    Operator,
}

impl Role {
    pub const ALL: &'static [Role] = &[
        Role::Administrator, Role::Supervisor, Role::Operator
    ];

    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.iter().copied()
    }

    /// Returns the name used for the role on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrator => "administrador",
            Role::Supervisor => "supervisor",
            Role::Operator => "operario",
        }
    }

    /// Returns the role name with the first letter capitalised.
    pub fn title(self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Supervisor => "Supervisor",
            Role::Operator => "Operario",
        }
    }

    /// Returns the permissions held by this role.
    pub fn permissions(self) -> PermissionSet {
        self.definition().permissions
    }

    /// Returns the menu of this role in display order.
    ///
    /// This is the unfiltered menu. Use the navigation gate to get the pages
    /// the role can actually reach.
    pub fn menu(self) -> &'static [PageId] {
        self.definition().menu
    }

    fn definition(self) -> &'static RoleDefinition {
        match self {
            Role::Administrator => &ROLE_TABLE[0],
            Role::Supervisor => &ROLE_TABLE[1],
            Role::Operator => &ROLE_TABLE[2],
        }
    }
}

impl str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrador" => Ok(Role::Administrator),
            "supervisor" => Ok(Role::Supervisor),
            "operario" => Ok(Role::Operator),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ RoleDefinition ------------------------------------------------

/// One row of the role table.
#[derive(Debug)]
struct RoleDefinition {
    permissions: PermissionSet,
    menu: &'static [PageId],
}

/// The role permission table.
///
/// The order of rows must follow the order of variants in [`Role`].
/// Adding a role or changing what a role may do only requires a change
/// here.
static ROLE_TABLE: [RoleDefinition; 3] = [
    RoleDefinition {
        permissions: PermissionSet::ANY,
        menu: &[
            PageId::AdminDashboard,
            PageId::UserList,
            PageId::AddUser,
            PageId::ManageRoles,
            PageId::AttendeeList,
            PageId::AddAttendee,
        ],
    },
    RoleDefinition {
        permissions: PermissionSet::from_permissions(&[
            ViewReports,
            ManageCameras,
            ViewCameras,
            ListUsers,
            ViewAttendees,
        ]),
        menu: &[
            PageId::Dashboard,
            PageId::UserList,
            PageId::AttendeeList,
        ],
    },
    RoleDefinition {
        permissions: PermissionSet::from_permissions(&[
            ViewCameras,
        ]),
        menu: &[
            PageId::Dashboard,
        ],
    },
];


//------------ RolePermissionMap ---------------------------------------------

/// Looks up permission sets by role name.
///
/// This is the lookup used for role strings that arrive from outside, such
/// as the role returned by the token endpoint. Names outside the closed set
/// of roles resolve to the empty permission set.
#[derive(Clone, Copy, Debug, Default)]
pub struct RolePermissionMap;

impl RolePermissionMap {
    /// Returns the permissions for the given role name.
    pub fn get(self, role: &str) -> PermissionSet {
        match role.parse::<Role>() {
            Ok(role) => role.permissions(),
            Err(_) => PermissionSet::NONE,
        }
    }

    /// Returns whether the given role name holds the given permission.
    pub fn has(self, role: &str, permission: Permission) -> bool {
        self.get(role).has(permission)
    }
}


//------------ UnknownRole ---------------------------------------------------

/// A role name outside the closed set of roles.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "unknown role '{}', expected one of: administrador, \
                supervisor, operario",
            self.0
        )
    }
}

impl std::error::Error for UnknownRole { }


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_an_entry() {
        for role in Role::iter() {
            // The table is indexed by variant, so this also catches a
            // mismatch between table order and variant order.
            assert_eq!(RolePermissionMap.get(role.as_str()), role.permissions());
            assert!(!role.menu().is_empty());
        }
    }

    #[test]
    fn unknown_roles_hold_nothing() {
        for name in ["", "admin", "Administrador", "root", "operator"] {
            assert!(RolePermissionMap.get(name).is_empty(), "{name}");
        }
    }

    #[test]
    fn has_permission_is_set_membership() {
        for role in Role::iter() {
            let set = RolePermissionMap.get(role.as_str());
            for perm in Permission::iter() {
                assert_eq!(
                    RolePermissionMap.has(role.as_str(), perm),
                    set.iter().any(|p| p == perm)
                );
            }
        }
    }

    #[test]
    fn table_matches_console_roles() {
        let admin = Role::Administrator.permissions();
        for perm in [
            CreateUser, EditUser, DeleteUser, ViewReports, ManageCameras,
            ViewCameras
        ] {
            assert!(admin.has(perm));
        }

        let supervisor = Role::Supervisor.permissions();
        assert!(supervisor.has(ViewReports));
        assert!(supervisor.has(ManageCameras));
        assert!(supervisor.has(ViewCameras));
        assert!(!supervisor.has(CreateUser));
        assert!(!supervisor.has(DeleteUser));

        let operator = Role::Operator.permissions();
        assert_eq!(operator.iter().collect::<Vec<_>>(), vec![ViewCameras]);
    }

    #[test]
    fn wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::Administrator).unwrap(),
            r#""administrador""#
        );
        let role: Role = serde_json::from_str(r#""operario""#).unwrap();
        assert_eq!(role, Role::Operator);
        assert_eq!("supervisor".parse::<Role>(), Ok(Role::Supervisor));
        assert!("jefe".parse::<Role>().is_err());
    }
}
