//! The navigation gate.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{fmt, str};
use serde::{Deserialize, Serialize};
use super::{Permission, PermissionSet, Role};


//------------ PageId --------------------------------------------------------

/// A navigable view of the console.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PageId {
    #[serde(rename = "dashboard")]
    Dashboard,

    #[serde(rename = "adminDashboard")]
    AdminDashboard,

    #[serde(rename = "userList")]
    UserList,

    #[serde(rename = "addUser")]
    AddUser,

    #[serde(rename = "manageRoles")]
    ManageRoles,

    #[serde(rename = "attendeeList")]
    AttendeeList,

    #[serde(rename = "addAttendee")]
    AddAttendee,
}

impl PageId {
    pub const ALL: &'static [PageId] = &[
        PageId::Dashboard,
        PageId::AdminDashboard,
        PageId::UserList,
        PageId::AddUser,
        PageId::ManageRoles,
        PageId::AttendeeList,
        PageId::AddAttendee,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Dashboard => "dashboard",
            PageId::AdminDashboard => "adminDashboard",
            PageId::UserList => "userList",
            PageId::AddUser => "addUser",
            PageId::ManageRoles => "manageRoles",
            PageId::AttendeeList => "attendeeList",
            PageId::AddAttendee => "addAttendee",
        }
    }

    /// Returns the menu label of the page.
    pub fn label(self) -> &'static str {
        match self {
            PageId::Dashboard => "Dashboard",
            PageId::AdminDashboard => "Panel de Administración",
            PageId::UserList => "Lista de Usuarios",
            PageId::AddUser => "Agregar Usuario",
            PageId::ManageRoles => "Gestionar Roles",
            PageId::AttendeeList => "Lista de Asistentes",
            PageId::AddAttendee => "Agregar Asistente",
        }
    }

    /// Returns the permission needed to open the page.
    pub fn required_permission(self) -> Permission {
        match self {
            PageId::Dashboard => Permission::ViewCameras,
            PageId::AdminDashboard => Permission::ManageSettings,
            PageId::UserList => Permission::ListUsers,
            PageId::AddUser => Permission::CreateUser,
            PageId::ManageRoles => Permission::EditUser,
            PageId::AttendeeList => Permission::ViewAttendees,
            PageId::AddAttendee => Permission::ManageAttendees,
        }
    }
}

impl str::FromStr for PageId {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL.iter().copied().find(|page| page.as_str() == s).ok_or_else(
            || UnknownPage(s.to_string())
        )
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ AdminTab ------------------------------------------------------

/// A tab of the administrator dashboard.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    Cameras,
    Users,
    Reports,
    Settings,
}

impl AdminTab {
    pub const ALL: &'static [AdminTab] = &[
        AdminTab::Cameras, AdminTab::Users, AdminTab::Reports,
        AdminTab::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdminTab::Cameras => "Cámaras",
            AdminTab::Users => "Usuarios",
            AdminTab::Reports => "Reportes",
            AdminTab::Settings => "Configuración",
        }
    }

    pub fn required_permission(self) -> Permission {
        match self {
            AdminTab::Cameras => Permission::ViewCameras,
            AdminTab::Users => Permission::CreateUser,
            AdminTab::Reports => Permission::ViewReports,
            AdminTab::Settings => Permission::ManageSettings,
        }
    }
}


//------------ NavigationGate ------------------------------------------------

/// Maps a role to the pages and permissions available to it.
///
/// The gate is a pure function of the role and the role table. A gate for
/// no role at all holds the empty permission set and offers no pages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavigationGate {
    role: Option<Role>,
    permissions: PermissionSet,
}

impl NavigationGate {
    pub fn new(role: Option<Role>) -> Self {
        NavigationGate {
            role,
            permissions: role.map(Role::permissions).unwrap_or_default(),
        }
    }

    pub fn for_role(role: Role) -> Self {
        Self::new(Some(role))
    }

    /// Creates a gate from a role name as received from the API.
    ///
    /// Names outside the closed set of roles give an empty gate.
    pub fn for_role_name(name: &str) -> Self {
        Self::new(name.parse().ok())
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn permissions(&self) -> PermissionSet {
        self.permissions
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.has(permission)
    }

    /// Returns the reachable pages in menu order.
    pub fn pages(&self) -> Vec<PageId> {
        match self.role {
            Some(role) => {
                role.menu().iter().copied().filter(|page| {
                    self.has_permission(page.required_permission())
                }).collect()
            }
            None => Vec::new()
        }
    }

    /// Returns whether the page appears in this gate's menu.
    pub fn allows(&self, page: PageId) -> bool {
        self.pages().contains(&page)
    }

    /// Returns the page to show right after login.
    pub fn landing_page(&self) -> Option<PageId> {
        self.pages().first().copied()
    }

    /// Returns the admin dashboard tabs available, in display order.
    pub fn admin_tabs(&self) -> Vec<AdminTab> {
        if !self.allows(PageId::AdminDashboard) {
            return Vec::new()
        }
        AdminTab::ALL.iter().copied().filter(|tab| {
            self.has_permission(tab.required_permission())
        }).collect()
    }
}


//------------ UnknownPage ---------------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown page '{}'", self.0)
    }
}

impl std::error::Error for UnknownPage { }


//============ Tests =========================================================
