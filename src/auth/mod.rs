//! Roles, permissions, navigation and login.

pub use self::gate::{AdminTab, NavigationGate, PageId, UnknownPage};
pub use self::permission::{Permission, PermissionSet};
pub use self::providers::{AuthProvider, LoggedInUser};
pub use self::role::{Role, RolePermissionMap, UnknownRole};
pub use self::session::{Session, SessionError, SessionView};

mod gate;
mod permission;
pub mod providers;
mod role;
mod session;
