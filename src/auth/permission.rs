//! Permissions and permission sets.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::{fmt, str};
use serde::{Deserialize, Serialize};


//------------ Permission ----------------------------------------------------

macro_rules! define_permission {
    ( $( ($variant:ident, $text:expr), )* ) => {
        /// The set of available permissions.
        ///
        /// Pages, dashboard tabs and actions within a page each require one
        /// of these.
        #[derive(
            Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize
        )]
        #[repr(u32)]
        pub enum Permission {
            $(
                #[serde(rename = $text)]
                $variant,
            )*
        }

        impl Permission {
            pub fn iter() -> impl Iterator<Item = Self> {
                ALL_PERMISSIONS.iter().copied()
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )*
                }
            }
        }

        impl str::FromStr for Permission {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )*
                    _ => Err("unknown permission")
                }
            }
        }

        const ALL_PERMISSIONS: &[Permission] = &[
            $( Permission::$variant, )*
        ];
    }
}

define_permission! {
    (CreateUser, "create_user"),
    (EditUser, "edit_user"),
    (DeleteUser, "delete_user"),
    (ViewReports, "view_reports"),
    (ManageCameras, "manage_cameras"),
    (ViewCameras, "view_cameras"),
    (ListUsers, "list_users"),
    (ViewAttendees, "view_attendees"),
    (ManageAttendees, "manage_attendees"),
    (ManageSettings, "manage_settings"),
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ PermissionSet -------------------------------------------------

/// A set of permissions.
///
/// Membership only; the order in which permissions were added is not kept.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "Vec<Permission>", into = "Vec<Permission>")]
pub struct PermissionSet(u32);

impl PermissionSet {
    pub const NONE: Self = Self(0);

    pub const ANY: Self = Self::from_permissions(ALL_PERMISSIONS);

    const fn mask(permission: Permission) -> u32 {
        1u32 << (permission as u32)
    }

    pub const fn add(self, permission: Permission) -> Self {
        Self(self.0 | Self::mask(permission))
    }

    pub const fn remove(self, permission: Permission) -> Self {
        Self(self.0 & !Self::mask(permission))
    }

    pub const fn has(self, permission: Permission) -> bool {
        self.0 & Self::mask(permission) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Permission> {
        Permission::iter().filter(move |perm| self.has(*perm))
    }

    pub const fn from_permissions(mut slice: &[Permission]) -> Self {
        let mut res = PermissionSet(0);
        while let Some((head, tail)) = slice.split_first() {
            res = res.add(*head);
            slice = tail;
        }
        res
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(src: Vec<Permission>) -> Self {
        let mut res = Self::NONE;
        for item in src {
            res = res.add(item)
        }
        res
    }
}

impl From<PermissionSet> for Vec<Permission> {
    fn from(src: PermissionSet) -> Self {
        src.iter().collect()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::add)
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for perm in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            perm.fmt(f)?;
        }
        Ok(())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_names_round_trip() {
        for perm in Permission::iter() {
            assert_eq!(perm.as_str().parse::<Permission>(), Ok(perm));
        }
        assert!("view_everything".parse::<Permission>().is_err());
    }

    #[test]
    fn add_and_remove() {
        let set = PermissionSet::NONE
            .add(Permission::ViewCameras)
            .add(Permission::ViewReports);
        assert!(set.has(Permission::ViewCameras));
        assert!(set.has(Permission::ViewReports));
        assert!(!set.has(Permission::CreateUser));
        assert_eq!(set.len(), 2);

        let set = set.remove(Permission::ViewCameras);
        assert!(!set.has(Permission::ViewCameras));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn any_holds_everything() {
        for perm in Permission::iter() {
            assert!(PermissionSet::ANY.has(perm));
            assert!(!PermissionSet::NONE.has(perm));
        }
        assert!(PermissionSet::NONE.is_empty());
    }

    #[test]
    fn serializes_as_list_of_names() {
        let set: PermissionSet = [
            Permission::ManageCameras, Permission::CreateUser
        ].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["create_user","manage_cameras"]"#);

        let back: PermissionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
