//! Cameras known to the API.

use std::fmt;
use serde::{Deserialize, Serialize};
use super::ident::{ObjectId, Record};


//------------ CameraStatus --------------------------------------------------

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Active,
    Inactive,
    Maintenance,
}

impl CameraStatus {
    pub fn label(self) -> &'static str {
        match self {
            CameraStatus::Active => "Activa",
            CameraStatus::Inactive => "Inactiva",
            CameraStatus::Maintenance => "Mantenimiento",
        }
    }
}

impl fmt::Display for CameraStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}


//------------ Camera --------------------------------------------------------

/// A camera as listed by the API.
///
/// The API reports either an active flag, a status, or both. An explicit
/// status wins over the flag.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Camera {
    pub id: ObjectId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub location: String,

    #[serde(
        default, alias = "is_active", alias = "isActive",
        skip_serializing_if = "Option::is_none"
    )]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CameraStatus>,

    /// The address the API reports for the camera.
    ///
    /// This is informational only. Playback sources come from the stream
    /// table.
    #[serde(
        default, alias = "source_address", alias = "ip_address",
        alias = "ipAddress", alias = "stream_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
}

impl Camera {
    pub fn status(&self) -> CameraStatus {
        match (self.status, self.active) {
            (Some(status), _) => status,
            (None, Some(true)) => CameraStatus::Active,
            (None, _) => CameraStatus::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == CameraStatus::Active
    }
}

impl Record for Camera {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "{:<6} {:<20} {:<24} {}",
            self.id, self.name, self.location, self.status()
        )
    }
}


//------------ NewCamera -----------------------------------------------------

/// A camera to be added through the admin dashboard.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewCamera {
    pub name: String,
    pub location: String,
    pub ip_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for NewCamera {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NewCamera")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("ip_address", &self.ip_address)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<hidden>"))
            .finish()
    }
}


//============ Tests =========================================================
