//! The camera dashboards.

use std::fmt;
use log::info;
use serde::Serialize;
use crate::api::cameras::{Camera, CameraStatus, NewCamera};
use crate::api::ident::ObjectId;
use crate::auth::{AdminTab, PageId, Permission};
use super::backend::ConsoleApi;
use super::cameras::{Feed, StreamTable};
use super::context::Console;
use super::error::{Action, Error};
use super::resource::RemoteList;
use super::validate;


//------------ CameraStats ---------------------------------------------------

/// Camera counts shown at the top of the dashboard.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CameraStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub maintenance: usize,
}

impl CameraStats {
    pub fn from_list(cameras: &RemoteList<Camera>) -> Self {
        let count = |status: CameraStatus| {
            cameras.count_where(|cam| cam.status() == status)
        };
        CameraStats {
            total: cameras.len(),
            active: count(CameraStatus::Active),
            inactive: count(CameraStatus::Inactive),
            maintenance: count(CameraStatus::Maintenance),
        }
    }
}


impl fmt::Display for CameraStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f, "Cámaras: {} (activas {}, inactivas {}, mantenimiento {})",
            self.total, self.active, self.inactive, self.maintenance
        )
    }
}


//------------ GridCell ------------------------------------------------------

/// A camera with the feed shown for it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GridCell {
    pub camera: Camera,
    pub feed: Feed,
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n    {}", self.camera, self.feed)
    }
}


//------------ Dashboard -----------------------------------------------------

/// The camera grid.
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    cameras: RemoteList<Camera>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cameras(&self) -> &RemoteList<Camera> {
        &self.cameras
    }

    pub async fn load<A: ConsoleApi>(
        &mut self, console: &Console<A>,
    ) -> Result<(), Error> {
        let token = console.authorize(Permission::ViewCameras)?;
        self.cameras.load(console.api().cameras(token).await.map_err(|err| {
            Error::api(Action::ListCameras, err)
        }))
    }

    pub fn stats(&self) -> CameraStats {
        CameraStats::from_list(&self.cameras)
    }

    /// Returns the grid in API order.
    pub fn grid(&self, streams: &StreamTable) -> Vec<GridCell> {
        self.cameras.items().iter().map(|camera| {
            GridCell { camera: camera.clone(), feed: streams.feed(camera) }
        }).collect()
    }

    /// Returns the grid cell of a single camera.
    pub fn select(
        &self, streams: &StreamTable, id: &ObjectId
    ) -> Option<GridCell> {
        self.cameras.get(id).map(|camera| {
            GridCell { camera: camera.clone(), feed: streams.feed(camera) }
        })
    }
}


//------------ AdminDashboard ------------------------------------------------

/// The administrator dashboard with its camera management tab.
#[derive(Clone, Debug)]
pub struct AdminDashboard {
    tabs: Vec<AdminTab>,
    cameras: RemoteList<Camera>,
}

impl AdminDashboard {
    /// Opens the dashboard, working out the tabs available to the session.
    pub fn open<A: ConsoleApi>(console: &Console<A>) -> Result<Self, Error> {
        console.authorize_page(PageId::AdminDashboard)?;
        Ok(AdminDashboard {
            tabs: console.gate().admin_tabs(),
            cameras: RemoteList::new(),
        })
    }

    pub fn tabs(&self) -> &[AdminTab] {
        &self.tabs
    }

    pub fn has_tab(&self, tab: AdminTab) -> bool {
        self.tabs.contains(&tab)
    }

    pub fn cameras(&self) -> &RemoteList<Camera> {
        &self.cameras
    }

    pub fn stats(&self) -> CameraStats {
        CameraStats::from_list(&self.cameras)
    }

    pub async fn load_cameras<A: ConsoleApi>(
        &mut self, console: &Console<A>,
    ) -> Result<(), Error> {
        let token = console.authorize(AdminTab::Cameras.required_permission())?;
        self.cameras.load(console.api().cameras(token).await.map_err(|err| {
            Error::api(Action::ListCameras, err)
        }))
    }

    pub async fn add_camera<A: ConsoleApi>(
        &mut self, console: &Console<A>, camera: &NewCamera,
    ) -> Result<(), Error> {
        let token = console.authorize(Permission::ManageCameras)?;
        validate::new_camera(camera)?;
        console.api().add_camera(token, camera).await.map_err(|err| {
            Error::api(Action::CreateCamera, err)
        })?;
        info!("Added camera {} at {}", camera.name, camera.location);
        Ok(())
    }

    pub async fn delete_camera<A: ConsoleApi>(
        &mut self, console: &Console<A>, id: &ObjectId,
    ) -> Result<(), Error> {
        let token = console.authorize(Permission::ManageCameras)?;
        console.api().delete_camera(token, id).await.map_err(|err| {
            Error::api(Action::DeleteCamera, err)
        })?;
        info!("Deleted camera {}", id);
        self.cameras.remove(id);
        Ok(())
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::Credentials;
    use crate::auth::AuthProvider;
    use crate::config::Config;
    use crate::console::ValidationError;
    use crate::test::TestApi;

    async fn console_as(username: &str) -> Console<TestApi> {
        let api = TestApi::new()
            .with_account("admin", "clave", "administrador")
            .with_account("sup", "clave", "supervisor")
            .with_account("op", "clave", "operario")
            .with_camera(1, CameraStatus::Active)
            .with_camera(2, CameraStatus::Inactive)
            .with_camera(3, CameraStatus::Active)
            .with_camera(4, CameraStatus::Maintenance);
        let mut console = Console::new(api, AuthProvider::default());
        console.login(&Credentials::new(username, "clave")).await.unwrap();
        console
    }

    #[tokio::test]
    async fn operator_sees_grid() {
        let console = console_as("op").await;
        let mut dashboard = Dashboard::new();
        dashboard.load(&console).await.unwrap();

        assert_eq!(
            dashboard.stats(),
            CameraStats { total: 4, active: 2, inactive: 1, maintenance: 1 }
        );

        let streams = Config::default().stream_table().unwrap();
        let grid = dashboard.grid(&streams);
        assert_eq!(grid.len(), 4);
        assert_eq!(
            grid[0].feed.url(), Some("http://localhost:8888/camara/index.m3u8")
        );
        assert_eq!(
            grid[1].feed, Feed::Placeholder { status: CameraStatus::Inactive }
        );

        let cell = dashboard.select(
            &streams, &ObjectId::from(3)
        ).unwrap();
        assert_eq!(cell.camera.id, ObjectId::from(3));
        assert!(dashboard.select(
            &streams, &ObjectId::from(99)
        ).is_none());
    }

    #[tokio::test]
    async fn only_admins_open_admin_dashboard() {
        let console = console_as("sup").await;
        assert!(matches!(
            AdminDashboard::open(&console),
            Err(Error::Forbidden(Permission::ManageSettings))
        ));

        let console = console_as("admin").await;
        let admin = AdminDashboard::open(&console).unwrap();
        assert_eq!(admin.tabs(), AdminTab::ALL);
        assert!(admin.has_tab(AdminTab::Settings));
    }

    #[tokio::test]
    async fn admin_manages_cameras() {
        let console = console_as("admin").await;
        let mut admin = AdminDashboard::open(&console).unwrap();
        admin.load_cameras(&console).await.unwrap();
        assert_eq!(admin.stats().total, 4);

        let mut camera = NewCamera {
            name: "Cámara 5".into(),
            location: String::new(),
            ip_address: "192.0.2.5".into(),
            username: None,
            password: None,
        };
        assert!(matches!(
            admin.add_camera(&console, &camera).await,
            Err(Error::Validation(ValidationError::MissingFields))
        ));
        camera.location = "Oficina Principal".into();
        admin.add_camera(&console, &camera).await.unwrap();

        admin.delete_camera(&console, &ObjectId::from(2)).await.unwrap();
        assert_eq!(admin.cameras().len(), 3);

        admin.load_cameras(&console).await.unwrap();
        assert_eq!(admin.stats().total, 4);
    }
}
