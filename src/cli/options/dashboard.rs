//! Options for showing the dashboards.

use std::fmt;
use serde::Serialize;
use crate::auth::{AdminTab, PageId};
use crate::cli::client::{ConsoleClient, Error};
use crate::console::dashboard::{self, AdminDashboard, CameraStats, GridCell};


//------------ Dashboard -----------------------------------------------------

#[derive(clap::Parser)]
pub struct Dashboard;

impl Dashboard {
    pub async fn run(
        self, client: &mut ConsoleClient
    ) -> Result<GridReport, Error> {
        client.open(PageId::Dashboard)?;
        let mut dashboard = dashboard::Dashboard::new();
        dashboard.load(client.console()).await?;
        Ok(GridReport {
            stats: dashboard.stats(),
            cells: dashboard.grid(client.streams()),
        })
    }
}

/// The camera grid with its counts.
#[derive(Clone, Debug, Serialize)]
pub struct GridReport {
    stats: CameraStats,
    cells: Vec<GridCell>,
}

impl fmt::Display for GridReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.stats)?;
        for cell in &self.cells {
            write!(f, "\n  {}", cell)?;
        }
        Ok(())
    }
}


//------------ Admin ---------------------------------------------------------

#[derive(clap::Parser)]
pub struct Admin;

impl Admin {
    pub async fn run(
        self, client: &mut ConsoleClient
    ) -> Result<AdminReport, Error> {
        client.open(PageId::AdminDashboard)?;
        let mut admin = AdminDashboard::open(client.console())?;
        let stats = if admin.has_tab(AdminTab::Cameras) {
            admin.load_cameras(client.console()).await?;
            Some(admin.stats())
        }
        else {
            None
        };
        Ok(AdminReport { tabs: admin.tabs().to_vec(), stats })
    }
}

/// The tabs of the admin dashboard and the camera counts.
#[derive(Clone, Debug, Serialize)]
pub struct AdminReport {
    tabs: Vec<AdminTab>,

    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<CameraStats>,
}

impl fmt::Display for AdminReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Panel de Administración")?;
        for tab in &self.tabs {
            write!(f, "\n  [{}]", tab.label())?;
        }
        if let Some(stats) = self.stats {
            write!(f, "\n{}", stats)?;
        }
        Ok(())
    }
}
