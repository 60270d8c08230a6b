//! Options for managing cameras and showing their feeds.

use crate::api::cameras::{Camera, NewCamera};
use crate::api::ident::ObjectId;
use crate::api::status::Success;
use crate::auth::PageId;
use crate::cli::client::{ConsoleClient, Error};
use crate::cli::report::{RecordList, Report};
use crate::console::dashboard::{AdminDashboard, Dashboard, GridCell};


//------------ Command -------------------------------------------------------

#[derive(clap::Subcommand)]
pub enum Command {
    /// List all cameras
    List,

    /// Show the feed of a camera
    Feed {
        /// The id of the camera
        id: ObjectId,
    },

    /// Add a camera
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        location: String,

        /// The address of the camera on the network
        #[arg(short, long)]
        ip_address: String,

        /// The user name for the camera, if it needs one
        #[arg(short, long)]
        username: Option<String>,

        /// The password for the camera, if it needs one
        #[arg(short, long, env = "CAMADMIN_CAMERA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Delete a camera
    Delete {
        /// The id of the camera
        id: ObjectId,
    },
}

impl Command {
    pub async fn run(self, client: &mut ConsoleClient) -> Report {
        match self {
            Self::List => list(client).await.into(),
            Self::Feed { id } => feed(client, id).await.into(),
            Self::Add { name, location, ip_address, username, password } => {
                let camera = NewCamera {
                    name, location, ip_address, username, password
                };
                add(client, camera).await.into()
            }
            Self::Delete { id } => delete(client, id).await.into(),
        }
    }
}

/// Opens the page that shows cameras for the session's role.
///
/// Administrators see cameras on their dashboard, everybody else on the
/// camera grid.
fn open_camera_page(client: &mut ConsoleClient) -> Result<PageId, Error> {
    let page = if client.console().gate().allows(PageId::Dashboard) {
        PageId::Dashboard
    }
    else {
        PageId::AdminDashboard
    };
    client.open(page)?;
    Ok(page)
}

async fn load_grid(client: &mut ConsoleClient) -> Result<Dashboard, Error> {
    open_camera_page(client)?;
    let mut dashboard = Dashboard::new();
    dashboard.load(client.console()).await?;
    Ok(dashboard)
}

async fn list(client: &mut ConsoleClient) -> Result<RecordList<Camera>, Error> {
    let dashboard = load_grid(client).await?;
    Ok(RecordList::new("Cámaras", dashboard.cameras().items().to_vec()))
}

async fn feed(
    client: &mut ConsoleClient, id: ObjectId
) -> Result<GridCell, Error> {
    let dashboard = load_grid(client).await?;
    dashboard.select(client.streams(), &id).ok_or_else(|| {
        Error::input(format!("Cámara {} no encontrada", id))
    })
}

async fn add(
    client: &mut ConsoleClient, camera: NewCamera
) -> Result<Success, Error> {
    client.open(PageId::AdminDashboard)?;
    let mut admin = AdminDashboard::open(client.console())?;
    admin.add_camera(client.console(), &camera).await?;
    Ok(Success)
}

async fn delete(
    client: &mut ConsoleClient, id: ObjectId
) -> Result<Success, Error> {
    client.open(PageId::AdminDashboard)?;
    let mut admin = AdminDashboard::open(client.console())?;
    admin.delete_camera(client.console(), &id).await?;
    Ok(Success)
}
