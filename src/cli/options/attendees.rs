//! Options for managing attendees.

use crate::api::attendees::{Attendee, NewAttendee};
use crate::api::ident::ObjectId;
use crate::api::status::Success;
use crate::auth::PageId;
use crate::cli::client::{ConsoleClient, Error};
use crate::cli::report::{RecordList, Report};
use crate::console::attendees::{self, AttendeeList};


//------------ Command -------------------------------------------------------

#[derive(clap::Subcommand)]
pub enum Command {
    /// List all attendees
    List,

    /// Register an attendee
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        company: String,
    },

    /// Delete an attendee
    Delete {
        /// The id of the attendee
        id: ObjectId,
    },
}

impl Command {
    pub async fn run(self, client: &mut ConsoleClient) -> Report {
        match self {
            Self::List => list(client).await.into(),
            Self::Add { first_name, last_name, email, company } => {
                let attendee = NewAttendee {
                    first_name, last_name, email, company
                };
                add(client, attendee).await.into()
            }
            Self::Delete { id } => delete(client, id).await.into(),
        }
    }
}

async fn list(
    client: &mut ConsoleClient
) -> Result<RecordList<Attendee>, Error> {
    client.open(PageId::AttendeeList)?;
    let mut list = AttendeeList::new();
    list.load(client.console()).await?;
    Ok(RecordList::new("Asistentes", list.attendees().items().to_vec()))
}

async fn add(
    client: &mut ConsoleClient, attendee: NewAttendee
) -> Result<Success, Error> {
    client.open(PageId::AddAttendee)?;
    attendees::add_attendee(client.console(), &attendee).await?;
    Ok(Success)
}

async fn delete(
    client: &mut ConsoleClient, id: ObjectId
) -> Result<Success, Error> {
    client.open(PageId::AttendeeList)?;
    let mut list = AttendeeList::new();
    list.delete(client.console(), &id).await?;
    Ok(Success)
}
