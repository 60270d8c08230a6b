//! The attendee views.

use log::info;
use crate::api::attendees::{Attendee, NewAttendee};
use crate::api::ident::ObjectId;
use crate::auth::{PageId, Permission};
use super::backend::ConsoleApi;
use super::context::Console;
use super::error::{Action, Error};
use super::resource::RemoteList;
use super::validate;


//------------ AttendeeList --------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct AttendeeList {
    attendees: RemoteList<Attendee>,
}

impl AttendeeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attendees(&self) -> &RemoteList<Attendee> {
        &self.attendees
    }

    pub async fn load<A: ConsoleApi>(
        &mut self, console: &Console<A>,
    ) -> Result<(), Error> {
        let token = console.authorize_page(PageId::AttendeeList)?;
        let res = console.api().attendees(token).await.map_err(|err| {
            Error::api(Action::ListAttendees, err)
        });
        self.attendees.load(res)
    }

    pub async fn delete<A: ConsoleApi>(
        &mut self, console: &Console<A>, id: &ObjectId,
    ) -> Result<(), Error> {
        let token = console.authorize(Permission::ManageAttendees)?;
        console.api().delete_attendee(token, id).await.map_err(|err| {
            Error::api(Action::DeleteAttendee, err)
        })?;
        info!("Deleted attendee {}", id);
        self.attendees.remove(id);
        Ok(())
    }
}


//------------ add_attendee --------------------------------------------------

pub async fn add_attendee<A: ConsoleApi>(
    console: &Console<A>, attendee: &NewAttendee,
) -> Result<(), Error> {
    let token = console.authorize(Permission::ManageAttendees)?;
    validate::new_attendee(attendee)?;
    console.api().add_attendee(token, attendee).await.map_err(|err| {
        Error::api(Action::CreateAttendee, err)
    })?;
    info!(
        "Added attendee {} {}", attendee.first_name, attendee.last_name
    );
    Ok(())
}


//============ Tests =========================================================
