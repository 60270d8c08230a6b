//! The seam between the console views and the API.

use crate::api::attendees::{Attendee, NewAttendee};
use crate::api::auth::{Credentials, Registration, Token, TokenResponse};
use crate::api::cameras::{Camera, NewCamera};
use crate::api::ident::ObjectId;
use crate::api::users::{NewUser, User};
use crate::auth::Role;
use crate::commons::httpclient::Error;


//------------ ConsoleApi ----------------------------------------------------

/// The calls the console makes to the API.
///
/// Each method is one request. Implementations do not retry and do not
/// check permissions: by the time a method is called the console has
/// already established that the session may make the call.
#[allow(async_fn_in_trait)]
pub trait ConsoleApi {
    /// Exchanges credentials for a bearer token and the user's role.
    async fn token(
        &self, credentials: &Credentials,
    ) -> Result<TokenResponse, Error>;

    async fn register(
        &self, registration: &Registration,
    ) -> Result<(), Error>;

    async fn users(&self, token: &Token) -> Result<Vec<User>, Error>;

    async fn add_user(
        &self, token: &Token, user: &NewUser,
    ) -> Result<(), Error>;

    async fn delete_user(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error>;

    async fn update_role(
        &self, token: &Token, id: &ObjectId, role: Role,
    ) -> Result<(), Error>;

    async fn attendees(&self, token: &Token) -> Result<Vec<Attendee>, Error>;

    async fn add_attendee(
        &self, token: &Token, attendee: &NewAttendee,
    ) -> Result<(), Error>;

    async fn delete_attendee(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error>;

    async fn cameras(&self, token: &Token) -> Result<Vec<Camera>, Error>;

    async fn add_camera(
        &self, token: &Token, camera: &NewCamera,
    ) -> Result<(), Error>;

    async fn delete_camera(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error>;
}
