//! The console API over HTTP.

use url::Url;
use crate::api::attendees::{Attendee, NewAttendee};
use crate::api::auth::{Credentials, Registration, Token, TokenResponse};
use crate::api::cameras::{Camera, NewCamera};
use crate::api::ident::ObjectId;
use crate::api::users::{NewUser, RoleUpdate, User};
use crate::auth::Role;
use crate::commons::httpclient::{self, Error};
use crate::constants::{
    API_ATTENDEES_PATH, API_CAMERAS_PATH, API_REGISTER_PATH, API_TOKEN_PATH,
    API_USERS_PATH,
};
use super::backend::ConsoleApi;


//------------ HttpConsoleApi ------------------------------------------------

/// Talks to the console API at a base URI.
#[derive(Clone, Debug)]
pub struct HttpConsoleApi {
    base: Url,
}

impl HttpConsoleApi {
    pub fn new(base: Url) -> Self {
        HttpConsoleApi { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the URI for the given path segments below the base.
    ///
    /// Segments are percent encoded, so ids can never escape their place
    /// in the path.
    pub fn uri(&self, segments: &[&str]) -> Result<String, Error> {
        let mut uri = self.base.clone();
        uri.path_segments_mut()
            .map_err(|_| {
                Error::request_build(self.base.as_str(), "not a base URI")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(uri.into())
    }
}

impl ConsoleApi for HttpConsoleApi {
    async fn token(
        &self, credentials: &Credentials,
    ) -> Result<TokenResponse, Error> {
        let uri = self.uri(&[API_TOKEN_PATH])?;
        httpclient::post_form_with_response(&uri, credentials).await
    }

    async fn register(
        &self, registration: &Registration,
    ) -> Result<(), Error> {
        let uri = self.uri(&[API_REGISTER_PATH])?;
        httpclient::post_json(&uri, registration, None).await
    }

    async fn users(&self, token: &Token) -> Result<Vec<User>, Error> {
        let uri = self.uri(&[API_USERS_PATH])?;
        httpclient::get_json(&uri, Some(token)).await
    }

    async fn add_user(
        &self, token: &Token, user: &NewUser,
    ) -> Result<(), Error> {
        let uri = self.uri(&[API_USERS_PATH])?;
        httpclient::post_json(&uri, user, Some(token)).await
    }

    async fn delete_user(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error> {
        let uri = self.uri(&[API_USERS_PATH, id.as_str()])?;
        httpclient::delete(&uri, Some(token)).await
    }

    async fn update_role(
        &self, token: &Token, id: &ObjectId, role: Role,
    ) -> Result<(), Error> {
        let uri = self.uri(&[API_USERS_PATH, id.as_str(), "role"])?;
        httpclient::patch_json(&uri, RoleUpdate { role }, Some(token)).await
    }

    async fn attendees(&self, token: &Token) -> Result<Vec<Attendee>, Error> {
        let uri = self.uri(&[API_ATTENDEES_PATH])?;
        httpclient::get_json(&uri, Some(token)).await
    }

    async fn add_attendee(
        &self, token: &Token, attendee: &NewAttendee,
    ) -> Result<(), Error> {
        let uri = self.uri(&[API_ATTENDEES_PATH])?;
        httpclient::post_json(&uri, attendee, Some(token)).await
    }

    async fn delete_attendee(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error> {
        let uri = self.uri(&[API_ATTENDEES_PATH, id.as_str()])?;
        httpclient::delete(&uri, Some(token)).await
    }

    async fn cameras(&self, token: &Token) -> Result<Vec<Camera>, Error> {
        let uri = self.uri(&[API_CAMERAS_PATH])?;
        httpclient::get_json(&uri, Some(token)).await
    }

    async fn add_camera(
        &self, token: &Token, camera: &NewCamera,
    ) -> Result<(), Error> {
        let uri = self.uri(&[API_CAMERAS_PATH])?;
        httpclient::post_json(&uri, camera, Some(token)).await
    }

    async fn delete_camera(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error> {
        let uri = self.uri(&[API_CAMERAS_PATH, id.as_str()])?;
        httpclient::delete(&uri, Some(token)).await
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpConsoleApi {
        HttpConsoleApi::new(Url::parse(base).unwrap())
    }

    #[test]
    fn uris_below_base() {
        let api = api("http://localhost:8000/");
        assert_eq!(
            api.uri(&["users"]).unwrap(),
            "http://localhost:8000/users"
        );
        assert_eq!(
            api.uri(&["users", "42", "role"]).unwrap(),
            "http://localhost:8000/users/42/role"
        );

        let api = self::api("https://console.example.net/api/");
        assert_eq!(
            api.uri(&["cameras", "7"]).unwrap(),
            "https://console.example.net/api/cameras/7"
        );
    }

    #[test]
    fn ids_cannot_leave_their_segment() {
        let api = api("http://localhost:8000/");
        assert_eq!(
            api.uri(&["users", "../token"]).unwrap(),
            "http://localhost:8000/users/..%2Ftoken"
        );
    }
}
