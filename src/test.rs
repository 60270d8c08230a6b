//! Helpers for testing the console.
#![cfg(test)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use reqwest::StatusCode;
use crate::api::attendees::{Attendee, NewAttendee};
use crate::api::auth::{Credentials, Registration, Token, TokenResponse};
use crate::api::cameras::{Camera, CameraStatus, NewCamera};
use crate::api::ident::ObjectId;
use crate::api::status::ErrorResponse;
use crate::api::users::{NewUser, User};
use crate::auth::Role;
use crate::commons::httpclient::Error;
use crate::console::ConsoleApi;


/// Sets up a temporary directory and runs the test in the closure with it.
///
/// The directory is removed when the closure returns.
pub fn test_under_tmp<F>(op: F)
where
    F: FnOnce(PathBuf),
{
    let dir = tempfile::tempdir().unwrap();
    op(dir.path().into());
}


//------------ TestApi -------------------------------------------------------

/// An in-memory console API.
///
/// It keeps the collections in memory, checks bearer tokens, and counts the
/// requests it receives so tests can assert that nothing was sent.
#[derive(Debug, Default)]
pub struct TestApi {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<(String, String, String)>,
    tokens: Vec<Token>,
    users: Vec<User>,
    attendees: Vec<Attendee>,
    cameras: Vec<Camera>,
    registrations: Vec<String>,
    failures: HashMap<String, (StatusCode, Option<String>)>,
    requests: usize,
    next_id: u64,
}

impl TestApi {
    pub fn new() -> Self {
        let res = Self::default();
        res.state.lock().unwrap().next_id = 100;
        res
    }

    pub fn with_account(self, username: &str, password: &str, role: &str) -> Self {
        self.state.lock().unwrap().accounts.push(
            (username.into(), password.into(), role.into())
        );
        self
    }

    pub fn with_user(self, id: u64, name: &str, role: &str) -> Self {
        self.state.lock().unwrap().users.push(User {
            id: id.into(),
            name: name.into(),
            username: name.to_lowercase().replace(' ', ""),
            email: None,
            role: role.into(),
        });
        self
    }

    pub fn with_attendee(self, id: u64, name: &str) -> Self {
        self.state.lock().unwrap().attendees.push(Attendee {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            name: Some(name.into()),
            email: format!("asistente{}@example.com", id),
            company: None,
        });
        self
    }

    pub fn with_camera(self, id: u64, status: CameraStatus) -> Self {
        self.state.lock().unwrap().cameras.push(Camera {
            id: id.into(),
            name: format!("Cámara {}", id),
            location: format!("Ubicación {}", id),
            active: None,
            status: Some(status),
            source: None,
        });
        self
    }

    /// Makes the next request to the given collection fail.
    pub fn fail_next(&self, path: &str, status: u16, detail: Option<&str>) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state.lock().unwrap().failures.insert(
            path.into(), (status, detail.map(Into::into))
        );
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    pub fn registrations(&self) -> Vec<String> {
        self.state.lock().unwrap().registrations.clone()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn user_role(&self, id: &ObjectId) -> Option<String> {
        self.state.lock().unwrap().users.iter().find(|user| {
            &user.id == id
        }).map(|user| user.role.clone())
    }
}

fn uri(path: &str) -> String {
    format!("http://localhost:8000/{}", path)
}

fn not_found(path: &str) -> Error {
    Error::ErrorResponseWithJson(
        uri(path), StatusCode::NOT_FOUND,
        ErrorResponse::new("Registro no encontrado")
    )
}

impl State {
    fn request(
        &mut self, path: &str, token: Option<&Token>
    ) -> Result<(), Error> {
        self.requests += 1;
        if let Some((status, detail)) = self.failures.remove(path) {
            return Err(match detail {
                Some(detail) => Error::ErrorResponseWithJson(
                    uri(path), status, ErrorResponse::new(detail)
                ),
                None => Error::response_unexpected_status(&uri(path), status),
            })
        }
        if let Some(token) = token {
            if !self.tokens.contains(token) {
                return Err(Error::Unauthorized(uri(path), None))
            }
        }
        Ok(())
    }

    fn next_id(&mut self) -> ObjectId {
        self.next_id += 1;
        self.next_id.into()
    }
}

fn remove_by_id<T>(
    items: &mut Vec<T>, id: &ObjectId, get: impl Fn(&T) -> &ObjectId,
) -> bool {
    let len = items.len();
    items.retain(|item| get(item) != id);
    items.len() != len
}

impl ConsoleApi for TestApi {
    async fn token(
        &self, credentials: &Credentials,
    ) -> Result<TokenResponse, Error> {
        let mut state = self.state.lock().unwrap();
        state.request("token", None)?;
        let role = state.accounts.iter().find(|(user, pass, _)| {
            *user == credentials.username && *pass == credentials.password
        }).map(|(_, _, role)| role.clone());

        match role {
            Some(role) => {
                let token = Token::from(format!("token-{}", credentials.username));
                state.tokens.push(token.clone());
                Ok(TokenResponse {
                    access_token: token,
                    token_type: "bearer".into(),
                    role,
                })
            }
            None => Err(Error::Unauthorized(
                uri("token"),
                Some(ErrorResponse::new("Usuario o contraseña incorrectos"))
            )),
        }
    }

    async fn register(
        &self, registration: &Registration,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.request("register", None)?;
        state.registrations.push(registration.username.clone());
        Ok(())
    }

    async fn users(&self, token: &Token) -> Result<Vec<User>, Error> {
        let mut state = self.state.lock().unwrap();
        state.request("users", Some(token))?;
        Ok(state.users.clone())
    }

    async fn add_user(
        &self, token: &Token, user: &NewUser,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.request("users", Some(token))?;
        let id = state.next_id();
        state.users.push(User {
            id,
            name: user.name.clone(),
            username: user.username.clone(),
            email: None,
            role: user.role.as_str().into(),
        });
        Ok(())
    }

    async fn delete_user(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.request("users", Some(token))?;
        if remove_by_id(&mut state.users, id, |user| &user.id) {
            Ok(())
        }
        else {
            Err(not_found("users"))
        }
    }

    async fn update_role(
        &self, token: &Token, id: &ObjectId, role: Role,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.request("users", Some(token))?;
        match state.users.iter_mut().find(|user| &user.id == id) {
            Some(user) => {
                user.role = role.as_str().into();
                Ok(())
            }
            None => Err(not_found("users")),
        }
    }

    async fn attendees(&self, token: &Token) -> Result<Vec<Attendee>, Error> {
        let mut state = self.state.lock().unwrap();
        state.request("attendees", Some(token))?;
        Ok(state.attendees.clone())
    }

    async fn add_attendee(
        &self, token: &Token, attendee: &NewAttendee,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.request("attendees", Some(token))?;
        let id = state.next_id();
        state.attendees.push(Attendee {
            id,
            first_name: attendee.first_name.clone(),
            last_name: attendee.last_name.clone(),
            name: None,
            email: attendee.email.clone(),
            company: Some(attendee.company.clone()),
        });
        Ok(())
    }

    async fn delete_attendee(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.request("attendees", Some(token))?;
        if remove_by_id(&mut state.attendees, id, |item| &item.id) {
            Ok(())
        }
        else {
            Err(not_found("attendees"))
        }
    }

    async fn cameras(&self, token: &Token) -> Result<Vec<Camera>, Error> {
        let mut state = self.state.lock().unwrap();
        state.request("cameras", Some(token))?;
        Ok(state.cameras.clone())
    }

    async fn add_camera(
        &self, token: &Token, camera: &NewCamera,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.request("cameras", Some(token))?;
        let id = state.next_id();
        state.cameras.push(Camera {
            id,
            name: camera.name.clone(),
            location: camera.location.clone(),
            active: Some(true),
            status: None,
            source: Some(camera.ip_address.clone()),
        });
        Ok(())
    }

    async fn delete_camera(
        &self, token: &Token, id: &ObjectId,
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.request("cameras", Some(token))?;
        if remove_by_id(&mut state.cameras, id, |item| &item.id) {
            Ok(())
        }
        else {
            Err(not_found("cameras"))
        }
    }
}
