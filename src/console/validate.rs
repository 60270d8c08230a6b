//! Form checks done before anything is sent to the API.

use std::fmt;
use lazy_static::lazy_static;
use regex::Regex;
use crate::api::attendees::NewAttendee;
use crate::api::auth::{Credentials, Registration};
use crate::api::cameras::NewCamera;
use crate::api::users::NewUser;
use crate::auth::Role;


lazy_static! {
    static ref EMAIL: Regex = {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|err| {
            panic!("invalid email pattern: {}", err)
        })
    };
}

/// Returns whether the string looks like an email address.
///
/// This only checks for something, an `@`, something, a dot, and
/// something, with no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}


//------------ Checks --------------------------------------------------------

pub fn login(credentials: &Credentials) -> Result<(), ValidationError> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        Err(ValidationError::MissingCredentials)
    }
    else {
        Ok(())
    }
}

pub fn new_user(user: &NewUser) -> Result<(), ValidationError> {
    if is_blank(&user.name) || is_blank(&user.username)
        || user.password.is_empty()
    {
        Err(ValidationError::MissingFields)
    }
    else {
        Ok(())
    }
}

pub fn new_attendee(attendee: &NewAttendee) -> Result<(), ValidationError> {
    if is_blank(&attendee.first_name) || is_blank(&attendee.last_name)
        || is_blank(&attendee.company) || is_blank(&attendee.email)
    {
        Err(ValidationError::MissingFields)
    }
    else if !is_valid_email(&attendee.email) {
        Err(ValidationError::InvalidEmail)
    }
    else {
        Ok(())
    }
}

pub fn new_camera(camera: &NewCamera) -> Result<(), ValidationError> {
    if is_blank(&camera.name) || is_blank(&camera.location)
        || is_blank(&camera.ip_address)
    {
        Err(ValidationError::MissingFields)
    }
    else {
        Ok(())
    }
}


//------------ RegistrationForm ----------------------------------------------

/// The self-registration form as filled in by the user.
#[derive(Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegistrationForm {
    /// Checks the form and turns it into the request for the API.
    ///
    /// Checks happen in order: all fields present, passwords equal, email
    /// well formed. The first failing check is reported.
    pub fn validate(self) -> Result<Registration, ValidationError> {
        if self.username.is_empty() || self.email.is_empty()
            || self.password.is_empty() || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingFields)
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch)
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail)
        }
        Ok(Registration {
            username: self.username,
            email: self.email,
            password: self.password,
            role: self.role,
        })
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}


//------------ ValidationError -----------------------------------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationError {
    MissingCredentials,
    MissingFields,
    PasswordMismatch,
    InvalidEmail,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ValidationError::MissingCredentials => {
                "Por favor ingrese usuario y contraseña"
            }
            ValidationError::MissingFields => {
                "Por favor complete todos los campos"
            }
            ValidationError::PasswordMismatch => {
                "Las contraseñas no coinciden"
            }
            ValidationError::InvalidEmail => {
                "Por favor ingrese un correo electrónico válido"
            }
        })
    }
}

impl std::error::Error for ValidationError { }


//============ Tests =========================================================
