//! Errors reported to the console user.

use std::fmt;
use crate::auth::{Permission, SessionError, UnknownRole};
use crate::commons::httpclient;
use super::store::StoreError;
use super::validate::ValidationError;


//------------ Action --------------------------------------------------------

/// A user action that talks to the API.
///
/// Each action has a generic message that is shown when the API fails
/// without saying why.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Login,
    Register,
    ListUsers,
    CreateUser,
    DeleteUser,
    UpdateRole,
    ListAttendees,
    CreateAttendee,
    DeleteAttendee,
    ListCameras,
    CreateCamera,
    DeleteCamera,
}

impl Action {
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::Login => {
                "Error al iniciar sesión. Por favor intente nuevamente."
            }
            Action::Register => {
                "Error al registrar usuario. Por favor intente nuevamente."
            }
            Action::ListUsers => "Error al cargar los usuarios",
            Action::CreateUser => "Error al crear el usuario",
            Action::DeleteUser => "Error al eliminar el usuario",
            Action::UpdateRole => "Error al actualizar el rol",
            Action::ListAttendees => "Error al cargar los asistentes",
            Action::CreateAttendee => "Error al agregar el asistente",
            Action::DeleteAttendee => "Error al eliminar el asistente",
            Action::ListCameras => "Error al cargar las cámaras",
            Action::CreateCamera => "Error al agregar la cámara",
            Action::DeleteCamera => "Error al eliminar la cámara",
        }
    }
}


//------------ Error ---------------------------------------------------------

#[derive(Debug)]
pub enum Error {
    /// An action needing a login was attempted without one.
    NotAuthenticated,

    /// The role of the session lacks the permission for an action.
    Forbidden(Permission),

    Validation(ValidationError),
    Session(SessionError),
    UnknownRole(UnknownRole),

    Api {
        action: Action,
        err: httpclient::Error,
    },

    Store(StoreError),
}

impl Error {
    pub fn api(action: Action, err: httpclient::Error) -> Self {
        Error::Api { action, err }
    }

    /// Returns whether the error happened without contacting the API.
    pub fn is_local(&self) -> bool {
        !matches!(self, Error::Api { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotAuthenticated => {
                f.write_str("Debe iniciar sesión primero")
            }
            Error::Forbidden(permission) => {
                write!(
                    f, "No tiene permiso para realizar esta acción ({})",
                    permission
                )
            }
            Error::Validation(err) => err.fmt(f),
            Error::Session(err) => err.fmt(f),
            Error::UnknownRole(err) => {
                write!(f, "El servidor asignó un rol desconocido: {}", err.0)
            }
            Error::Api { action, err } => {
                match err.detail() {
                    Some(detail) => f.write_str(&detail),
                    None => {
                        if matches!(err, httpclient::Error::Unauthorized(..))
                            && *action != Action::Login
                        {
                            f.write_str(
                                "La sesión ha expirado. Por favor inicie \
                                 sesión nuevamente."
                            )
                        }
                        else {
                            f.write_str(action.failure_message())
                        }
                    }
                }
            }
            Error::Store(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error { }

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Error::Session(err)
    }
}

impl From<UnknownRole> for Error {
    fn from(err: UnknownRole) -> Self {
        Error::UnknownRole(err)
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use crate::api::status::ErrorResponse;

    fn json_error(detail: &str) -> httpclient::Error {
        httpclient::Error::ErrorResponseWithJson(
            "http://localhost:8000/users".into(),
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(detail),
        )
    }

    #[test]
    fn api_detail_is_shown_verbatim() {
        let err = Error::api(
            Action::CreateUser, json_error("El usuario 'ana' ya existe")
        );
        assert_eq!(err.to_string(), "El usuario 'ana' ya existe");
    }

    #[test]
    fn generic_message_without_detail() {
        let err = Error::api(
            Action::Register,
            httpclient::Error::RequestExecute(
                "http://localhost:8000/register".into(),
                "connection refused".into()
            )
        );
        assert_eq!(
            err.to_string(),
            "Error al registrar usuario. Por favor intente nuevamente."
        );

        let err = Error::api(
            Action::DeleteCamera,
            httpclient::Error::Forbidden(
                "http://localhost:8000/cameras/1".into(), None
            )
        );
        assert_eq!(err.to_string(), "Error al eliminar la cámara");
    }

    #[test]
    fn forbidden_detail_is_shown_verbatim() {
        let err = Error::api(
            Action::DeleteUser,
            httpclient::Error::Forbidden(
                "http://localhost:8000/users/1".into(),
                Some(ErrorResponse::new(
                    "No puede eliminar al administrador principal"
                )),
            )
        );
        assert_eq!(
            err.to_string(), "No puede eliminar al administrador principal"
        );
    }

    #[test]
    fn expired_sessions() {
        let err = Error::api(
            Action::ListUsers,
            httpclient::Error::Unauthorized(
                "http://localhost:8000/users".into(), None
            )
        );
        assert!(err.to_string().starts_with("La sesión ha expirado"));

        let err = Error::api(
            Action::Login,
            httpclient::Error::Unauthorized(
                "http://localhost:8000/token".into(), None
            )
        );
        assert_eq!(
            err.to_string(),
            "Error al iniciar sesión. Por favor intente nuevamente."
        );
    }

    #[test]
    fn local_errors() {
        assert!(Error::NotAuthenticated.is_local());
        assert!(Error::from(ValidationError::InvalidEmail).is_local());
        assert!(!Error::api(Action::Login, json_error("x")).is_local());
    }
}
