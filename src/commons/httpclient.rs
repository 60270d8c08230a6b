//! Some helper functions for HTTP calls
use std::{env, fmt, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::auth::Token;
use crate::api::status::ErrorResponse;
use crate::constants::{
    CAMADMIN_CLI_API_ENV, CAMADMIN_USER_AGENT, HTTP_CLIENT_TIMEOUT_SECS,
};

const JSON_CONTENT: &str = "application/json";
const FORM_CONTENT: &str = "application/x-www-form-urlencoded";

fn api_only() -> bool {
    env::var(CAMADMIN_CLI_API_ENV).is_ok()
}

fn report_and_exit(
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    token: Option<&Token>,
    body: Option<&str>,
) {
    println!("{}:\n  {}", method, uri);

    if content_type.is_some() || token.is_some() {
        println!("Headers:");
    }
    if let Some(content_type) = content_type {
        println!("  content-type: {}", content_type);
    }
    if token.is_some() {
        println!("  Authorization: Bearer <token>");
    }
    if let Some(body) = body {
        println!("Body:\n{}", body);
    }
    std::process::exit(0);
}

/// Performs a GET request that expects a json response that can be
/// deserialized into the an owned value of the expected type. Returns an error
/// if nothing is returned.
pub async fn get_json<T: DeserializeOwned>(
    uri: &str, token: Option<&Token>,
) -> Result<T, Error> {
    if api_only() {
        report_and_exit("GET", uri, None, token, None);
    }

    let headers = headers(uri, Some(JSON_CONTENT), token)?;
    let res = client(uri)?
        .get(uri)
        .headers(headers)
        .send()
        .await
        .map_err(|e| Error::execute(uri, e))?;

    process_json_response(uri, res).await
}

/// Performs a POST of data that can be serialized into json, and expects
/// a 2xx response. Any response body is discarded.
pub async fn post_json(
    uri: &str, data: impl Serialize, token: Option<&Token>,
) -> Result<(), Error> {
    let res = do_json_post(uri, data, token).await?;
    opt_text_response(uri, res).await?;
    Ok(())
}

/// Performs a POST of data that can be serialized into json, and expects
/// a json response that can be deserialized into the an owned value of the
/// expected type.
pub async fn post_json_with_response<T: DeserializeOwned>(
    uri: &str,
    data: impl Serialize,
    token: Option<&Token>,
) -> Result<T, Error> {
    let res = do_json_post(uri, data, token).await?;
    process_json_response(uri, res).await
}

async fn do_json_post(
    uri: &str, data: impl Serialize, token: Option<&Token>,
) -> Result<Response, Error> {
    let body = serde_json::to_string_pretty(&data)
        .map_err(|e| Error::request_build_json(uri, e))?;

    if api_only() {
        report_and_exit("POST", uri, Some(JSON_CONTENT), token, Some(&body));
    }

    let headers = headers(uri, Some(JSON_CONTENT), token)?;
    client(uri)?
        .post(uri)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| Error::execute(uri, e))
}

/// Performs a POST of form encoded data, and expects a json response.
///
/// The body is never printed in API-only mode as it typically holds a
/// password.
pub async fn post_form_with_response<T: DeserializeOwned>(
    uri: &str, data: &impl Serialize,
) -> Result<T, Error> {
    if api_only() {
        report_and_exit("POST", uri, Some(FORM_CONTENT), None, Some("<form>"));
    }

    let headers = headers(uri, None, None)?;
    let res = client(uri)?
        .post(uri)
        .headers(headers)
        .form(data)
        .send()
        .await
        .map_err(|e| Error::execute(uri, e))?;

    process_json_response(uri, res).await
}

/// Performs a PATCH of data that can be serialized into json, and expects a
/// 2xx response. Any response body is discarded.
pub async fn patch_json(
    uri: &str, data: impl Serialize, token: Option<&Token>,
) -> Result<(), Error> {
    let body = serde_json::to_string_pretty(&data)
        .map_err(|e| Error::request_build_json(uri, e))?;

    if api_only() {
        report_and_exit("PATCH", uri, Some(JSON_CONTENT), token, Some(&body));
    }

    let headers = headers(uri, Some(JSON_CONTENT), token)?;
    let res = client(uri)?
        .patch(uri)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| Error::execute(uri, e))?;

    opt_text_response(uri, res).await?;
    Ok(())
}

/// Sends a delete request to the specified url.
pub async fn delete(uri: &str, token: Option<&Token>) -> Result<(), Error> {
    if api_only() {
        report_and_exit("DELETE", uri, None, token, None);
    }

    let headers = headers(uri, None, token)?;
    let res = client(uri)?
        .delete(uri)
        .headers(headers)
        .send()
        .await
        .map_err(|e| Error::execute(uri, e))?;

    opt_text_response(uri, res).await?;
    Ok(())
}

/// Default client for console use cases.
#[allow(clippy::result_large_err)]
pub fn client(uri: &str) -> Result<reqwest::Client, Error> {
    let builder = reqwest::ClientBuilder::new()
        .timeout(Duration::from_secs(HTTP_CLIENT_TIMEOUT_SECS));

    if uri.starts_with("https://localhost")
        || uri.starts_with("https://127.0.0.1")
    {
        builder.danger_accept_invalid_certs(true).build()
    } else {
        builder.build()
    }
    .map_err(|e| Error::request_build(uri, e))
}

#[allow(clippy::result_large_err)]
fn headers(
    uri: &str, content_type: Option<&str>, token: Option<&Token>,
) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CAMADMIN_USER_AGENT));

    if let Some(content_type) = content_type {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type)
                .map_err(|e| Error::request_build(uri, e))?,
        );
    }
    if let Some(token) = token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::request_build(uri, e))?,
        );
    }
    Ok(headers)
}

async fn process_json_response<T: DeserializeOwned>(
    uri: &str, res: Response,
) -> Result<T, Error> {
    match opt_text_response(uri, res).await? {
        None => Err(Error::response(uri, "got empty response body")),
        Some(s) => serde_json::from_str(&s).map_err(|e| {
            Error::response(uri, format!("could not parse JSON response: {}", e))
        }),
    }
}

async fn opt_text_response(
    uri: &str, res: Response,
) -> Result<Option<String>, Error> {
    let status = res.status();
    if status.is_success() {
        match res.text().await.ok() {
            Some(s) if !s.is_empty() => Ok(Some(s)),
            _ => Ok(None),
        }
    }
    else {
        match status {
            StatusCode::UNAUTHORIZED => {
                Err(Error::from_res(uri, res).await.into_unauthorized())
            }
            StatusCode::FORBIDDEN => {
                Err(Error::from_res(uri, res).await.into_forbidden())
            }
            _ => Err(Error::from_res(uri, res).await),
        }
    }
}

//------------ Error ---------------------------------------------------------

type ErrorUri = String;
type ErrorMessage = String;

#[derive(Debug)]
pub enum Error {
    RequestBuild(ErrorUri, ErrorMessage),

    RequestExecute(ErrorUri, ErrorMessage),

    Response(ErrorUri, ErrorMessage),
    Unauthorized(ErrorUri, Option<ErrorResponse>),
    Forbidden(ErrorUri, Option<ErrorResponse>),
    ErrorResponseWithBody(ErrorUri, StatusCode, String),
    ErrorResponseWithJson(ErrorUri, StatusCode, ErrorResponse),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::RequestBuild(uri, msg) => {
                write!(f, "Issue creating request for URI: {}, error: {}", uri, msg)
            }
            Error::RequestExecute(uri, msg) => {
                write!(f, "Issue accessing URI: {}, error: {}", uri, msg)
            }
            Error::Response(uri, msg) => {
                write!(f, "Issue processing response from URI: {}, error: {}", uri, msg)
            }
            Error::Unauthorized(uri, _) => {
                write!(f, "Got 'Unauthorized' response for URI: {}", uri)
            }
            Error::Forbidden(uri, _) => {
                write!(f, "Got 'Forbidden' response for URI: {}", uri)
            }
            Error::ErrorResponseWithBody(uri, code, e) => {
                write!(f, "Error response from URI: {}, Status: {}, Error: {}", uri, code, e)
            }
            Error::ErrorResponseWithJson(uri, code, res) => write!(
                f,
                "Error response from URI: {}, Status: {}, ErrorResponse: {}",
                uri, code, res
            ),
        }
    }
}

impl std::error::Error for Error { }

impl Error {
    pub fn request_build(uri: &str, msg: impl fmt::Display) -> Self {
        Error::RequestBuild(uri.to_string(), msg.to_string())
    }

    pub fn request_build_json(uri: &str, e: impl fmt::Display) -> Self {
        Error::RequestBuild(
            uri.to_string(),
            format!("could not serialize type to JSON: {}", e)
        )
    }

    pub fn execute(uri: &str, msg: impl fmt::Display) -> Self {
        Error::RequestExecute(uri.to_string(), msg.to_string())
    }

    pub fn response(uri: &str, msg: impl fmt::Display) -> Self {
        Error::Response(uri.to_string(), msg.to_string())
    }

    pub fn unexpected_status(status: StatusCode) -> String {
        format!("unexpected status code {}", status)
    }

    pub fn response_unexpected_status(uri: &str, status: StatusCode) -> Self {
        Error::Response(uri.to_string(), Self::unexpected_status(status))
    }

    /// Returns the error detail the server sent along, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::ErrorResponseWithJson(_, _, res) => res.detail_message(),
            Error::Unauthorized(_, Some(res)) => res.detail_message(),
            Error::Forbidden(_, Some(res)) => res.detail_message(),
            _ => None,
        }
    }

    fn into_unauthorized(self) -> Self {
        match self {
            Error::ErrorResponseWithJson(uri, _, res) => {
                Error::Unauthorized(uri, Some(res))
            }
            Error::ErrorResponseWithBody(uri, _, _) | Error::Response(uri, _) => {
                Error::Unauthorized(uri, None)
            }
            other => other,
        }
    }

    fn into_forbidden(self) -> Self {
        match self {
            Error::ErrorResponseWithJson(uri, _, res) => {
                Error::Forbidden(uri, Some(res))
            }
            Error::ErrorResponseWithBody(uri, _, _) | Error::Response(uri, _) => {
                Error::Forbidden(uri, None)
            }
            other => other,
        }
    }

    async fn from_res(uri: &str, res: Response) -> Error {
        let status = res.status();
        match res.text().await {
            Ok(body) => {
                if body.is_empty() {
                    Self::response_unexpected_status(uri, status)
                } else {
                    match serde_json::from_str::<ErrorResponse>(&body) {
                        Ok(res) => Error::ErrorResponseWithJson(uri.to_string(), status, res),
                        Err(_) => Error::ErrorResponseWithBody(uri.to_string(), status, body),
                    }
                }
            }
            _ => Self::response_unexpected_status(uri, status),
        }
    }
}


//============ Tests =========================================================
