//! Interpretation of service-level rejections on top of signed requests.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::{Client, Error};

const NOT_FOUND_TEXT: &str = "Plurk not found";
const NO_PERMISSION_TEXT: &str = "No permissions";
const ANTI_FLOOD_PREFIX: &str = "anti-flood-";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("the plurk requested is not found")]
    NotFound,
    #[error("the current user has no permission to the requested plurk")]
    NoPermission,
    #[error("the request was rejected by the anti-flood system")]
    Flood,
    #[error("the service rejected the request due to {0}")]
    Rejected(String),
    #[error("response is not valid JSON : {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    OAuth(#[from] Error),
}

#[derive(Deserialize)]
struct ErrorResponse {
    error_text: String,
}

impl ApiError {
    /// Classifies an `error_text` returned by the service.
    pub fn from_error_text(text: &str) -> ApiError {
        match text {
            NOT_FOUND_TEXT => ApiError::NotFound,
            NO_PERMISSION_TEXT => ApiError::NoPermission,
            t if t.starts_with(ANTI_FLOOD_PREFIX) => ApiError::Flood,
            t => ApiError::Rejected(t.to_string()),
        }
    }

    /// Bodies of [`Error::Request`] that carry a JSON `error_text` are
    /// classified, everything else is kept as is.
    pub fn from_oauth(err: Error) -> ApiError {
        match err {
            Error::Request(body) => match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(resp) => ApiError::from_error_text(&resp.error_text),
                Err(_) => ApiError::OAuth(Error::Request(body)),
            },
            other => ApiError::OAuth(other),
        }
    }
}

impl Client {
    /// Like [`Client::send_signed_request`], with service rejections
    /// translated into [`ApiError`].
    pub fn call_api<I, K, V>(&mut self, path: &str, params: I) -> Result<String, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.send_signed_request(path, params)
            .map_err(ApiError::from_oauth)
    }

    /// Calls the API and deserializes the JSON response body.
    pub fn call_api_json<T, I, K, V>(&mut self, path: &str, params: I) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = self.call_api(path, params)?;
        Ok(serde_json::from_str(&body)?)
    }
}
