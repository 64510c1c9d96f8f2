//! Maps failed HTTP responses onto [`Error`].

use hyper::ext::ReasonPhrase;
use log::debug;
use reqwest::blocking::Response;
use reqwest::StatusCode;

use crate::nonce::Stamp;
use crate::Error;

/// Body the service answers with when it rejects the nonce/timestamp pair.
pub(crate) const NONCE_REJECTED_BODY: &str = "40004:invalid timestamp or nonce";

/// Translates a non-success response. `sent` is the stamp of the request
/// that produced it.
pub(crate) fn translate(response: Response, sent: &Stamp) -> Error {
    let status = response.status();
    debug!("request failed with status {}", status);

    match status {
        StatusCode::UNAUTHORIZED => {
            let phrase = response.extensions().get::<ReasonPhrase>();
            Error::Authorization(status_text(status, phrase.map(|p| p.as_bytes())))
        }
        StatusCode::BAD_REQUEST => match response.text() {
            Ok(body) => from_bad_request(body, sent),
            Err(err) => Error::Transport(err),
        },
        _ => match response.error_for_status() {
            Err(err) => Error::Transport(err),
            Ok(_) => Error::UnexpectedStatus(status),
        },
    }
}

/// The reason phrase the server sent. The transport only records phrases
/// that differ from the canonical one, so the canonical text fills the gap.
fn status_text(status: StatusCode, phrase: Option<&[u8]>) -> String {
    match phrase {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => status.canonical_reason().unwrap_or_default().to_string(),
    }
}

/// Interprets the body of a `400 Bad Request`.
pub(crate) fn from_bad_request(body: String, sent: &Stamp) -> Error {
    if body == NONCE_REJECTED_BODY {
        Error::Nonce {
            nonce: sent.nonce.clone(),
            timestamp: sent.timestamp.clone(),
        }
    } else {
        Error::Request(body)
    }
}
