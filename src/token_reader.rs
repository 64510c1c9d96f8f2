use std::collections::HashMap;

use reqwest::blocking::Response;
use serde::Deserialize;

use crate::encoding::parse_query;
use crate::{Error, Result, OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY};

/// Represents response of token acquisition.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents
    #[serde(flatten)]
    pub remain: HashMap<String, String>,
}

/// Add parse_oauth_token feature to reqwest::blocking::Response.
// this trait is sealed
pub trait TokenReader: private::Sealed {
    fn parse_oauth_token(self) -> Result<TokenResponse>;
}

impl TokenReader for Response {
    fn parse_oauth_token(self) -> Result<TokenResponse> {
        let text = self.text()?;
        read_oauth_token(text)
    }
}

pub(crate) fn read_oauth_token(text: String) -> Result<TokenResponse> {
    // unnamed segments carry nothing we could look up
    let mut destructured = parse_query(&text)
        .into_iter()
        .filter_map(|(k, v)| k.map(|k| (k, v)))
        .collect::<HashMap<String, String>>();
    let oauth_token = destructured.remove(OAUTH_TOKEN_KEY);
    let oauth_token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => Ok(TokenResponse {
            oauth_token: t,
            oauth_token_secret: s,
            remain: destructured,
        }),
        (None, _) => Err(Error::MalformedTokenResponse {
            key: OAUTH_TOKEN_KEY,
            body: text,
        }),
        (_, _) => Err(Error::MalformedTokenResponse {
            key: OAUTH_TOKEN_SECRET_KEY,
            body: text,
        }),
    }
}

mod private {
    use reqwest::blocking::Response;

    pub trait Sealed {}
    impl Sealed for Response {}
}
