use log::debug;
use reqwest::blocking::{Client as ReqwestClient, Response};
use url::Url;

use crate::nonce::{NonceGenerator, Stamp};
use crate::token_reader::TokenReader;
use crate::translate::translate;
use crate::{
    Config, Error, RequestBuilder, Result, Token, TokenState, OAUTH_CALLBACK_KEY,
    OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY,
};

/// Callback value for clients that cannot receive a redirect.
const OUT_OF_BAND: &str = "oob";

pub trait OAuthClientProvider {
    /// Wrap this transport into an OAuth [`Client`].
    fn oauth1(self, config: Config) -> Client
    where
        Self: Sized;
}

impl OAuthClientProvider for ReqwestClient {
    fn oauth1(self, config: Config) -> Client {
        Client::new_with_client(self, config)
    }
}

/// OAuth 1.0a client driving the three-legged flow and signing API calls.
///
/// Every operation performs exactly one blocking request. The client is not
/// synchronized; wrap it in a lock to share it between threads.
#[derive(Debug)]
pub struct Client {
    inner: ReqwestClient,
    config: Config,
    token: Token,
    nonces: NonceGenerator,
    last_stamp: Option<Stamp>,
}

impl Client {
    /// Constructs a new `Client`.
    ///
    /// This method calls reqwest::blocking::Client::new() internally.
    pub fn new(config: Config) -> Self {
        Client::new_with_client(ReqwestClient::new(), config)
    }

    /// Constructs a new `Client` with specifying inner `reqwest::blocking::Client`.
    pub fn new_with_client(client: ReqwestClient, config: Config) -> Self {
        Client {
            inner: client,
            config,
            token: Token::new(),
            nonces: NonceGenerator::new(),
            last_stamp: None,
        }
    }

    /// Use an already acquired token, skipping the interactive flow.
    pub fn with_token(self, token: Token) -> Self {
        Client { token, ..self }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn set_token(&mut self, token: Token) {
        self.token = token;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Nonce and timestamp of the most recent request.
    pub fn last_stamp(&self) -> Option<&Stamp> {
        self.last_stamp.as_ref()
    }

    /// Retrieves a temporary token and stores it in the client.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Transport`] on connection problems and with
    /// [`Error::Authorization`], [`Error::Nonce`] or [`Error::Request`] when
    /// the service rejects the request.
    pub fn request_token(&mut self) -> Result<()> {
        let url = self.config.request_token_url.clone();
        let response = self.send(
            url,
            vec![(OAUTH_CALLBACK_KEY, OUT_OF_BAND.to_string())],
            Vec::<(String, String)>::new(),
        )?;
        let token = response.parse_oauth_token()?;

        self.token = Token::with_values(
            token.oauth_token,
            token.oauth_token_secret,
            TokenState::Temporary,
        );
        debug!("acquired temporary token {}", self.token.content());
        Ok(())
    }

    /// Returns the URL of the page where the user grants access.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Configuration`] until a token is present.
    pub fn authorization_url(&self) -> Result<String> {
        self.ensure_token()?;
        Ok(format!(
            "{}?{}={}",
            self.config.authorize_url,
            OAUTH_TOKEN_KEY,
            self.token.content()
        ))
    }

    /// Exchanges the temporary token and `verifier` for an access token.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Configuration`] until a token is present, otherwise
    /// like [`Client::request_token`].
    pub fn exchange_token(&mut self, verifier: &str) -> Result<()> {
        self.ensure_token()?;
        let url = self.config.access_token_url.clone();
        let oauth = vec![
            (OAUTH_TOKEN_KEY, self.token.content().to_string()),
            (OAUTH_VERIFIER_KEY, verifier.to_string()),
        ];
        let response = self.send(url, oauth, Vec::<(String, String)>::new())?;
        let token = response.parse_oauth_token()?;

        self.token = Token::with_values(
            token.oauth_token,
            token.oauth_token_secret,
            TokenState::Permanent,
        );
        debug!("acquired access token {}", self.token.content());
        Ok(())
    }

    /// Signs and posts `params` to `<api-base>/<path>`, returning the raw
    /// response body.
    ///
    /// Parameters named `oauth_*` are never transmitted.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Configuration`] until a token is present, with
    /// [`Error::Transport`] on connection or stream failures, and with the
    /// protocol errors of [`Client::request_token`].
    pub fn send_signed_request<I, K, V>(&mut self, path: &str, params: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.ensure_token()?;
        let url = self.config.api_url(path);
        let oauth = vec![(OAUTH_TOKEN_KEY, self.token.content().to_string())];
        let response = self.send(url, oauth, params)?;
        Ok(response.text()?)
    }

    fn ensure_token(&self) -> Result<()> {
        if self.token.is_present() {
            Ok(())
        } else {
            Err(Error::Configuration("a valid token is required".to_string()))
        }
    }

    fn send<I, K, V>(
        &mut self,
        url: String,
        oauth: Vec<(&'static str, String)>,
        params: I,
    ) -> Result<Response>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Url::parse(&url)
            .map_err(|e| Error::Configuration(format!("invalid endpoint {} : {}", url, e)))?;

        let mut builder = RequestBuilder::new(url, &self.config.secrets, self.token.secret());
        for (key, value) in oauth {
            builder = builder.oauth_parameter(key, value);
        }
        let signed = builder.form(params).sign(&mut self.nonces);

        let stamp = signed.stamp.clone();
        self.last_stamp = Some(stamp.clone());

        let response = signed.into_reqwest(&self.inner).send()?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(translate(response, &stamp))
        }
    }
}
