/*!
plurk-oauth: three-legged OAuth 1.0a for the Plurk API, on top of reqwest.

# Overview

This library drives the OAuth 1.0a authorization flow (request token,
authorization page, access token) and signs arbitrary API calls with
`HMAC-SHA1`, using the blocking client of [reqwest](https://crates.io/crates/reqwest).
Every operation performs exactly one request and reports failures through
[`Error`].

# How to use

## Basic usecase 1 - Acquiring OAuth token & secret

```no_run
use std::io;
use plurk_oauth::{Config, OAuthClientProvider};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
// prepare authorization info
let config = Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]");
let mut client = reqwest::blocking::Client::new().oauth1(config);

// step 1: acquire request token & token secret
client.request_token()?;

// step 2. acquire user pin
println!("please access to: {}", client.authorization_url()?);

println!("input pin: ");
let mut user_input = String::new();
io::stdin().read_line(&mut user_input)?;
let pin = user_input.trim();

// step 3. acquire access token
client.exchange_token(pin)?;
println!(
    "your token and secret is: \n token: {}\n secret: {}",
    client.token().content(),
    client.token().secret()
);
# Ok(())
# }
```

## Basic usecase 2 - posting a plurk with a known access token

```no_run
use plurk_oauth::{Client, Config, Token, TokenState};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let token = Token::with_values("[ACCESS_TOKEN]", "[TOKEN_SECRET]", TokenState::Permanent);
let mut client = Client::new(Config::from_env()?).with_token(token);

let body = client.send_signed_request(
    "Timeline/plurkAdd",
    vec![("qualifier", "says"), ("content", "Hello, Plurk!")],
)?;
println!("{}", body);
# Ok(())
# }
```
*/
mod api;
mod client;
mod config;
pub mod encoding;
mod error;
mod nonce;
mod pager;
mod request;
mod secrets;
mod signer;
mod token;
mod token_reader;
mod translate;

// exposed to external program
pub use api::ApiError;
pub use client::{Client, OAuthClientProvider};
pub use config::{
    Config, DEFAULT_ACCESS_TOKEN_URL, DEFAULT_API_BASE_URL, DEFAULT_AUTHORIZE_URL,
    DEFAULT_REQUEST_TOKEN_URL, PLURK_ACCESS_TOKEN_URL, PLURK_API_BASE_URL, PLURK_AUTHORIZE_URL,
    PLURK_CONSUMER_KEY, PLURK_CONSUMER_SECRET, PLURK_REQUEST_TOKEN_URL,
};
pub use error::{Error, Result};
pub use nonce::{timestamp_now, NonceGenerator, Stamp};
pub use pager::OffsetPager;
pub use request::{RequestBuilder, SignedRequest};
pub use secrets::Secrets;
pub use signer::{parameter_string, signature_base_string, signing_key, Signer};
pub use token::{Token, TokenState};
pub use token_reader::{TokenReader, TokenResponse};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
pub(crate) const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
pub(crate) const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
