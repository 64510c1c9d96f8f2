use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use log::debug;
use sha1::Sha1;

use crate::encoding::encode;

/// Escaped `=` between a name and its value in the parameter string.
const ENCODED_EQUALS: &str = "%3D";
/// Escaped `&` between two pairs in the parameter string.
const ENCODED_AMPERSAND: &str = "%26";

/// HMAC-SHA1 signer for a single request.
///
/// The token secret is empty while requesting a temporary token.
#[derive(Clone, Copy)]
pub struct Signer<'a> {
    consumer_secret: &'a str,
    token_secret: &'a str,
}

impl<'a> Signer<'a> {
    pub fn new(consumer_secret: &'a str, token_secret: &'a str) -> Self {
        Signer {
            consumer_secret,
            token_secret,
        }
    }

    /// Computes the base64 encoded `oauth_signature` for the given request.
    ///
    /// `params` must contain every parameter that takes part in the
    /// signature: the protocol `oauth_*` values and the request body.
    pub fn generate_signature<K, V>(&self, method: &str, url: &str, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let base_string = signature_base_string(method, url, params);
        debug!("calculated signature base string: {}", base_string);

        let key = signing_key(self.consumer_secret, self.token_secret);
        let mut h = Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("invalid key length");
        h.update(base_string.as_bytes());

        BASE64_STANDARD.encode(h.finalize().into_bytes())
    }
}

/// Builds `METHOD&encoded-url&parameter-string`.
pub fn signature_base_string<K, V>(method: &str, url: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    format!("{}&{}&{}", method, encode(url), parameter_string(params))
}

/// Builds the already-escaped parameter string of the base string.
///
/// Pairs are sorted by name in code point order. Each value is encoded twice
/// because it sits in a position which is itself percent-encoded once more,
/// with `%3D` and `%26` standing in for the escaped separators.
pub fn parameter_string<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut sorted: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    sorted
        .into_iter()
        .map(|(k, v)| format!("{}{}{}", k, ENCODED_EQUALS, encode(&encode(v))))
        .collect::<Vec<_>>()
        .join(ENCODED_AMPERSAND)
}

/// `encode(consumer_secret)&encode(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!("{}&{}", encode(consumer_secret), encode(token_secret))
}
