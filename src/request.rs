use http::header::{AUTHORIZATION, CONTENT_TYPE};
use log::{debug, warn};
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder as ReqwestRequestBuilder};

use crate::encoding::encode;
use crate::nonce::{timestamp_now, NonceGenerator, Stamp};
use crate::{
    Secrets, Signer, OAUTH_CONSUMER_KEY, OAUTH_KEY_PREFIX, OAUTH_NONCE_KEY,
    OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_VERSION_KEY,
};

const HTTP_METHOD: &str = "POST";
const OAUTH_VERSION: &str = "1.0";
const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Builds a signed `POST` request.
///
/// Protocol parameters (`oauth_*`) end up in the `Authorization` header,
/// everything else in the form body. Caller-supplied parameters can never
/// set an `oauth_*` value.
#[derive(Clone)]
pub struct RequestBuilder<'a> {
    url: String,
    secrets: &'a Secrets,
    token_secret: &'a str,
    params: Vec<(String, String)>,
    nonce: Option<String>,
    timestamp: Option<u64>,
}

/// A fully formed request, ready to hand over to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub authorization: String,
    pub body: String,
    /// Nonce and timestamp used for this request.
    pub stamp: Stamp,
}

impl<'a> RequestBuilder<'a> {
    pub fn new<U: Into<String>>(url: U, secrets: &'a Secrets, token_secret: &'a str) -> Self {
        RequestBuilder {
            url: url.into(),
            secrets,
            token_secret,
            params: Vec::new(),
            nonce: None,
            timestamp: None,
        }
    }

    /// Add a protocol parameter such as `oauth_token` or `oauth_verifier`.
    pub(crate) fn oauth_parameter<V: Into<String>>(mut self, key: &str, value: V) -> Self {
        debug_assert!(key.starts_with(OAUTH_KEY_PREFIX));
        upsert(&mut self.params, key, value.into());
        self
    }

    /// Add form parameters. Names starting with `oauth_` are dropped.
    ///
    /// A name given more than once keeps its first position and its values
    /// are joined with `,`.
    pub fn form<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in params {
            let key = key.as_ref();
            if key.starts_with(OAUTH_KEY_PREFIX) {
                warn!("dropping reserved parameter {} from the request body", key);
                continue;
            }
            append(&mut self.params, key, value.as_ref());
        }
        self
    }

    /// set the oauth_nonce value instead of generating one
    pub fn nonce<T: Into<String>>(self, nonce: T) -> Self {
        RequestBuilder {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value instead of using the current time
    pub fn timestamp(self, timestamp: u64) -> Self {
        RequestBuilder {
            timestamp: Some(timestamp),
            ..self
        }
    }

    /// Adds the protocol parameters, signs them and splits the result into
    /// the `Authorization` header and the form body.
    pub fn sign(self, nonces: &mut NonceGenerator) -> SignedRequest {
        let RequestBuilder {
            url,
            secrets,
            token_secret,
            mut params,
            nonce,
            timestamp,
        } = self;

        let stamp = Stamp {
            nonce: nonce.unwrap_or_else(|| nonces.generate()),
            timestamp: timestamp.unwrap_or_else(timestamp_now).to_string(),
        };
        let (consumer_key, consumer_secret) = secrets.get_consumer_key_pair();

        upsert(&mut params, OAUTH_CONSUMER_KEY, consumer_key.to_string());
        upsert(&mut params, OAUTH_NONCE_KEY, stamp.nonce.clone());
        upsert(&mut params, OAUTH_TIMESTAMP_KEY, stamp.timestamp.clone());
        upsert(&mut params, OAUTH_VERSION_KEY, OAUTH_VERSION.to_string());
        upsert(&mut params, OAUTH_SIGNATURE_METHOD_KEY, SIGNATURE_METHOD.to_string());

        let signature = Signer::new(consumer_secret, token_secret).generate_signature(
            HTTP_METHOD,
            &url,
            &params,
        );
        upsert(&mut params, OAUTH_SIGNATURE_KEY, signature);

        let authorization = authorization_header(&params);
        let body = form_body(&params);
        debug!("signed request to {} with nonce {}", url, stamp.nonce);

        SignedRequest {
            url,
            authorization,
            body,
            stamp,
        }
    }
}

impl SignedRequest {
    /// Hands the request over to a blocking reqwest client.
    pub fn into_reqwest(self, client: &ReqwestClient) -> ReqwestRequestBuilder {
        client
            .post(self.url)
            .header(AUTHORIZATION, self.authorization)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(self.body)
    }
}

/// `OAuth realm=""` followed by every `oauth_*` pair in insertion order.
fn authorization_header(params: &[(String, String)]) -> String {
    let mut header = String::from("OAuth realm=\"\"");
    for (key, value) in params.iter().filter(|(k, _)| k.starts_with(OAUTH_KEY_PREFIX)) {
        header.push_str(&format!(", {}=\"{}\"", key, encode(value)));
    }
    header
}

fn form_body(params: &[(String, String)]) -> String {
    params
        .iter()
        .filter(|(k, _)| !k.starts_with(OAUTH_KEY_PREFIX))
        .map(|(k, v)| format!("{}={}", k, encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn append(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    match params.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => {
            entry.1.push(',');
            entry.1.push_str(value);
        }
        None => params.push((key.to_string(), value.to_string())),
    }
}

// Replaces the value in place so the position of the first insertion is kept.
fn upsert(params: &mut Vec<(String, String)>, key: &str, value: String) {
    match params.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 = value,
        None => params.push((key.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::OAUTH_TOKEN_KEY;

    // https://developer.twitter.com/ja/docs/basics/authentication/guides/creating-a-signature
    fn twitter_request() -> SignedRequest {
        let secrets = Secrets::new(
            "xvz1evFS4wEEPTGEFPHBog",
            "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        );
        RequestBuilder::new(
            "https://api.twitter.com/1.1/statuses/update.json",
            &secrets,
            "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
        )
        .oauth_parameter(
            OAUTH_TOKEN_KEY,
            "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
        )
        .form(vec![
            ("include_entities", "true"),
            (
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            ),
        ])
        .nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
        .timestamp(1_318_622_958)
        .sign(&mut NonceGenerator::new())
    }

    #[test]
    fn sign_post_body() {
        let req = twitter_request();
        assert_eq!(
            req.authorization,
            "OAuth realm=\"\", \
             oauth_token=\"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\", \
             oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", \
             oauth_nonce=\"kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg\", \
             oauth_timestamp=\"1318622958\", \
             oauth_version=\"1.0\", \
             oauth_signature_method=\"HMAC-SHA1\", \
             oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""
        );
    }

    #[test]
    fn capture_body() {
        let req = twitter_request();
        assert_eq!(
            req.body,
            "include_entities=true&status=Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
        );
        assert_eq!(
            req.stamp,
            Stamp {
                nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".to_string(),
                timestamp: "1318622958".to_string(),
            }
        );
    }

    #[test]
    fn reserved_parameters_are_dropped() {
        let secrets = Secrets::new("key", "secret");
        let req = RequestBuilder::new("http://example.com/APP/x", &secrets, "")
            .form(vec![
                ("oauth_token", "forged"),
                ("content", "hello"),
                ("oauth_signature", "forged"),
            ])
            .sign(&mut NonceGenerator::new());

        assert_eq!(req.body, "content=hello");
        assert!(!req.authorization.contains("forged"));
        assert!(!req.authorization.contains("oauth_token="));
    }

    #[test]
    fn generated_stamp_is_used() {
        let secrets = Secrets::new("key", "secret");
        let req = RequestBuilder::new("http://example.com/APP/x", &secrets, "")
            .sign(&mut NonceGenerator::new());

        assert_eq!(req.body, "");
        assert_eq!(req.stamp.nonce.len(), 8);
        assert!(req
            .authorization
            .contains(&format!("oauth_nonce=\"{}\"", req.stamp.nonce)));
        assert!(req
            .authorization
            .contains(&format!("oauth_timestamp=\"{}\"", req.stamp.timestamp)));
    }

    #[test]
    fn repeated_form_names_are_joined() {
        let secrets = Secrets::new("key", "secret");
        let req = RequestBuilder::new("http://example.com/APP/x", &secrets, "")
            .form(vec![("a", "1"), ("b", "2"), ("a", "3")])
            .nonce("00000001")
            .timestamp(1_700_000_000)
            .sign(&mut NonceGenerator::new());
        assert_eq!(req.body, "a=1%2C3&b=2");

        let joined = RequestBuilder::new("http://example.com/APP/x", &secrets, "")
            .form(vec![("a", "1,3"), ("b", "2")])
            .nonce("00000001")
            .timestamp(1_700_000_000)
            .sign(&mut NonceGenerator::new());
        assert_eq!(req, joined);
    }
}
