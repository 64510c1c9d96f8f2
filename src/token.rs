use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the lifecycle state of an OAuth token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenState {
    #[default]
    Empty,
    /// Request token, not yet authorized by the user.
    Temporary,
    /// Access token.
    Permanent,
}

/// Token container owned by a [`Client`](crate::Client).
///
/// An empty `content` means no token has been acquired yet.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    content: String,
    secret: String,
    state: TokenState,
}

impl Token {
    /// Creates an empty token container.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a token container from known values, e.g. a previously
    /// authorized access token.
    pub fn with_values<TContent, TSecret>(
        content: TContent,
        secret: TSecret,
        state: TokenState,
    ) -> Self
    where
        TContent: Into<String>,
        TSecret: Into<String>,
    {
        Token {
            content: content.into(),
            secret: secret.into(),
            state,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn state(&self) -> TokenState {
        self.state
    }

    /// Whether a token has been acquired or injected.
    pub fn is_present(&self) -> bool {
        !self.content.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("content", &self.content)
            .field("secret", &"<redacted>")
            .field("state", &self.state)
            .finish()
    }
}
