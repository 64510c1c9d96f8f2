use std::fmt;

use serde::{Deserialize, Serialize};

/// Consumer credentials identifying the application.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secrets {
    consumer_key: String,
    consumer_secret: String,
}

impl Secrets {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Secrets {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    pub fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static CONSUMER_KEY: &str = "<CONSUMER_KEY>";
    static CONSUMER_SECRET: &str = "<CONSUMER_SECRET>";

    #[test]
    fn test_secret_builder() {
        let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET);
        assert_eq!(secrets.get_consumer_key_pair(), (CONSUMER_KEY, CONSUMER_SECRET));
        let printed = format!("{:?}", secrets);
        assert!(printed.contains(CONSUMER_KEY));
        assert!(!printed.contains(CONSUMER_SECRET));
    }
}
