//! Resolution of the spreadsheet API key.
//!
//! The key is taken from server configuration when present; otherwise a
//! trusted endpoint is asked for it. A failed endpoint lookup is logged and
//! reported as a missing credential so the fetch chain moves on.

use reqwest::Client;

use crate::client::fetch_api_key;
use crate::error::SourceError;

#[derive(Clone, Default)]
pub struct CredentialSource {
    secret: Option<String>,
    endpoint: Option<String>,
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSource")
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl CredentialSource {
    #[must_use]
    pub fn new(secret: Option<String>, endpoint: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.trim().is_empty()),
            endpoint: endpoint.filter(|s| !s.trim().is_empty()),
        }
    }

    /// # Errors
    ///
    /// Returns [`SourceError::MissingCredential`] when neither the configured
    /// secret nor the endpoint yields a non-empty key.
    pub async fn resolve(&self, client: &Client) -> Result<String, SourceError> {
        if let Some(secret) = &self.secret {
            return Ok(secret.clone());
        }

        let Some(endpoint) = &self.endpoint else {
            return Err(SourceError::MissingCredential);
        };

        match fetch_api_key(client, endpoint).await {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            Ok(_) => {
                tracing::warn!(endpoint = %endpoint, "key endpoint returned an empty key");
                Err(SourceError::MissingCredential)
            }
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "key endpoint lookup failed");
                Err(SourceError::MissingCredential)
            }
        }
    }
}
