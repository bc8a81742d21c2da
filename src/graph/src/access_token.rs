// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Credentials attached to requests.
//!
//! The client library does not obtain access tokens. Applications obtain
//! them through a login flow, and attach them to the client (as a default),
//! to a single request, or to a batch (as a fallback).

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::SystemTime;

/// An opaque access token.
///
/// The value is never included in the `Debug` output.
///
/// # Example
/// ```
/// # use graph_sdk::access_token::AccessToken;
/// let token = AccessToken::new("my-app-id|my-app-secret");
/// assert!(token.is_app_access_token());
/// assert!(!token.is_expired());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    expires_at: Option<SystemTime>,
}

impl AccessToken {
    /// Creates a new access token with no known expiration.
    pub fn new<V: Into<String>>(value: V) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    /// Sets the expiration time.
    pub fn with_expires_at(mut self, v: SystemTime) -> Self {
        self.expires_at = Some(v);
        self
    }

    /// The token value, as sent to the service.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The expiration time, if known.
    pub fn expires_at(&self) -> Option<SystemTime> {
        self.expires_at
    }

    /// App access tokens are of the form `{app-id}|{app-secret}`.
    pub fn is_app_access_token(&self) -> bool {
        self.value.contains('|')
    }

    /// Returns true if the token has a known expiration in the past.
    ///
    /// App access tokens never expire.
    pub fn is_expired(&self) -> bool {
        if self.is_app_access_token() {
            return false;
        }
        self.expires_at
            .map(|t| t < SystemTime::now())
            .unwrap_or(false)
    }

    /// Computes the `appsecret_proof` for this token.
    ///
    /// The proof is the hex encoded HMAC-SHA256 of the token value, keyed with
    /// the application secret.
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::access_token::{AccessToken, AppSecret};
    /// let token = AccessToken::new("The quick brown fox jumps over the lazy dog");
    /// let proof = token.app_secret_proof(&AppSecret::new("key"));
    /// assert_eq!(proof, "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8");
    /// ```
    pub fn app_secret_proof(&self, secret: &AppSecret) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.0.as_bytes())
            .expect("HMAC can take keys of any size");
        mac.update(self.value.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[censored]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl From<&str> for AccessToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// The application secret, used to compute the `appsecret_proof`.
///
/// The value is never included in the `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(String);

impl AppSecret {
    /// Creates a new application secret.
    pub fn new<V: Into<String>>(value: V) -> Self {
        Self(value.into())
    }
}

impl std::fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AppSecret").field(&"[censored]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn debug_is_censored() {
        let token = AccessToken::new("super-secret-value");
        let got = format!("{token:?}");
        assert!(!got.contains("super-secret-value"), "{got}");
        let secret = AppSecret::new("super-secret-value");
        let got = format!("{secret:?}");
        assert!(!got.contains("super-secret-value"), "{got}");
    }

    #[test]
    fn app_access_token() {
        let token = AccessToken::new("123|456");
        assert!(token.is_app_access_token(), "{token:?}");
        let token = AccessToken::new("EAAB...");
        assert!(!token.is_app_access_token(), "{token:?}");
    }

    #[test]
    fn expiration() {
        let token = AccessToken::new("user-token");
        assert!(!token.is_expired(), "{token:?}");
        assert!(token.expires_at().is_none(), "{token:?}");

        let past = SystemTime::now() - Duration::from_secs(60);
        let token = AccessToken::new("user-token").with_expires_at(past);
        assert!(token.is_expired(), "{token:?}");

        let future = SystemTime::now() + Duration::from_secs(3600);
        let token = AccessToken::new("user-token").with_expires_at(future);
        assert!(!token.is_expired(), "{token:?}");

        let token = AccessToken::new("123|456").with_expires_at(past);
        assert!(!token.is_expired(), "{token:?}");
    }

    #[test]
    fn app_secret_proof() {
        let token = AccessToken::from("The quick brown fox jumps over the lazy dog");
        let got = token.app_secret_proof(&AppSecret::new("key"));
        assert_eq!(
            got,
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn conversions() {
        let a = AccessToken::from("abc");
        let b = AccessToken::from("abc".to_string());
        assert_eq!(a, b);
        assert_eq!(a.value(), "abc");
    }
}
