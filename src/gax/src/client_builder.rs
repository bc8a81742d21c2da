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

//! Provide types for client construction.
//!
//! Some applications need to construct clients with custom configuration, for
//! example, they may need to override the endpoint, the API version, or the
//! default access token. The client libraries use a generic builder type to
//! provide such functionality. The types in this module implement the client
//! builders.
//!
//! Applications should not create builders directly, instead each client type
//! defines a `builder()` function to obtain the correct type of builder.

use std::time::Duration;

/// The result type for client builders.
pub type Result<T> = std::result::Result<T, Error>;

/// Indicates a problem while constructing a client.
///
/// # Examples
/// ```
/// use graph_sdk_gax::client_builder::Error;
/// let err = Error::transport("simulated problem");
/// assert!(err.is_transport());
/// assert!(!err.is_configuration());
/// ```
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// If true, the client could not initialize the transport client.
    pub fn is_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::Transport(_))
    }

    /// If true, the configuration values are invalid, e.g. an empty graph
    /// version.
    pub fn is_configuration(&self) -> bool {
        matches!(&self.0, ErrorKind::Configuration(_))
    }

    /// Creates a new `Error` representing a transport initialization problem.
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Transport(source.into()))
    }

    /// Creates a new `Error` representing an invalid configuration value.
    pub fn configuration<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Configuration(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("could not initialize transport client")]
    Transport(#[source] BoxError),
    #[error("invalid client configuration")]
    Configuration(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A generic builder for clients.
///
/// In the client libraries, clients are created using a builder. The client
/// type defines a `builder()` function returning the correct instantiation
/// of this generic type.
#[derive(Clone, Debug)]
pub struct ClientBuilder<F, Cr> {
    config: internal::ClientConfig<Cr>,
    factory: F,
}

impl<F, Cr> ClientBuilder<F, Cr> {
    /// Creates a new client.
    pub async fn build<C>(self) -> Result<C>
    where
        F: internal::ClientFactory<Client = C, Credentials = Cr>,
    {
        self.factory.build(self.config).await
    }

    /// Sets the endpoint.
    ///
    /// The default endpoint is defined by each client, typically
    /// `https://graph.facebook.com`. Tests use this to point the client to a
    /// local server.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Sets the endpoint used to upload videos.
    ///
    /// Video uploads use a separate host. Requests with endpoints ending in
    /// `/videos` are sent to this endpoint.
    pub fn with_video_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.video_endpoint = Some(v.into());
        self
    }

    /// Sets the API version used by requests that do not set one.
    pub fn with_graph_version<V: Into<String>>(mut self, v: V) -> Self {
        self.config.graph_version = Some(v.into());
        self
    }

    /// Sets the default credentials.
    ///
    /// Requests that do not set their own credentials use these.
    pub fn with_credentials<T: Into<Cr>>(mut self, v: T) -> Self {
        self.config.cred = Some(v.into());
        self
    }

    /// Sets the application secret.
    ///
    /// When set, requests carry a proof computed from the access token and
    /// this secret.
    pub fn with_app_secret<V: Into<String>>(mut self, v: V) -> Self {
        self.config.app_secret = Some(v.into());
        self
    }

    /// Sets the timeout for each HTTP request.
    pub fn with_timeout(mut self, v: Duration) -> Self {
        self.config.timeout = Some(v);
        self
    }

    /// Enables logging of each request and response.
    pub fn with_tracing(mut self) -> Self {
        self.config.tracing = true;
        self
    }
}

#[doc(hidden)]
pub mod internal {
    use super::*;

    pub trait ClientFactory {
        type Client;
        type Credentials;
        fn build(
            self,
            config: internal::ClientConfig<Self::Credentials>,
        ) -> impl Future<Output = Result<Self::Client>>;
    }

    pub fn new_builder<F, Cr, C>(factory: F) -> super::ClientBuilder<F, Cr>
    where
        F: ClientFactory<Client = C, Credentials = Cr>,
    {
        super::ClientBuilder {
            factory,
            config: ClientConfig::default(),
        }
    }

    #[derive(Clone, Debug)]
    pub struct ClientConfig<Cr> {
        pub endpoint: Option<String>,
        pub video_endpoint: Option<String>,
        pub graph_version: Option<String>,
        pub cred: Option<Cr>,
        pub app_secret: Option<String>,
        pub timeout: Option<Duration>,
        pub tracing: bool,
    }

    impl<Cr> std::default::Default for ClientConfig<Cr> {
        fn default() -> Self {
            Self {
                endpoint: None,
                video_endpoint: None,
                graph_version: None,
                cred: None,
                app_secret: None,
                timeout: None,
                tracing: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, PartialEq)]
    struct Client {
        config: internal::ClientConfig<String>,
    }

    struct Factory;
    impl internal::ClientFactory for Factory {
        type Client = Client;
        type Credentials = String;
        async fn build(self, config: internal::ClientConfig<String>) -> Result<Client> {
            Ok(Client { config })
        }
    }

    impl PartialEq for internal::ClientConfig<String> {
        fn eq(&self, other: &Self) -> bool {
            self.endpoint == other.endpoint
                && self.video_endpoint == other.video_endpoint
                && self.graph_version == other.graph_version
                && self.cred == other.cred
                && self.app_secret == other.app_secret
                && self.timeout == other.timeout
                && self.tracing == other.tracing
        }
    }

    #[test]
    fn defaults() {
        let builder = internal::new_builder(Factory);
        let config = builder.config;
        assert!(config.endpoint.is_none(), "{config:?}");
        assert!(config.video_endpoint.is_none(), "{config:?}");
        assert!(config.graph_version.is_none(), "{config:?}");
        assert!(config.cred.is_none(), "{config:?}");
        assert!(config.app_secret.is_none(), "{config:?}");
        assert!(config.timeout.is_none(), "{config:?}");
        assert!(!config.tracing, "{config:?}");
    }

    #[tokio::test]
    async fn build() -> anyhow::Result<()> {
        let client = internal::new_builder(Factory)
            .with_endpoint("http://localhost:8080")
            .with_video_endpoint("http://localhost:8081")
            .with_graph_version("v2.10")
            .with_credentials("test-token")
            .with_app_secret("test-secret")
            .with_timeout(Duration::from_secs(5))
            .with_tracing()
            .build()
            .await?;
        let want = internal::ClientConfig::<String> {
            endpoint: Some("http://localhost:8080".into()),
            video_endpoint: Some("http://localhost:8081".into()),
            graph_version: Some("v2.10".into()),
            cred: Some("test-token".into()),
            app_secret: Some("test-secret".into()),
            timeout: Some(Duration::from_secs(5)),
            tracing: true,
        };
        assert_eq!(client.config, want);
        Ok(())
    }

    #[test]
    fn errors() {
        let err = Error::transport("simulated");
        assert!(err.is_transport(), "{err:?}");
        assert!(err.source().is_some(), "{err:?}");
        let err = Error::configuration("simulated");
        assert!(err.is_configuration(), "{err:?}");
        assert!(!err.is_transport(), "{err:?}");
    }
}
