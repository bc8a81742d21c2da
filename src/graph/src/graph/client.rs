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

use super::batch::BatchRequestBuilder;
use super::request_builder::RequestBuilder;
use super::upload::ResumableUploader;
use crate::access_token::AccessToken;
use crate::model::Method;
use gax::client_builder::internal::{ClientConfig, ClientFactory};
use std::sync::Arc;

/// Implements a client for the Graph API.
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// # use graph_sdk::client::Graph;
/// let client = Graph::builder()
///     .with_credentials("my-access-token")
///     .build()
///     .await?;
/// // use `client` to make requests to the Graph API.
/// # gax::client_builder::Result::<()>::Ok(()) });
/// ```
///
/// # Configuration
///
/// To configure `Graph` use the `with_*` methods in the type returned
/// by [builder()][Graph::builder]. Common configuration changes include
///
/// * [with_credentials()]: the access token used by requests that do not set
///   their own.
/// * [with_app_secret()]: the application secret. When set, every request
///   carries an `appsecret_proof`.
/// * [with_graph_version()]: by default this client uses `v2.10`.
///
/// # Pooling and Cloning
///
/// `Graph` holds a connection pool internally, it is advised to
/// create one and then reuse it. You do not need to wrap `Graph` in
/// an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
///
/// [with_credentials()]: ClientBuilder::with_credentials
/// [with_app_secret()]: ClientBuilder::with_app_secret
/// [with_graph_version()]: ClientBuilder::with_graph_version
#[derive(Debug)]
pub struct Graph<S = crate::transport::Graph> {
    stub: Arc<S>,
}

impl<S> Clone for Graph<S> {
    fn clone(&self) -> Self {
        Self {
            stub: self.stub.clone(),
        }
    }
}

/// A builder for [Graph].
///
/// ```
/// # use graph_sdk::client::Graph;
/// # async fn sample() -> anyhow::Result<()> {
/// let builder = Graph::builder();
/// let client = builder
///     .with_endpoint("https://graph.facebook.com")
///     .with_graph_version("v2.10")
///     .build()
///     .await?;
/// # Ok(()) }
/// ```
pub type ClientBuilder = gax::client_builder::ClientBuilder<Factory, AccessToken>;

#[doc(hidden)]
pub struct Factory;

impl ClientFactory for Factory {
    type Client = Graph;
    type Credentials = AccessToken;
    async fn build(self, config: ClientConfig<AccessToken>) -> gax::client_builder::Result<Graph> {
        let transport = crate::transport::Graph::new(config)?;
        Ok(Graph {
            stub: Arc::new(transport),
        })
    }
}

impl Graph {
    /// Returns a builder for [Graph].
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::client::Graph;
    /// # async fn sample() -> anyhow::Result<()> {
    /// let client = Graph::builder().build().await?;
    /// # Ok(()) }
    /// ```
    pub fn builder() -> ClientBuilder {
        gax::client_builder::internal::new_builder(Factory)
    }
}

impl<S> Graph<S>
where
    S: crate::stub::Graph + 'static,
{
    /// Creates a new client from the provided stub.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior.
    pub fn from_stub(stub: S) -> Self {
        Self {
            stub: Arc::new(stub),
        }
    }

    /// Starts a new request, the default method is `GET`.
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::client::Graph;
    /// # use graph_sdk::model::Method;
    /// # async fn sample(client: &Graph) -> anyhow::Result<()> {
    /// let response = client
    ///     .request()
    ///     .with_endpoint("/me/feed")
    ///     .with_method(Method::Post)
    ///     .with_param("message", "hello")
    ///     .send()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub fn request(&self) -> RequestBuilder<S> {
        RequestBuilder::new(self.stub.clone())
    }

    /// Starts a `GET` request for `endpoint`.
    pub fn get<E: Into<String>>(&self, endpoint: E) -> RequestBuilder<S> {
        self.request()
            .with_endpoint(endpoint)
            .with_method(Method::Get)
    }

    /// Starts a `POST` request for `endpoint`.
    pub fn post<E: Into<String>>(&self, endpoint: E) -> RequestBuilder<S> {
        self.request()
            .with_endpoint(endpoint)
            .with_method(Method::Post)
    }

    /// Starts a `DELETE` request for `endpoint`.
    pub fn delete<E: Into<String>>(&self, endpoint: E) -> RequestBuilder<S> {
        self.request()
            .with_endpoint(endpoint)
            .with_method(Method::Delete)
    }

    /// Starts a batch request.
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::client::Graph;
    /// # async fn sample(client: &Graph) -> anyhow::Result<()> {
    /// let response = client
    ///     .batch()
    ///     .get("/me")
    ///     .with_name("get-me")
    ///     .with_omit_response_on_success(false)
    ///     .post("/me/feed")
    ///     .with_param("message", "hello")
    ///     .send()
    ///     .await?;
    /// for item in response.iter() {
    ///     println!("{:?} {:?}", item.name(), item.result());
    /// }
    /// # Ok(()) }
    /// ```
    pub fn batch(&self) -> BatchRequestBuilder<S> {
        BatchRequestBuilder::new(self.stub.clone())
    }

    /// Returns an object to perform resumable uploads.
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::client::Graph;
    /// # use graph_sdk::file::GraphFile;
    /// # async fn sample(client: &Graph) -> anyhow::Result<()> {
    /// let file = GraphFile::open("my-video.mp4").await?;
    /// let result = client
    ///     .resumable_uploader()
    ///     .upload("/me/videos", file, Default::default(), 5)
    ///     .await?;
    /// println!("uploaded video {}", result.video_id);
    /// # Ok(()) }
    /// ```
    pub fn resumable_uploader(&self) -> ResumableUploader<S> {
        ResumableUploader::new(self.stub.clone())
    }
}
