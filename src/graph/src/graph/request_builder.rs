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

use crate::Result;
use crate::access_token::AccessToken;
use crate::file::GraphFile;
use crate::model::{GraphRequest, Method};
use crate::response::GraphResponse;
use std::sync::Arc;

/// A request builder for a single Graph API call.
///
/// # Example
/// ```
/// # use graph_sdk::client::Graph;
/// # use graph_sdk::builder::RequestBuilder;
/// async fn sample(client: &Graph) -> anyhow::Result<()> {
///     let builder: RequestBuilder = client.get("/me");
///     let response = builder
///         .with_param("fields", "id,name")
///         .with_etag("\"abc123\"")
///         .send()
///         .await?;
///     if response.is_not_modified() {
///         println!("cached copy is still valid");
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RequestBuilder<S = crate::transport::Graph> {
    stub: Arc<S>,
    request: GraphRequest,
}

impl<S> RequestBuilder<S>
where
    S: crate::stub::Graph + 'static,
{
    /// Sends the request.
    ///
    /// Returns the decoded response, or the error reported by the service or
    /// the transport.
    pub async fn send(self) -> Result<GraphResponse> {
        self.stub.execute(self.request).await
    }
}

impl<S> RequestBuilder<S> {
    pub(crate) fn new(stub: Arc<S>) -> Self {
        Self {
            stub,
            request: GraphRequest::default(),
        }
    }

    /// Sets the endpoint, e.g. `/me/feed`.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.request.endpoint = v.into();
        self
    }

    /// Sets the HTTP method.
    pub fn with_method(mut self, v: Method) -> Self {
        self.request.method = v;
        self
    }

    /// Adds parameters to the request.
    ///
    /// New values replace any previous value for the same parameter.
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::client::Graph;
    /// # async fn sample(client: &Graph) -> anyhow::Result<()> {
    /// let response = client
    ///     .get("/search")
    ///     .with_params([("q", "coffee"), ("type", "place")])
    ///     .send()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub fn with_params<I, K, V>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.request
            .params
            .extend(v.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets a single parameter.
    ///
    /// Arrays and objects are sent as JSON documents.
    pub fn with_param<K, V>(mut self, k: K, v: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.request.params.insert(k.into(), v.into());
        self
    }

    /// Sets the access token for this request.
    ///
    /// Requests without an access token use the client's default.
    pub fn with_access_token<T: Into<AccessToken>>(mut self, v: T) -> Self {
        self.request.access_token = Some(v.into());
        self
    }

    /// Sets the entity tag.
    ///
    /// The service returns `304 Not Modified` if the resource still matches
    /// this tag.
    pub fn with_etag<V: Into<String>>(mut self, v: V) -> Self {
        self.request.etag = Some(v.into());
        self
    }

    /// Overrides the client's API version for this request.
    pub fn with_graph_version<V: Into<String>>(mut self, v: V) -> Self {
        self.request.graph_version = Some(v.into());
        self
    }

    /// Attaches a file, sent as a multipart part called `name`.
    pub fn with_file<K: Into<String>>(mut self, name: K, file: GraphFile) -> Self {
        self.request.files.insert(name.into(), file);
        self
    }

    /// Sets the endpoint and uses `GET`.
    pub fn get<V: Into<String>>(self, endpoint: V) -> Self {
        self.with_endpoint(endpoint).with_method(Method::Get)
    }

    /// Sets the endpoint and uses `POST`.
    pub fn post<V: Into<String>>(self, endpoint: V) -> Self {
        self.with_endpoint(endpoint).with_method(Method::Post)
    }

    /// Sets the endpoint and uses `DELETE`.
    pub fn delete<V: Into<String>>(self, endpoint: V) -> Self {
        self.with_endpoint(endpoint).with_method(Method::Delete)
    }

    /// Returns the request without sending it.
    ///
    /// The request is not validated.
    pub fn build(self) -> GraphRequest {
        self.request
    }
}
