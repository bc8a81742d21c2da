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

use crate::access_token::AccessToken;
use crate::file::GraphFile;
use std::collections::BTreeMap;

/// The request parameters, ordered by name.
pub type Params = BTreeMap<String, serde_json::Value>;

/// The HTTP methods supported by the Graph API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Delete,
}

impl Method {
    /// The method name, as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// A single call to the Graph API.
///
/// Requests are immutable, use a
/// [RequestBuilder][crate::builder::RequestBuilder] to create them.
///
/// # Example
/// ```
/// # use graph_sdk::client::Graph;
/// # use graph_sdk::model::Method;
/// # async fn sample(client: &Graph) {
/// let request = client
///     .post("/me/feed")
///     .with_param("message", "hello")
///     .build();
/// assert_eq!(request.method(), Method::Post);
/// assert_eq!(request.endpoint(), "/me/feed");
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphRequest {
    pub(crate) endpoint: String,
    pub(crate) method: Method,
    pub(crate) params: Params,
    pub(crate) files: BTreeMap<String, GraphFile>,
    pub(crate) access_token: Option<AccessToken>,
    pub(crate) etag: Option<String>,
    pub(crate) graph_version: Option<String>,
}

impl GraphRequest {
    /// The path of the request, e.g. `/me/feed`.
    ///
    /// The path may include query parameters.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The request parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The files attached to the request, by parameter name.
    pub fn files(&self) -> &BTreeMap<String, GraphFile> {
        &self.files
    }

    /// The access token, if the request sets one.
    ///
    /// Requests without an access token use the client's default.
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// The entity tag, sent in the `If-None-Match` header.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// The API version, if the request overrides the client's default.
    pub fn graph_version(&self) -> Option<&str> {
        self.graph_version.as_deref()
    }

    /// Moves credentials embedded in the endpoint into the request fields.
    ///
    /// An `access_token` query parameter in the endpoint is used when the
    /// request has no access token. Both `access_token` and `appsecret_proof`
    /// are removed from the endpoint, the transport computes them again.
    pub(crate) fn normalize(mut self) -> Self {
        let embedded = crate::url::get_params_as_map(&self.endpoint);
        if self.access_token.is_none() {
            self.access_token = embedded.get(ACCESS_TOKEN).map(AccessToken::new);
        }
        if embedded.contains_key(ACCESS_TOKEN) || embedded.contains_key(APPSECRET_PROOF) {
            self.endpoint =
                crate::url::remove_params_from_url(&self.endpoint, [ACCESS_TOKEN, APPSECRET_PROOF]);
        }
        self
    }
}

pub(crate) const ACCESS_TOKEN: &str = "access_token";
pub(crate) const APPSECRET_PROOF: &str = "appsecret_proof";
