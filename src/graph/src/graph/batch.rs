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

//! Builders for batch requests.
//!
//! A batch is built with two types. [BatchRequestBuilder] holds the entries
//! completed so far. Each call to `get()`, `post()`, or `delete()` opens a new
//! entry and returns a [BatchEntryBuilder], which configures that entry only.
//! Opening the next entry, or sending the batch, appends the open entry to the
//! batch. Entry metadata can only be set while the entry is open, so it cannot
//! be attached to the wrong entry.

use crate::Result;
use crate::access_token::AccessToken;
use crate::file::GraphFile;
use crate::model::{BatchEntry, BatchRequest, GraphRequest, Method};
use crate::response::BatchResponse;
use std::sync::Arc;

/// A request builder for batch requests.
///
/// # Example
/// ```
/// # use graph_sdk::client::Graph;
/// async fn sample(client: &Graph) -> anyhow::Result<()> {
///     let response = client
///         .batch()
///         .with_fallback_access_token("page-token")
///         .get("/me")
///         .with_name("get-me")
///         .post("/me/feed")
///         .with_depends_on("get-me")
///         .with_param("message", "hello")
///         .send()
///         .await?;
///     println!("{} responses", response.len());
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct BatchRequestBuilder<S = crate::transport::Graph> {
    stub: Arc<S>,
    batch: BatchRequest,
}

impl<S> BatchRequestBuilder<S>
where
    S: crate::stub::Graph + 'static,
{
    /// Sends all the entries in a single call.
    ///
    /// An empty batch is sent as-is, the service decides how to handle it.
    pub async fn send(self) -> Result<BatchResponse> {
        tracing::debug!(entries = self.batch.len(), "sending batch");
        self.stub.execute_batch(self.batch).await
    }
}

impl<S> BatchRequestBuilder<S> {
    pub(crate) fn new(stub: Arc<S>) -> Self {
        Self {
            stub,
            batch: BatchRequest::default(),
        }
    }

    /// Sets the access token used by entries that do not set their own.
    pub fn with_fallback_access_token<T: Into<AccessToken>>(mut self, v: T) -> Self {
        self.batch.fallback_access_token = Some(v.into());
        self
    }

    /// Overrides the client's API version for the batch and its entries.
    pub fn with_graph_version<V: Into<String>>(mut self, v: V) -> Self {
        self.batch.graph_version = Some(v.into());
        self
    }

    /// Opens a `GET` entry.
    pub fn get<V: Into<String>>(self, endpoint: V) -> BatchEntryBuilder<S> {
        self.open(Method::Get, endpoint.into())
    }

    /// Opens a `POST` entry.
    pub fn post<V: Into<String>>(self, endpoint: V) -> BatchEntryBuilder<S> {
        self.open(Method::Post, endpoint.into())
    }

    /// Opens a `DELETE` entry.
    pub fn delete<V: Into<String>>(self, endpoint: V) -> BatchEntryBuilder<S> {
        self.open(Method::Delete, endpoint.into())
    }

    /// Returns the batch without sending it.
    pub fn build(self) -> BatchRequest {
        self.batch
    }

    fn open(self, method: Method, endpoint: String) -> BatchEntryBuilder<S> {
        let request = GraphRequest {
            endpoint,
            method,
            ..Default::default()
        };
        BatchEntryBuilder {
            parent: self,
            entry: BatchEntry::new(request),
        }
    }
}

/// Configures the open entry of a batch request.
///
/// New entries are omitted from the batch results on success, use
/// [with_omit_response_on_success][BatchEntryBuilder::with_omit_response_on_success]
/// to receive their response.
#[derive(Clone, Debug)]
pub struct BatchEntryBuilder<S = crate::transport::Graph> {
    parent: BatchRequestBuilder<S>,
    entry: BatchEntry,
}

impl<S> BatchEntryBuilder<S>
where
    S: crate::stub::Graph + 'static,
{
    /// Appends the open entry and sends the batch.
    pub async fn send(self) -> Result<BatchResponse> {
        self.close().send().await
    }
}

impl<S> BatchEntryBuilder<S> {
    /// Names the entry, other entries can depend on it.
    ///
    /// Names should be unique within a batch. The client library does not
    /// validate them.
    pub fn with_name<V: Into<String>>(mut self, v: V) -> Self {
        self.entry.name = Some(v.into());
        self
    }

    /// The entry runs after the entry called `v` completes.
    ///
    /// `v` should name an earlier entry. The client library does not validate
    /// this, the service reports any errors.
    pub fn with_depends_on<V: Into<String>>(mut self, v: V) -> Self {
        self.entry.depends_on = Some(v.into());
        self
    }

    /// If false, the response is included in the batch results even if the
    /// entry succeeds. The default is true.
    pub fn with_omit_response_on_success(mut self, v: bool) -> Self {
        self.entry.omit_response_on_success = v;
        self
    }

    /// Sets the access token for this entry.
    pub fn with_access_token<T: Into<AccessToken>>(mut self, v: T) -> Self {
        self.entry.request.access_token = Some(v.into());
        self
    }

    /// Sets the entity tag for this entry.
    pub fn with_etag<V: Into<String>>(mut self, v: V) -> Self {
        self.entry.request.etag = Some(v.into());
        self
    }

    /// Adds parameters to this entry.
    pub fn with_params<I, K, V>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.entry
            .request
            .params
            .extend(v.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets a single parameter for this entry.
    pub fn with_param<K, V>(mut self, k: K, v: V) -> Self
    where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        self.entry.request.params.insert(k.into(), v.into());
        self
    }

    /// Attaches a file to this entry.
    pub fn with_file<K: Into<String>>(mut self, name: K, file: GraphFile) -> Self {
        self.entry.request.files.insert(name.into(), file);
        self
    }

    /// Appends the open entry and opens a `GET` entry.
    pub fn get<V: Into<String>>(self, endpoint: V) -> Self {
        self.close().get(endpoint)
    }

    /// Appends the open entry and opens a `POST` entry.
    pub fn post<V: Into<String>>(self, endpoint: V) -> Self {
        self.close().post(endpoint)
    }

    /// Appends the open entry and opens a `DELETE` entry.
    pub fn delete<V: Into<String>>(self, endpoint: V) -> Self {
        self.close().delete(endpoint)
    }

    /// Appends the open entry, returning the batch without sending it.
    pub fn build(self) -> BatchRequest {
        self.close().build()
    }

    /// Appends the open entry to the batch.
    ///
    /// Use the returned builder to set batch-wide options, or to send the
    /// batch.
    pub fn close(self) -> BatchRequestBuilder<S> {
        let mut parent = self.parent;
        parent.batch.entries.push(self.entry);
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Graph;
    use crate::response::{BatchItem, GraphResponse};
    use crate::stub::tests::MockGraph;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn summary(batch: &BatchRequest) -> Vec<(&str, Method, Option<&str>)> {
        batch
            .entries()
            .iter()
            .map(|e| (e.request().endpoint(), e.request().method(), e.name()))
            .collect()
    }

    #[test]
    fn entries_follow_call_order() {
        let client = Graph::from_stub(MockGraph::new());
        let batch = client
            .batch()
            .get("/me")
            .with_name("get-me")
            .post("/me/feed")
            .with_name("post-feed")
            .build();
        assert_eq!(
            summary(&batch),
            vec![
                ("/me", Method::Get, Some("get-me")),
                ("/me/feed", Method::Post, Some("post-feed")),
            ]
        );
    }

    #[test]
    fn order_independent_of_metadata() {
        let client = Graph::from_stub(MockGraph::new());
        let batch = client
            .batch()
            .delete("/1")
            .with_name("a")
            .with_etag("e")
            .with_param("x", 1)
            .get("/2")
            .get("/3")
            .with_access_token("t")
            .with_name("c")
            .post("/4")
            .with_name("d")
            .with_depends_on("c")
            .build();
        assert_eq!(
            summary(&batch),
            vec![
                ("/1", Method::Delete, Some("a")),
                ("/2", Method::Get, None),
                ("/3", Method::Get, Some("c")),
                ("/4", Method::Post, Some("d")),
            ]
        );
        assert_eq!(batch.entries()[0].request().etag(), Some("e"));
        assert_eq!(batch.entries()[0].request().params().get("x"), Some(&json!(1)));
        assert_eq!(
            batch.entries()[2].request().access_token().map(|t| t.value()),
            Some("t")
        );
        assert_eq!(batch.entries()[3].depends_on(), Some("c"));
        assert!(batch.entries()[1].request().access_token().is_none());
    }

    #[test]
    fn omit_response_default() {
        let client = Graph::from_stub(MockGraph::new());
        let batch = client
            .batch()
            .get("/me")
            .get("/me/friends")
            .with_omit_response_on_success(false)
            .build();
        assert!(batch.entries()[0].omit_response_on_success());
        assert!(!batch.entries()[1].omit_response_on_success());
    }

    #[test]
    fn batch_options() {
        let client = Graph::from_stub(MockGraph::new());
        let file = GraphFile::from_bytes("a.png", "png");
        let batch = client
            .batch()
            .with_fallback_access_token("fallback")
            .with_graph_version("v3.0")
            .post("/me/photos")
            .with_file("source", file.clone())
            .with_params([("caption", "hi")])
            .close()
            .with_fallback_access_token("other-fallback")
            .build();
        assert_eq!(
            batch.fallback_access_token().map(|t| t.value()),
            Some("other-fallback")
        );
        assert_eq!(batch.graph_version(), Some("v3.0"));
        assert_eq!(batch.len(), 1);
        let request = batch.entries()[0].request();
        assert_eq!(request.files().get("source"), Some(&file));
        assert_eq!(request.params().get("caption"), Some(&json!("hi")));
    }

    #[test]
    fn empty() {
        let client = Graph::from_stub(MockGraph::new());
        let batch = client.batch().build();
        assert!(batch.is_empty(), "{batch:?}");
    }

    #[tokio::test]
    async fn send() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute_batch()
            .times(1)
            .withf(|batch| {
                batch.len() == 2
                    && batch.fallback_access_token().map(|t| t.value()) == Some("fallback")
                    && batch.entries()[0].name() == Some("get-me")
                    && batch.entries()[1].request().endpoint() == "/me/feed"
            })
            .returning(|_| {
                let body = json!({"id": "1"}).as_object().cloned().unwrap();
                Ok(BatchResponse::from_items([BatchItem::new(
                    0,
                    Some("get-me".into()),
                    Ok(GraphResponse::from_decoded_body(body)),
                )]))
            });

        let client = Graph::from_stub(mock);
        let response = client
            .batch()
            .with_fallback_access_token("fallback")
            .get("/me")
            .with_name("get-me")
            .post("/me/feed")
            .send()
            .await?;
        assert_eq!(response.len(), 1);
        assert!(response.get("get-me").is_some());
        Ok(())
    }

    #[tokio::test]
    async fn send_empty() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute_batch()
            .times(1)
            .withf(|batch| batch.is_empty())
            .returning(|_| Ok(BatchResponse::default()));

        let client = Graph::from_stub(mock);
        let response = client.batch().send().await?;
        assert!(response.is_empty());
        Ok(())
    }
}
