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

//! The default implementation of [stub::Graph][crate::stub::Graph].

use crate::access_token::{AccessToken, AppSecret};
use crate::file::GraphFile;
use crate::model::{BatchEntry, BatchRequest, GraphRequest, Method};
use crate::response::{BatchResponse, GraphResponse};
use crate::url::{
    append_params_to_url, base_graph_url_endpoint, encode_params, force_slash_prefix,
    param_value_to_string,
};
use crate::{Error, Result};
use gax::client_builder::internal::ClientConfig;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

pub(crate) const DEFAULT_ENDPOINT: &str = "https://graph.facebook.com";
pub(crate) const DEFAULT_VIDEO_ENDPOINT: &str = "https://graph-video.facebook.com";
pub(crate) const DEFAULT_GRAPH_VERSION: &str = "v2.10";

const USER_AGENT: &str = concat!("graph-sdk-rust/", env!("CARGO_PKG_VERSION"));
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sends requests to the Graph API using HTTP.
#[derive(Clone, Debug)]
pub struct Graph {
    inner: Arc<GraphInner>,
}

#[derive(Debug)]
struct GraphInner {
    client: reqwest::Client,
    endpoint: String,
    video_endpoint: String,
    graph_version: String,
    access_token: Option<AccessToken>,
    app_secret: Option<AppSecret>,
    tracing: bool,
}

/// The fields of one HTTP request, before they are converted to a
/// `reqwest::RequestBuilder`.
struct WireRequest {
    method: Method,
    url: String,
    params: BTreeMap<String, String>,
    files: BTreeMap<String, GraphFile>,
    etag: Option<String>,
}

impl Graph {
    pub(crate) fn new(config: ClientConfig<AccessToken>) -> gax::client_builder::Result<Self> {
        use gax::client_builder::Error;
        let graph_version = config
            .graph_version
            .unwrap_or_else(|| DEFAULT_GRAPH_VERSION.to_string());
        if graph_version.is_empty() {
            return Err(Error::configuration("the graph version cannot be empty"));
        }
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::transport)?;
        let inner = GraphInner {
            client,
            endpoint: trim_endpoint(config.endpoint, DEFAULT_ENDPOINT),
            video_endpoint: trim_endpoint(config.video_endpoint, DEFAULT_VIDEO_ENDPOINT),
            graph_version,
            access_token: config.cred,
            app_secret: config.app_secret.map(AppSecret::new),
            tracing: config.tracing,
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }
}

fn trim_endpoint(endpoint: Option<String>, default: &str) -> String {
    endpoint
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

impl crate::stub::Graph for Graph {
    async fn execute(&self, req: GraphRequest) -> Result<GraphResponse> {
        let wire = self.inner.wire_request(req)?;
        let (method, url) = (wire.method, wire.url.clone());
        if self.inner.tracing {
            tracing::debug!(%method, url = %redact(&url), "sending request");
        }
        let response = self.inner.send(wire).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::io)?;
        if self.inner.tracing {
            tracing::debug!(%method, url = %redact(&url), status, "received response");
        }
        GraphResponse::new(status, headers, body)
    }

    async fn execute_batch(&self, batch: BatchRequest) -> Result<BatchResponse> {
        let names = batch
            .entries()
            .iter()
            .map(|e| e.name().map(str::to_string))
            .collect::<Vec<_>>();
        let wire = self.inner.wire_batch(batch)?;
        if self.inner.tracing {
            tracing::debug!(
                entries = names.len(),
                url = %redact(&wire.url),
                "sending batch request"
            );
        }
        let response = self.inner.send(wire).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::io)?;
        if self.inner.tracing {
            tracing::debug!(entries = names.len(), status, "received batch response");
        }
        BatchResponse::new(&names, status, headers, body)
    }
}

impl GraphInner {
    fn wire_request(&self, req: GraphRequest) -> Result<WireRequest> {
        let req = req.normalize();
        if req.endpoint().is_empty() {
            return Err(Error::binding("the request endpoint cannot be empty"));
        }
        let base = if is_video_endpoint(req.endpoint()) {
            &self.video_endpoint
        } else {
            &self.endpoint
        };
        let url = format!("{base}{}", self.relative_url(&req));
        let token = req.access_token().or(self.access_token.as_ref());
        let params = self.params_with_credentials(&req, token);
        Ok(WireRequest {
            method: req.method(),
            url,
            params,
            files: req.files,
            etag: req.etag,
        })
    }

    fn wire_batch(&self, batch: BatchRequest) -> Result<WireRequest> {
        let BatchRequest {
            entries: batch_entries,
            fallback_access_token,
            graph_version,
        } = batch;
        let graph_version = graph_version.as_deref().unwrap_or(&self.graph_version);
        let fallback = fallback_access_token.or_else(|| self.access_token.clone());
        let mut files = BTreeMap::new();
        let mut entries = Vec::with_capacity(batch_entries.len());
        for entry in batch_entries {
            entries.push(self.batch_entry(entry, graph_version, fallback.as_ref(), &mut files)?);
        }
        let mut params = BTreeMap::new();
        params.insert(
            "batch".to_string(),
            serde_json::to_string(&entries).map_err(Error::ser)?,
        );
        params.insert("include_headers".to_string(), "true".to_string());
        self.insert_credentials(&mut params, fallback.as_ref());
        Ok(WireRequest {
            method: Method::Post,
            url: format!("{}/{graph_version}", self.endpoint),
            params,
            files,
            etag: None,
        })
    }

    /// Converts one entry to its representation in the `batch` parameter.
    ///
    /// Files attached to the entry are moved to `files`, with a name unique
    /// within the batch.
    fn batch_entry(
        &self,
        entry: BatchEntry,
        graph_version: &str,
        fallback: Option<&AccessToken>,
        files: &mut BTreeMap<String, GraphFile>,
    ) -> Result<Value> {
        let BatchEntry {
            request,
            name,
            depends_on,
            omit_response_on_success,
        } = entry;
        let mut request = request.normalize();
        if request.endpoint().is_empty() {
            return Err(Error::binding("the batch entry endpoint cannot be empty"));
        }
        if request.graph_version.is_none() {
            request.graph_version = Some(graph_version.to_string());
        }
        let token = request.access_token().or(fallback);
        let params = self.params_with_credentials(&request, token);
        let relative_url = self.relative_url(&request);

        let mut value = json!({
            "method": request.method().as_str(),
            "omit_response_on_success": omit_response_on_success,
        });
        match request.method() {
            Method::Post => {
                value["relative_url"] = json!(relative_url);
                value["body"] = json!(encode_params(&params));
            }
            Method::Get | Method::Delete => {
                value["relative_url"] = json!(append_params_to_url(&relative_url, params));
            }
        }
        if let Some(etag) = request.etag() {
            value["headers"] = json!([format!("If-None-Match: {etag}")]);
        }
        if let Some(n) = name {
            value["name"] = json!(n);
        }
        if let Some(d) = depends_on {
            value["depends_on"] = json!(d);
        }
        if !request.files.is_empty() {
            let mut attached = Vec::new();
            for file in request.files.into_values() {
                let id = format!("file{}", files.len());
                attached.push(id.clone());
                files.insert(id, file);
            }
            value["attached_files"] = json!(attached.join(","));
        }
        Ok(value)
    }

    /// The version and path of the request, e.g. `/v2.10/me`.
    ///
    /// A version prefix in the endpoint is replaced by the request version.
    fn relative_url(&self, req: &GraphRequest) -> String {
        let version = req.graph_version().unwrap_or(&self.graph_version);
        format!(
            "{}{}",
            force_slash_prefix(version),
            base_graph_url_endpoint(req.endpoint())
        )
    }

    fn params_with_credentials(
        &self,
        req: &GraphRequest,
        token: Option<&AccessToken>,
    ) -> BTreeMap<String, String> {
        let mut params: BTreeMap<String, String> = req
            .params()
            .iter()
            .map(|(k, v)| (k.clone(), param_value_to_string(v)))
            .collect();
        self.insert_credentials(&mut params, token);
        params
    }

    fn insert_credentials(
        &self,
        params: &mut BTreeMap<String, String>,
        token: Option<&AccessToken>,
    ) {
        let Some(token) = token else {
            return;
        };
        params.insert(
            crate::model::ACCESS_TOKEN.to_string(),
            token.value().to_string(),
        );
        if let Some(secret) = &self.app_secret {
            params.insert(
                crate::model::APPSECRET_PROOF.to_string(),
                token.app_secret_proof(secret),
            );
        }
    }

    async fn send(&self, wire: WireRequest) -> Result<reqwest::Response> {
        let WireRequest {
            method,
            url,
            params,
            files,
            etag,
        } = wire;
        let mut builder = match method {
            Method::Get | Method::Delete => self
                .client
                .request(method.into(), append_params_to_url(&url, params)),
            Method::Post if files.is_empty() => self
                .client
                .post(url)
                .header(http::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(encode_params(&params)),
            Method::Post => self.client.post(url).multipart(multipart(params, files)?),
        };
        if let Some(etag) = etag {
            builder = builder.header(http::header::IF_NONE_MATCH, etag);
        }
        builder.send().await.map_err(map_send_error)
    }
}

fn multipart(
    params: BTreeMap<String, String>,
    files: BTreeMap<String, GraphFile>,
) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for (k, v) in params {
        form = form.text(k, v);
    }
    for (k, file) in files {
        let size = file.size();
        let part = reqwest::multipart::Part::stream_with_length(file.contents().clone(), size)
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(Error::ser)?;
        form = form.part(k, part);
    }
    Ok(form)
}

fn map_send_error(err: reqwest::Error) -> Error {
    match err {
        e if e.is_timeout() => Error::timeout(e),
        e => Error::io(e),
    }
}

/// Video uploads are sent to a separate host.
fn is_video_endpoint(endpoint: &str) -> bool {
    let path = endpoint.split(['?', '#']).next().unwrap_or_default();
    path.ends_with("/videos")
}

/// Removes credentials from URLs before they are logged.
fn redact(url: &str) -> String {
    crate::url::remove_params_from_url(
        url,
        [crate::model::ACCESS_TOKEN, crate::model::APPSECRET_PROOF],
    )
}
