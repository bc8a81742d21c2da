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

//! Responses returned by the Graph API.

use crate::error::GraphError;
use crate::{Error, Result};
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};

/// The decoded response to a single request.
///
/// # Example
/// ```
/// # use graph_sdk::client::Graph;
/// # async fn sample(client: &Graph) -> anyhow::Result<()> {
/// let response = client.get("/me").send().await?;
/// println!("status={}", response.http_status_code());
/// println!("name={:?}", response.decoded_body().get("name"));
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GraphResponse {
    status_code: u16,
    headers: HeaderMap,
    body: Bytes,
    decoded: Map<String, Value>,
}

impl GraphResponse {
    /// Decodes an HTTP response.
    ///
    /// Returns an error if the response has an error status, or if its body
    /// contains a Graph API error.
    pub fn new(status_code: u16, headers: HeaderMap, body: Bytes) -> Result<Self> {
        let decoded = decode(status_code, &headers, &body)?;
        Ok(Self {
            status_code,
            headers,
            body,
            decoded,
        })
    }

    /// Creates a successful response with the given decoded body.
    ///
    /// Useful when mocking the [stub][crate::stub::Graph] trait.
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::response::GraphResponse;
    /// let body = serde_json::json!({"id": "123"});
    /// let response = GraphResponse::from_decoded_body(body.as_object().cloned().unwrap());
    /// assert_eq!(response.decoded_body().get("id"), Some(&serde_json::json!("123")));
    /// ```
    pub fn from_decoded_body(decoded: Map<String, Value>) -> Self {
        let body = Bytes::from(Value::Object(decoded.clone()).to_string());
        Self {
            status_code: StatusCode::OK.as_u16(),
            headers: HeaderMap::new(),
            body,
            decoded,
        }
    }

    pub fn http_status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The response body, decoded as a map.
    ///
    /// JSON objects are returned as-is. Responses consisting of a single
    /// boolean are returned as `{"success": value}`, and responses consisting
    /// of a single number are returned as `{"id": value}`. Form-encoded
    /// responses are returned as a map of strings.
    pub fn decoded_body(&self) -> &Map<String, Value> {
        &self.decoded
    }

    /// Consumes the response, returning the decoded body.
    pub fn into_decoded_body(self) -> Map<String, Value> {
        self.decoded
    }

    /// The entity tag, if any.
    ///
    /// Send this value with the next request for the same resource to avoid
    /// downloading unchanged data.
    pub fn etag(&self) -> Option<&str> {
        header_str(&self.headers, http::header::ETAG)
    }

    /// The API version that served the request.
    pub fn graph_version(&self) -> Option<&str> {
        header_str(&self.headers, API_VERSION_HEADER)
    }

    /// The resource was not modified since the entity tag was issued.
    pub fn is_not_modified(&self) -> bool {
        self.status_code == StatusCode::NOT_MODIFIED.as_u16()
    }
}

const API_VERSION_HEADER: &str = "facebook-api-version";

fn header_str<K: http::header::AsHeaderName>(headers: &HeaderMap, name: K) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// The responses to a batch request.
///
/// The service returns one item per entry. Entries omitted on success have
/// no item.
#[derive(Debug, Default)]
pub struct BatchResponse {
    items: Vec<BatchItem>,
}

impl BatchResponse {
    /// Decodes the HTTP response to a batch request.
    ///
    /// `names` contains the name, if any, of each entry in the batch.
    pub(crate) fn new(
        names: &[Option<String>],
        status_code: u16,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Self> {
        check_status(status_code, &headers, &body)?;
        let raw = serde_json::from_slice::<Vec<Option<RawBatchItem>>>(&body).map_err(Error::deser)?;
        let items = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| item.map(|i| (index, i)))
            .map(|(index, item)| BatchItem {
                index,
                name: names.get(index).cloned().flatten(),
                result: item.into_response(),
            })
            .collect();
        Ok(Self { items })
    }

    /// Creates a batch response from its items.
    ///
    /// Useful when mocking the [stub][crate::stub::Graph] trait.
    pub fn from_items<I: IntoIterator<Item = BatchItem>>(items: I) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchItem> {
        self.items.iter()
    }

    /// Finds the response to the entry called `name`.
    pub fn get(&self, name: &str) -> Option<&BatchItem> {
        self.items.iter().find(|i| i.name.as_deref() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for BatchResponse {
    type Item = BatchItem;
    type IntoIter = std::vec::IntoIter<BatchItem>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// The response to one entry in a batch.
#[derive(Debug)]
pub struct BatchItem {
    index: usize,
    name: Option<String>,
    result: Result<GraphResponse>,
}

impl BatchItem {
    /// Creates a new item.
    pub fn new(index: usize, name: Option<String>, result: Result<GraphResponse>) -> Self {
        Self {
            index,
            name,
            result,
        }
    }

    /// The position of the entry in the batch request.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The name of the entry, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The response, or the error, for this entry.
    pub fn result(&self) -> &Result<GraphResponse> {
        &self.result
    }

    pub fn into_result(self) -> Result<GraphResponse> {
        self.result
    }
}

#[derive(Deserialize)]
struct RawBatchItem {
    code: u16,
    #[serde(default)]
    headers: Vec<RawHeader>,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Deserialize)]
struct RawHeader {
    name: String,
    value: String,
}

impl RawBatchItem {
    fn into_response(self) -> Result<GraphResponse> {
        let headers = self
            .headers
            .into_iter()
            .filter_map(|h| {
                let name = HeaderName::from_bytes(h.name.as_bytes()).ok()?;
                let value = HeaderValue::from_str(&h.value).ok()?;
                Some((name, value))
            })
            .collect::<HeaderMap>();
        let body = self.body.map(Bytes::from).unwrap_or_default();
        GraphResponse::new(self.code, headers, body)
    }
}

fn is_success(status_code: u16) -> bool {
    StatusCode::from_u16(status_code)
        .map(|s| s.is_success())
        .unwrap_or(false)
}

/// Returns the error, if any, contained in the response.
fn check_status(status_code: u16, headers: &HeaderMap, body: &Bytes) -> Result<()> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        check_error_value(status_code, headers, body, &value)?;
    }
    check_http_status(status_code, headers, body)
}

fn check_http_status(status_code: u16, headers: &HeaderMap, body: &Bytes) -> Result<()> {
    if !is_success(status_code) && status_code != StatusCode::NOT_MODIFIED.as_u16() {
        return Err(Error::http(status_code, headers.clone(), body.clone()));
    }
    Ok(())
}

fn check_error_value(
    status_code: u16,
    headers: &HeaderMap,
    body: &Bytes,
    value: &Value,
) -> Result<()> {
    if value.get("error").is_none() {
        return Ok(());
    }
    match GraphError::try_from(value) {
        Ok(e) => Err(Error::service_with_http_metadata(
            e,
            Some(status_code),
            Some(headers.clone()),
        )),
        Err(_) if !is_success(status_code) => {
            Err(Error::http(status_code, headers.clone(), body.clone()))
        }
        Err(e) => Err(e),
    }
}

fn decode(status_code: u16, headers: &HeaderMap, body: &Bytes) -> Result<Map<String, Value>> {
    if status_code == StatusCode::NOT_MODIFIED.as_u16() {
        return Ok(Map::new());
    }
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(v) => v,
        Err(_) => {
            check_http_status(status_code, headers, body)?;
            return Ok(decode_form(body));
        }
    };
    check_error_value(status_code, headers, body, &value)?;
    check_http_status(status_code, headers, body)?;
    let decoded = match value {
        Value::Object(m) => m,
        Value::Bool(b) => Map::from_iter([("success".to_string(), Value::Bool(b))]),
        Value::Number(n) => Map::from_iter([("id".to_string(), Value::Number(n))]),
        Value::Array(a) => a
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::String(_) | Value::Null => decode_form(body),
    };
    Ok(decoded)
}

fn decode_form(body: &Bytes) -> Map<String, Value> {
    ::url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> Bytes {
        Bytes::from(v.to_string())
    }

    #[test]
    fn object() -> anyhow::Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert("etag", HeaderValue::from_static("\"abc\""));
        headers.insert("facebook-api-version", HeaderValue::from_static("v2.10"));
        let response = GraphResponse::new(200, headers, body(json!({"id": "123", "name": "Foo"})))?;
        assert_eq!(response.http_status_code(), 200);
        assert_eq!(response.etag(), Some("\"abc\""));
        assert_eq!(response.graph_version(), Some("v2.10"));
        assert_eq!(response.decoded_body().get("id"), Some(&json!("123")));
        assert_eq!(response.decoded_body().get("name"), Some(&json!("Foo")));
        assert!(!response.is_not_modified(), "{response:?}");
        Ok(())
    }

    #[test]
    fn scalars() -> anyhow::Result<()> {
        let response = GraphResponse::new(200, HeaderMap::new(), Bytes::from_static(b"true"))?;
        assert_eq!(response.decoded_body(), json!({"success": true}).as_object().unwrap());
        let response = GraphResponse::new(200, HeaderMap::new(), Bytes::from_static(b"1337"))?;
        assert_eq!(response.decoded_body(), json!({"id": 1337}).as_object().unwrap());
        Ok(())
    }

    #[test]
    fn form_encoded() -> anyhow::Result<()> {
        let response = GraphResponse::new(
            200,
            HeaderMap::new(),
            Bytes::from_static(b"access_token=abc&expires=5183999"),
        )?;
        let want = json!({"access_token": "abc", "expires": "5183999"});
        assert_eq!(response.decoded_body(), want.as_object().unwrap());
        Ok(())
    }

    #[test]
    fn not_modified() -> anyhow::Result<()> {
        let response = GraphResponse::new(304, HeaderMap::new(), Bytes::new())?;
        assert!(response.is_not_modified(), "{response:?}");
        assert!(response.decoded_body().is_empty(), "{response:?}");
        Ok(())
    }

    #[test]
    fn service_error() {
        let payload = json!({"error": {
            "message": "Invalid OAuth access token.",
            "type": "OAuthException",
            "code": 190
        }});
        let got = GraphResponse::new(400, HeaderMap::new(), body(payload));
        let err = got.unwrap_err();
        assert!(err.is_authentication(), "{err:?}");
        assert_eq!(err.http_status_code(), Some(400));
    }

    #[test]
    fn service_error_with_success_status() {
        let payload = json!({"error": {"message": "chunk", "code": 6001, "error_subcode": 1363030}});
        let got = GraphResponse::new(200, HeaderMap::new(), body(payload));
        let err = got.unwrap_err();
        assert!(err.is_resumable_upload(), "{err:?}");
    }

    #[test]
    fn http_error() {
        let got = GraphResponse::new(502, HeaderMap::new(), Bytes::from_static(b"bad gateway"));
        let err = got.unwrap_err();
        assert!(err.is_transport(), "{err:?}");
        assert_eq!(err.http_status_code(), Some(502));
        assert_eq!(err.http_payload(), Some(&Bytes::from_static(b"bad gateway")));

        let got = GraphResponse::new(500, HeaderMap::new(), body(json!({"unexpected": true})));
        let err = got.unwrap_err();
        assert_eq!(err.http_status_code(), Some(500));
        assert!(err.graph_error().is_none(), "{err:?}");
    }

    #[test]
    fn from_decoded_body() {
        let decoded = json!({"id": "123"}).as_object().cloned().unwrap();
        let response = GraphResponse::from_decoded_body(decoded.clone());
        assert_eq!(response.http_status_code(), 200);
        assert_eq!(response.decoded_body(), &decoded);
        assert_eq!(response.into_decoded_body(), decoded);
    }

    #[test]
    fn batch() -> anyhow::Result<()> {
        let payload = json!([
            {
                "code": 200,
                "headers": [{"name": "ETag", "value": "\"abc\""}],
                "body": json!({"id": "1", "name": "Foo"}).to_string(),
            },
            null,
            {
                "code": 400,
                "headers": [],
                "body": json!({"error": {"message": "too fast", "code": 4}}).to_string(),
            },
        ]);
        let names = vec![Some("get-me".to_string()), Some("post-feed".to_string()), None];
        let response = BatchResponse::new(&names, 200, HeaderMap::new(), body(payload))?;
        assert_eq!(response.len(), 2);

        let items = response.iter().collect::<Vec<_>>();
        assert_eq!(items[0].index(), 0);
        assert_eq!(items[0].name(), Some("get-me"));
        let first = items[0].result().as_ref().map_err(|e| anyhow::anyhow!("{e}"))?;
        assert_eq!(first.etag(), Some("\"abc\""));
        assert_eq!(first.decoded_body().get("name"), Some(&json!("Foo")));

        assert_eq!(items[1].index(), 2);
        assert_eq!(items[1].name(), None);
        let err = items[1].result().as_ref().unwrap_err();
        assert!(err.is_throttle(), "{err:?}");

        assert!(response.get("get-me").is_some());
        assert!(response.get("post-feed").is_none());
        Ok(())
    }

    #[test]
    fn batch_error() {
        let payload = json!({"error": {"message": "Invalid OAuth access token.", "code": 190}});
        let got = BatchResponse::new(&[], 400, HeaderMap::new(), body(payload));
        let err = got.unwrap_err();
        assert!(err.is_authentication(), "{err:?}");

        let got = BatchResponse::new(&[], 200, HeaderMap::new(), Bytes::from_static(b"not json"));
        let err = got.unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
    }
}
