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

//! Helpers to manipulate the query parameters of URLs.
//!
//! The functions in this module accept absolute URLs
//! (`https://graph.facebook.com/me?fields=id`) and path-only URLs
//! (`/me?fields=id`). They preserve everything but the query string, and
//! always produce a query string sorted by parameter name.

use ::url::form_urlencoded;
use std::collections::BTreeMap;

/// Adds `params` to the query string of `url`.
///
/// Parameters already present in `url` take precedence over the new values.
///
/// # Example
/// ```
/// # use graph_sdk::url::append_params_to_url;
/// let got = append_params_to_url("/me?fields=id", [("fields", "name"), ("limit", "10")]);
/// assert_eq!(got, "/me?fields=id&limit=10");
/// ```
pub fn append_params_to_url<I, K, V>(url: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let parts = UrlParts::new(url);
    let mut query = parts.params();
    for (k, v) in params {
        query.entry(k.into()).or_insert_with(|| v.into());
    }
    parts.with_params(&query)
}

/// Removes the parameters named in `keys` from the query string of `url`.
///
/// # Example
/// ```
/// # use graph_sdk::url::remove_params_from_url;
/// let got = remove_params_from_url("https://example.com/a?code=1&state=2#frag", ["code"]);
/// assert_eq!(got, "https://example.com/a?state=2#frag");
/// ```
pub fn remove_params_from_url<I, K>(url: &str, keys: I) -> String
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let parts = UrlParts::new(url);
    let mut query = parts.params();
    for k in keys {
        query.remove(k.as_ref());
    }
    parts.with_params(&query)
}

/// Returns the query parameters of `url`, decoded.
///
/// If a parameter appears more than once the last value is returned.
pub fn get_params_as_map(url: &str) -> BTreeMap<String, String> {
    UrlParts::new(url).params()
}

/// Copies the query parameters of `from_url` into `to_url`.
///
/// Parameters already present in `to_url` are never overwritten.
///
/// # Example
/// ```
/// # use graph_sdk::url::merge_url_params;
/// let got = merge_url_params("/a?x=1&y=2", "/b?y=3");
/// assert_eq!(got, "/b?x=1&y=3");
/// ```
pub fn merge_url_params(from_url: &str, to_url: &str) -> String {
    append_params_to_url(to_url, get_params_as_map(from_url))
}

/// Ensures `path` starts with a `/`.
///
/// An empty path stays empty.
pub fn force_slash_prefix(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        return path.to_string();
    }
    format!("/{path}")
}

/// Removes the version prefix, if any, from a Graph API path.
///
/// # Example
/// ```
/// # use graph_sdk::url::base_graph_url_endpoint;
/// assert_eq!(base_graph_url_endpoint("/v2.10/me/feed"), "/me/feed");
/// assert_eq!(base_graph_url_endpoint("/me/feed"), "/me/feed");
/// ```
pub fn base_graph_url_endpoint(url: &str) -> String {
    let path = force_slash_prefix(url);
    let Some(rest) = path.strip_prefix("/v") else {
        return path;
    };
    let end = rest.find(['/', '?']).unwrap_or(rest.len());
    if !is_version_number(&rest[..end]) {
        return path;
    }
    match &rest[end..] {
        "" => "/".to_string(),
        r if r.starts_with('?') => format!("/{r}"),
        r => r.to_string(),
    }
}

fn is_version_number(v: &str) -> bool {
    let Some((major, minor)) = v.split_once('.') else {
        return false;
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    digits(major) && digits(minor)
}

/// Converts a parameter value to its wire representation.
///
/// Strings are sent verbatim, booleans and numbers use their JSON text, and
/// arrays or objects are sent as JSON documents.
pub(crate) fn param_value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        v => v.to_string(),
    }
}

/// Encodes `params` as an `application/x-www-form-urlencoded` string.
pub(crate) fn encode_params<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

struct UrlParts<'a> {
    base: &'a str,
    query: &'a str,
    fragment: Option<&'a str>,
}

impl<'a> UrlParts<'a> {
    fn new(url: &'a str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((r, f)) => (r, Some(f)),
            None => (url, None),
        };
        let (base, query) = rest.split_once('?').unwrap_or((rest, ""));
        Self {
            base,
            query,
            fragment,
        }
    }

    fn params(&self) -> BTreeMap<String, String> {
        form_urlencoded::parse(self.query.as_bytes())
            .into_owned()
            .collect()
    }

    fn with_params(&self, params: &BTreeMap<String, String>) -> String {
        let mut url = self.base.to_string();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&encode_params(params));
        }
        if let Some(f) = self.fragment {
            url.push('#');
            url.push_str(f);
        }
        url
    }
}
