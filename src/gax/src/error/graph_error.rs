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

use super::Error;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// The error payload returned by the Graph API.
///
/// The service reports errors as a JSON object of the form
/// `{"error": {"message": ..., "type": ..., "code": ..., "error_subcode": ...}}`.
/// This type captures the contents of the `error` field.
///
/// # Example
/// ```
/// use graph_sdk_gax::error::{GraphError, GraphErrorKind};
/// let body = bytes::Bytes::from_static(
///     br#"{"error": {"message": "chunk rejected", "code": 6001, "error_subcode": 1363030}}"#);
/// let error = GraphError::try_from(&body)?;
/// assert_eq!(error.kind(), GraphErrorKind::ResumableUpload);
/// # Ok::<(), graph_sdk_gax::error::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[non_exhaustive]
pub struct GraphError {
    /// A human-readable description of the error.
    #[serde(default)]
    pub message: String,

    /// The error type, e.g. `OAuthException`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// The numeric error code.
    #[serde(default)]
    pub code: i64,

    /// Additional classification of the error code.
    #[serde(rename = "error_subcode", default, skip_serializing_if = "Option::is_none")]
    pub subcode: Option<i64>,

    /// An identifier used by the service support team to trace the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fbtrace_id: Option<String>,

    /// A short title suitable to display to end users.
    #[serde(rename = "error_user_title", default, skip_serializing_if = "Option::is_none")]
    pub user_title: Option<String>,

    /// A message suitable to display to end users.
    #[serde(rename = "error_user_msg", default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
}

impl GraphError {
    /// Creates an error with the given code and message.
    pub fn new<T: Into<String>>(code: i64, message: T) -> Self {
        Self {
            code,
            message: message.into(),
            ..Default::default()
        }
    }

    /// Sets the [subcode][GraphError::subcode].
    pub fn set_subcode(mut self, v: i64) -> Self {
        self.subcode = Some(v);
        self
    }

    /// Sets the [error_type][GraphError::error_type].
    pub fn set_error_type<T: Into<String>>(mut self, v: T) -> Self {
        self.error_type = Some(v.into());
        self
    }

    /// Sets the [fbtrace_id][GraphError::fbtrace_id].
    pub fn set_fbtrace_id<T: Into<String>>(mut self, v: T) -> Self {
        self.fbtrace_id = Some(v.into());
        self
    }

    /// Classifies this error.
    ///
    /// Subcodes are more specific than codes and are consulted first. Codes
    /// are consulted next, and finally the error type.
    pub fn kind(&self) -> GraphErrorKind {
        let by_subcode = self.subcode.and_then(|s| lookup(SUBCODE_KINDS, s));
        by_subcode
            .or_else(|| lookup(CODE_KINDS, self.code))
            .or_else(|| match self.error_type.as_deref() {
                Some(OAUTH_EXCEPTION) => Some(GraphErrorKind::Authentication),
                _ => None,
            })
            .unwrap_or(GraphErrorKind::Other)
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}", self.code)?;
        if let Some(s) = self.subcode {
            write!(f, "/{s}")?;
        }
        write!(f, ") {}", self.message)
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: GraphError,
}

impl TryFrom<&bytes::Bytes> for GraphError {
    type Error = Error;

    fn try_from(value: &bytes::Bytes) -> Result<Self, Self::Error> {
        serde_json::from_slice::<ErrorWrapper>(value)
            .map(|w| w.error)
            .map_err(Error::deser)
    }
}

impl TryFrom<&serde_json::Value> for GraphError {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let error = value
            .get("error")
            .ok_or_else(|| Error::deser("missing `error` field"))?;
        serde_json::from_value::<GraphError>(error.clone()).map_err(Error::deser)
    }
}

/// The classification of a [GraphError].
///
/// Applications typically use this to decide if a request can be retried,
/// requires new credentials, or should be reported to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum GraphErrorKind {
    /// The access token is missing, invalid, or expired.
    Authentication,
    /// The access token lacks the permissions required by the request.
    Authorization,
    /// The application or user made too many requests.
    Throttle,
    /// A transient problem in the service.
    Server,
    /// The request was rejected as a duplicate.
    Client,
    /// A chunk of a resumable upload was rejected, the upload session is
    /// still valid and the same chunk may be sent again.
    ResumableUpload,
    /// Any other error.
    Other,
}

const OAUTH_EXCEPTION: &str = "OAuthException";

// New classifications are added here, not in `kind()`.
const SUBCODE_KINDS: &[(RangeInclusive<i64>, GraphErrorKind)] = &[
    // Session expired, password changed, app removed, invalid session.
    (458..=460, GraphErrorKind::Authentication),
    (463..=464, GraphErrorKind::Authentication),
    (467..=467, GraphErrorKind::Authentication),
    // Upload chunk rejected, invalid offset, upload timed out, chunk too
    // large, upload session interrupted.
    (1363019..=1363019, GraphErrorKind::ResumableUpload),
    (1363021..=1363021, GraphErrorKind::ResumableUpload),
    (1363030..=1363030, GraphErrorKind::ResumableUpload),
    (1363033..=1363033, GraphErrorKind::ResumableUpload),
    (1363041..=1363041, GraphErrorKind::ResumableUpload),
];

const CODE_KINDS: &[(RangeInclusive<i64>, GraphErrorKind)] = &[
    (100..=100, GraphErrorKind::Authentication),
    (102..=102, GraphErrorKind::Authentication),
    (190..=190, GraphErrorKind::Authentication),
    (1..=2, GraphErrorKind::Server),
    (4..=4, GraphErrorKind::Throttle),
    (17..=17, GraphErrorKind::Throttle),
    (32..=32, GraphErrorKind::Throttle),
    (341..=341, GraphErrorKind::Throttle),
    (613..=613, GraphErrorKind::Throttle),
    (506..=506, GraphErrorKind::Client),
    (10..=10, GraphErrorKind::Authorization),
    (200..=299, GraphErrorKind::Authorization),
];

fn lookup(table: &[(RangeInclusive<i64>, GraphErrorKind)], value: i64) -> Option<GraphErrorKind> {
    table
        .iter()
        .find(|(range, _)| range.contains(&value))
        .map(|(_, kind)| *kind)
}
