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

use super::GraphRequest;
use crate::access_token::AccessToken;

/// One request in a batch, with the batch-only metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchEntry {
    pub(crate) request: GraphRequest,
    pub(crate) name: Option<String>,
    pub(crate) depends_on: Option<String>,
    pub(crate) omit_response_on_success: bool,
}

impl BatchEntry {
    pub(crate) fn new(request: GraphRequest) -> Self {
        Self {
            request,
            name: None,
            depends_on: None,
            // Entries are omitted from the batch results unless the
            // application asks otherwise. This inverts the service default,
            // and the wire format depends on it.
            omit_response_on_success: true,
        }
    }

    /// The request.
    pub fn request(&self) -> &GraphRequest {
        &self.request
    }

    /// The entry name, other entries refer to it in `depends_on`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name of an earlier entry that must complete before this one.
    ///
    /// The value is not validated by the client library.
    pub fn depends_on(&self) -> Option<&str> {
        self.depends_on.as_deref()
    }

    /// If true, the service omits the response of this entry when it
    /// succeeds.
    pub fn omit_response_on_success(&self) -> bool {
        self.omit_response_on_success
    }
}

/// An ordered sequence of requests, sent in a single HTTP round trip.
///
/// Entries keep the order in which they were added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchRequest {
    pub(crate) entries: Vec<BatchEntry>,
    pub(crate) fallback_access_token: Option<AccessToken>,
    pub(crate) graph_version: Option<String>,
}

impl BatchRequest {
    /// The entries in the batch.
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// The access token used by entries that do not set one.
    ///
    /// When not set, the client's default is used.
    pub fn fallback_access_token(&self) -> Option<&AccessToken> {
        self.fallback_access_token.as_ref()
    }

    /// The API version, if the batch overrides the client's default.
    pub fn graph_version(&self) -> Option<&str> {
        self.graph_version.as_deref()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the batch has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
