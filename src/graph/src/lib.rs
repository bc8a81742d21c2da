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

//! Graph API Client Libraries for Rust
//!
//! This crate contains traits, types, and functions to interact with the
//! Graph API. Most applications will use the [Graph][client::Graph] client
//! and the request builders it returns:
//!
//! * [RequestBuilder][builder::RequestBuilder] to send a single request.
//! * [BatchRequestBuilder][builder::BatchRequestBuilder] to send multiple
//!   requests in a single HTTP round trip.
//! * [ResumableUploader][builder::ResumableUploader] to upload large files
//!   in chunks.
//!
//! # Example
//! ```
//! # use graph_sdk::client::Graph;
//! # async fn sample(client: &Graph) -> anyhow::Result<()> {
//! let response = client
//!     .get("/me")
//!     .with_param("fields", "id,name")
//!     .send()
//!     .await?;
//! println!("id={:?}", response.decoded_body().get("id"));
//! # Ok(()) }
//! ```

pub use gax::Result;
pub use gax::error::Error;

pub mod error {
    //! Errors returned by the client library.
    pub use gax::error::{Error, GraphError, GraphErrorKind};

    pub use crate::file::FileError;
    pub use crate::model::ChunkError;
}

pub mod access_token;
pub mod file;
pub mod model;
pub mod response;
pub mod stub;
pub mod transport;
pub mod url;

mod graph;

/// Clients to interact with the Graph API.
pub mod client {
    pub use crate::graph::client::Graph;
}

/// Request builders.
pub mod builder {
    pub use crate::graph::batch::{BatchEntryBuilder, BatchRequestBuilder};
    pub use crate::graph::client::ClientBuilder;
    pub use crate::graph::request_builder::RequestBuilder;
    pub use crate::graph::upload::{DEFAULT_MAX_TRANSFER_TRIES, ResumableUploader};
}
