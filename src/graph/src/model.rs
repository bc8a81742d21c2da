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

//! The requests sent to the Graph API, and the state of resumable uploads.
//!
//! Applications rarely create these types directly. The builders in
//! [builder][crate::builder] create them, and the [stub][crate::stub] trait
//! consumes them.

mod batch;
mod request;
mod transfer_chunk;

pub use batch::{BatchEntry, BatchRequest};
pub use request::{GraphRequest, Method, Params};
pub(crate) use request::{ACCESS_TOKEN, APPSECRET_PROOF};
pub use transfer_chunk::{ChunkError, TransferChunk, TransferOutcome, UploadResult};
