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

//! Graph API Client Libraries for Rust - Common Types
//!
//! This crate contains the types shared by the Graph API client libraries:
//! the error type returned by all requests, the classification of errors
//! reported by the service, and the generic client builder.
//!
//! Most applications do not depend on this crate directly, the types are
//! re-exported by `graph-sdk`.

/// An alias of [std::result::Result] where the error is always [Error][crate::error::Error].
///
/// This is the result type used by all functions wrapping requests.
///
/// # Example
/// ```
/// use graph_sdk_gax::Result;
/// fn get_id() -> Result<String> {
///     Ok("1337".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, crate::error::Error>;

pub mod client_builder;
pub mod error;
