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

//! Traits to mock the clients in this library.
//!
//! Application developers may need to mock the clients in this library to test
//! how their application works with different (and sometimes hard to trigger)
//! client and service behavior. Such test can define mocks implementing the
//! trait(s) defined in this module, initialize the client with an instance of
//! this mock in their tests, and verify their application responds as expected.

use crate::Result;
use crate::model::{BatchRequest, GraphRequest};
use crate::response::{BatchResponse, GraphResponse};

/// Defines the trait used to implement [crate::client::Graph].
///
/// Application developers may need to implement this trait to mock
/// `client::Graph`. In other use-cases, application developers only
/// use `client::Graph` and need not be concerned with this trait or
/// its implementations.
pub trait Graph: std::fmt::Debug + Send + Sync {
    /// Sends a single request.
    ///
    /// Requests without an access token use the default access token of the
    /// implementation, if any.
    fn execute(
        &self,
        req: GraphRequest,
    ) -> impl std::future::Future<Output = Result<GraphResponse>> + Send;

    /// Sends all the entries in `batch` in a single call.
    ///
    /// Entries without an access token use the fallback access token of the
    /// batch, or the default access token of the implementation.
    fn execute_batch(
        &self,
        batch: BatchRequest,
    ) -> impl std::future::Future<Output = Result<BatchResponse>> + Send;
}
