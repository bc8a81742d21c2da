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

//! Errors and error details returned by Graph API requests.
//!
//! The client libraries distinguish between errors detected while trying to
//! send a request (e.g. cannot open a connection), errors trying to receive
//! a response, and errors returned by the service itself. Errors returned by
//! the service carry a [GraphError], which is further classified into a
//! [GraphErrorKind].
//!
//! # Example
//! ```
//! use graph_sdk_gax::error::{Error, GraphErrorKind};
//! fn handle_error(e: Error) {
//!     match e.graph_error().map(|g| g.kind()) {
//!         Some(GraphErrorKind::Throttle) => println!("slow down: {e}"),
//!         Some(kind) => println!("service error of kind {kind:?}: {e}"),
//!         None => println!("error before reaching the service: {e}"),
//!     }
//! }
//! ```

mod core_error;
mod graph_error;
pub use core_error::*;
pub use graph_error::*;
