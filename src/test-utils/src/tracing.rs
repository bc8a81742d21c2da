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

/// Prints the client library logs for the current thread.
///
/// The integration tests run against local HTTP servers. The request and
/// upload logs are useful when troubleshooting a failed test. Set the
/// `GRAPH_SDK_TEST_LOG` environment variable to a filter directive, e.g.
/// `graph_sdk=debug`, to change the level.
///
/// # Example
/// ```
/// let _guard = graph_sdk_test_utils::tracing::enable_tracing();
/// tracing::warn!("printed by the test subscriber");
/// ```
pub fn enable_tracing() -> ::tracing::subscriber::DefaultGuard {
    #[cfg(feature = "log-integration-tests")]
    let default_level = "info";
    #[cfg(not(feature = "log-integration-tests"))]
    let default_level = "warn";
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_test_writer()
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

const LOG_VAR: &str = "GRAPH_SDK_TEST_LOG";
