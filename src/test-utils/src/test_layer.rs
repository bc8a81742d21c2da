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


//! Capture the log events emitted by the client library.
//!
//! Some behavior, such as a rejected upload chunk, is only observable in the
//! logs. Tests use [TestLayer] to verify these events.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber, field};
use tracing_subscriber::{Layer, layer::Context, prelude::*};

/// A log event captured by [TestLayer].
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    /// The level of the event.
    pub level: Level,
    /// The module that emitted the event.
    pub target: String,
    /// A map of field names to their string representations.
    ///
    /// The formatted message, if any, is stored as `message`.
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// The formatted message of the event.
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }

    /// The value of a field, formatted as a string.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct TestVisitor<'a>(&'a mut HashMap<String, String>);

impl field::Visit for TestVisitor<'_> {
    fn record_str(&mut self, field: &field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_i64(&mut self, field: &field::Field, value: i64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &field::Field, value: bool) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// A [Layer] that records every event.
///
/// The layer is installed as the default subscriber for the current thread.
/// Use it with the single-threaded runtime, the default for `#[tokio::test]`.
///
/// # Example
/// ```
/// use graph_sdk_test_utils::test_layer::TestLayer;
/// let (layer, _guard) = TestLayer::initialize();
/// tracing::warn!(attempt = 2, "chunk rejected");
/// let events = layer.capture();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].message(), Some("chunk rejected"));
/// assert_eq!(events[0].field("attempt"), Some("2"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TestLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestLayer {
    /// Installs a new `TestLayer` for the current thread.
    ///
    /// Events are captured while the returned guard is in scope.
    pub fn initialize() -> (Self, tracing::subscriber::DefaultGuard) {
        let layer = TestLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (layer, guard)
    }

    /// Retrieves and removes all the captured events.
    pub fn capture(&self) -> Vec<CapturedEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl<S> Layer<S> for TestLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut TestVisitor(&mut fields));
        let metadata = event.metadata();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            fields,
        });
    }
}
