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

use crate::access_token::AccessToken;
use crate::file::GraphFile;
use crate::model::{GraphRequest, Method, Params, TransferChunk, TransferOutcome, UploadResult};
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

const UPLOAD_PHASE: &str = "upload_phase";
const UPLOAD_SESSION_ID: &str = "upload_session_id";
const VIDEO_ID: &str = "video_id";
const START_OFFSET: &str = "start_offset";
const END_OFFSET: &str = "end_offset";
const FILE_SIZE: &str = "file_size";
const FILE_CHUNK: &str = "video_file_chunk";
const SUCCESS: &str = "success";

/// The default number of retries for each chunk in
/// [upload][ResumableUploader::upload].
pub const DEFAULT_MAX_TRANSFER_TRIES: u32 = 5;

/// Uploads large files in chunks.
///
/// A resumable upload has three phases. [start][ResumableUploader::start]
/// creates an upload session. [transfer][ResumableUploader::transfer] sends
/// one chunk, and is called until the returned chunk
/// [is the last chunk][TransferChunk::is_last_chunk].
/// [finish][ResumableUploader::finish] completes the upload. The service may
/// reject a chunk without invalidating the session, in which case the same
/// chunk is sent again.
///
/// Most applications use [upload][ResumableUploader::upload], which runs all
/// three phases.
///
/// # Example
/// ```
/// # use graph_sdk::client::Graph;
/// # use graph_sdk::file::GraphFile;
/// async fn sample(client: &Graph) -> anyhow::Result<()> {
///     let uploader = client.resumable_uploader();
///     let file = GraphFile::open("my-video.mp4").await?;
///     let mut chunk = uploader.start("/me/videos", file).await?;
///     while !chunk.is_last_chunk() {
///         chunk = uploader
///             .transfer("/me/videos", &chunk, false)
///             .await?
///             .into_chunk();
///     }
///     let success = uploader
///         .finish("/me/videos", chunk.upload_session_id(), Default::default())
///         .await?;
///     println!("video {} uploaded: {success}", chunk.video_id());
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ResumableUploader<S = crate::transport::Graph> {
    stub: Arc<S>,
    access_token: Option<AccessToken>,
    graph_version: Option<String>,
}

impl<S> ResumableUploader<S> {
    pub(crate) fn new(stub: Arc<S>) -> Self {
        Self {
            stub,
            access_token: None,
            graph_version: None,
        }
    }

    /// Sets the access token used in all the phases.
    ///
    /// Without an access token, the client's default is used.
    pub fn with_access_token<T: Into<AccessToken>>(mut self, v: T) -> Self {
        self.access_token = Some(v.into());
        self
    }

    /// Overrides the client's API version for all the phases.
    pub fn with_graph_version<V: Into<String>>(mut self, v: V) -> Self {
        self.graph_version = Some(v.into());
        self
    }
}

impl<S> ResumableUploader<S>
where
    S: crate::stub::Graph + 'static,
{
    /// Creates an upload session for `file`.
    ///
    /// Returns the first chunk to send. Errors are returned unchanged.
    pub async fn start(&self, endpoint: &str, file: GraphFile) -> Result<TransferChunk> {
        let params = Params::from([
            (UPLOAD_PHASE.to_string(), Value::from("start")),
            (FILE_SIZE.to_string(), Value::from(file.size())),
        ]);
        let body = self.post(endpoint, params, BTreeMap::new()).await?;
        let upload_session_id = string_field(&body, UPLOAD_SESSION_ID)?;
        let video_id = string_field(&body, VIDEO_ID)?;
        let start_offset = offset_field(&body, START_OFFSET)?;
        let end_offset = offset_field(&body, END_OFFSET)?;
        TransferChunk::new(file, upload_session_id, video_id, start_offset, end_offset)
    }

    /// Sends the bytes in `[chunk.start_offset(), chunk.end_offset())`.
    ///
    /// On success returns [TransferOutcome::Advanced] with the next chunk. If
    /// the service rejects the chunk but keeps the session valid, and
    /// `allow_throw` is false, returns [TransferOutcome::Retry] with a copy of
    /// `chunk`. All other errors are returned unchanged.
    pub async fn transfer(
        &self,
        endpoint: &str,
        chunk: &TransferChunk,
        allow_throw: bool,
    ) -> Result<TransferOutcome> {
        let contents = chunk.partial_file_contents()?;
        let params = Params::from([
            (UPLOAD_PHASE.to_string(), Value::from("transfer")),
            (
                UPLOAD_SESSION_ID.to_string(),
                Value::from(chunk.upload_session_id()),
            ),
            (START_OFFSET.to_string(), Value::from(chunk.start_offset())),
        ]);
        let files = BTreeMap::from([(
            FILE_CHUNK.to_string(),
            GraphFile::from_bytes(chunk.file().name(), contents),
        )]);
        match self.post(endpoint, params, files).await {
            Ok(body) => {
                let start_offset = offset_field(&body, START_OFFSET)?;
                let end_offset = offset_field(&body, END_OFFSET)?;
                Ok(TransferOutcome::Advanced(
                    chunk.advance(start_offset, end_offset)?,
                ))
            }
            Err(e) if e.is_resumable_upload() && !allow_throw => {
                tracing::warn!(
                    upload_session_id = chunk.upload_session_id(),
                    start_offset = chunk.start_offset(),
                    "chunk rejected, the chunk can be sent again: {e}"
                );
                Ok(TransferOutcome::Retry(chunk.clone()))
            }
            Err(e) => Err(e),
        }
    }

    /// Completes the upload session.
    ///
    /// `metadata` sets the properties of the uploaded object, e.g. `title` or
    /// `description`. The protocol fields take precedence over any `metadata`
    /// with the same name. Returns the value of `success` in the response.
    pub async fn finish(
        &self,
        endpoint: &str,
        upload_session_id: &str,
        metadata: Params,
    ) -> Result<bool> {
        let mut params = metadata;
        params.insert(UPLOAD_PHASE.to_string(), Value::from("finish"));
        params.insert(
            UPLOAD_SESSION_ID.to_string(),
            Value::from(upload_session_id),
        );
        let body = self.post(endpoint, params, BTreeMap::new()).await?;
        match body.get(SUCCESS) {
            Some(Value::Bool(b)) => Ok(*b),
            _ => Err(missing_field(SUCCESS)),
        }
    }

    /// Uploads `file`, running all the phases.
    ///
    /// Each chunk is sent up to `max_transfer_tries` times while the service
    /// reports the chunk can be sent again. The next attempt returns any error
    /// to the caller.
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::client::Graph;
    /// # use graph_sdk::file::GraphFile;
    /// # use graph_sdk::builder::DEFAULT_MAX_TRANSFER_TRIES;
    /// # async fn sample(client: &Graph) -> anyhow::Result<()> {
    /// let file = GraphFile::open("my-video.mp4").await?;
    /// let metadata = [("title".to_string(), serde_json::json!("My video"))].into();
    /// let result = client
    ///     .resumable_uploader()
    ///     .upload("/me/videos", file, metadata, DEFAULT_MAX_TRANSFER_TRIES)
    ///     .await?;
    /// println!("video {} success={}", result.video_id, result.success);
    /// # Ok(()) }
    /// ```
    pub async fn upload(
        &self,
        endpoint: &str,
        file: GraphFile,
        metadata: Params,
        max_transfer_tries: u32,
    ) -> Result<UploadResult> {
        let size = file.size();
        let mut chunk = self.start(endpoint, file).await?;
        tracing::info!(
            upload_session_id = chunk.upload_session_id(),
            video_id = chunk.video_id(),
            size,
            "upload session started"
        );
        let mut remaining = max_transfer_tries;
        while !chunk.is_last_chunk() {
            match self.transfer(endpoint, &chunk, remaining == 0).await? {
                TransferOutcome::Advanced(next) => {
                    tracing::info!(
                        upload_session_id = next.upload_session_id(),
                        start_offset = next.start_offset(),
                        size,
                        "chunk uploaded"
                    );
                    remaining = max_transfer_tries;
                    chunk = next;
                }
                TransferOutcome::Retry(same) => {
                    remaining = remaining.saturating_sub(1);
                    chunk = same;
                }
            }
        }
        let success = self
            .finish(endpoint, chunk.upload_session_id(), metadata)
            .await?;
        Ok(UploadResult {
            video_id: chunk.video_id().to_string(),
            success,
        })
    }

    /// Sends one `POST` request with the uploader's credentials, and returns
    /// the decoded body.
    async fn post(
        &self,
        endpoint: &str,
        params: Params,
        files: BTreeMap<String, GraphFile>,
    ) -> Result<Map<String, Value>> {
        let request = GraphRequest {
            endpoint: endpoint.to_string(),
            method: Method::Post,
            params,
            files,
            access_token: self.access_token.clone(),
            etag: None,
            graph_version: self.graph_version.clone(),
        };
        let response = self.stub.execute(request).await?;
        Ok(response.into_decoded_body())
    }
}

fn missing_field(name: &str) -> Error {
    Error::deser(format!("missing or invalid field `{name}` in the response"))
}

/// Identifiers may be returned as strings or numbers.
fn string_field(body: &Map<String, Value>, name: &str) -> Result<String> {
    match body.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(missing_field(name)),
    }
}

/// Offsets may be returned as numbers or numeric strings.
fn offset_field(body: &Map<String, Value>, name: &str) -> Result<u64> {
    match body.get(name) {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| missing_field(name)),
        Some(Value::String(s)) => s.parse::<u64>().map_err(|_| missing_field(name)),
        _ => Err(missing_field(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Graph;
    use crate::error::GraphError;
    use crate::response::GraphResponse;
    use crate::stub::tests::MockGraph;
    use mockall::Sequence;
    use serde_json::json;
    use test_case::test_case;

    const ENDPOINT: &str = "/me/videos";

    fn response(v: Value) -> Result<GraphResponse> {
        let body = v.as_object().cloned().unwrap_or_default();
        Ok(GraphResponse::from_decoded_body(body))
    }

    fn resumable_error() -> Error {
        Error::service_with_http_metadata(
            GraphError::new(6000, "There was a problem uploading your video").set_subcode(1363030),
            Some(500),
            None,
        )
    }

    fn phase(req: &GraphRequest) -> Option<&str> {
        req.params().get(UPLOAD_PHASE).and_then(Value::as_str)
    }

    fn test_file() -> GraphFile {
        GraphFile::from_bytes("video.mp4", (0..50_u8).collect::<Vec<_>>())
    }

    fn test_chunk() -> anyhow::Result<TransferChunk> {
        Ok(TransferChunk::new(test_file(), "42", "1337", 0, 20)?)
    }

    #[tokio::test]
    async fn start() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute()
            .times(1)
            .withf(|req| {
                req.method() == Method::Post
                    && req.endpoint() == ENDPOINT
                    && phase(req) == Some("start")
                    && req.params().get(FILE_SIZE) == Some(&json!(50))
                    && req.access_token().map(|t| t.value()) == Some("upload-token")
                    && req.graph_version() == Some("v3.0")
            })
            .returning(|_| {
                response(json!({
                    "upload_session_id": "42", "video_id": "1337",
                    "start_offset": "0", "end_offset": "20"}))
            });

        let client = Graph::from_stub(mock);
        let chunk = client
            .resumable_uploader()
            .with_access_token("upload-token")
            .with_graph_version("v3.0")
            .start(ENDPOINT, test_file())
            .await?;
        assert_eq!(chunk.upload_session_id(), "42");
        assert_eq!(chunk.video_id(), "1337");
        assert_eq!((chunk.start_offset(), chunk.end_offset()), (0, 20));
        assert_eq!(chunk.file(), &test_file());
        Ok(())
    }

    #[tokio::test]
    async fn start_numeric_fields() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute().times(1).returning(|_| {
            response(json!({
                "upload_session_id": 42, "video_id": 1337,
                "start_offset": 0, "end_offset": 20}))
        });
        let client = Graph::from_stub(mock);
        let chunk = client.resumable_uploader().start(ENDPOINT, test_file()).await?;
        assert_eq!(chunk.upload_session_id(), "42");
        assert_eq!(chunk.video_id(), "1337");
        assert_eq!(chunk.end_offset(), 20);
        Ok(())
    }

    #[test_case(json!({"video_id": "1337", "start_offset": "0", "end_offset": "20"}))]
    #[test_case(json!({"upload_session_id": "42", "start_offset": "0", "end_offset": "20"}))]
    #[test_case(json!({"upload_session_id": "42", "video_id": "1337", "end_offset": "20"}))]
    #[test_case(json!({"upload_session_id": "42", "video_id": "1337", "start_offset": "abc", "end_offset": "20"}))]
    #[test_case(json!({"upload_session_id": "42", "video_id": "1337", "start_offset": "30", "end_offset": "20"}))]
    #[tokio::test]
    async fn start_bad_response(body: Value) -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute()
            .times(1)
            .returning(move |_| response(body.clone()));
        let client = Graph::from_stub(mock);
        let err = client
            .resumable_uploader()
            .start(ENDPOINT, test_file())
            .await
            .unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn start_error_propagates() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(resumable_error()));
        let client = Graph::from_stub(mock);
        let err = client
            .resumable_uploader()
            .start(ENDPOINT, test_file())
            .await
            .unwrap_err();
        assert!(err.is_resumable_upload(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn transfer() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute()
            .times(1)
            .withf(|req| {
                let chunk = req.files().get(FILE_CHUNK);
                phase(req) == Some("transfer")
                    && req.params().get(UPLOAD_SESSION_ID) == Some(&json!("42"))
                    && req.params().get(START_OFFSET) == Some(&json!(0))
                    && chunk.map(|f| f.contents().to_vec()) == Some((0..20_u8).collect())
                    && chunk.map(|f| f.name()) == Some("video.mp4")
            })
            .returning(|_| response(json!({"start_offset": "20", "end_offset": "40"})));

        let client = Graph::from_stub(mock);
        let chunk = test_chunk()?;
        let outcome = client
            .resumable_uploader()
            .transfer(ENDPOINT, &chunk, false)
            .await?;
        let TransferOutcome::Advanced(next) = outcome else {
            anyhow::bail!("expected an advanced chunk, got {outcome:?}");
        };
        assert_eq!((next.start_offset(), next.end_offset()), (20, 40));
        assert_eq!(next.upload_session_id(), "42");
        assert_eq!(next.video_id(), "1337");
        assert_eq!(next.file(), chunk.file());
        Ok(())
    }

    #[tokio::test]
    async fn transfer_retry() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(resumable_error()));

        let client = Graph::from_stub(mock);
        let chunk = test_chunk()?;
        let outcome = client
            .resumable_uploader()
            .transfer(ENDPOINT, &chunk, false)
            .await?;
        assert_eq!(outcome, TransferOutcome::Retry(chunk));
        Ok(())
    }

    #[tokio::test]
    async fn transfer_allow_throw() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(resumable_error()));

        let client = Graph::from_stub(mock);
        let err = client
            .resumable_uploader()
            .transfer(ENDPOINT, &test_chunk()?, true)
            .await
            .unwrap_err();
        assert!(err.is_resumable_upload(), "{err:?}");
        Ok(())
    }

    #[test_case(Error::service(GraphError::new(190, "expired")))]
    #[test_case(Error::service(GraphError::new(4, "too fast")))]
    #[test_case(Error::service(GraphError::new(6000, "other").set_subcode(1363022)))]
    #[test_case(Error::io("connection reset"))]
    #[tokio::test]
    async fn transfer_other_errors(error: Error) -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        let mut error = Some(error);
        mock.expect_execute()
            .times(1)
            .returning(move |_| Err(error.take().expect("called once")));

        let client = Graph::from_stub(mock);
        let got = client
            .resumable_uploader()
            .transfer(ENDPOINT, &test_chunk()?, false)
            .await;
        assert!(got.is_err(), "{got:?}");
        assert!(!got.unwrap_err().is_resumable_upload());
        Ok(())
    }

    #[tokio::test]
    async fn transfer_until_last_chunk() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        let mut seq = Sequence::new();
        for (start, end) in [(20, 40), (40, 50), (50, 50)] {
            mock.expect_execute()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| response(json!({"start_offset": start, "end_offset": end})));
        }

        let client = Graph::from_stub(mock);
        let uploader = client.resumable_uploader();
        let mut chunk = test_chunk()?;
        let mut steps = 0;
        while !chunk.is_last_chunk() {
            chunk = uploader.transfer(ENDPOINT, &chunk, false).await?.into_chunk();
            steps += 1;
            assert!(steps <= 3, "too many steps {chunk:?}");
        }
        assert_eq!(steps, 3);
        assert_eq!(chunk.start_offset(), 50);
        Ok(())
    }

    #[tokio::test]
    async fn finish() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute()
            .times(1)
            .withf(|req| {
                phase(req) == Some("finish")
                    && req.params().get(UPLOAD_SESSION_ID) == Some(&json!("42"))
                    && req.params().get("title") == Some(&json!("My video"))
            })
            .returning(|_| response(json!({"success": true})));

        let client = Graph::from_stub(mock);
        let metadata = Params::from([
            ("title".to_string(), json!("My video")),
            (UPLOAD_PHASE.to_string(), json!("bogus")),
            (UPLOAD_SESSION_ID.to_string(), json!("bogus")),
        ]);
        let success = client
            .resumable_uploader()
            .finish(ENDPOINT, "42", metadata)
            .await?;
        assert!(success);
        Ok(())
    }

    #[tokio::test]
    async fn finish_missing_success() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| response(json!({"id": "1337"})));
        let client = Graph::from_stub(mock);
        let err = client
            .resumable_uploader()
            .finish(ENDPOINT, "42", Params::new())
            .await
            .unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn happy_path() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        let mut seq = Sequence::new();
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| phase(req) == Some("start"))
            .returning(|_| {
                response(json!({
                    "upload_session_id": "42", "video_id": "1337",
                    "start_offset": 0, "end_offset": 20}))
            });
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| phase(req) == Some("transfer"))
            .returning(|_| response(json!({"start_offset": 20, "end_offset": 40})));
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| phase(req) == Some("finish"))
            .returning(|_| response(json!({"success": true})));

        let client = Graph::from_stub(mock);
        let uploader = client.resumable_uploader();
        let chunk = uploader.start(ENDPOINT, test_file()).await?;
        assert_eq!(chunk.upload_session_id(), "42");
        let next = uploader.transfer(ENDPOINT, &chunk, false).await?.into_chunk();
        assert_eq!(next.start_offset(), 20);
        let success = uploader
            .finish(ENDPOINT, next.upload_session_id(), Params::new())
            .await?;
        assert!(success);
        Ok(())
    }

    fn expect_start(mock: &mut MockGraph, seq: &mut Sequence) {
        mock.expect_execute()
            .times(1)
            .in_sequence(seq)
            .withf(|req| phase(req) == Some("start"))
            .returning(|_| {
                response(json!({
                    "upload_session_id": "42", "video_id": "1337",
                    "start_offset": 0, "end_offset": 20}))
            });
    }

    #[tokio::test]
    async fn upload() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        let mut seq = Sequence::new();
        expect_start(&mut mock, &mut seq);
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| req.params().get(START_OFFSET) == Some(&json!(0)))
            .returning(|_| response(json!({"start_offset": 20, "end_offset": 50})));
        // A rejected chunk is sent again.
        mock.expect_execute()
            .times(2)
            .in_sequence(&mut seq)
            .withf(|req| req.params().get(START_OFFSET) == Some(&json!(20)))
            .returning(|_| Err(resumable_error()));
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| req.params().get(START_OFFSET) == Some(&json!(20)))
            .returning(|_| response(json!({"start_offset": 50, "end_offset": 50})));
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| {
                phase(req) == Some("finish") && req.params().get("title") == Some(&json!("t"))
            })
            .returning(|_| response(json!({"success": true})));

        let client = Graph::from_stub(mock);
        let metadata = Params::from([("title".to_string(), json!("t"))]);
        let result = client
            .resumable_uploader()
            .upload(ENDPOINT, test_file(), metadata, DEFAULT_MAX_TRANSFER_TRIES)
            .await?;
        assert_eq!(
            result,
            UploadResult {
                video_id: "1337".into(),
                success: true
            }
        );
        Ok(())
    }

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(3)]
    #[tokio::test]
    async fn upload_too_many_retries(max_transfer_tries: u32) -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        let mut seq = Sequence::new();
        expect_start(&mut mock, &mut seq);
        // The last attempt returns the error instead of a retry.
        mock.expect_execute()
            .times(max_transfer_tries as usize + 1)
            .in_sequence(&mut seq)
            .withf(|req| phase(req) == Some("transfer"))
            .returning(|_| Err(resumable_error()));

        let client = Graph::from_stub(mock);
        let err = client
            .resumable_uploader()
            .upload(ENDPOINT, test_file(), Params::new(), max_transfer_tries)
            .await
            .unwrap_err();
        assert!(err.is_resumable_upload(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn upload_retries_reset_per_chunk() -> anyhow::Result<()> {
        let mut mock = MockGraph::new();
        let mut seq = Sequence::new();
        expect_start(&mut mock, &mut seq);
        for (start, end) in [(20, 40), (40, 50)] {
            mock.expect_execute()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Err(resumable_error()));
            mock.expect_execute()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| response(json!({"start_offset": start, "end_offset": end})));
        }
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(resumable_error()));
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| response(json!({"start_offset": 50, "end_offset": 50})));
        mock.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| phase(req) == Some("finish"))
            .returning(|_| response(json!({"success": false})));

        let client = Graph::from_stub(mock);
        let result = client
            .resumable_uploader()
            .upload(ENDPOINT, test_file(), Params::new(), 1)
            .await?;
        assert_eq!(result.video_id, "1337");
        assert!(!result.success);
        Ok(())
    }
}
