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

use crate::file::GraphFile;
use crate::{Error, Result};
use bytes::Bytes;

/// The offsets returned by the service are inconsistent.
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("the start offset ({start_offset}) is past the end offset ({end_offset})")]
pub struct ChunkError {
    pub start_offset: u64,
    pub end_offset: u64,
}

/// The progress of a resumable upload.
///
/// A chunk identifies the upload session, the uploaded object, and the next
/// range of bytes to send. When the start and end offsets are equal the
/// upload is complete, see [is_last_chunk][TransferChunk::is_last_chunk].
///
/// Chunks are immutable, each successful transfer returns a new chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferChunk {
    file: GraphFile,
    upload_session_id: String,
    video_id: String,
    start_offset: u64,
    end_offset: u64,
}

impl TransferChunk {
    /// Creates a new chunk.
    ///
    /// Fails if `start_offset > end_offset`.
    pub fn new<S, V>(
        file: GraphFile,
        upload_session_id: S,
        video_id: V,
        start_offset: u64,
        end_offset: u64,
    ) -> Result<Self>
    where
        S: Into<String>,
        V: Into<String>,
    {
        if start_offset > end_offset {
            return Err(Error::deser(ChunkError {
                start_offset,
                end_offset,
            }));
        }
        Ok(Self {
            file,
            upload_session_id: upload_session_id.into(),
            video_id: video_id.into(),
            start_offset,
            end_offset,
        })
    }

    /// Returns a chunk for the same session, with a new range.
    pub(crate) fn advance(&self, start_offset: u64, end_offset: u64) -> Result<Self> {
        Self::new(
            self.file.clone(),
            self.upload_session_id.clone(),
            self.video_id.clone(),
            start_offset,
            end_offset,
        )
    }

    /// The file being uploaded.
    pub fn file(&self) -> &GraphFile {
        &self.file
    }

    /// The upload session, assigned by the service.
    pub fn upload_session_id(&self) -> &str {
        &self.upload_session_id
    }

    /// The id of the uploaded object, assigned by the service.
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn start_offset(&self) -> u64 {
        self.start_offset
    }

    pub fn end_offset(&self) -> u64 {
        self.end_offset
    }

    /// The service has received all the bytes.
    pub fn is_last_chunk(&self) -> bool {
        self.start_offset == self.end_offset
    }

    /// The bytes in `[start_offset, end_offset)`.
    ///
    /// The service may return an `end_offset` past the end of the file, the
    /// range stops at the end of the file. Fails if `start_offset` is past the
    /// end of the file.
    pub fn partial_file_contents(&self) -> Result<Bytes> {
        let end = self.end_offset.min(self.file.size());
        self.file.slice(self.start_offset, end)
    }
}

/// The result of a successful call to
/// [transfer][crate::builder::ResumableUploader::transfer].
#[derive(Clone, Debug, PartialEq)]
pub enum TransferOutcome {
    /// The service accepted the chunk, this is the next chunk to send.
    Advanced(TransferChunk),
    /// The service rejected the chunk, but the upload session is still valid.
    /// Send the same chunk again.
    Retry(TransferChunk),
}

impl TransferOutcome {
    /// The chunk to send next.
    pub fn chunk(&self) -> &TransferChunk {
        match self {
            Self::Advanced(c) | Self::Retry(c) => c,
        }
    }

    /// Consumes the outcome, returning the chunk to send next.
    pub fn into_chunk(self) -> TransferChunk {
        match self {
            Self::Advanced(c) | Self::Retry(c) => c,
        }
    }

    /// The chunk was rejected and must be sent again.
    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Retry(_))
    }
}

/// The result of a complete resumable upload.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct UploadResult {
    /// The id of the uploaded object.
    pub video_id: String,
    /// The value of `success` returned by the service at the end of the
    /// upload.
    pub success: bool,
}
