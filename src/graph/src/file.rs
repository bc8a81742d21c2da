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

//! Files attached to requests.

use crate::{Error, Result};
use bytes::Bytes;
use std::path::Path;

/// Errors reading or slicing a [GraphFile].
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum FileError {
    /// The requested offset is past the end of the file.
    #[error("offset {offset} is past the end of the file (size={size})")]
    OffsetOutOfRange { offset: u64, size: u64 },
    /// The requested slice is not contained in the file.
    #[error("the range [{start}, {end}) is invalid for a file with size={size}")]
    InvalidRange { start: u64, end: u64, size: u64 },
}

/// A file, or a range within a file, attached to a request.
///
/// The contents are loaded in memory. Cloning a `GraphFile` is cheap, the
/// contents are shared between clones.
///
/// # Example
/// ```
/// # use graph_sdk::file::GraphFile;
/// let file = GraphFile::from_bytes("hello.txt", "hello world");
/// assert_eq!(file.size(), 11);
/// assert_eq!(file.mime_type(), "text/plain");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GraphFile {
    name: String,
    contents: Bytes,
}

impl GraphFile {
    /// Reads the file at `path` into memory.
    ///
    /// # Example
    /// ```
    /// # use graph_sdk::file::GraphFile;
    /// # async fn sample() -> anyhow::Result<()> {
    /// let file = GraphFile::open("my-video.mp4").await?;
    /// println!("uploading {} bytes", file.size());
    /// # Ok(()) }
    /// ```
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await.map_err(Error::io)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            contents: Bytes::from(contents),
        })
    }

    /// Creates a file from an in-memory buffer.
    pub fn from_bytes<N, B>(name: N, contents: B) -> Self
    where
        N: Into<String>,
        B: Into<Bytes>,
    {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Restricts the file to a range.
    ///
    /// The new file starts at `offset`, and contains at most `max_length`
    /// bytes. With `None` the range extends to the end of the file.
    pub fn with_range(self, offset: u64, max_length: Option<u64>) -> Result<Self> {
        let size = self.size();
        if offset > size {
            return Err(Error::binding(FileError::OffsetOutOfRange { offset, size }));
        }
        let end = max_length
            .map(|m| offset.saturating_add(m).min(size))
            .unwrap_or(size);
        let contents = self.contents.slice(offset as usize..end as usize);
        Ok(Self {
            name: self.name,
            contents,
        })
    }

    /// The file name, without any directory components.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file size in bytes.
    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    /// The file contents.
    pub fn contents(&self) -> &Bytes {
        &self.contents
    }

    /// Returns the bytes in `[start, end)`.
    pub fn slice(&self, start: u64, end: u64) -> Result<Bytes> {
        let size = self.size();
        if start > end || end > size {
            return Err(Error::binding(FileError::InvalidRange { start, end, size }));
        }
        Ok(self.contents.slice(start as usize..end as usize))
    }

    /// The MIME type, guessed from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let extension = Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        extension
            .and_then(|e| {
                MIME_TYPES
                    .iter()
                    .find(|(ext, _)| *ext == e)
                    .map(|(_, mime)| *mime)
            })
            .unwrap_or(DEFAULT_MIME_TYPE)
    }
}

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    ("3gp", "video/3gpp"),
    ("avi", "video/x-msvideo"),
    ("bmp", "image/bmp"),
    ("flv", "video/x-flv"),
    ("gif", "image/gif"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("json", "application/json"),
    ("m4v", "video/x-m4v"),
    ("mkv", "video/x-matroska"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("ogg", "audio/ogg"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("txt", "text/plain"),
    ("webm", "video/webm"),
    ("webp", "image/webp"),
    ("wmv", "video/x-ms-wmv"),
];
