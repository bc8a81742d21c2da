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

use super::{GraphError, GraphErrorKind};
use http::HeaderMap;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by all client libraries.
///
/// The client libraries report errors from multiple sources. For example, the
/// service may return an error, the transport may be unable to create the
/// necessary connection to make a request, or the library may be unable to
/// format the request or parse the response.
///
/// Most applications will just return the error or log it, without any further
/// action. However, some applications may need to interrogate the error
/// details. This type offers a series of predicates to determine the error
/// kind. The type also offers accessors to query the most common error details.
/// Applications can query the error [source][std::error::Error::source] for
/// deeper information.
///
/// # Example
/// ```
/// use graph_sdk_gax::error::Error;
/// match example_function() {
///     Err(e) if e.is_throttle() => println!("slow down {e}"),
///     Err(e) if matches!(e.graph_error(), Some(_)) => {
///         println!("service error {e}, debug using {:?}", e.graph_error().unwrap());
///     },
///     Err(e) => println!("some other error {e}"),
///     Ok(_) => println!("success, how boring"),
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # use graph_sdk_gax::error::GraphError;
///     # Err(Error::service(GraphError::new(4, "application request limit reached")))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    /// Creates an error with the information returned by the Graph API.
    ///
    /// # Example
    /// ```
    /// use graph_sdk_gax::error::{Error, GraphError};
    /// let payload = GraphError::new(190, "Invalid OAuth access token.");
    /// let error = Error::service(payload.clone());
    /// assert_eq!(error.graph_error(), Some(&payload));
    /// assert!(error.is_authentication());
    /// ```
    pub fn service(error: GraphError) -> Self {
        Self::service_with_http_metadata(error, None, None)
    }

    /// Creates an error with the information returned by the Graph API,
    /// including the HTTP status code and headers of the response.
    pub fn service_with_http_metadata(
        error: GraphError,
        status_code: Option<u16>,
        headers: Option<HeaderMap>,
    ) -> Self {
        let details = ServiceDetails {
            error,
            status_code,
            headers,
        };
        Self {
            kind: ErrorKind::Service(Box::new(details)),
            source: None,
        }
    }

    /// The [GraphError] payload associated with this error.
    ///
    /// The Graph API returns a detailed error including a numeric code, an
    /// optional subcode, a type, and a human-readable message. Use
    /// [GraphError::kind] to classify the error.
    pub fn graph_error(&self) -> Option<&GraphError> {
        match &self.kind {
            ErrorKind::Service(d) => Some(&d.error),
            _ => None,
        }
    }

    /// The classification of the service error, if any.
    pub fn graph_error_kind(&self) -> Option<GraphErrorKind> {
        self.graph_error().map(GraphError::kind)
    }

    /// A chunk of a resumable upload was rejected.
    ///
    /// The upload session remains valid. Applications can send the same
    /// chunk again.
    pub fn is_resumable_upload(&self) -> bool {
        self.graph_error_kind() == Some(GraphErrorKind::ResumableUpload)
    }

    /// The access token is missing, invalid, or expired.
    ///
    /// # Troubleshooting
    ///
    /// Obtain a new access token, retrying with the same token will fail
    /// again.
    pub fn is_authentication(&self) -> bool {
        self.graph_error_kind() == Some(GraphErrorKind::Authentication)
    }

    /// The access token lacks the permissions required by the request.
    pub fn is_authorization(&self) -> bool {
        self.graph_error_kind() == Some(GraphErrorKind::Authorization)
    }

    /// The application, user, or page exceeded its request quota.
    ///
    /// # Troubleshooting
    ///
    /// Reduce the request rate. The quota is typically restored after some
    /// time.
    pub fn is_throttle(&self) -> bool {
        self.graph_error_kind() == Some(GraphErrorKind::Throttle)
    }

    /// The service reports a transient problem.
    pub fn is_server(&self) -> bool {
        self.graph_error_kind() == Some(GraphErrorKind::Server)
    }

    /// The HTTP status code, if any, associated with this error.
    ///
    /// # Example
    /// ```
    /// use graph_sdk_gax::error::Error;
    /// let e = Error::http(400, http::HeaderMap::new(), bytes::Bytes::from_static(b"BAD REQUEST"));
    /// assert_eq!(e.http_status_code(), Some(400));
    /// ```
    pub fn http_status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Transport(d) => d.status_code,
            ErrorKind::Service(d) => d.status_code,
            _ => None,
        }
    }

    /// The headers, if any, associated with this error.
    pub fn http_headers(&self) -> Option<&HeaderMap> {
        match &self.kind {
            ErrorKind::Transport(d) => d.headers.as_ref(),
            ErrorKind::Service(d) => d.headers.as_ref(),
            _ => None,
        }
    }

    /// The payload, if any, associated with this error.
    ///
    /// Only errors that could not be parsed as a [GraphError] keep the
    /// payload, for example errors generated by proxies.
    pub fn http_payload(&self) -> Option<&bytes::Bytes> {
        match &self.kind {
            ErrorKind::Transport(d) => d.payload.as_ref(),
            _ => None,
        }
    }

    /// Creates an error representing a timeout.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use graph_sdk_gax::error::Error;
    /// let error = Error::timeout("simulated timeout");
    /// assert!(error.is_timeout());
    /// assert!(error.source().is_some());
    /// ```
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            source: Some(source.into()),
        }
    }

    /// The request could not be completed before its deadline.
    ///
    /// This is always a client-side generated error. Note that the request may
    /// or may not have started, and it may or may not complete in the service.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Creates an error representing a deserialization problem.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use graph_sdk_gax::error::Error;
    /// let error = Error::deser("simulated problem");
    /// assert!(error.is_deserialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            source: Some(source.into()),
        }
    }

    /// The response could not be deserialized.
    ///
    /// This is always a client-side generated error. It is also returned when
    /// a response lacks a field the client library needs, for example, the
    /// `upload_session_id` in the response to a resumable upload start.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Creates an error representing a serialization problem.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use graph_sdk_gax::error::Error;
    /// let error = Error::ser("simulated problem");
    /// assert!(error.is_serialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Serialization,
            source: Some(source.into()),
        }
    }

    /// The request could not be serialized.
    ///
    /// This is always a client-side generated error, generated before the
    /// request is made. This error is never transient: the serialization is
    /// deterministic, and will fail on future attempts with the same input
    /// data.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// Creates an error representing a request that cannot be sent.
    ///
    /// For example, a request with an empty endpoint, or a file range outside
    /// the file.
    pub fn binding<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Binding,
            source: Some(source.into()),
        }
    }

    /// The request is missing required fields or has invalid values.
    pub fn is_binding(&self) -> bool {
        matches!(&self.kind, ErrorKind::Binding)
    }

    /// Creates an error with the information returned by an HTTP response
    /// that does not contain a [GraphError].
    pub fn http(status_code: u16, headers: HeaderMap, payload: bytes::Bytes) -> Self {
        let details = TransportDetails {
            status_code: Some(status_code),
            headers: Some(headers),
            payload: Some(payload),
        };
        let kind = ErrorKind::Transport(Box::new(details));
        Self { kind, source: None }
    }

    /// Creates an error representing an I/O problem, e.g. a failure to
    /// connect, or a failure reading a local file.
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        let details = TransportDetails {
            status_code: None,
            headers: None,
            payload: None,
        };
        Self {
            kind: ErrorKind::Transport(Box::new(details)),
            source: Some(source.into()),
        }
    }

    /// A problem in the transport layer without a full HTTP response.
    pub fn is_io(&self) -> bool {
        matches!(
        &self.kind,
        ErrorKind::Transport(d) if matches!(**d, TransportDetails {
            status_code: None,
            headers: None,
            payload: None,
        }))
    }

    /// A problem reported by the transport layer.
    ///
    /// This includes HTTP errors that could not be parsed as a [GraphError],
    /// and I/O errors.
    pub fn is_transport(&self) -> bool {
        matches!(&self.kind, ErrorKind::Transport { .. })
    }

    /// Creates an unclassified error.
    pub fn other<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Other,
            source: Some(source.into()),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::Binding, Some(e)) => write!(f, "cannot build the request {e}"),
            (ErrorKind::Serialization, Some(e)) => write!(f, "cannot serialize the request {e}"),
            (ErrorKind::Deserialization, Some(e)) => {
                write!(f, "cannot deserialize the response {e}")
            }
            (ErrorKind::Timeout, Some(e)) => {
                write!(f, "the request exceeded the request deadline {e}")
            }
            (ErrorKind::Transport(details), _) => details.display(self.source(), f),
            (ErrorKind::Service(d), _) => write!(
                f,
                "the service reports an error of kind {:?}: {}",
                d.error.kind(),
                d.error
            ),
            (ErrorKind::Other, Some(e)) => {
                write!(f, "an unclassified problem making a request: {e}")
            }
            (_, None) => unreachable!("no constructor allows this"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error))
    }
}

#[derive(Debug)]
enum ErrorKind {
    Binding,
    Serialization,
    Deserialization,
    Timeout,
    Transport(Box<TransportDetails>),
    Service(Box<ServiceDetails>),
    Other,
}

#[derive(Debug)]
struct TransportDetails {
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
    payload: Option<bytes::Bytes>,
}

impl TransportDetails {
    fn display(
        &self,
        source: Option<&(dyn StdError + 'static)>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match (source, &self) {
            (
                _,
                TransportDetails {
                    status_code: Some(code),
                    payload: Some(p),
                    ..
                },
            ) => {
                if let Ok(message) = std::str::from_utf8(p.as_ref()) {
                    write!(f, "the HTTP transport reports a [{code}] error: {message}")
                } else {
                    write!(f, "the HTTP transport reports a [{code}] error: {p:?}")
                }
            }
            (Some(source), _) => write!(f, "the transport reports an error: {source}"),
            (None, _) => unreachable!("no Error constructor allows this"),
        }
    }
}

#[derive(Debug)]
struct ServiceDetails {
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
    error: GraphError,
}
