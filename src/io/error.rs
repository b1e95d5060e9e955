//! Error types for both pipeline stages
//!
//! [`PipelineError`] is the only error that escapes a run. The other three types
//! are soft failures: they are recorded in a stage outcome and logged, never raised.

use std::fmt;
use std::path::PathBuf;

/// Hard failures that terminate the run
#[derive(Debug)]
pub enum PipelineError {
    /// The historical text file does not exist
    MissingInput {
        /// Path that was checked
        path: PathBuf,
    },

    /// The API credential was not supplied
    MissingCredential {
        /// Environment variable the credential is read from
        variable: &'static str,
    },

    /// A configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The prompt template could not be compiled or rendered
    Prompt {
        /// Underlying template error
        source: minijinja::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed
    HttpClient {
        /// Underlying HTTP client error
        source: reqwest::Error,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput { path } => {
                write!(f, "Missing historical text file: {}", path.display())
            }
            Self::MissingCredential { variable } => {
                write!(
                    f,
                    "No API credential configured; set {variable} or pass --api-key"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Prompt { source } => write!(f, "Failed to render prompt: {source}"),
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::HttpClient { source } => write!(f, "Failed to build HTTP client: {source}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Prompt { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::HttpClient { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pipeline results
pub type Result<T> = std::result::Result<T, PipelineError>;

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpClient { source: err }
    }
}

impl From<minijinja::Error> for PipelineError {
    fn from(err: minijinja::Error) -> Self {
        Self::Prompt { source: err }
    }
}

/// Failure of the single chat-completion call
#[derive(Debug)]
pub enum CompletionError {
    /// The request never produced a response (DNS, TLS, connection, timeout)
    Transport {
        /// Underlying HTTP client error
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status (auth, quota, bad request)
    Status {
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        body: String,
    },

    /// The response body was not the expected JSON shape
    Malformed {
        /// Parser diagnostic
        reason: String,
    },

    /// The response carried no choice with text content
    EmptyResponse,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { source } => write!(f, "Completion request failed: {source}"),
            Self::Status { status, body } => {
                write!(f, "Completion endpoint returned HTTP {status}: {body}")
            }
            Self::Malformed { reason } => write!(f, "Malformed completion response: {reason}"),
            Self::EmptyResponse => write!(f, "Completion response contained no text"),
        }
    }
}

impl std::error::Error for CompletionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source } => Some(source),
            _ => None,
        }
    }
}

/// Failure of the sample raster download
#[derive(Debug)]
pub enum FetchError {
    /// The request never produced a response
    Transport {
        /// Source URL
        url: String,
        /// Underlying HTTP client error
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    Status {
        /// Source URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The connection failed while the body was being received
    Transfer {
        /// Source URL
        url: String,
        /// Underlying read error
        source: std::io::Error,
    },

    /// The response is not a TIFF and could not be decoded once saved
    NotTiff {
        /// Source URL
        url: String,
        /// First bytes of the response
        signature: Vec<u8>,
    },

    /// Writing the downloaded bytes to disk failed
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { url, source } => write!(f, "Failed to download {url}: {source}"),
            Self::Status { url, status } => write!(f, "Download of {url} returned HTTP {status}"),
            Self::Transfer { url, source } => {
                write!(f, "Connection lost while downloading {url}: {source}")
            }
            Self::NotTiff { url, signature } => write!(
                f,
                "Download of {url} is not a TIFF raster (starts with {signature:02x?}); nothing was saved"
            ),
            Self::Write { path, source } => {
                write!(f, "Failed to write download to '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            Self::Transfer { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Status { .. } | Self::NotTiff { .. } => None,
        }
    }
}

/// Classified failure of the visualization sequence
#[derive(Debug)]
pub enum VisualizationError {
    /// The raster file could not be opened
    Open {
        /// Raster path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The raster is not a decodable TIFF
    Decode {
        /// Raster path
        path: PathBuf,
        /// Underlying decoder error
        source: tiff::TiffError,
    },

    /// Decoded samples do not match the declared band layout
    Layout {
        /// Raster path
        path: PathBuf,
        /// Description of the mismatch
        reason: String,
    },

    /// The raster declares zero bands
    NoBands {
        /// Raster path
        path: PathBuf,
    },

    /// The selected band could not be turned into a figure
    Render {
        /// Description of the failure
        reason: String,
    },

    /// Failed to save the rendered figure to disk
    Save {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// The figure's parent directory could not be created
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for VisualizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Failed to open raster '{}': {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "Failed to decode raster '{}': {source}", path.display())
            }
            Self::Layout { path, reason } => {
                write!(f, "Unexpected band layout in '{}': {reason}", path.display())
            }
            Self::NoBands { path } => write!(f, "Raster '{}' has no bands", path.display()),
            Self::Render { reason } => write!(f, "Failed to render band: {reason}"),
            Self::Save { path, source } => {
                write!(f, "Failed to export figure to '{}': {source}", path.display())
            }
            Self::FileSystem { path, source } => {
                write!(
                    f,
                    "Failed to create directory '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for VisualizationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Save { source, .. } => Some(source),
            Self::Layout { .. } | Self::NoBands { .. } | Self::Render { .. } => None,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PipelineError {
    PipelineError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for the given path and operation
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> PipelineError {
    let path = path.into();
    move |source| PipelineError::FileSystem {
        path,
        operation,
        source,
    }
}
