//! Single-attempt raster download

use crate::io::error::FetchError;
use crate::io::progress::ProgressFactory;
use indicatif::ProgressBar;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const TIFF_SIGNATURE_LEN: usize = 4;
const TIFF_SIGNATURES: [&[u8]; 4] = [b"II*\0", b"MM\0*", b"II+\0", b"MM\0+"];
const COPY_BUFFER_BYTES: usize = 64 * 1024;

/// Downloads a remote file to a local path
pub trait Fetcher {
    /// Fetch `url` into `destination`, returning the number of bytes written
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the bytes cannot be written
    fn fetch(&self, url: &str, destination: &Path) -> Result<u64, FetchError>;
}

/// Plain HTTP GET with no retry; only TIFF responses are saved
pub struct HttpFetcher {
    client: Client,
    progress: ProgressFactory,
}

impl HttpFetcher {
    /// Build a fetcher; `timeout = None` never times out
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (TLS backend failure)
    pub fn new(timeout: Option<Duration>, progress: ProgressFactory) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, progress })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<u64, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Only TIFF bodies may land at the raster path
        let mut signature = Vec::with_capacity(TIFF_SIGNATURE_LEN);
        response
            .by_ref()
            .take(TIFF_SIGNATURE_LEN as u64)
            .read_to_end(&mut signature)
            .map_err(|source| FetchError::Transfer {
                url: url.to_string(),
                source,
            })?;
        if !is_tiff_signature(&signature) {
            return Err(FetchError::NotTiff {
                url: url.to_string(),
                signature,
            });
        }

        // A failed transfer must not leave a truncated raster at the final path
        let partial = destination.with_extension("part");
        let pb = self
            .progress
            .download("Downloading sample raster", response.content_length());
        let written = stream_to_file(url, &signature, &mut response, &partial, &pb)
            .and_then(|bytes| {
                fs::rename(&partial, destination)
                    .map(|()| bytes)
                    .map_err(|source| FetchError::Write {
                        path: destination.to_path_buf(),
                        source,
                    })
            });
        pb.finish_and_clear();

        match written {
            Ok(bytes) => {
                debug!(bytes, path = %destination.display(), "download complete");
                Ok(bytes)
            }
            Err(error) => {
                let _ = fs::remove_file(&partial);
                Err(error)
            }
        }
    }
}

/// Whether `bytes` open with a classic or BigTIFF header in either byte order
pub fn is_tiff_signature(bytes: &[u8]) -> bool {
    TIFF_SIGNATURES.iter().any(|signature| bytes.starts_with(signature))
}

// Network read failures are Transfer errors; disk failures are Write errors
fn stream_to_file(
    url: &str,
    head: &[u8],
    body: &mut impl Read,
    partial: &Path,
    pb: &ProgressBar,
) -> Result<u64, FetchError> {
    let write_error = |source| FetchError::Write {
        path: partial.to_path_buf(),
        source,
    };

    let file = File::create(partial).map_err(write_error)?;
    let mut writer = pb.wrap_write(BufWriter::new(file));
    writer.write_all(head).map_err(write_error)?;

    let mut total = head.len() as u64;
    let mut buffer = vec![0u8; COPY_BUFFER_BYTES];
    loop {
        let read = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(FetchError::Transfer {
                    url: url.to_string(),
                    source,
                });
            }
        };
        let chunk = buffer.get(..read).unwrap_or_default();
        writer.write_all(chunk).map_err(write_error)?;
        total += read as u64;
    }

    writer.flush().map_err(write_error)?;
    Ok(total)
}
