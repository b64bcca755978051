//! Streaming file downloads.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt};
use indicatif::ProgressBar;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::api::SiteClient;
use crate::error::{Error, Result};
use crate::output::create_download_bar;

/// Result of a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched {
    /// The file was written; carries the number of bytes.
    Written(u64),
    /// The destination already existed; nothing was requested.
    Skipped,
}

/// Download progress, driven by `(downloaded, total)` observations.
///
/// Progress only starts once the total size is known, and finishes exactly
/// once when the downloaded amount reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    NotStarted,
    InProgress { total: u64 },
    Done,
}

/// Transition emitted by [`ProgressState::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { total: u64 },
    Advanced { downloaded: u64 },
    Finished,
}

impl ProgressState {
    /// Feed one observation, returning the events it causes in order.
    pub fn observe(&mut self, downloaded: u64, total: Option<u64>) -> Vec<ProgressEvent> {
        let mut events = Vec::new();

        if let (ProgressState::NotStarted, Some(total)) = (*self, total) {
            if total > 0 {
                *self = ProgressState::InProgress { total };
                events.push(ProgressEvent::Started { total });
            }
        }

        if let ProgressState::InProgress { total } = *self {
            if downloaded >= total {
                *self = ProgressState::Done;
                events.push(ProgressEvent::Finished);
            } else {
                events.push(ProgressEvent::Advanced { downloaded });
            }
        }

        events
    }
}

/// Renders progress events as a terminal bar.
struct ProgressDisplay {
    file_name: String,
    state: ProgressState,
    bar: Option<ProgressBar>,
}

impl ProgressDisplay {
    fn new(file_name: String) -> Self {
        Self {
            file_name,
            state: ProgressState::NotStarted,
            bar: None,
        }
    }

    fn observe(&mut self, downloaded: u64, total: Option<u64>) {
        for event in self.state.observe(downloaded, total) {
            match event {
                ProgressEvent::Started { total } => {
                    self.bar = Some(create_download_bar(total, &self.file_name));
                }
                ProgressEvent::Advanced { downloaded } => {
                    if let Some(bar) = &self.bar {
                        bar.set_position(downloaded);
                    }
                }
                ProgressEvent::Finished => {
                    if let Some(bar) = &self.bar {
                        bar.finish();
                    }
                }
            }
        }
    }

    fn abandon(&self) {
        if let Some(bar) = &self.bar {
            bar.abandon();
        }
    }
}

/// Download `url` to `destination` unless the destination already exists.
///
/// The body is streamed into a `.part` file next to the destination and
/// renamed once complete. On failure the partial file is removed before the
/// error is returned.
pub async fn fetch(client: &SiteClient, url: &Url, destination: &Path) -> Result<Fetched> {
    if destination.exists() {
        tracing::debug!("Skipping existing file: {}", destination.display());
        return Ok(Fetched::Skipped);
    }

    let partial = partial_path(destination);
    match transfer(client, url, &partial, destination).await {
        Ok(written) => Ok(Fetched::Written(written)),
        Err(e) => {
            remove_partial(&partial).await;
            Err(e)
        }
    }
}

async fn transfer(
    client: &SiteClient,
    url: &Url,
    partial: &Path,
    destination: &Path,
) -> Result<u64> {
    let response = client.download(url).await?;
    let total = response.content_length();

    let file_name = destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let written = write_stream(response.bytes_stream(), total, partial, file_name).await?;
    tokio::fs::rename(partial, destination).await?;

    tracing::debug!("Downloaded {} bytes to {}", written, destination.display());
    Ok(written)
}

/// Stream chunks into `path`, reporting progress against `total`.
///
/// A body shorter than a known `total` is an error.
pub async fn write_stream<S, B, E>(
    stream: S,
    total: Option<u64>,
    path: &Path,
    file_name: String,
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut stream = std::pin::pin!(stream);
    let mut file = File::create(path).await?;
    let mut progress = ProgressDisplay::new(file_name);
    let mut downloaded: u64 = 0;

    progress.observe(downloaded, total);

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                progress.abandon();
                file.flush().await?;
                return Err(Error::Download(format!("Stream error: {}", e)));
            }
        };

        let bytes = chunk.as_ref();
        file.write_all(bytes).await?;
        downloaded += bytes.len() as u64;
        progress.observe(downloaded, total);
    }

    file.flush().await?;

    if let Some(total) = total {
        if downloaded != total {
            progress.abandon();
            return Err(Error::Download(format!(
                "Incomplete transfer: {} of {} bytes",
                downloaded, total
            )));
        }
    }

    Ok(downloaded)
}

/// Temporary path used while a download is in flight.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

/// Best-effort removal of a partially written file.
async fn remove_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!("Removed partial file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::debug!("Could not remove partial file {}: {}", path.display(), e),
    }
}
