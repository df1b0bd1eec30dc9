//! Background fabric image loading.
//!
//! Reading an image happens on a worker thread; the result comes back over a
//! channel and is polled from the event loop. Each result carries the ticket
//! it was started with, so the store can drop results for a source that has
//! since been replaced.

use anyhow::{Context, Result};
use image::ImageReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, warn};

use crate::models::{FabricTicket, TextureInfo};
use crate::store::QuiltStore;

/// Message sent from the worker thread.
#[derive(Debug)]
struct LoadMessage {
    ticket: FabricTicket,
    source: PathBuf,
    outcome: Result<TextureInfo, String>,
}

/// What a poll found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Texture is ready and current
    Ready(String),
    /// Result arrived for a replaced source
    Stale,
    /// Reading the image failed
    Failed(String),
}

/// Owns the result channel and hands out texture handles.
#[derive(Debug)]
pub struct FabricLoader {
    sender: Sender<LoadMessage>,
    receiver: Receiver<LoadMessage>,
    next_handle: u64,
}

impl FabricLoader {
    /// Creates an idle loader.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            next_handle: 1,
        }
    }

    /// Starts reading `path` for the outstanding load `ticket`.
    pub fn spawn(&mut self, ticket: FabricTicket, path: PathBuf) {
        let handle = self.next_handle;
        self.next_handle += 1;
        let sender = self.sender.clone();

        debug!(generation = ticket.generation(), path = %path.display(), "Loading fabric");
        thread::spawn(move || {
            let outcome = read_texture_info(&path, handle).map_err(|e| format!("{e:#}"));
            // The receiver is gone only when the editor has exited.
            let _ = sender.send(LoadMessage {
                ticket,
                source: path,
                outcome,
            });
        });
    }

    /// Applies every finished load to the store.
    pub fn poll(&self, store: &mut QuiltStore) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => outcomes.push(apply(store, message)),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        outcomes
    }
}

impl Default for FabricLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(store: &mut QuiltStore, message: LoadMessage) -> LoadOutcome {
    match message.outcome {
        Ok(texture) => {
            if store.complete_fabric(message.ticket, texture) {
                LoadOutcome::Ready(message.source.display().to_string())
            } else {
                LoadOutcome::Stale
            }
        }
        Err(e) => {
            warn!(path = %message.source.display(), error = %e, "Fabric load failed");
            LoadOutcome::Failed(e)
        }
    }
}

/// Decodes an image header and returns its size.
///
/// The format is sniffed from the file contents, so the extension does not
/// matter. Files that are not a decodable image are an error.
pub fn read_texture_info(path: &Path, handle: u64) -> Result<TextureInfo> {
    let (width_px, height_px) = ImageReader::open(path)
        .with_context(|| format!("Failed to open fabric image {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read fabric image {}", path.display()))?
        .into_dimensions()
        .with_context(|| format!("{} is not a supported image", path.display()))?;
    Ok(TextureInfo {
        handle,
        width_px,
        height_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreAction;
    use image::{ImageFormat, RgbImage};
    use std::fs;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn write_image(path: &Path, width: u32, height: u32) {
        RgbImage::new(width, height)
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    fn poll_until_done(loader: &FabricLoader, store: &mut QuiltStore) -> Vec<LoadOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let outcomes = loader.poll(store);
            if !outcomes.is_empty() || Instant::now() > deadline {
                return outcomes;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_read_texture_info() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("calico.png");
        write_image(&path, 128, 64);

        let info = read_texture_info(&path, 3).unwrap();
        assert_eq!(
            info,
            TextureInfo {
                handle: 3,
                width_px: 128,
                height_px: 64
            }
        );

        // Format comes from the contents, not the extension
        let renamed = dir.path().join("calico.fabric");
        fs::copy(&path, &renamed).unwrap();
        assert_eq!(read_texture_info(&renamed, 4).unwrap().width_px, 128);
    }

    #[test]
    fn test_undecodable_files_are_rejected() {
        let dir = TempDir::new().unwrap();

        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "cut 6 strips of the blue").unwrap();
        assert!(read_texture_info(&notes, 1).is_err());

        let truncated = dir.path().join("linen.jpg");
        fs::write(&truncated, [0xff, 0xd8, 0xff]).unwrap();
        assert!(read_texture_info(&truncated, 2).is_err());

        assert!(read_texture_info(&dir.path().join("missing.png"), 3).is_err());
    }

    #[test]
    fn test_failed_load_leaves_fabric_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, "not an image").unwrap();

        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::SetFabricSource(path.display().to_string()));
        let ticket = store.fabric().pending().unwrap();

        let mut loader = FabricLoader::new();
        loader.spawn(ticket, path);
        let outcomes = poll_until_done(&loader, &mut store);

        assert!(matches!(outcomes.as_slice(), [LoadOutcome::Failed(_)]));
        assert!(!store.fabric().is_available());
    }

    #[test]
    fn test_load_completes_in_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plaid.png");
        write_image(&path, 32, 32);

        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::SetFabricSource(path.display().to_string()));
        let ticket = store.fabric().pending().unwrap();

        let mut loader = FabricLoader::new();
        loader.spawn(ticket, path);
        let outcomes = poll_until_done(&loader, &mut store);

        assert!(matches!(outcomes.as_slice(), [LoadOutcome::Ready(_)]));
        assert!(store.fabric().is_available());
    }

    #[test]
    fn test_replaced_source_is_stale() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.png");
        write_image(&first, 8, 8);

        let mut store = QuiltStore::default();
        store.dispatch(StoreAction::SetFabricSource(first.display().to_string()));
        let old_ticket = store.fabric().pending().unwrap();
        store.dispatch(StoreAction::SetFabricSource("second.png".into()));

        let mut loader = FabricLoader::new();
        loader.spawn(old_ticket, first);
        let outcomes = poll_until_done(&loader, &mut store);

        assert_eq!(outcomes, vec![LoadOutcome::Stale]);
        assert!(!store.fabric().is_available());
    }
}
