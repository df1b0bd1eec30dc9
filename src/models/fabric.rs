//! Fabric texture load tracking.
//!
//! Loading an image is the one asynchronous boundary of the designer. A
//! request hands out a [`FabricTicket`]; whoever decodes the image reports
//! back with that ticket. Each new request (or a clear) bumps the generation,
//! so a late result for a replaced source is recognized and dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Opaque handle to a decoded texture plus its natural size in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
    /// Loader-defined handle
    pub handle: u64,
    /// Natural width in pixels
    pub width_px: u32,
    /// Natural height in pixels
    pub height_px: u32,
}

/// Receipt for an outstanding texture load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FabricTicket {
    generation: u64,
}

impl FabricTicket {
    /// Generation this ticket was issued for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Current fabric source and, once loaded, its texture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FabricState {
    source: Option<String>,
    texture: Option<TextureInfo>,
    generation: u64,
}

impl FabricState {
    /// Creates an empty state with no source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts loading `source`, replacing any previous source or texture.
    pub fn request(&mut self, source: impl Into<String>) -> FabricTicket {
        self.generation = self.generation.wrapping_add(1);
        let source = source.into();
        debug!(generation = self.generation, %source, "Fabric load requested");
        self.source = Some(source);
        self.texture = None;
        FabricTicket {
            generation: self.generation,
        }
    }

    /// Records a finished load.
    ///
    /// Returns false (and keeps the current state) when the ticket belongs to
    /// a source that has since been replaced or cleared.
    pub fn complete(&mut self, ticket: FabricTicket, texture: TextureInfo) -> bool {
        if ticket.generation != self.generation || self.source.is_none() {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale fabric load"
            );
            return false;
        }
        debug!(
            width = texture.width_px,
            height = texture.height_px,
            "Fabric texture ready"
        );
        self.texture = Some(texture);
        true
    }

    /// Forgets the source and texture and invalidates outstanding tickets.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.source = None;
        self.texture = None;
    }

    /// Ticket for the load still outstanding for the current source.
    #[must_use]
    pub fn pending(&self) -> Option<FabricTicket> {
        (self.source.is_some() && self.texture.is_none()).then_some(FabricTicket {
            generation: self.generation,
        })
    }

    /// Source reference (path or URL) of the current fabric, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Loaded texture for the current source.
    #[must_use]
    pub fn texture(&self) -> Option<&TextureInfo> {
        self.texture.as_ref()
    }

    /// True once a texture has completed for the current source.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.source.is_some() && self.texture.is_some()
    }
}
