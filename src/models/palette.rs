//! Preset swatches and saved color slots for the color picker.

use serde::{Deserialize, Serialize};

/// Preset swatches offered by every color picker.
pub const PRESET_COLORS: [&str; 8] = [
    "#ffffff", "#d9d9d9", "#555555", "#000000", "#ff0000", "#0066ff", "#00aa55", "#d4af37",
];

/// Number of saved color slots.
pub const SAVED_SLOTS: usize = 6;

/// Fixed set of user-saved colors. Empty slots are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedColors {
    slots: [Option<String>; SAVED_SLOTS],
}

impl SavedColors {
    /// Creates an empty set of slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `color` in `slot`. Out-of-range slots are ignored.
    ///
    /// Returns true if the slot exists.
    pub fn save(&mut self, slot: usize, color: &str) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = Some(color.to_string());
                true
            }
            None => false,
        }
    }

    /// Color stored in `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.as_deref())
    }

    /// Empties `slot`. Out-of-range slots are ignored.
    pub fn clear(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = None;
        }
    }

    /// All slots in order.
    #[must_use]
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }
}
