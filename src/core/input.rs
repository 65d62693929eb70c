//! Last-write-wins input state shared between the event adapters and the
//! frame driver.
//!
//! Adapters overwrite; the driver copies one [`InputSnapshot`] per frame so
//! every particle in a frame observes the same pointer and audio values.

use glam::Vec2;

use super::constants::AUDIO_BIN_COUNT;

/// Pointer offset and audio amplitudes written by the input adapters.
#[derive(Clone)]
pub struct SharedInputState {
    pointer: Vec2,
    audio: [u8; AUDIO_BIN_COUNT],
}

impl Default for SharedInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedInputState {
    pub fn new() -> Self {
        Self {
            pointer: Vec2::ZERO,
            audio: [0; AUDIO_BIN_COUNT],
        }
    }

    /// Overwrite the pointer offset (normalized device coordinates).
    /// Intermediate samples between frames are discardable.
    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = ndc;
    }

    /// Overwrite the amplitude sequence verbatim. A shorter slice updates
    /// the leading bins and leaves the tail untouched.
    pub fn set_audio(&mut self, data: &[u8]) {
        let n = data.len().min(AUDIO_BIN_COUNT);
        self.audio[..n].copy_from_slice(&data[..n]);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// One consistent copy for the current frame.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pointer: self.pointer,
            audio: self.audio,
        }
    }
}

/// Per-frame copy of the shared state, taken once before the particle
/// update.
#[derive(Clone)]
pub struct InputSnapshot {
    pub pointer: Vec2,
    pub audio: [u8; AUDIO_BIN_COUNT],
}

impl InputSnapshot {
    /// Centered pointer, silent audio.
    pub fn still() -> Self {
        Self {
            pointer: Vec2::ZERO,
            audio: [0; AUDIO_BIN_COUNT],
        }
    }
}

/// Normalize client coordinates to [-1, 1] on both axes, +y up.
#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / width) * 2.0 - 1.0,
        -((client_y / height) * 2.0 - 1.0),
    )
}

/// Map one analyser byte to [0, 1].
#[inline]
pub fn audio_level01(byte: u8) -> f32 {
    byte as f32 / 255.0
}
