// Host-side tests for the shared input state and its pure helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core"]
mod sim {
    pub mod constants;
    pub mod input;
}

use glam::Vec2;
use sim::constants::AUDIO_BIN_COUNT;
use sim::input::*;

#[test]
fn normalize_pointer_maps_corners_and_center() {
    let w = 1280.0;
    let h = 720.0;

    let center = normalize_pointer(640.0, 360.0, w, h);
    assert!(center.abs_diff_eq(Vec2::ZERO, 1e-6));

    // top-left is (-1, 1): +y is up
    let top_left = normalize_pointer(0.0, 0.0, w, h);
    assert!(top_left.abs_diff_eq(Vec2::new(-1.0, 1.0), 1e-6));

    let bottom_right = normalize_pointer(w, h, w, h);
    assert!(bottom_right.abs_diff_eq(Vec2::new(1.0, -1.0), 1e-6));
}

#[test]
fn normalize_pointer_ignores_degenerate_viewports() {
    assert_eq!(normalize_pointer(100.0, 100.0, 0.0, 720.0), Vec2::ZERO);
    assert_eq!(normalize_pointer(100.0, 100.0, 1280.0, 0.0), Vec2::ZERO);
}

#[test]
fn pointer_is_last_write_wins() {
    let mut state = SharedInputState::new();
    state.set_pointer(Vec2::new(-0.3, 0.8));
    state.set_pointer(Vec2::new(0.6, -0.1));
    // two notifications before one frame: only the latest is visible
    let snap = state.snapshot();
    assert_eq!(snap.pointer, Vec2::new(0.6, -0.1));
}

#[test]
fn audio_overwrite_is_verbatim() {
    let mut state = SharedInputState::new();
    let mut data = [0u8; AUDIO_BIN_COUNT];
    for (i, v) in data.iter_mut().enumerate() {
        *v = (i % 256) as u8;
    }
    state.set_audio(&data);
    assert_eq!(state.snapshot().audio, data);

    // a second write replaces the first
    state.set_audio(&[9; AUDIO_BIN_COUNT]);
    assert_eq!(state.snapshot().audio, [9; AUDIO_BIN_COUNT]);
}

#[test]
fn short_audio_slice_updates_leading_bins() {
    let mut state = SharedInputState::new();
    state.set_audio(&[200; AUDIO_BIN_COUNT]);
    state.set_audio(&[1, 2, 3]);
    let audio = state.snapshot().audio;
    assert_eq!(&audio[..3], &[1, 2, 3]);
    assert_eq!(audio[3], 200);
}

#[test]
fn snapshot_is_isolated_from_later_writes() {
    let mut state = SharedInputState::new();
    state.set_pointer(Vec2::new(0.5, 0.5));
    let snap = state.snapshot();
    state.set_pointer(Vec2::new(-1.0, -1.0));
    state.set_audio(&[77; AUDIO_BIN_COUNT]);
    assert_eq!(snap.pointer, Vec2::new(0.5, 0.5));
    assert_eq!(snap.audio, [0; AUDIO_BIN_COUNT]);
}

#[test]
fn audio_level_is_normalized_and_monotonic() {
    assert_eq!(audio_level01(0), 0.0);
    assert!((audio_level01(255) - 1.0).abs() < 1e-6);
    let mut prev = -1.0;
    for b in (0..=255).step_by(5) {
        let v = audio_level01(b as u8);
        assert!(v > prev);
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
}
