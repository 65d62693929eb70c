// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/core/constants.rs"]
mod sim_constants;
#[path = "../src/constants.rs"]
mod front_constants;

use front_constants::*;
use sim_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn easing_factors_are_fractions_of_a_frame() {
    assert!(POSITION_LERP > 0.0 && POSITION_LERP <= 1.0);
    assert!(POINTER_SMOOTHING > 0.0 && POINTER_SMOOTHING <= 1.0);
    assert!(CAMERA_SMOOTHING > 0.0 && CAMERA_SMOOTHING <= 1.0);

    // the pointer target leads, the eye trails
    assert!(POINTER_SMOOTHING > CAMERA_SMOOTHING);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn field_layout_is_sane() {
    assert!(PARTICLE_COUNT > 0);
    assert!(PARTICLE_SIZE > 0.0);
    assert!(FIELD_BOUNDS.iter().all(|&e| e > 0.0));
    // wide, shallower, thin: a backdrop plane rather than a cube
    assert!(FIELD_BOUNDS[0] > FIELD_BOUNDS[1]);
    assert!(FIELD_BOUNDS[1] > FIELD_BOUNDS[2]);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn audio_constants_line_up_with_the_analyser() {
    assert!(AUDIO_SAMPLE_STRIDE > 0);
    assert_eq!(ANALYSER_FFT_SIZE as usize, 2 * AUDIO_BIN_COUNT);
    assert!(AUDIO_POLL_MS > 0);
    assert!(AUDIO_DISPLACEMENT > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn opacity_oscillation_stays_renderable() {
    assert!(OPACITY_BASE - OPACITY_SPAN >= 0.0);
    assert!(OPACITY_BASE + OPACITY_SPAN <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_frustum_is_valid() {
    assert!(CAMERA_FOVY > 0.0 && CAMERA_FOVY < std::f32::consts::PI);
    assert!(CAMERA_ZNEAR > 0.0);
    assert!(CAMERA_ZFAR > CAMERA_ZNEAR);
    assert!(CAMERA_Z > CAMERA_ZNEAR && CAMERA_Z < CAMERA_ZFAR);
    assert!(CAMERA_TRAVEL > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn bloom_and_palette_are_within_range() {
    assert!(BLOOM_STRENGTH > 0.0);
    assert!((0.0..=1.0).contains(&BLOOM_THRESHOLD));
    for c in TORUS_COLOR.iter().chain(POLYHEDRON_COLOR.iter()) {
        assert!((0.0..=1.0).contains(c));
    }
    assert!((0.0..=1.0).contains(&TORUS_OPACITY));
    assert!((0.0..=1.0).contains(&POLYHEDRON_OPACITY));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shape_spin_rates_stay_distinct_across_indices() {
    // base + i*step must never collide for the four shape slots
    for i in 0..4usize {
        for j in (i + 1)..4usize {
            let di = i as f32;
            let dj = j as f32;
            assert!(
                (SHAPE_SPIN_X_BASE + di * SHAPE_SPIN_X_STEP
                    - (SHAPE_SPIN_X_BASE + dj * SHAPE_SPIN_X_STEP))
                    .abs()
                    > 1e-6
            );
        }
    }
    assert!(SHAPE_SPIN_X_STEP > 0.0);
    assert!(SHAPE_SPIN_Y_STEP > 0.0);
    assert!(SHAPE_SPIN_Z_STEP > 0.0);
}
