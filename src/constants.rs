//! Frontend tuning constants: rendering, overlay wiring, and adapter
//! cadence.

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.7;
pub const BLOOM_THRESHOLD: f32 = 0.4;

// Scene palette (wireframe shapes; the particle tint lives in the shader)
pub const TORUS_COLOR: [f32; 3] = [0.42, 0.27, 0.76];
pub const POLYHEDRON_COLOR: [f32; 3] = [0.62, 0.48, 0.92];
pub const TORUS_OPACITY: f32 = 0.3;
pub const POLYHEDRON_OPACITY: f32 = 0.2;

// Torus tessellation
pub const TORUS_MAJOR_SEGMENTS: usize = 48;
pub const TORUS_TUBE_SEGMENTS: usize = 12;

// Element ids the page provides
pub const HERO_MOUNT_ID: &str = "hero-background";
pub const LOADING_OVERLAY_ID: &str = "loading-screen";
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";

// Ambient audio
pub const AMBIENT_AUDIO_SRC: &str = "/ambient.mp3";
pub const DEFAULT_VOLUME: f64 = 0.5;
pub const ANALYSER_FFT_SIZE: u32 = 256; // 128 bins
pub const AUDIO_POLL_MS: i32 = 33; // analyser cadence, independent of the frame loop

// Loading-screen dwell before the loop starts
pub const REVEAL_DELAY_MS: i32 = 2200;

// Canvas backing store cap
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
