//! Simulation and scene-layout tuning constants.
//!
//! These constants express intended behavior (field extents, smoothing
//! factors, spin rates) and keep magic numbers out of the update loop.

// Particle field layout
pub const PARTICLE_COUNT: usize = 2000;
pub const FIELD_BOUNDS: [f32; 3] = [40.0, 20.0, 10.0]; // full extent per axis
pub const PARTICLE_SIZE: f32 = 0.03; // billboard half-size in world units
pub const VELOCITY_JITTER: f32 = 0.01;

// Wave motion
pub const WAVE_SPATIAL_FREQ: f32 = 0.2; // couples phase to the spawn anchor
pub const WAVE_AMPLITUDE: f32 = 0.2;
pub const POSITION_LERP: f32 = 0.1; // per-frame easing toward the target

// Pointer parallax
pub const PARALLAX_STRENGTH: f32 = 2.0;
pub const PARALLAX_DEPTH_OFFSET: f32 = 10.0; // z = -offset is unaffected

// Audio reactivity
pub const AUDIO_BIN_COUNT: usize = 128; // analyser fftSize 256
pub const AUDIO_SAMPLE_STRIDE: usize = 20; // every Nth particle samples audio
pub const AUDIO_DISPLACEMENT: f32 = 2.0;

// Opacity oscillation
pub const OPACITY_BASE: f32 = 0.3;
pub const OPACITY_SPAN: f32 = 0.2;

// Camera rig
pub const CAMERA_Z: f32 = 15.0;
pub const CAMERA_FOVY: f32 = 1.308_997; // 75 degrees
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const POINTER_SMOOTHING: f32 = 0.05; // pointer-target ease per frame
pub const CAMERA_SMOOTHING: f32 = 0.02; // eye ease per frame
pub const CAMERA_TRAVEL: f32 = 5.0; // eye offset at full pointer deflection

// Decorative shapes
pub const TORUS_MAJOR_RADIUS: f32 = 8.0;
pub const TORUS_TUBE_RADIUS: f32 = 0.5;
pub const ICOSAHEDRON_RADIUS: f32 = 1.5;
pub const OCTAHEDRON_RADIUS: f32 = 1.2;
pub const TETRAHEDRON_RADIUS: f32 = 1.0;
pub const SHAPE_RING_RADIUS: f32 = 6.0;

// Per-index spin rates (base + step, radians per simulated second)
pub const SHAPE_SPIN_X_BASE: f32 = 0.2;
pub const SHAPE_SPIN_X_STEP: f32 = 0.1;
pub const SHAPE_SPIN_Y_BASE: f32 = 0.3;
pub const SHAPE_SPIN_Y_STEP: f32 = 0.05;
pub const SHAPE_SPIN_Z_BASE: f32 = 0.1;
pub const SHAPE_SPIN_Z_STEP: f32 = 0.02;

// Floating drift for the orbiting polyhedra
pub const FLOAT_AMPLITUDE_X: f32 = 1.0;
pub const FLOAT_AMPLITUDE_Y: f32 = 2.0;
pub const FLOAT_FREQ_X: f32 = 0.5;
