//! The particle field: a fixed-size collection of independently animated
//! point primitives.
//!
//! All particles are created together at scene initialization and disposed
//! together at teardown; none are added or removed individually.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

use super::constants::*;
use super::input::{audio_level01, InputSnapshot};
use super::ledger::{ResourceLedger, VisualHandle};

/// Independent per-axis spawn extents, centered on the origin.
#[derive(Clone, Copy, Debug)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x.abs() <= self.x * 0.5 && p.y.abs() <= self.y * 0.5 && p.z.abs() <= self.z * 0.5
    }
}

impl From<[f32; 3]> for Bounds {
    fn from(extent: [f32; 3]) -> Self {
        Self::new(extent[0], extent[1], extent[2])
    }
}

pub struct Particle {
    pub position: Vec3,
    pub original: Vec3,
    pub velocity: Vec3,
    pub phase: f32,
    pub opacity: f32,
    pub handle: VisualHandle,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    disposed: bool,
}

impl ParticleField {
    /// Allocate `count` particles uniformly within `bounds` and register one
    /// visual handle each.
    pub fn create(
        count: usize,
        bounds: Bounds,
        ledger: &mut ResourceLedger,
        rng: &mut impl Rng,
    ) -> Self {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * bounds.x,
                (rng.gen::<f32>() - 0.5) * bounds.y,
                (rng.gen::<f32>() - 0.5) * bounds.z,
            );
            particles.push(Particle {
                position,
                original: position,
                velocity: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * VELOCITY_JITTER,
                    (rng.gen::<f32>() - 0.5) * VELOCITY_JITTER,
                    (rng.gen::<f32>() - 0.5) * VELOCITY_JITTER,
                ),
                phase: rng.gen::<f32>() * TAU,
                opacity: OPACITY_BASE,
                handle: ledger.alloc(),
            });
        }
        Self {
            particles,
            disposed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every particle by `dt` seconds against one input snapshot.
    ///
    /// The target is rebuilt from the spawn anchor each frame; the current
    /// position eases toward it so pointer or audio jumps never pop.
    pub fn advance(&mut self, dt: f32, input: &InputSnapshot) {
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.phase = wrap_phase(p.phase + dt);

            let mut target = p.original;
            target.z += wave_offset(p.phase, p.original);

            let depth = parallax_factor(p.position.z);
            target.x += input.pointer.x * PARALLAX_STRENGTH * depth;
            target.y += input.pointer.y * PARALLAX_STRENGTH * depth;

            if i % AUDIO_SAMPLE_STRIDE == 0 {
                let level = audio_level01(input.audio[i % AUDIO_BIN_COUNT]);
                target.z += level * AUDIO_DISPLACEMENT;
            }

            p.position = p.position.lerp(target, POSITION_LERP);
            p.opacity = OPACITY_BASE + p.phase.sin() * OPACITY_SPAN;
        }
    }

    /// Release every particle's visual handle. The second call releases
    /// nothing.
    pub fn dispose_all(&mut self, ledger: &mut ResourceLedger) -> usize {
        if self.disposed {
            return 0;
        }
        self.disposed = true;
        let mut released = 0;
        for p in &self.particles {
            match ledger.release(p.handle) {
                Ok(()) => released += 1,
                Err(e) => log::warn!("particle dispose: {e}"),
            }
        }
        released
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Wrap an advanced phase back into [0, 2π). The cycle restarts; the
/// position is untouched.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    phase.rem_euclid(TAU)
}

/// Scalar wave offset anchored to the particle's spawn position.
#[inline]
pub fn wave_offset(phase: f32, original: Vec3) -> f32 {
    (phase + original.x * WAVE_SPATIAL_FREQ).sin() * WAVE_AMPLITUDE
        + (phase + original.y * WAVE_SPATIAL_FREQ).cos() * WAVE_AMPLITUDE
}

/// Depth falloff for pointer influence; particles further back move less.
#[inline]
pub fn parallax_factor(z: f32) -> f32 {
    (z + PARALLAX_DEPTH_OFFSET) / PARALLAX_DEPTH_OFFSET
}
