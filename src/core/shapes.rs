//! Decorative wireframe shapes around the particle field: one torus plus a
//! small ring of polyhedra, each with an independent deterministic spin.

use glam::Vec3;
use smallvec::SmallVec;
use std::f32::consts::TAU;

use super::constants::*;
use super::ledger::{ResourceLedger, VisualHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Torus,
    Icosahedron,
    Octahedron,
    Tetrahedron,
}

impl ShapeKind {
    pub fn radius(&self) -> f32 {
        match self {
            ShapeKind::Torus => TORUS_MAJOR_RADIUS,
            ShapeKind::Icosahedron => ICOSAHEDRON_RADIUS,
            ShapeKind::Octahedron => OCTAHEDRON_RADIUS,
            ShapeKind::Tetrahedron => TETRAHEDRON_RADIUS,
        }
    }
}

pub struct Shape {
    pub kind: ShapeKind,
    pub base_position: Vec3,
    pub handle: VisualHandle,
}

/// The fixed decorative set. Shapes are only ever replaced wholesale: the
/// old handles are released, fresh ones allocated.
pub struct ShapeSet {
    shapes: SmallVec<[Shape; 4]>,
    disposed: bool,
}

impl ShapeSet {
    pub fn create(ledger: &mut ResourceLedger) -> Self {
        let mut shapes: SmallVec<[Shape; 4]> = SmallVec::new();
        shapes.push(Shape {
            kind: ShapeKind::Torus,
            base_position: Vec3::ZERO,
            handle: ledger.alloc(),
        });
        let polyhedra = [
            ShapeKind::Icosahedron,
            ShapeKind::Octahedron,
            ShapeKind::Tetrahedron,
        ];
        for (i, kind) in polyhedra.into_iter().enumerate() {
            let angle = i as f32 * TAU / polyhedra.len() as f32;
            shapes.push(Shape {
                kind,
                base_position: Vec3::new(
                    angle.cos() * SHAPE_RING_RADIUS,
                    angle.sin() * SHAPE_RING_RADIUS,
                    0.0,
                ),
                handle: ledger.alloc(),
            });
        }
        Self {
            shapes,
            disposed: false,
        }
    }

    /// Dispose the current set and build a fresh one.
    pub fn recreate(&mut self, ledger: &mut ResourceLedger) {
        self.dispose_all(ledger);
        *self = Self::create(ledger);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Release every shape's visual handle; the second call releases
    /// nothing.
    pub fn dispose_all(&mut self, ledger: &mut ResourceLedger) -> usize {
        if self.disposed {
            return 0;
        }
        self.disposed = true;
        let mut released = 0;
        for s in &self.shapes {
            match ledger.release(s.handle) {
                Ok(()) => released += 1,
                Err(e) => log::warn!("shape dispose: {e}"),
            }
        }
        released
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Rotation of shape `index` at accumulated simulation time `t`.
///
/// Pure in `(t, index)`: replaying a time sequence replays the rotations.
/// Distinct angular velocities keep the shapes visibly desynchronized.
#[inline]
pub fn rotation_at(t: f32, index: usize) -> Vec3 {
    let i = index as f32;
    Vec3::new(
        t * (SHAPE_SPIN_X_BASE + i * SHAPE_SPIN_X_STEP),
        t * (SHAPE_SPIN_Y_BASE + i * SHAPE_SPIN_Y_STEP),
        t * (SHAPE_SPIN_Z_BASE + i * SHAPE_SPIN_Z_STEP),
    )
}

/// Floating drift for the orbiting polyhedra; the torus spins in place.
#[inline]
pub fn float_offset_at(t: f32, index: usize) -> Vec3 {
    if index == 0 {
        return Vec3::ZERO;
    }
    let i = index as f32;
    Vec3::new(
        (t * FLOAT_FREQ_X + i).cos() * FLOAT_AMPLITUDE_X,
        (t + i).sin() * FLOAT_AMPLITUDE_Y,
        0.0,
    )
}
