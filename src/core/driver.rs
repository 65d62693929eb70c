//! Frame-driver run state and the simulation aggregate it advances.

use rand::Rng;

use super::camera::CameraRig;
use super::input::InputSnapshot;
use super::ledger::ResourceLedger;
use super::particles::{Bounds, ParticleField};
use super::shapes::ShapeSet;

/// Linear progression only: no pause/resume, `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Uninitialized,
    Running,
    Stopped,
}

/// Explicit run-state holder so `stop` is a state transition rather than a
/// captured cancellation token.
#[derive(Debug, Default)]
pub struct DriverState {
    state: RunState,
}

impl DriverState {
    pub fn new() -> Self {
        Self {
            state: RunState::Uninitialized,
        }
    }

    /// Returns true when the first frame should be scheduled.
    pub fn start(&mut self) -> bool {
        match self.state {
            RunState::Uninitialized => {
                self.state = RunState::Running;
                true
            }
            RunState::Running | RunState::Stopped => false,
        }
    }

    /// Callable at any time, in any state. After this no further frames run.
    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn state(&self) -> RunState {
        self.state
    }
}

/// Everything the per-frame callback advances: accumulated simulation time,
/// the particle field, the decorative shapes, and the camera rig.
pub struct Simulation {
    pub time: f32,
    pub field: ParticleField,
    pub shapes: ShapeSet,
    pub camera: CameraRig,
}

impl Simulation {
    pub fn new(
        count: usize,
        bounds: Bounds,
        aspect: f32,
        ledger: &mut ResourceLedger,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            time: 0.0,
            field: ParticleField::create(count, bounds, ledger, rng),
            shapes: ShapeSet::create(ledger),
            camera: CameraRig::new(aspect),
        }
    }

    /// One simulation step against a single input snapshot. Particle and
    /// shape state settle before the camera moves; the caller renders after.
    pub fn advance(&mut self, dt: f32, input: &InputSnapshot) {
        let dt = dt.max(0.0);
        self.time += dt;
        self.field.advance(dt, input);
        // shape rotation is a pure function of (time, index); nothing to step
        self.camera.follow(input.pointer);
    }

    /// Release every visual handle owned by the simulation.
    pub fn dispose(&mut self, ledger: &mut ResourceLedger) -> usize {
        self.field.dispose_all(ledger) + self.shapes.dispose_all(ledger)
    }
}
