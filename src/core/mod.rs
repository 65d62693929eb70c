pub mod camera;
pub mod constants;
pub mod driver;
pub mod geometry;
pub mod input;
pub mod ledger;
pub mod particles;
pub mod shapes;

pub use camera::*;
pub use constants::*;
pub use driver::*;
pub use input::*;
pub use ledger::*;
pub use particles::*;
pub use shapes::*;
